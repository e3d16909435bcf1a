pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod http_transport;
        pub(crate) mod utils;
        pub(crate) mod verify_receipt_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod verify_receipt {
            pub(crate) mod request_model;
            pub(crate) mod response_model;
        }
    }
    pub(crate) mod repositories {
        pub(crate) mod receipt_repository_impl;
    }
}

pub mod domain {
    pub mod entities {
        pub mod purchase_claim;
        pub mod raw_receipt;
        pub mod verified_receipt;
        pub mod verify_receipt_status;
    }
    pub mod repositories {
        pub mod receipt_repository;
    }
}

pub mod config;
pub mod constants;
pub mod errors;
pub mod util;
