pub mod catalog_service;
pub mod history_service;

pub use catalog_service::*;
pub use history_service::*;
