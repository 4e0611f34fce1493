// Question bank collection: persistence, validation, dashboard/editor operations, HTTP handlers.

pub mod handlers;
pub mod seed;
pub mod service;
pub mod store;
pub mod validation;

pub use service::BankService;
pub use store::{BankStore, JsonFileStore};
