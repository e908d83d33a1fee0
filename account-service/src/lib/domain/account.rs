pub mod errors;
pub mod models;
pub mod ports;
pub mod service;

pub use models::Account;
pub use models::AccountId;
pub use models::EmailAddress;
pub use service::AccountService;
