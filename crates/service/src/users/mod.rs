//! Users module: domain, repository, validation and the service on top.

pub mod age;
pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;
pub mod validator;

pub use service::UserService;
pub use validator::UserSettings;
