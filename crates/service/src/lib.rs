//! Service layer providing the user business operations on top of `models`.
//! - Separates business logic from data access.
//! - Storage sits behind the `UserRepository` trait.

pub mod errors;
pub mod users;
