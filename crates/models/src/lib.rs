//! SeaORM entities and connection helpers for the users store.

pub mod db;
pub mod user;

#[cfg(test)]
mod tests;
