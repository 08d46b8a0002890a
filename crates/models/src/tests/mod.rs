/// Connection and schema bootstrap tests
pub mod db_tests;

/// Entity-level CRUD against SQLite
pub mod crud_tests;
