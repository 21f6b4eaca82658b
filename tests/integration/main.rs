//! Integration tests for the Elidune store

mod menu_tests;
mod store_tests;
