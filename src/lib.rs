//! phonebook - a small phonebook service
//!
//! Persons (`{id, name, number}`) are served over HTTP from a pluggable
//! document store. Names and numbers are checked for uniqueness when a
//! person is created.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod person;
pub mod phonebook;
pub mod store;
