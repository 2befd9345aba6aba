//! # Phonebook
//!
//! The API handler behind the HTTP routes: list, get, create, update and
//! delete persons against an injected [`PersonStore`](crate::store::PersonStore).
//!
//! Create is the only operation with rules of its own. It rejects a missing
//! name or number, then a name already in use, then a number already in
//! use, in that order.

mod errors;
mod service;

pub use errors::{PhonebookError, PhonebookResult};
pub use service::Phonebook;
