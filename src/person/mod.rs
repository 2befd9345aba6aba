//! Person records
//!
//! A person is a flat `{id, name, number}` document. Names and numbers are
//! unique across the phonebook on creation.

mod model;

pub use model::{NewPerson, Person, PersonId, PersonInput, PersonUpdate};
