//! Person record and request payloads

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::store::{StoreError, StoreResult};

/// Store-assigned person identifier.
///
/// Serialized as the canonical hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(Uuid);

impl PersonId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier, rejecting anything that is not a UUID.
    ///
    /// This is the store's id-format check: a malformed identifier is
    /// reported as [`StoreError::MalformedId`], never as "not found".
    pub fn parse(raw: &str) -> StoreResult<Self> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| StoreError::MalformedId(raw.to_string()))
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A stored phonebook entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub number: String,
}

/// A validated person that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub number: String,
}

impl NewPerson {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }
}

/// Request body for create and update.
///
/// Both fields are optional at the wire level so that a missing field can
/// be reported as a validation failure rather than a decoding failure.
/// Numbers and booleans are kept in their text form; `null`, arrays and
/// objects read as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PersonInput {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub number: Option<String>,
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

impl PersonInput {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            number: Some(number.into()),
        }
    }

    /// Decodes a JSON request body. Anything that is not a JSON object
    /// reads as an empty input.
    pub fn from_json_slice(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Returns the person to insert, or `None` if either field is missing
    /// or empty.
    pub fn into_new_person(self) -> Option<NewPerson> {
        match (self.name, self.number) {
            (Some(name), Some(number)) if !name.is_empty() && !number.is_empty() => {
                Some(NewPerson { name, number })
            }
            _ => None,
        }
    }
}

/// Field replacement applied by update-by-id.
///
/// Absent fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonUpdate {
    pub name: Option<String>,
    pub number: Option<String>,
}

impl PersonUpdate {
    /// Apply the present fields to `person`, keeping its id
    pub fn apply_to(&self, person: &mut Person) {
        if let Some(name) = &self.name {
            person.name = name.clone();
        }
        if let Some(number) = &self.number {
            person.number = number.clone();
        }
    }
}

impl From<PersonInput> for PersonUpdate {
    fn from(input: PersonInput) -> Self {
        Self {
            name: input.name,
            number: input.number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, number: &str) -> Person {
        Person {
            id: PersonId::generate(),
            name: name.to_string(),
            number: number.to_string(),
        }
    }

    #[test]
    fn test_parse_round_trips_display() {
        let id = PersonId::generate();
        assert_eq!(PersonId::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let err = PersonId::parse("not-an-id").unwrap_err();
        assert!(matches!(err, StoreError::MalformedId(raw) if raw == "not-an-id"));
    }

    #[test]
    fn test_person_json_shape() {
        let p = person("Ada", "123");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], p.id.to_string());
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["number"], "123");
    }

    #[test]
    fn test_input_requires_both_fields() {
        assert!(PersonInput::new("Ada", "123").into_new_person().is_some());
        assert!(PersonInput::new("", "123").into_new_person().is_none());
        assert!(PersonInput::new("Ada", "").into_new_person().is_none());
        assert!(PersonInput::default().into_new_person().is_none());

        let only_name: PersonInput = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert!(only_name.into_new_person().is_none());
    }

    #[test]
    fn test_input_keeps_scalars_as_text() {
        let input = PersonInput::from_json_slice(br#"{"name":123,"number":true}"#);
        assert_eq!(input, PersonInput::new("123", "true"));

        let input = PersonInput::from_json_slice(br#"{"name":{"first":"Ada"},"number":null}"#);
        assert_eq!(input, PersonInput::default());
    }

    #[test]
    fn test_undecodable_body_reads_as_empty_input() {
        assert_eq!(PersonInput::from_json_slice(b""), PersonInput::default());
        assert_eq!(PersonInput::from_json_slice(b"name=Ada"), PersonInput::default());
        assert_eq!(PersonInput::from_json_slice(b"[1, 2]"), PersonInput::default());
    }

    #[test]
    fn test_update_keeps_absent_fields() {
        let mut p = person("Ada", "123");
        let id = p.id;

        PersonUpdate {
            name: None,
            number: Some("999".to_string()),
        }
        .apply_to(&mut p);

        assert_eq!(p.id, id);
        assert_eq!(p.name, "Ada");
        assert_eq!(p.number, "999");
    }
}
