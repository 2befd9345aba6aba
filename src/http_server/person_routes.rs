//! Person HTTP Routes
//!
//! CRUD endpoints under `/api/persons`.
//!
//! Create and update bodies are read leniently: a body that is missing,
//! not labelled as JSON or not a JSON object reads as `{}` and reaches the
//! phonebook, which answers with its own validation error.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};

use crate::person::{Person, PersonInput};
use crate::phonebook::Phonebook;
use crate::store::PersonStore;

use super::errors::{unknown_endpoint, ApiError};

/// Create person routes
pub fn person_routes<S: PersonStore + 'static>(phonebook: Phonebook<S>) -> Router {
    Router::new()
        .route(
            "/api/persons",
            get(list_persons_handler::<S>)
                .post(create_person_handler::<S>)
                .fallback(unknown_endpoint),
        )
        .route(
            "/api/persons/:id",
            get(get_person_handler::<S>)
                .put(update_person_handler::<S>)
                .delete(delete_person_handler::<S>)
                .fallback(unknown_endpoint),
        )
        .with_state(phonebook)
}

async fn list_persons_handler<S: PersonStore + 'static>(
    State(phonebook): State<Phonebook<S>>,
) -> Result<Json<Vec<Person>>, ApiError> {
    Ok(Json(phonebook.list().await?))
}

/// Answers `null` with 200 when the id is well formed but unknown
async fn get_person_handler<S: PersonStore + 'static>(
    State(phonebook): State<Phonebook<S>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Person>>, ApiError> {
    Ok(Json(phonebook.get(&id).await?))
}

async fn create_person_handler<S: PersonStore + 'static>(
    State(phonebook): State<Phonebook<S>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Person>, ApiError> {
    let input = person_input(&headers, &body);
    Ok(Json(phonebook.create(input).await?))
}

async fn update_person_handler<S: PersonStore + 'static>(
    State(phonebook): State<Phonebook<S>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Person>, ApiError> {
    let input = person_input(&headers, &body);
    Ok(Json(phonebook.update(&id, input).await?))
}

async fn delete_person_handler<S: PersonStore + 'static>(
    State(phonebook): State<Phonebook<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    phonebook.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn person_input(headers: &HeaderMap, body: &[u8]) -> PersonInput {
    if is_json(headers) {
        PersonInput::from_json_slice(body)
    } else {
        PersonInput::default()
    }
}

/// `application/json` or any `+json` media type, parameters ignored
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_json_content_types() {
        assert!(is_json(&headers("application/json")));
        assert!(is_json(&headers("Application/JSON; charset=utf-8")));
        assert!(is_json(&headers("application/merge-patch+json")));
        assert!(!is_json(&headers("text/plain")));
        assert!(!is_json(&HeaderMap::new()));
    }

    #[test]
    fn test_body_ignored_without_json_content_type() {
        let body = br#"{"name":"Ada","number":"123"}"#;
        assert_eq!(person_input(&HeaderMap::new(), body), PersonInput::default());
        assert_eq!(
            person_input(&headers("application/json"), body),
            PersonInput::new("Ada", "123")
        );
    }
}
