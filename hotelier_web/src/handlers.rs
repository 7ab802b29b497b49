pub mod clients;
pub mod employees;
pub mod reservations;
pub mod rooms;

use axum::response::Html;

use crate::{error::PageError, views};

pub async fn home() -> Html<String> {
    Html(views::home())
}

pub async fn fallback() -> PageError {
    PageError::not_found("Cette page n'existe pas.")
}

/// Parses the `:id` path segment; anything but a positive integer is a
/// missing page.
fn parse_id<I: From<u64>>(raw: &str) -> Result<I, PageError> {
    match raw.parse::<u64>() {
        Ok(id) if id > 0 => Ok(I::from(id)),
        _ => Err(PageError::not_found(format!("Identifiant invalide : {raw}"))),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use hotelier::domain::core::RoomId;

    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id::<RoomId>("12").unwrap(), RoomId::from(12));
        for raw in ["0", "-1", "douze", ""] {
            assert_eq!(
                parse_id::<RoomId>(raw).unwrap_err().status(),
                StatusCode::NOT_FOUND
            );
        }
    }
}
