//! Wire DTOs for the book catalogue REST API.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's JSON exactly (`bookRatings`, `userid`,
//! `catID`) so responses can be patched locally and re-rendered without a
//! separate view-model layer.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A book category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub id: i64,
    pub name: String,
}

/// One user's star rating of a book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRating {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub userid: i64,
    pub rating: u8,
}

/// Marker that a user has favorited a book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub userid: i64,
}

/// A catalogue entry as returned by `GET books`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub isbn: String,
    /// Cover image, either a full data URL or bare base64 JPEG bytes.
    #[serde(default)]
    pub base64: Option<String>,
    #[serde(default)]
    pub pages: i64,
    pub category: Category,
    #[serde(default)]
    pub book_ratings: Vec<BookRating>,
    #[serde(default)]
    pub favorited_by_users: Vec<Favorite>,
}

/// Request body for `books/add` and `books/edit/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPayload {
    pub title: String,
    pub description: String,
    pub isbn: String,
    pub base64: String,
    pub pages: i64,
    #[serde(rename = "catID")]
    pub cat_id: i64,
}

/// A comment left on a book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    pub id: i64,
    pub comment: String,
    pub username: String,
}

/// Request body for `auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Successful `auth/login` response body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Error body the backend attaches to 400 responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Accept an integer id encoded as a JSON integer, an integral float, or a
/// numeric string.
pub(crate) fn deserialize_i64_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    i64_from_value(&value).map_err(D::Error::custom)
}

pub(crate) fn i64_from_value(value: &serde_json::Value) -> Result<i64, String> {
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err("expected integer-compatible number".to_owned())
        }
        serde_json::Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("expected integer string, got {text:?}")),
        _ => Err("expected number".to_owned()),
    }
}
