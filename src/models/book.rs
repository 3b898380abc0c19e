//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Reading status of a tracked book.
///
/// Stored as text; the wire and storage representations are identical
/// ("Want to Read", "Reading", "Read").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BookStatus {
    #[serde(rename = "Want to Read")]
    WantToRead,
    #[serde(rename = "Reading")]
    Reading,
    #[serde(rename = "Read")]
    Read,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::WantToRead => "Want to Read",
            BookStatus::Reading => "Reading",
            BookStatus::Read => "Read",
        }
    }
}

impl Default for BookStatus {
    fn default() -> Self {
        BookStatus::WantToRead
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Want to Read" => Ok(BookStatus::WantToRead),
            "Reading" => Ok(BookStatus::Reading),
            "Read" => Ok(BookStatus::Read),
            _ => Err(format!("Invalid book status: {}", s)),
        }
    }
}

// SQLx conversion for BookStatus (TEXT column)
impl sqlx::Type<Postgres> for BookStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for BookStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl<'q> Encode<'q, Postgres> for BookStatus {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// A book in a user's list
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub author: String,
    /// ISBN-13 or ISBN-10; empty when unknown
    pub isbn: String,
    /// Open Library cover edition key (OLID); empty when unknown
    pub cover_edition_key: String,
    pub rating: Option<i32>,
    pub notes: Option<String>,
    pub status: BookStatus,
    pub genre: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    /// Optional; when absent or blank the Open Library resolver is consulted
    pub isbn: Option<String>,
    pub rating: Option<i32>,
    pub notes: Option<String>,
    #[serde(default)]
    pub status: BookStatus,
    pub genre: Option<String>,
}

/// Fully resolved record ready for insertion; identifiers are stored as
/// empty strings when unresolved (the columns are non-nullable).
#[derive(Debug)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub cover_edition_key: String,
    pub rating: Option<i32>,
    pub notes: Option<String>,
    pub status: BookStatus,
    pub genre: Option<String>,
}

/// Sort order for book listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Newest,
    Oldest,
    Highest,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Newest
    }
}

/// Book list query parameters; filters compose conjunctively
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring match against title or author
    pub search: Option<String>,
    /// Exact status match
    pub status: Option<BookStatus>,
    /// Exact rating match
    pub rating: Option<i32>,
    pub sort: Option<SortOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [BookStatus::WantToRead, BookStatus::Reading, BookStatus::Read] {
            assert_eq!(status.as_str().parse::<BookStatus>(), Ok(status));
        }
        assert!("read".parse::<BookStatus>().is_err());
    }

    #[test]
    fn test_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&BookStatus::WantToRead).unwrap(),
            "\"Want to Read\""
        );
        let status: BookStatus = serde_json::from_str("\"Read\"").unwrap();
        assert_eq!(status, BookStatus::Read);
    }

    #[test]
    fn test_create_book_defaults_status() {
        let payload: CreateBook =
            serde_json::from_str(r#"{"title": "Dune", "author": "Herbert"}"#).unwrap();
        assert_eq!(payload.status, BookStatus::WantToRead);
        assert!(payload.isbn.is_none());
    }
}
