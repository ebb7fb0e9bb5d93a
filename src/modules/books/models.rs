use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::ToSchema;

use crate::utils::{is_present, is_present_opt};

/// A stored book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Identifier assigned by the document store
    #[schema(example = "6650f1c2a3b4c5d6e7f80912")]
    pub id: String,
    #[schema(example = "Dune")]
    pub title: String,
    #[schema(example = "Herbert")]
    pub author: String,
    /// Any JSON number; whole numbers are echoed without a fraction
    #[schema(value_type = f64, example = 1965)]
    pub year: Number,
    #[schema(example = "SciFi")]
    pub genre: String,
}

impl Book {
    pub fn from_new(id: impl Into<String>, book: NewBook) -> Self {
        Self {
            id: id.into(),
            title: book.title,
            author: book.author,
            year: book.year,
            genre: book.genre,
        }
    }
}

/// Request body for creating or fully replacing a book.
///
/// Every field is optional at the wire level so a missing field becomes a
/// 400 with a field list instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BookPayload {
    #[schema(example = "Dune")]
    pub title: Option<String>,
    #[schema(example = "Herbert")]
    pub author: Option<String>,
    #[schema(value_type = Option<f64>, example = 1965)]
    pub year: Option<Number>,
    #[schema(example = "SciFi")]
    pub genre: Option<String>,
}

/// The four book fields, all present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: Number,
    pub genre: String,
}

impl NewBook {
    /// Names of the text fields that are blank, in declaration order.
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("author", &self.author),
            ("genre", &self.genre),
        ]
        .into_iter()
        .filter(|(_, value)| !is_present(value))
        .map(|(name, _)| name)
        .collect()
    }
}

/// Fields that failed the presence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(pub Vec<&'static str>);

impl MissingFields {
    pub fn message(&self) -> String {
        format!("Missing required fields: {}", self.0.join(", "))
    }

    pub fn details(&self) -> Vec<serde_json::Value> {
        self.0
            .iter()
            .map(|field| serde_json::json!({ "field": field, "error": "required" }))
            .collect()
    }
}

impl BookPayload {
    /// Presence-check every field, yielding the complete record or the list of
    /// missing fields.
    pub fn validate(self) -> Result<NewBook, MissingFields> {
        let mut missing = Vec::new();
        if !is_present_opt(self.title.as_deref()) {
            missing.push("title");
        }
        if !is_present_opt(self.author.as_deref()) {
            missing.push("author");
        }
        if self.year.is_none() {
            missing.push("year");
        }
        if !is_present_opt(self.genre.as_deref()) {
            missing.push("genre");
        }

        match (self.title, self.author, self.year, self.genre) {
            (Some(title), Some(author), Some(year), Some(genre)) if missing.is_empty() => {
                Ok(NewBook {
                    title,
                    author,
                    year,
                    genre,
                })
            }
            _ => Err(MissingFields(missing)),
        }
    }
}

/// Acknowledgment returned by delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteConfirmation {
    #[schema(example = "Book deleted")]
    pub message: String,
}

impl DeleteConfirmation {
    pub fn book_deleted() -> Self {
        Self {
            message: "Book deleted".to_string(),
        }
    }
}
