use serde::{Deserialize, Serialize};
use serde_json::Number;
use time::OffsetDateTime;

use super::store::StoreError;

/// Incoming body for create and update. Everything is optional on the wire so
/// that a missing name can be reported as a validation failure instead of a
/// decoding error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<Number>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub read_page: u32,
    #[serde(default)]
    pub reading: bool,
}

impl BookPayload {
    /// Check the payload; the name check runs before the page range check.
    pub fn validate(self) -> Result<BookDetails, StoreError> {
        let name = self.name.ok_or(StoreError::MissingName)?;

        if self.page_count < self.read_page {
            return Err(StoreError::InvalidPageRange {
                page_count: self.page_count,
                read_page: self.read_page,
            });
        }

        Ok(BookDetails {
            name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count: self.page_count,
            read_page: self.read_page,
            reading: self.reading,
        })
    }
}

/// User-editable fields of a book, already validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetails {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

impl BookDetails {
    pub fn is_finished(&self) -> bool {
        self.page_count == self.read_page
    }
}

/// A stored book. Only the store constructs or mutates one, which keeps
/// `finished` in step with the page counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    id: String,
    #[serde(flatten)]
    details: BookDetails,
    finished: bool,
    #[serde(with = "time::serde::rfc3339")]
    inserted_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl Book {
    pub(super) fn new(id: String, details: BookDetails, now: OffsetDateTime) -> Self {
        Self {
            id,
            finished: details.is_finished(),
            details,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field; id and insertion time are kept.
    pub(super) fn replace(&mut self, details: BookDetails, now: OffsetDateTime) {
        self.finished = details.is_finished();
        self.details = details;
        // Never let the update stamp fall behind the insertion stamp.
        self.updated_at = now.max(self.inserted_at);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn details(&self) -> &BookDetails {
        &self.details
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_reading(&self) -> bool {
        self.details.reading
    }

    pub fn inserted_at(&self) -> OffsetDateTime {
        self.inserted_at
    }

    pub fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.details.name.clone(),
            publisher: self.details.publisher.clone(),
        }
    }
}

/// Listing projection of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}
