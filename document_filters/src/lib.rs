#![deny(missing_docs)]
//! Filtering, searching and sorting for a user's document list.
//!
//! Status is derived from the current date, so status filters cannot be
//! pushed into SQL; the list endpoint fetches the owner's documents and
//! applies these filters in memory.

use chrono::NaiveDate;
use model::document::{Document, DocumentKind, DocumentStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// The document filters used to narrow the dashboard list.
#[derive(Debug, Serialize, Deserialize, ToSchema, Default, PartialEq, Clone)]
pub struct DocumentFilters {
    /// Document kinds to keep. Empty to keep all kinds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kinds: Vec<DocumentKind>,

    /// Derived statuses to keep. Empty to keep all statuses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<DocumentStatus>,

    /// Case-insensitive text matched against title and notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl DocumentFilters {
    /// True when the filters keep everything.
    pub fn is_empty(&self) -> bool {
        let DocumentFilters {
            kinds,
            statuses,
            search,
        } = self;
        kinds.is_empty() && statuses.is_empty() && search.is_none()
    }

    /// Whether a document passes the filters as of `today`.
    pub fn matches(&self, document: &Document, today: NaiveDate) -> bool {
        if !self.kinds.is_empty() && !self.kinds.contains(&document.kind()) {
            return false;
        }

        if !self.statuses.is_empty() && !self.statuses.contains(&document.status(today)) {
            return false;
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_title = document.title.to_lowercase().contains(&needle);
            let in_notes = document
                .notes
                .as_deref()
                .is_some_and(|notes| notes.to_lowercase().contains(&needle));
            if !in_title && !in_notes {
                return false;
            }
        }

        true
    }
}

/// The field the document list is ordered by.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    ToSchema,
    Copy,
    Clone,
    Default,
    EnumString,
    Display,
    PartialEq,
    Eq,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
    /// Order by title, case-insensitively
    Title,
    /// Order by expiration date; documents without one sort last
    #[default]
    ExpiresAt,
    /// Order by creation time
    CreatedAt,
}

/// The direction the document list is ordered in.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    ToSchema,
    Copy,
    Clone,
    Default,
    EnumString,
    Display,
    PartialEq,
    Eq,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortOrder {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

/// A complete ordering for the document list.
#[derive(Serialize, Deserialize, Debug, ToSchema, Copy, Clone, Default, PartialEq, Eq)]
pub struct Sort {
    /// The field to order by
    #[serde(default)]
    pub key: SortKey,
    /// The direction to order in
    #[serde(default)]
    pub order: SortOrder,
}

impl Sort {
    fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let ordering = match self.key {
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            // No-expiry documents go last regardless of direction, so they
            // are compared outside the direction flip below.
            SortKey::ExpiresAt => match (a.expires_at, b.expires_at) {
                (Some(a_date), Some(b_date)) => a_date.cmp(&b_date),
                (Some(_), None) => return Ordering::Less,
                (None, Some(_)) => return Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        };

        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Filters then sorts the given documents as of `today`.
pub fn apply(
    documents: Vec<Document>,
    filters: &DocumentFilters,
    sort: Sort,
    today: NaiveDate,
) -> Vec<Document> {
    let mut kept: Vec<Document> = documents
        .into_iter()
        .filter(|document| filters.matches(document, today))
        .collect();

    kept.sort_by(|a, b| sort.compare(a, b));
    kept
}

/// Parses a comma-separated query value into typed filter entries, ignoring
/// anything unrecognized.
pub fn parse_list<T: FromStr>(raw: Option<&str>) -> Vec<T> {
    raw.map(|value| {
        value
            .split(',')
            .filter_map(|entry| T::from_str(entry.trim()).ok())
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests;
