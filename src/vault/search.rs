//! Search Operations
//!
//! Filtering and ordering of the cached records for display.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::api::CredentialRecord;

/// Field the list is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Title,
    Username,
    Url,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Username => "username",
            Self::Url => "url",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Title => Self::Username,
            Self::Username => Self::Url,
            Self::Url => Self::Title,
        }
    }

    fn field<'a>(&self, record: &'a CredentialRecord) -> &'a str {
        match self {
            Self::Title => &record.title,
            Self::Username => &record.username,
            Self::Url => record.url_or_empty(),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "username" | "user" => Ok(Self::Username),
            "url" => Ok(Self::Url),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

/// Search term plus ordering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub term: String,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl ViewQuery {
    pub fn matches(&self, record: &CredentialRecord) -> bool {
        let needle = self.term.to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [record.title.as_str(), record.username.as_str(), record.url_or_empty()]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn compare(&self, a: &CredentialRecord, b: &CredentialRecord) -> Ordering {
        let a_value = self.sort_key.field(a).to_lowercase();
        let b_value = self.sort_key.field(b).to_lowercase();
        match self.sort_order {
            SortOrder::Ascending => a_value.cmp(&b_value),
            SortOrder::Descending => b_value.cmp(&a_value),
        }
    }

    /// Filtered and sorted view over `records`; the slice is left untouched.
    pub fn apply<'a>(&self, records: &'a [CredentialRecord]) -> Vec<&'a CredentialRecord> {
        let mut visible: Vec<&CredentialRecord> =
            records.iter().filter(|r| self.matches(r)).collect();
        visible.sort_by(|a, b| self.compare(a, b));
        visible
    }
}
