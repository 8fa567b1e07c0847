//! Generic pagination types shared by list endpoints.
//!
//! `ListOptions` is what a caller sends; `Pagination` is what the server
//! reports back alongside a page of results.

use serde::{Deserialize, Deserializer, Serialize};

/// Page selection sent as `page[number]` and `page[size]`.
///
/// Absent or zero values are not sent, leaving the server default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// 1-based page number.
    pub page_number: Option<u32>,
    /// Number of items per page.
    pub page_size: Option<u32>,
}

impl ListOptions {
    /// Select a page and page size.
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: Some(page_number),
            page_size: Some(page_size),
        }
    }
}

/// Pagination metadata reported by the server.
///
/// Keys are accepted in either kebab-case (`current-page`) or snake_case
/// (`current_page`). Missing or `null` keys decode as zero / `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Pagination {
    #[serde(default, alias = "current_page", deserialize_with = "null_as_zero")]
    pub current_page: u32,
    #[serde(default, alias = "prev_page")]
    pub prev_page: Option<u32>,
    #[serde(default, alias = "next_page")]
    pub next_page: Option<u32>,
    #[serde(default, alias = "total_pages", deserialize_with = "null_as_zero")]
    pub total_pages: u32,
    #[serde(default, alias = "total_count", deserialize_with = "null_as_zero")]
    pub total_count: u64,
}

fn null_as_zero<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Pagination {
    /// True when the server reported a further page.
    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some_and(|next| next > self.current_page)
    }
}
