//! S3 listing data types

use serde::{Deserialize, Serialize};

/// One page of a prefix listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPage {
    /// Object keys in this page.
    pub keys: Vec<String>,
    /// Cursor for the next page; `None` when the listing is exhausted.
    pub next_continuation_token: Option<String>,
}

impl ListPage {
    /// Whether more pages remain after this one.
    pub fn is_last(&self) -> bool {
        self.next_continuation_token.is_none()
    }
}
