//! Structural queries over one page of the asset listing.

use serde_json::Value;

use super::error::PaginationError;
use super::token::{ContinuationToken, SENTINEL};

const CONTINUATION_TOKEN_POINTER: &str = "/continuationToken";
const ITEMS_POINTER: &str = "/items";
const DOWNLOAD_URL_POINTER: &str = "/downloadUrl";

/// The JSON body of one listing page, held only long enough to query it.
#[derive(Debug, Clone)]
pub struct ListingPage {
    body: Value,
}

impl ListingPage {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when `bytes` is not valid JSON.
    pub fn parse(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        Ok(Self {
            body: serde_json::from_slice(bytes)?,
        })
    }

    /// Reads `continuationToken`.
    ///
    /// JSON `null` and the string `"null"` both map to the sentinel. The token
    /// is not validated here; that happens before it is used for a request.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::TokenExtraction`] when the field is absent or
    /// is neither a string nor null.
    pub fn continuation_token(&self) -> Result<ContinuationToken, PaginationError> {
        match self.body.pointer(CONTINUATION_TOKEN_POINTER) {
            None => Err(PaginationError::token_extraction(
                "field `continuationToken` is missing",
            )),
            Some(Value::Null) => Ok(ContinuationToken::Sentinel),
            Some(Value::String(raw)) => Ok(ContinuationToken::from_raw(raw.trim_matches('"'))),
            Some(other) => Err(PaginationError::token_extraction(format!(
                "field `continuationToken` should be a string or {SENTINEL}, found {other}"
            ))),
        }
    }

    /// Reads `items[].downloadUrl`, in page order.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::FieldExtraction`] (tagged with the 1-based
    /// `page` number) when `items` is not an array or an item has no string
    /// `downloadUrl`.
    pub fn download_urls(&self, page: usize) -> Result<Vec<String>, PaginationError> {
        let items = self
            .body
            .pointer(ITEMS_POINTER)
            .and_then(Value::as_array)
            .ok_or_else(|| {
                PaginationError::field_extraction(page, "field `items` is missing or not an array")
            })?;

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.pointer(DOWNLOAD_URL_POINTER)
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        PaginationError::field_extraction(
                            page,
                            format!("item {index} has no string `downloadUrl`"),
                        )
                    })
            })
            .collect()
    }
}
