use std::{fmt::Display, num::NonZeroU32, str::FromStr};

use serde::Serialize;

use crate::error::AppError;

/// A search term as entered by the user.
///
/// Only exists for non-blank input; construction trims and percent-encodes
/// the text once so both stages and status messages share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    entered: String,
    encoded: String,
}

impl SearchQuery {
    /// Returns `None` when the text is empty or whitespace only
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(Self {
            entered: raw.to_string(),
            encoded: urlencoding::encode(trimmed).into_owned(),
        })
    }

    /// Text exactly as entered, used in status messages
    pub fn entered(&self) -> &str {
        &self.entered
    }

    /// Trimmed text, percent-encoded for use in a query string
    pub fn encoded(&self) -> &str {
        &self.encoded
    }
}

impl Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.entered.trim())
    }
}

const DEFAULT_LIMIT: NonZeroU32 = match NonZeroU32::new(10) {
    Some(limit) => limit,
    None => unreachable!(),
};

/// Maximum number of recommendations to keep from one search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Limit(NonZeroU32);

impl Default for Limit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}

impl Limit {
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get() as usize
    }
}

impl FromStr for Limit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<NonZeroU32>()
            .map(Self)
            .map_err(|_| {
                AppError::InvalidInput(format!(
                    "Limit must be a positive whole number, got '{}'",
                    s.trim()
                ))
            })
    }
}

impl Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
