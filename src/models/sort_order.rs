use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

/// The four orderings a result set can be displayed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "recCountHighToLow")]
    VotesDescending,
    #[serde(rename = "recCountLowToHigh")]
    VotesAscending,
    #[serde(rename = "ABC")]
    TitleAscending,
    #[serde(rename = "reverseABC")]
    TitleDescending,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::VotesDescending,
        SortOrder::VotesAscending,
        SortOrder::TitleAscending,
        SortOrder::TitleDescending,
    ];

    /// Selector value used in forms and query strings
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::VotesDescending => "recCountHighToLow",
            SortOrder::VotesAscending => "recCountLowToHigh",
            SortOrder::TitleAscending => "ABC",
            SortOrder::TitleDescending => "reverseABC",
        }
    }

    /// Human readable option label
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::VotesDescending => "Recommendation Count: High to Low",
            SortOrder::VotesAscending => "Recommendation Count: Low to High",
            SortOrder::TitleAscending => "Title: A to Z",
            SortOrder::TitleDescending => "Title: Z to A",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            SortOrder::VotesDescending => 0,
            SortOrder::VotesAscending => 1,
            SortOrder::TitleAscending => 2,
            SortOrder::TitleDescending => 3,
        }
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown sort order '{}'", s)))
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
