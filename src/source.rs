use std::fmt;

use async_trait::async_trait;

use crate::{models::post::Post, result::Result};

/// Number of posts requested by [`TopQuery::weekly`].
pub const DEFAULT_LIMIT: usize = 64;

/// Anything that can list the top posts of a community.
///
/// [`Client`] talks to the live service; tests substitute a canned listing.
///
/// [`Client`]: crate::client::Client
#[async_trait]
pub trait PostSource {
    /// Returns up to `query.limit()` posts, most popular first.
    async fn top_posts(&self, query: &TopQuery) -> Result<Vec<Post>>;
}

/// Time window the ranking is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TimePeriod {
    /// Past hour
    Hour,
    /// Past 24 hours
    Day,
    /// Past 7 days
    #[default]
    Week,
    /// Past 30 days
    Month,
    /// Past year
    Year,
    /// All time
    All,
}

impl TimePeriod {
    /// Returns the value of the `t` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            TimePeriod::Hour => "hour",
            TimePeriod::Day => "day",
            TimePeriod::Week => "week",
            TimePeriod::Month => "month",
            TimePeriod::Year => "year",
            TimePeriod::All => "all",
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request for the top posts of one community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopQuery {
    community: String,
    period: TimePeriod,
    limit: usize,
}

impl TopQuery {
    /// Constructs a query over an arbitrary window and page budget.
    pub fn new(community: impl Into<String>, period: TimePeriod, limit: usize) -> Self {
        Self {
            community: community.into(),
            period,
            limit,
        }
    }

    /// Constructs the default query: the week's top 64 posts.
    pub fn weekly(community: impl Into<String>) -> Self {
        Self::new(community, TimePeriod::Week, DEFAULT_LIMIT)
    }

    /// Returns the community name.
    pub fn community(&self) -> &str {
        &self.community
    }

    /// Returns the ranking window.
    pub fn period(&self) -> TimePeriod {
        self.period
    }

    /// Returns the maximum number of posts to fetch.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekly_defaults() {
        let query = TopQuery::weekly("RATS");
        assert_eq!(query.community(), "RATS");
        assert_eq!(query.period(), TimePeriod::Week);
        assert_eq!(query.limit(), 64);
        assert_eq!(query.period().to_string(), "week");
    }
}
