#![deny(clippy::all, clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::must_use_candidate)]
//! # weeklypost
//!
//! weeklypost picks a random piece of directly viewable media from a
//! community's top posts.
//!
//! A lookup runs in one straight line:
//! - authenticate and fetch the week's top 64 posts ([`Client`])
//! - keep the posts that link to an image or video ([`media::filter_media`])
//! - pick one of them uniformly at random ([`select::select`])
//!
//! Nothing is retried: the first failure ends the lookup.
//!
//! ## Example: Printing a random weekly post.
//!
//! ```rust,no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use weeklypost::{pick_media_url, Client, ClientConfig, Credentials, TopQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let credentials = Credentials::new("client-id", "client-secret");
//!     let client = Client::authenticate(&credentials, &ClientConfig::default()).await?;
//!
//!     let query = TopQuery::weekly("RATS");
//!     match pick_media_url(&client, &query, &mut rand::thread_rng()).await? {
//!         Some(url) => println!("{url}"),
//!         None => println!("nothing to show this week"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! [`Client`]: crate::client::Client

use rand::Rng;

/// Client module contains [`Client`] for authenticating and listing posts.
pub mod client;

/// Command line and environment handling for the binary.
pub mod config;

/// Contains [`Error`]s that can be thrown by the library.
///
/// [`Error`]: crate::error::Error
pub mod error;

pub mod media;

/// Response types of the listing API.
pub mod models;

/// Writes the outcome of a lookup.
pub mod report;

pub(crate) mod result;

/// Uniform random choice among candidates.
pub mod select;

/// The [`PostSource`] seam and query types.
pub mod source;

pub use client::{Client, ClientConfig, Credentials};
pub use error::Error;
pub use result::Result;
pub use source::{PostSource, TimePeriod, TopQuery};

/// Fetches the top posts for `query`, keeps those with viewable media, and
/// picks one at random.
///
/// Returns `Ok(None)` when no post qualifies.
///
/// # Errors
///
/// Propagates failures from the source and [`Error::MalformedMediaData`]
/// from the media filter.
pub async fn pick_media_url<S, R>(source: &S, query: &TopQuery, rng: &mut R) -> Result<Option<String>>
where
    S: PostSource + ?Sized,
    R: Rng + ?Sized,
{
    let posts = source.top_posts(query).await?;
    let candidates = media::filter_media(&posts)?;
    log::debug!(
        "{} of {} posts from r/{} have viewable media",
        candidates.len(),
        posts.len(),
        query.community()
    );
    Ok(select::select(candidates, rng))
}
