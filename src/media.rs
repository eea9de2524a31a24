//! Deciding which posts link to directly viewable media.
//!
//! Platform-hosted posts are accepted from the image host as-is and from the
//! video host through their fallback playback URL. Externally hosted posts are
//! accepted only from [`EXTERNAL_HOSTS`]. Everything else, galleries included,
//! is skipped.

use crate::{error::Error, models::post::Post, result::Result};

/// Platform host serving direct image links.
pub const IMAGE_HOST: &str = "i.redd.it";

/// Platform host serving videos.
pub const VIDEO_HOST: &str = "v.redd.it";

/// External hosts whose links render directly.
pub const EXTERNAL_HOSTS: [&str; 3] = ["i.imgur.com", "imgur.com", "gfycat.com"];

/// Resolves a single post to a media URL.
///
/// Returns `Ok(None)` for posts that are skipped.
///
/// # Errors
///
/// Returns [`Error::MalformedMediaData`] for an accepted post without a URL,
/// or a platform video whose media descriptor lacks a fallback playback URL.
pub fn resolve(post: &Post) -> Result<Option<String>> {
    if post.is_self() {
        return Ok(None);
    }

    let domain = post.domain().unwrap_or_default();

    if post.is_reddit_media_domain() {
        return match domain {
            IMAGE_HOST => direct_url(post).map(Some),
            VIDEO_HOST => fallback_url(post).map(Some),
            other => {
                log::debug!("skipping {}: unsupported platform host {}", post.id(), other);
                Ok(None)
            }
        };
    }

    if EXTERNAL_HOSTS.contains(&domain) {
        direct_url(post).map(Some)
    } else {
        log::debug!("skipping {}: unsupported host {}", post.id(), domain);
        Ok(None)
    }
}

fn malformed(post: &Post, reason: &'static str) -> Error {
    Error::MalformedMediaData {
        id: post.id().to_string(),
        reason,
    }
}

fn direct_url(post: &Post) -> Result<String> {
    post.url()
        .map(ToString::to_string)
        .ok_or_else(|| malformed(post, "no url"))
}

fn fallback_url(post: &Post) -> Result<String> {
    let video = post
        .media()
        .ok_or_else(|| malformed(post, "no media descriptor"))?
        .reddit_video()
        .ok_or_else(|| malformed(post, "no `reddit_video` entry"))?;

    video
        .fallback_url()
        .map(ToString::to_string)
        .ok_or_else(|| malformed(post, "no `fallback_url` in `reddit_video`"))
}

/// Resolves every eligible post, keeping listing order and duplicates.
///
/// # Errors
///
/// Fails on the first post [`resolve`] rejects.
pub fn filter_media(posts: &[Post]) -> Result<Vec<String>> {
    posts
        .iter()
        .filter_map(|post| resolve(post).transpose())
        .collect()
}

/// Drops the query string from a URL.
pub fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

/// Returns true if the URL points at an MP4 stream.
pub fn is_video(url: &str) -> bool {
    strip_query(url).ends_with(".mp4")
}
