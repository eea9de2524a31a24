//! Posts and their nested media descriptors.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::models::{de_null_string, macros::str_opt_ref};

/// A single submission in a community listing.
///
/// Only the attributes needed to locate a post's media are decoded;
/// everything else in the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    /// Base-36 post ID, without the `t3_` prefix.
    id: String,

    /// Post title.
    #[serde(default, deserialize_with = "de_null_string")]
    title: String,

    /// Destination URL. For self-posts this points back at the post itself.
    url: Option<String>,

    /// Host of `url`, or `self.<community>` for self-posts.
    domain: Option<String>,

    /// Whether this is a text-only post.
    #[serde(default)]
    is_self: bool,

    /// Whether the media is hosted on the platform's own media domains.
    #[serde(default)]
    is_reddit_media_domain: bool,

    /// Relative link to the comments page.
    #[serde(default, deserialize_with = "de_null_string")]
    permalink: String,

    /// Whether the post is marked NSFW.
    #[serde(default)]
    over_18: bool,

    /// UNIX timestamp of submission, as a float.
    #[serde(default)]
    created_utc: f64,

    /// Media descriptor, present for embedded or platform-hosted media.
    #[serde(default)]
    media: Option<Media>,
}

impl Post {
    /// Returns the post ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the post title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the destination URL, or None if absent or empty.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    /// Returns the host the destination URL points at, or None if absent.
    pub fn domain(&self) -> Option<&str> {
        str_opt_ref!(self.domain)
    }

    /// Returns true for text-only posts.
    pub fn is_self(&self) -> bool {
        self.is_self
    }

    /// Returns true if the media lives on the platform's own hosts.
    pub fn is_reddit_media_domain(&self) -> bool {
        self.is_reddit_media_domain
    }

    /// Returns the relative link to the comments page.
    pub fn permalink(&self) -> &str {
        &self.permalink
    }

    /// Returns true if the post is marked NSFW.
    pub fn over_18(&self) -> bool {
        self.over_18
    }

    /// Returns the submission time, or None if the timestamp is out of range.
    #[allow(clippy::cast_possible_truncation)]
    pub fn created(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.created_utc as i64, 0).single()
    }

    /// Returns the media descriptor if present.
    pub fn media(&self) -> Option<&Media> {
        self.media.as_ref()
    }
}

/// Nested media descriptor attached to a [`Post`].
#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    /// Present for videos hosted on the platform.
    #[serde(default)]
    reddit_video: Option<RedditVideo>,
}

impl Media {
    /// Returns the platform video descriptor if present.
    pub fn reddit_video(&self) -> Option<&RedditVideo> {
        self.reddit_video.as_ref()
    }
}

/// Playback URLs for a platform-hosted video.
#[derive(Debug, Clone, Deserialize)]
pub struct RedditVideo {
    /// Direct, non-adaptive MP4 stream.
    #[serde(default)]
    fallback_url: Option<String>,

    /// DASH manifest.
    #[serde(default)]
    dash_url: Option<String>,

    /// HLS manifest.
    #[serde(default)]
    hls_url: Option<String>,

    #[serde(default)]
    is_gif: Option<bool>,
}

impl RedditVideo {
    /// Returns the direct playback URL if present.
    pub fn fallback_url(&self) -> Option<&str> {
        str_opt_ref!(self.fallback_url)
    }

    /// Returns the DASH manifest URL if present.
    pub fn dash_url(&self) -> Option<&str> {
        str_opt_ref!(self.dash_url)
    }

    /// Returns the HLS manifest URL if present.
    pub fn hls_url(&self) -> Option<&str> {
        str_opt_ref!(self.hls_url)
    }

    /// Returns true if the video was uploaded as a GIF, or None if unknown.
    pub fn is_gif(&self) -> Option<bool> {
        self.is_gif
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_video_post() {
        let raw = r#"{
            "id": "abc",
            "title": "look at him go",
            "url": "https://v.redd.it/abc",
            "domain": "v.redd.it",
            "is_self": false,
            "is_reddit_media_domain": true,
            "permalink": "/r/RATS/comments/abc/look_at_him_go/",
            "over_18": false,
            "created_utc": 1700000000.0,
            "media": {
                "reddit_video": {
                    "fallback_url": "https://v.redd.it/abc/DASH_720.mp4",
                    "dash_url": "https://v.redd.it/abc/DASHPlaylist.mpd",
                    "is_gif": false
                }
            },
            "score": 1234
        }"#;

        let post: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(post.id(), "abc");
        assert_eq!(post.url(), Some("https://v.redd.it/abc"));
        assert!(post.is_reddit_media_domain());
        assert_eq!(post.created().unwrap().timestamp(), 1_700_000_000);

        let video = post.media().and_then(Media::reddit_video).unwrap();
        assert_eq!(
            video.fallback_url(),
            Some("https://v.redd.it/abc/DASH_720.mp4")
        );
        assert_eq!(video.hls_url(), None);
        assert_eq!(video.is_gif(), Some(false));
    }

    #[test]
    fn null_media_and_missing_flags() {
        let raw = r#"{"id": "x", "url": null, "domain": "self.RATS", "is_self": true, "media": null}"#;
        let post: Post = serde_json::from_str(raw).unwrap();
        assert!(post.is_self());
        assert!(!post.is_reddit_media_domain());
        assert!(post.media().is_none());
        assert_eq!(post.url(), None);
        assert_eq!(post.domain(), Some("self.RATS"));
    }

    #[test]
    fn empty_or_missing_url_reads_as_absent() {
        let post: Post = serde_json::from_str(r#"{"id": "e", "url": "", "domain": "imgur.com"}"#).unwrap();
        assert_eq!(post.url(), None);

        let post: Post = serde_json::from_str(r#"{"id": "m", "domain": "i.redd.it"}"#).unwrap();
        assert_eq!(post.url(), None);
    }

    #[test]
    fn embed_media_without_reddit_video() {
        let raw = r#"{
            "id": "y",
            "url": "https://youtu.be/y",
            "domain": "youtu.be",
            "media": {"type": "youtube.com", "oembed": {"title": "t"}}
        }"#;
        let post: Post = serde_json::from_str(raw).unwrap();
        assert!(post.media().unwrap().reddit_video().is_none());
    }
}
