use std::collections::HashSet;

use async_trait::async_trait;
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;
use weeklypost::{
    error::RemoteError, models::post::Post, pick_media_url, report::report, Error, PostSource,
    Result, TopQuery,
};

/// Serves a fixed listing, or fails like a rate-limited service.
struct CannedSource {
    posts: Option<Vec<Post>>,
}

#[async_trait]
impl PostSource for CannedSource {
    async fn top_posts(&self, query: &TopQuery) -> Result<Vec<Post>> {
        match &self.posts {
            Some(posts) => Ok(posts.iter().take(query.limit()).cloned().collect()),
            None => Err(RemoteError::RateLimited.into()),
        }
    }
}

fn canned(posts: Vec<Post>) -> CannedSource {
    CannedSource { posts: Some(posts) }
}

fn post(value: serde_json::Value) -> Post {
    serde_json::from_value(value).unwrap()
}

fn image(id: &str) -> Post {
    post(json!({
        "id": id,
        "url": format!("https://i.redd.it/{id}.jpg"),
        "domain": "i.redd.it",
        "is_self": false,
        "is_reddit_media_domain": true
    }))
}

fn self_post(id: &str) -> Post {
    post(json!({
        "id": id,
        "url": format!("https://www.reddit.com/r/RATS/comments/{id}/"),
        "domain": "self.RATS",
        "is_self": true,
        "is_reddit_media_domain": false
    }))
}

fn gallery(id: &str) -> Post {
    post(json!({
        "id": id,
        "url": format!("https://www.reddit.com/gallery/{id}"),
        "domain": "reddit.com",
        "is_self": false,
        "is_reddit_media_domain": false
    }))
}

#[tokio::test]
async fn picks_one_eligible_url() -> anyhow::Result<()> {
    let source = canned(vec![self_post("s"), image("a"), gallery("g"), image("b")]);
    let mut rng = StdRng::seed_from_u64(3);

    let url = pick_media_url(&source, &TopQuery::weekly("RATS"), &mut rng)
        .await?
        .expect("an eligible post");
    assert!(["https://i.redd.it/a.jpg", "https://i.redd.it/b.jpg"].contains(&url.as_str()));
    Ok(())
}

#[tokio::test]
async fn video_post_resolves_to_its_fallback_url() -> anyhow::Result<()> {
    let source = canned(vec![
        self_post("s"),
        post(json!({
            "id": "abc",
            "url": "https://v.redd.it/abc",
            "domain": "v.redd.it",
            "is_self": false,
            "is_reddit_media_domain": true,
            "media": {"reddit_video": {"fallback_url": "https://v.redd.it/abc/DASH_720.mp4"}}
        })),
    ]);
    let mut rng = StdRng::seed_from_u64(3);

    let url = pick_media_url(&source, &TopQuery::weekly("RATS"), &mut rng).await?;
    assert_eq!(url.as_deref(), Some("https://v.redd.it/abc/DASH_720.mp4"));
    Ok(())
}

#[tokio::test]
async fn malformed_video_fails_the_lookup() {
    let source = canned(vec![
        image("a"),
        post(json!({
            "id": "abc",
            "url": "https://v.redd.it/abc",
            "domain": "v.redd.it",
            "is_self": false,
            "is_reddit_media_domain": true,
            "media": null
        })),
    ]);
    let mut rng = StdRng::seed_from_u64(3);

    let err = pick_media_url(&source, &TopQuery::weekly("RATS"), &mut rng)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MalformedMediaData { .. }));
}

#[tokio::test]
async fn accepted_post_without_url_fails_instead_of_printing_blank() {
    let source = canned(vec![post(json!({
        "id": "a",
        "domain": "i.redd.it",
        "is_self": false,
        "is_reddit_media_domain": true
    }))]);
    let mut rng = StdRng::seed_from_u64(3);

    let err = pick_media_url(&source, &TopQuery::weekly("RATS"), &mut rng)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MalformedMediaData { ref id, .. } if id == "a"));
}

#[tokio::test]
async fn nothing_eligible_reports_no_posts_and_prints_nothing() -> anyhow::Result<()> {
    let source = canned(vec![self_post("s"), gallery("g")]);
    let mut rng = StdRng::seed_from_u64(3);

    let url = pick_media_url(&source, &TopQuery::weekly("RATS"), &mut rng).await?;
    assert_eq!(url, None);

    let mut out = Vec::new();
    let err = report(url.as_deref(), &mut out).unwrap_err();
    assert!(matches!(err, Error::NoEligiblePosts));
    assert!(out.is_empty());
    Ok(())
}

#[tokio::test]
async fn remote_failure_propagates() {
    let source = CannedSource { posts: None };
    let mut rng = StdRng::seed_from_u64(3);

    let err = pick_media_url(&source, &TopQuery::weekly("RATS"), &mut rng)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RemoteService(RemoteError::RateLimited)));
}

#[tokio::test]
async fn every_candidate_gets_picked_eventually() -> anyhow::Result<()> {
    let source = canned((0..4).map(|i| image(&format!("p{i}"))).collect());
    let query = TopQuery::weekly("RATS");
    let mut rng = StdRng::seed_from_u64(99);

    let mut seen = HashSet::new();
    for _ in 0..200 {
        if let Some(url) = pick_media_url(&source, &query, &mut rng).await? {
            seen.insert(url);
        }
    }
    assert_eq!(seen.len(), 4);
    Ok(())
}
