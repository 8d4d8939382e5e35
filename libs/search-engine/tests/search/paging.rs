use crate::support::*;
use sift::finder;

fn ids(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.id.as_str()).collect()
}

#[tokio::test]
async fn second_page_returns_records_in_hit_order() -> anyhow::Result<()> {
    let posts = sample_posts(25);
    let backend = seeded_backend(&posts).await?;
    let ctx = context(&backend, 2, "/posts");

    let page = finder(&ctx, Posts::new(posts)).await?.paginate().await?;

    assert_eq!(page.total_hits(), 25);
    assert_eq!(
        ids(page.models()),
        vec!["p11", "p12", "p13", "p14", "p15", "p16", "p17", "p18", "p19", "p20"]
    );

    let sent = backend.last_request().await.expect("search sent");
    assert_eq!(sent.from, 10);
    assert_eq!(sent.size, 10);
    Ok(())
}

#[tokio::test]
async fn links_cover_first_prev_next_last() -> anyhow::Result<()> {
    let posts = sample_posts(25);
    let backend = seeded_backend(&posts).await?;
    let ctx = context(&backend, 2, "/posts");

    let page = finder(&ctx, Posts::new(posts)).await?.paginate().await?;
    let links = page.links();

    assert_eq!(links.current_page, 2);
    assert_eq!(links.per_page, 10);
    assert_eq!(links.total, 25);
    assert_eq!(links.last_page, 3);
    assert_eq!(links.path, "/posts");
    assert_eq!(links.first_url(), "/posts?page=1");
    assert_eq!(links.previous_url().as_deref(), Some("/posts?page=1"));
    assert_eq!(links.next_url().as_deref(), Some("/posts?page=3"));
    assert_eq!(links.last_url(), "/posts?page=3");
    assert_eq!(links.from(), Some(11));
    assert_eq!(links.to(), Some(20));

    let relations: Vec<String> = links.links().into_iter().map(|l| l.relation).collect();
    assert_eq!(relations, vec!["self", "first", "prev", "next", "last"]);
    Ok(())
}

#[tokio::test]
async fn last_page_is_short_and_has_no_next() -> anyhow::Result<()> {
    let posts = sample_posts(25);
    let backend = seeded_backend(&posts).await?;
    let ctx = context(&backend, 3, "/posts");

    let page = finder(&ctx, Posts::new(posts)).await?.paginate().await?;

    assert_eq!(ids(page.models()), vec!["p21", "p22", "p23", "p24", "p25"]);
    assert!(!page.links().has_more_pages());
    assert!(page.links().next_url().is_none());
    assert_eq!(page.links().to(), Some(25));
    Ok(())
}

#[tokio::test]
async fn page_past_the_end_is_empty_but_keeps_total() -> anyhow::Result<()> {
    let posts = sample_posts(5);
    let backend = seeded_backend(&posts).await?;
    let ctx = context(&backend, 1, "/posts");
    let model = Posts::new(posts);

    let page = finder(&ctx, model.clone())
        .await?
        .paginate_with(10, "page", Some(4))
        .await?;

    assert_eq!(page.total_hits(), 5);
    assert!(page.models().is_empty());
    assert_eq!(page.links().last_page, 1);
    assert!(page.links().from().is_none());
    // No hits means no ids to resolve.
    assert_eq!(model.lookups(), 0);
    Ok(())
}

#[tokio::test]
async fn custom_page_name_and_size() -> anyhow::Result<()> {
    let posts = sample_posts(12);
    let backend = seeded_backend(&posts).await?;
    let ctx = context(&backend, 1, "/search?q=post");

    let page = finder(&ctx, Posts::new(posts))
        .await?
        .paginate_with(5, "p", Some(2))
        .await?;

    assert_eq!(ids(page.models()), vec!["p06", "p07", "p08", "p09", "p10"]);
    assert_eq!(page.links().page_name, "p");
    assert_eq!(page.links().last_page, 3);
    assert_eq!(page.links().next_url().as_deref(), Some("/search?q=post&p=3"));
    Ok(())
}

#[tokio::test]
async fn configured_default_size_applies_to_paginate() -> anyhow::Result<()> {
    let posts = sample_posts(12);
    let backend = seeded_backend(&posts).await?;
    let ctx = context(&backend, 1, "/posts").with_pagination(sift::PaginationConfig {
        default_size: 4,
        page_name: "cursor".to_string(),
    });

    let page = finder(&ctx, Posts::new(posts)).await?.paginate().await?;

    assert_eq!(page.models().len(), 4);
    assert_eq!(page.links().page_name, "cursor");
    assert_eq!(page.links().last_page, 3);
    Ok(())
}

#[tokio::test]
async fn hits_without_records_are_dropped() -> anyhow::Result<()> {
    let posts = sample_posts(3);
    let backend = seeded_backend(&posts).await?;
    let ctx = context(&backend, 1, "/posts");
    let model = Posts::new(posts);
    model.forget("p02");

    let page = finder(&ctx, model).await?.paginate().await?;

    assert_eq!(page.total_hits(), 3);
    assert_eq!(ids(page.models()), vec!["p01", "p03"]);
    Ok(())
}

#[tokio::test]
async fn page_zero_is_rejected_by_the_backend() -> anyhow::Result<()> {
    let posts = sample_posts(3);
    let backend = seeded_backend(&posts).await?;
    let ctx = context(&backend, 1, "/posts");

    let err = finder(&ctx, Posts::new(posts))
        .await?
        .paginate_with(10, "page", Some(0))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        sift::Error::Client(sift_client::Error::Backend { status: 400, .. })
    ));
    Ok(())
}

#[tokio::test]
async fn huge_page_number_is_rejected_not_overflowed() -> anyhow::Result<()> {
    let posts = sample_posts(3);
    let backend = seeded_backend(&posts).await?;
    let ctx = context(&backend, i64::MAX, "/posts");

    let err = finder(&ctx, Posts::new(posts))
        .await?
        .paginate()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        sift::Error::Client(sift_client::Error::Backend { status: 400, .. })
    ));
    let sent = backend.last_request().await.expect("search sent");
    assert_eq!(sent.from, i64::MAX);
    Ok(())
}
