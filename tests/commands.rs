mod common;

use spacetraveling::cms::PrismicClient;
use spacetraveling::commands::{list, show};
use spacetraveling::config::SiteConfig;
use spacetraveling::SpaceTraveling;

async fn setup() -> (common::MockCms, SpaceTraveling, PrismicClient) {
    let cms = common::spawn(common::sample_posts()).await;
    let config = SiteConfig {
        prismic: cms.config(),
        ..SiteConfig::default()
    };
    let site = SpaceTraveling::with_config(".", config).unwrap();
    let client = site.client().unwrap();
    (cms, site, client)
}

#[tokio::test]
async fn test_list_first_page() {
    let (_cms, site, client) = setup().await;
    let mut out = Vec::new();

    list::run(&site, &client, false, &mut out).await.unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.starts_with("Posts (2):"));
    assert!(out.contains("10 dez 2023 - Primeiro post by Joseph Oliveira [primeiro-post]"));
    assert!(out.contains("More posts available"));
}

#[tokio::test]
async fn test_list_all_pages() {
    let (_cms, site, client) = setup().await;
    let mut out = Vec::new();

    list::run(&site, &client, true, &mut out).await.unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.starts_with("Posts (4):"));
    assert!(out.contains("- - Quarto post by Joseph Oliveira [quarto-post]"));
    assert!(!out.contains("More posts available"));
    assert!(out.find("terceiro-post").unwrap() < out.find("quarto-post").unwrap());
}

#[tokio::test]
async fn test_list_uids() {
    let (_cms, _site, client) = setup().await;
    let mut out = Vec::new();

    list::run_uids(&client, &mut out).await.unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "primeiro-post\nsegundo-post\nterceiro-post\nquarto-post\n"
    );
}

#[tokio::test]
async fn test_show_post() {
    let (_cms, site, client) = setup().await;
    let mut out = Vec::new();

    show::run(&site, &client, "terceiro-post", &mut out).await.unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.starts_with("Terceiro post\n"));
    assert!(out.contains("25 mar 2021 | Joseph Oliveira | 2 min"));
    assert!(out.contains("Path: /post/terceiro-post"));
    assert!(out.contains("  # Introdução"));
}

#[tokio::test]
async fn test_show_post_without_date_fails() {
    let (_cms, site, client) = setup().await;
    let mut out = Vec::new();

    let err = show::run(&site, &client, "quarto-post", &mut out)
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<spacetraveling::Error>(),
        Some(spacetraveling::Error::Format(_))
    ));
}
