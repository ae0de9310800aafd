use sitequote_core::view::{
    load_quotation, load_site, load_site_details, load_site_quotations, load_sites,
    QUOTATION_FAILED, SITE_DETAILS_FAILED, SITE_FAILED, SITE_QUOTATIONS_FAILED,
};
use sitequote_core::{in_memory_catalog, seed_catalog, AppConfig, Fixture, InMemoryCatalog};

async fn demo_catalog() -> InMemoryCatalog {
    let catalog = in_memory_catalog(&AppConfig::default());
    seed_catalog(&catalog, &Fixture::demo().unwrap())
        .await
        .unwrap();
    catalog
}

#[tokio::test]
async fn site_details_loads_when_present() {
    let catalog = demo_catalog().await;

    let state = load_site_details(&catalog, "1").await;
    let details = state.ready().expect("site 1 should load");
    assert_eq!(details.site.name, "Warehouse A");
    assert_eq!(details.quotations.len(), 2);
}

#[tokio::test]
async fn missing_or_malformed_site_falls_back_to_message() {
    let catalog = demo_catalog().await;

    for raw in ["999", "abc"] {
        let state = load_site_details(&catalog, raw).await;
        assert!(!state.is_ready());
        assert_eq!(state.failure_message(), Some(SITE_DETAILS_FAILED));
    }
}

#[tokio::test]
async fn site_screen_loads_or_falls_back() {
    let catalog = demo_catalog().await;

    let found = load_site(&catalog, "2").await;
    assert_eq!(found.ready().map(|site| site.name), Some("Maple Street House".to_string()));

    for raw in ["999", "+2", "abc"] {
        let state = load_site(&catalog, raw).await;
        assert_eq!(state.failure_message(), Some(SITE_FAILED));
    }
}

#[tokio::test]
async fn quotation_screens_fall_back_on_errors() {
    let catalog = demo_catalog().await;

    let missing = load_quotation(&catalog, "does-not-exist").await;
    assert_eq!(missing.failure_message(), Some(QUOTATION_FAILED));

    let malformed = load_site_quotations(&catalog, "x").await;
    assert_eq!(malformed.failure_message(), Some(SITE_QUOTATIONS_FAILED));

    let found = load_quotation(&catalog, "Q-1003").await;
    assert_eq!(found.ready().map(|q| q.product_name), Some("Skylight".to_string()));
}

#[tokio::test]
async fn sites_screen_is_always_ready() {
    let empty = in_memory_catalog(&AppConfig::default());
    let state = load_sites(&empty).await;
    assert_eq!(state.ready(), Some(Vec::new()));
}
