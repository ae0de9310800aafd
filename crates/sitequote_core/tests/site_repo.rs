use sitequote_core::{
    Address, AddressInput, FieldProblem, InMemorySiteRepository, RecordRef, RepoError, SiteId,
    SiteInput, SiteRepository, SiteType,
};
use std::collections::HashSet;
use std::sync::Arc;

fn address() -> Address {
    Address {
        street: "12 Dock Road".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        country: "USA".to_string(),
        postal_code: "62701".to_string(),
    }
}

fn warehouse(name: &str) -> SiteInput {
    SiteInput::new(name, address(), SiteType::Industrial, vec!["Fire".to_string()])
}

#[tokio::test]
async fn first_two_sites_get_ids_one_and_two() {
    let repo = InMemorySiteRepository::new();

    let first = repo.add_site(&warehouse("Warehouse A")).await.unwrap();
    let second = repo.add_site(&warehouse("Warehouse B")).await.unwrap();

    assert_eq!(first.site_id.get(), 1);
    assert_eq!(second.site_id.get(), 2);
    assert_eq!(first.name, "Warehouse A");
    assert_eq!(first.site_type, SiteType::Industrial);
    assert_eq!(first.risks, vec!["Fire"]);
}

#[tokio::test]
async fn added_site_reads_back_equal() {
    let repo = InMemorySiteRepository::new();
    let added = repo.add_site(&warehouse("Warehouse A")).await.unwrap();

    let loaded = repo.get_site_by_id(added.site_id).await.unwrap();
    assert_eq!(loaded, added);
}

#[tokio::test]
async fn unknown_id_on_empty_repo_is_not_found() {
    let repo = InMemorySiteRepository::new();
    let site_id = SiteId::try_from(999).unwrap();

    let err = repo.get_site_by_id(site_id).await.unwrap_err();
    assert_eq!(err, RepoError::NotFound(RecordRef::Site(site_id)));
}

#[tokio::test]
async fn list_keeps_insertion_order_and_empty_repo_lists_nothing() {
    let repo = InMemorySiteRepository::new();
    assert!(repo.list_sites().await.is_empty());

    for name in ["C", "A", "B"] {
        repo.add_site(&warehouse(name)).await.unwrap();
    }
    let names: Vec<String> = repo
        .list_sites()
        .await
        .into_iter()
        .map(|site| site.name)
        .collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[tokio::test]
async fn invalid_input_lists_fields_and_leaves_repo_unchanged() {
    let repo = InMemorySiteRepository::new();
    let input = SiteInput {
        name: Some("   ".to_string()),
        address: Some(AddressInput {
            city: Some(String::new()),
            ..AddressInput::from(address())
        }),
        site_type: None,
        risks: vec!["Fire".to_string(), " ".to_string()],
    };

    let err = repo.add_site(&input).await.unwrap_err();
    let RepoError::Validation(validation) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(
        validation.field_names(),
        vec!["name", "address.city", "site_type", "risks[1]"]
    );
    assert_eq!(validation.fields[0].problem, FieldProblem::Empty);
    assert_eq!(validation.fields[2].problem, FieldProblem::Missing);
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn missing_address_is_reported_as_missing() {
    let repo = InMemorySiteRepository::new();
    let input = SiteInput {
        name: Some("No address".to_string()),
        site_type: Some(SiteType::Residential),
        ..SiteInput::default()
    };

    let err = repo.add_site(&input).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(ref v) if v.has_field("address")));
}

#[tokio::test]
async fn failed_add_does_not_consume_an_id() {
    let repo = InMemorySiteRepository::new();
    repo.add_site(&SiteInput::default()).await.unwrap_err();

    let site = repo.add_site(&warehouse("Warehouse A")).await.unwrap();
    assert_eq!(site.site_id.get(), 1);
}

#[tokio::test]
async fn text_fields_are_trimmed_and_risk_list_is_parsed() {
    let repo = InMemorySiteRepository::new();
    let input = SiteInput::new("  Maple House ", address(), SiteType::Residential, Vec::new())
        .with_risk_list("Flood, Fire,,Flood");

    let site = repo.add_site(&input).await.unwrap();
    assert_eq!(site.name, "Maple House");
    assert_eq!(site.risks, vec!["Flood", "Fire", "Flood"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_never_share_an_id() {
    let repo = Arc::new(InMemorySiteRepository::new());
    let mut handles = Vec::new();
    for index in 0..32 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.add_site(&warehouse(&format!("Site {index}")))
                .await
                .unwrap()
                .site_id
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        assert!(ids.insert(handle.await.unwrap()));
    }
    assert_eq!(ids.len(), 32);
    assert_eq!(ids.iter().map(|id| id.get()).max(), Some(32));
    assert_eq!(repo.len().await, 32);
}

#[tokio::test(start_paused = true)]
async fn configured_latency_delays_each_call() {
    let repo = InMemorySiteRepository::with_latency(std::time::Duration::from_millis(500));
    let started = tokio::time::Instant::now();

    repo.list_sites().await;

    assert!(started.elapsed() >= std::time::Duration::from_millis(500));
}
