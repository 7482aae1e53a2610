//! Product lookup memoization against a mock catalog service.

#![allow(clippy::unwrap_used)]

use kanap_core::ProductId;
use kanap_integration_tests::{memory_session, product_json};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_repeated_lookups_fetch_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/A"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_json("A", "Kanap Sinopé", 10.0, &["Blue"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (session, _) = memory_session(&mock_server);
    let id = ProductId::new("A");

    let first = session.lookup().get(&id).await.unwrap();
    let second = session.lookup().get(&id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.name, "Kanap Sinopé");
    assert!(session.lookup().contains(&id).await);
}

#[tokio::test]
async fn test_concurrent_lookups_share_one_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/A"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(product_json("A", "Kanap Sinopé", 10.0, &["Blue"]))
                .set_delay(std::time::Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (session, _) = memory_session(&mock_server);
    let id = ProductId::new("A");

    let (first, second) = tokio::join!(session.lookup().get(&id), session.lookup().get(&id));

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_failed_lookup_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/A"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products/A"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_json("A", "Kanap Sinopé", 10.0, &["Blue"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (session, _) = memory_session(&mock_server);
    let id = ProductId::new("A");

    assert!(session.lookup().get(&id).await.is_none());
    assert!(!session.lookup().contains(&id).await);

    let product = session.lookup().get(&id).await;
    assert_eq!(product.map(|p| p.name), Some("Kanap Sinopé".to_string()));
}

#[tokio::test]
async fn test_lookup_surfaces_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let (session, _) = memory_session(&mock_server);
    let err = session
        .lookup()
        .try_get(&ProductId::new("missing"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        kanap_storefront::CatalogError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_large_catalog_stays_memoized() {
    const PRODUCTS: usize = 1200;
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/api/products/p\d+$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_json("p", "Kanap", 10.0, &["Blue"])),
        )
        .expect(PRODUCTS as u64)
        .mount(&mock_server)
        .await;

    let (session, _) = memory_session(&mock_server);
    let ids: Vec<ProductId> = (0..PRODUCTS).map(|n| ProductId::new(format!("p{n}"))).collect();

    for id in &ids {
        assert!(session.lookup().get(id).await.is_some());
    }
    for id in &ids {
        assert!(session.lookup().contains(id).await);
        assert!(session.lookup().get(id).await.is_some());
    }
}
