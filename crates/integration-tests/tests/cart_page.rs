//! Cart page rendering with product details from a mock catalog service.

#![allow(clippy::unwrap_used)]

use kanap_integration_tests::{memory_session, product_json};
use kanap_storefront::CartView;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_product(mock_server: &MockServer, id: &str, price: f64) {
    Mock::given(method("GET"))
        .and(path(format!("/api/products/{id}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_json(id, &format!("Kanap {id}"), price, &["Blue", "Red"])),
        )
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_totals_across_lines() {
    let mock_server = MockServer::start().await;
    mount_product(&mock_server, "A", 10.0).await;
    mount_product(&mock_server, "B", 5.5).await;

    let (session, _) = memory_session(&mock_server);
    let mut cart = session.load_cart();
    cart.add_or_merge("A".into(), "Blue".into(), 2).unwrap();
    cart.add_or_merge("B".into(), "Red".into(), 3).unwrap();

    let CartView::Summary {
        items,
        total_price,
        total_quantity,
        hidden_lines,
    } = session.presenter().render(cart.lines()).await
    else {
        panic!("expected summary");
    };

    assert_eq!(total_price.to_string(), "36.50");
    assert_eq!(total_quantity, 5);
    assert_eq!(hidden_lines, 0);

    let names: Vec<_> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["Kanap A", "Kanap B"]);
}

#[tokio::test]
async fn test_same_product_in_two_colours_fetched_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json("A", "Kanap A", 10.0, &["Blue", "Red"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (session, _) = memory_session(&mock_server);
    let mut cart = session.load_cart();
    cart.add_or_merge("A".into(), "Blue".into(), 1).unwrap();
    cart.add_or_merge("A".into(), "Red".into(), 1).unwrap();

    let presenter = session.presenter();
    let first = presenter.render(cart.lines()).await;
    let second = presenter.render(cart.lines()).await;

    assert_eq!(first, second);
    let CartView::Summary { items, total_price, .. } = first else {
        panic!("expected summary");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(total_price.to_string(), "20.00");
}

#[tokio::test]
async fn test_unresolvable_line_is_hidden_and_kept() {
    let mock_server = MockServer::start().await;
    mount_product(&mock_server, "A", 10.0).await;

    Mock::given(method("GET"))
        .and(path("/api/products/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let (session, _) = memory_session(&mock_server);
    let mut cart = session.load_cart();
    cart.add_or_merge("A".into(), "Blue".into(), 2).unwrap();
    cart.add_or_merge("gone".into(), "Blue".into(), 4).unwrap();

    let CartView::Summary {
        items,
        total_price,
        total_quantity,
        hidden_lines,
    } = session.presenter().render(cart.lines()).await
    else {
        panic!("expected summary");
    };

    assert_eq!(items.len(), 1);
    assert_eq!(total_price.to_string(), "20.00");
    assert_eq!(total_quantity, 6);
    assert_eq!(hidden_lines, 1);
    assert_eq!(cart.len(), 2);
}

#[tokio::test]
async fn test_oversized_price_hides_line() {
    let mock_server = MockServer::start().await;
    mount_product(&mock_server, "A", 10.0).await;
    mount_product(&mock_server, "huge", 1e27).await;

    let (session, _) = memory_session(&mock_server);
    let mut cart = session.load_cart();
    cart.add_or_merge("A".into(), "Blue".into(), 1).unwrap();
    cart.add_or_merge("huge".into(), "Blue".into(), 100).unwrap();

    let CartView::Summary {
        items,
        total_price,
        total_quantity,
        hidden_lines,
    } = session.presenter().render(cart.lines()).await
    else {
        panic!("expected summary");
    };

    assert_eq!(items.len(), 1);
    assert_eq!(total_price.to_string(), "10.00");
    assert_eq!(total_quantity, 101);
    assert_eq!(hidden_lines, 1);
}

#[tokio::test]
async fn test_empty_cart_makes_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (session, _) = memory_session(&mock_server);
    let cart = session.load_cart();

    assert_eq!(session.presenter().render(cart.lines()).await, CartView::Empty);
}
