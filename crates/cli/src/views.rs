//! Askama text views for terminal output.

use askama::Template;

use kanap_core::{OrderId, Price};
use kanap_storefront::{CartItemView, ProductDetail};

/// Catalog listing.
#[derive(Template)]
#[template(path = "products.txt")]
pub struct ProductsView<'a> {
    pub products: &'a [ProductDetail],
}

/// Product page.
#[derive(Template)]
#[template(path = "product.txt")]
pub struct ProductView<'a> {
    pub product: &'a ProductDetail,
}

/// Cart page with totals.
#[derive(Template)]
#[template(path = "cart.txt")]
pub struct CartPageView<'a> {
    pub items: &'a [CartItemView],
    pub total_price: Price,
    pub total_quantity: u32,
    pub hidden_lines: usize,
}

/// Order confirmation page.
#[derive(Template)]
#[template(path = "confirmation.txt")]
pub struct ConfirmationView<'a> {
    pub order_id: &'a OrderId,
}
