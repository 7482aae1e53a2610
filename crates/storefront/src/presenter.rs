//! Cart Presenter: derives what the cart page shows.
//!
//! Product details for every line are resolved concurrently and totals are
//! computed only once all lookups have settled. A line whose product cannot
//! be resolved is left out of the view (and of the price total) but still
//! counts towards the total quantity; it stays in the cart.

use futures::future::join_all;
use tracing::{debug, instrument};

use kanap_core::{Color, Price, ProductId, Quantity};

use crate::cart::CartLine;
use crate::catalog::ProductDetail;
use crate::lookup::ProductLookup;

/// One visible cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub color: Color,
    pub image_url: String,
    pub alt_text: String,
    pub quantity: Quantity,
    pub unit_price: Price,
    pub line_price: Price,
}

/// Rendered cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartView {
    /// The cart has no lines; show the empty-cart notice instead of totals.
    Empty,
    /// Lines and totals.
    Summary {
        items: Vec<CartItemView>,
        total_price: Price,
        total_quantity: u32,
        /// Lines whose product could not be resolved.
        hidden_lines: usize,
    },
}

impl CartView {
    /// Whether this is the empty-cart state.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Builds [`CartView`]s from cart lines.
#[derive(Clone)]
pub struct CartPresenter {
    lookup: ProductLookup,
}

impl CartPresenter {
    /// Create a presenter resolving products through `lookup`.
    #[must_use]
    pub const fn new(lookup: ProductLookup) -> Self {
        Self { lookup }
    }

    /// Resolve every line and compute totals.
    #[instrument(skip_all, fields(lines = lines.len()))]
    pub async fn render(&self, lines: &[CartLine]) -> CartView {
        if lines.is_empty() {
            return CartView::Empty;
        }

        let products = join_all(lines.iter().map(|line| self.lookup.get(&line.product_id))).await;
        let view = summarize(lines, &products);

        if let CartView::Summary { hidden_lines, .. } = &view
            && *hidden_lines > 0
        {
            debug!(hidden_lines, "Some cart lines could not be resolved");
        }
        view
    }
}

/// Combine lines with their resolved products (same order, `None` when
/// unresolved) into a view.
#[must_use]
pub fn summarize(lines: &[CartLine], products: &[Option<ProductDetail>]) -> CartView {
    if lines.is_empty() {
        return CartView::Empty;
    }

    let items: Vec<CartItemView> = lines
        .iter()
        .zip(products)
        .filter_map(|(line, product)| product.as_ref().map(|p| item_view(line, p)))
        .collect();

    let total_price = items.iter().map(|item| item.line_price).sum();
    let total_quantity = lines.iter().map(|line| line.quantity.get()).sum();
    let hidden_lines = lines.len() - items.len();

    CartView::Summary {
        items,
        total_price,
        total_quantity,
        hidden_lines,
    }
}

fn item_view(line: &CartLine, product: &ProductDetail) -> CartItemView {
    CartItemView {
        product_id: line.product_id.clone(),
        name: product.name.clone(),
        color: line.color.clone(),
        image_url: product.image_url.clone(),
        alt_text: product.alt_text.clone(),
        quantity: line.quantity,
        unit_price: product.price,
        line_price: product.price.times(line.quantity),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn line(id: &str, qty: i64) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            color: Color::new("Black"),
            quantity: Quantity::new(qty).unwrap(),
        }
    }

    fn product(id: &str, cents: i64) -> ProductDetail {
        ProductDetail {
            id: ProductId::new(id),
            name: format!("Kanap {id}"),
            description: String::new(),
            image_url: format!("http://localhost:3000/images/{id}.jpeg"),
            alt_text: String::new(),
            price: Price::parse(Decimal::new(cents, 2)).unwrap(),
            colors: vec![Color::new("Black")],
        }
    }

    #[test]
    fn test_totals() {
        let lines = [line("A", 2), line("B", 3)];
        let products = [Some(product("A", 1000)), Some(product("B", 550))];

        let CartView::Summary {
            items,
            total_price,
            total_quantity,
            hidden_lines,
        } = summarize(&lines, &products)
        else {
            panic!("expected summary");
        };

        assert_eq!(total_price.to_string(), "36.50");
        assert_eq!(total_quantity, 5);
        assert_eq!(hidden_lines, 0);
        assert_eq!(items[0].line_price.to_string(), "20.00");
        assert_eq!(items[1].line_price.to_string(), "16.50");
    }

    #[test]
    fn test_unresolved_line_hidden_but_counted() {
        let lines = [line("A", 2), line("gone", 4)];
        let products = [Some(product("A", 1000)), None];

        let CartView::Summary {
            items,
            total_price,
            total_quantity,
            hidden_lines,
        } = summarize(&lines, &products)
        else {
            panic!("expected summary");
        };

        assert_eq!(items.len(), 1);
        assert_eq!(total_price.to_string(), "20.00");
        assert_eq!(total_quantity, 6);
        assert_eq!(hidden_lines, 1);
    }

    #[test]
    fn test_empty_cart_is_distinct_state() {
        assert!(summarize(&[], &[]).is_empty());
    }

    #[test]
    fn test_all_unresolved_is_not_empty_state() {
        let view = summarize(&[line("A", 1)], &[None]);
        assert!(!view.is_empty());
    }

    #[tokio::test]
    async fn test_render_empty_cart_skips_lookup() {
        let client = crate::catalog::CatalogClient::new(&crate::config::CatalogConfig {
            api_url: url::Url::parse("http://127.0.0.1:9/api").unwrap(),
            timeout: None,
        })
        .unwrap();
        let presenter = CartPresenter::new(ProductLookup::new(client));

        assert_eq!(presenter.render(&[]).await, CartView::Empty);
    }
}
