//! Cart editing and review.

use askama::Template;
use tracing::instrument;

use kanap_core::{Color, ProductId};
use kanap_storefront::error::add_breadcrumb;
use kanap_storefront::{AppError, CartView, LineKey, Notice, Storefront};

use crate::CliError;
use crate::output;
use crate::views::CartPageView;

/// Add `quantity` units of a product in `color` to the cart.
///
/// The product must exist and offer the colour.
///
/// # Errors
///
/// Returns an error if the product cannot be fetched, the colour is not
/// offered, the quantity is not positive, or the cart cannot be saved.
#[instrument(skip(session))]
pub async fn add(
    session: &Storefront,
    id: &str,
    color: &str,
    quantity: i64,
) -> Result<(), CliError> {
    let product_id = ProductId::new(id);
    let color = Color::new(color);

    let product = session
        .catalog()
        .product(&product_id)
        .await
        .map_err(AppError::from)?;
    if !product.offers_color(&color) {
        let offered: Vec<&str> = product.colors.iter().map(Color::as_str).collect();
        return Err(AppError::BadRequest(format!(
            "{} is not available in {color}. Choose one of: {}",
            product.name,
            offered.join(", ")
        ))
        .into());
    }

    let mut cart = session.load_cart();
    cart.add_or_merge(product_id.clone(), color.clone(), quantity)
        .map_err(AppError::from)?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", product_id.as_str()), ("color", color.as_str())]),
    );

    let key = LineKey::new(product_id, color);
    let in_cart = cart.get(&key).map_or(0, |line| line.quantity.get());
    output::notice(&Notice::info(format!(
        "Added {} ({}) to your cart. You now have {in_cart}.",
        product.name, key.color
    )));
    Ok(())
}

/// Show the cart with totals.
///
/// # Errors
///
/// Returns an error if the view cannot be rendered.
#[instrument(skip_all)]
pub async fn show(session: &Storefront) -> Result<(), CliError> {
    let cart = session.load_cart();

    match session.presenter().render(cart.lines()).await {
        CartView::Empty => output::notice(&Notice::empty_cart()),
        CartView::Summary {
            items,
            total_price,
            total_quantity,
            hidden_lines,
        } => output::view(
            &CartPageView {
                items: &items,
                total_price,
                total_quantity,
                hidden_lines,
            }
            .render()?,
        ),
    }
    Ok(())
}

/// Change the quantity of a cart line.
///
/// # Errors
///
/// Returns an error if the line does not exist or the cart cannot be saved.
#[instrument(skip(session))]
pub fn set_quantity(
    session: &Storefront,
    id: &str,
    color: &str,
    quantity: i64,
) -> Result<(), CliError> {
    let key = LineKey::new(id, color);
    let mut cart = session.load_cart();
    cart.set_quantity(&key, quantity).map_err(AppError::from)?;

    add_breadcrumb(
        "cart",
        "Changed quantity",
        Some(&[("product_id", id), ("color", color)]),
    );

    let message = match cart.get(&key) {
        Some(line) => format!("{key} now has quantity {}.", line.quantity),
        None => format!("Removed {key} from your cart."),
    };
    output::notice(&Notice::info(message));
    Ok(())
}

/// Remove a cart line.
///
/// # Errors
///
/// Returns an error if the line does not exist or the cart cannot be saved.
#[instrument(skip(session))]
pub fn remove(session: &Storefront, id: &str, color: &str) -> Result<(), CliError> {
    let key = LineKey::new(id, color);
    let mut cart = session.load_cart();
    cart.remove(&key).map_err(AppError::from)?;

    add_breadcrumb(
        "cart",
        "Removed from cart",
        Some(&[("product_id", id), ("color", color)]),
    );

    output::notice(&Notice::info(format!("Removed {key} from your cart.")));
    Ok(())
}
