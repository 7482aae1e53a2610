//! Catalog browsing.

use askama::Template;
use tracing::instrument;

use kanap_core::ProductId;
use kanap_storefront::{AppError, Storefront};

use crate::CliError;
use crate::output;
use crate::views::{ProductView, ProductsView};

/// List every product in the catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
#[instrument(skip_all)]
pub async fn products(session: &Storefront) -> Result<(), CliError> {
    let products = session
        .catalog()
        .list_products()
        .await
        .map_err(AppError::from)?;

    output::view(&ProductsView {
        products: &products,
    }
    .render()?);
    Ok(())
}

/// Show one product.
///
/// # Errors
///
/// Returns an error if the product does not exist or cannot be fetched.
#[instrument(skip(session))]
pub async fn product(session: &Storefront, id: &str) -> Result<(), CliError> {
    let product = session
        .catalog()
        .product(&ProductId::new(id))
        .await
        .map_err(AppError::from)?;

    output::view(&ProductView { product: &product }.render()?);
    Ok(())
}
