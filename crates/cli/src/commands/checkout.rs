//! Checkout and order confirmation.

use std::collections::HashMap;

use askama::Template;
use clap::Args;
use tracing::instrument;

use kanap_storefront::checkout::validate;
use kanap_storefront::error::add_breadcrumb;
use kanap_storefront::{AppError, ContactField, Notice, Storefront};

use crate::CliError;
use crate::output;
use crate::views::ConfirmationView;

/// Contact details for the order. Missing flags count as empty fields.
#[derive(Debug, Args)]
pub struct ContactArgs {
    #[arg(long, default_value = "")]
    first_name: String,

    #[arg(long, default_value = "")]
    last_name: String,

    #[arg(long, default_value = "")]
    address: String,

    #[arg(long, default_value = "")]
    city: String,

    #[arg(long, default_value = "")]
    email: String,
}

impl ContactArgs {
    /// Raw form values keyed by field name.
    fn into_form(self) -> HashMap<String, String> {
        ContactField::ALL
            .into_iter()
            .map(|field| field.as_str().to_string())
            .zip([
                self.first_name,
                self.last_name,
                self.address,
                self.city,
                self.email,
            ])
            .collect()
    }
}

/// Validate the contact details and submit the cart as an order.
///
/// # Errors
///
/// Returns every invalid field, or a submission error if the cart is empty
/// or the order service fails. The cart is kept in both cases.
#[instrument(skip_all)]
pub async fn checkout(session: &Storefront, contact: ContactArgs) -> Result<(), CliError> {
    let contact = validate(&contact.into_form()).map_err(AppError::from)?;

    let mut cart = session.load_cart();
    add_breadcrumb("checkout", "Submitting order", None);

    let confirmation = session
        .submitter()
        .submit(&mut cart, &contact)
        .await
        .map_err(AppError::from)?;

    output::view(
        &ConfirmationView {
            order_id: &confirmation.order_id,
        }
        .render()?,
    );
    Ok(())
}

/// Show the last confirmed order.
///
/// # Errors
///
/// Returns an error if storage cannot be read.
pub fn confirmation(session: &Storefront) -> Result<(), CliError> {
    match session.last_order_id()? {
        Some(order_id) => output::view(
            &ConfirmationView {
                order_id: &order_id,
            }
            .render()?,
        ),
        None => output::notice(&Notice::info("No order has been placed yet.")),
    }
    Ok(())
}
