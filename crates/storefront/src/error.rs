//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that is turned into a user-facing
//! [`Notice`] at the boundary where it occurs. Failures of our own
//! infrastructure (catalog service, local storage) are captured to Sentry
//! on the way; user mistakes are not.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::checkout::ValidationErrors;
use crate::config::ConfigError;
use crate::notice::Notice;
use crate::order::SubmissionError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog service operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart mutation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Local storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Checkout form rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Order could not be placed.
    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the failure is ours rather than the user's.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        match self {
            Self::Catalog(_) | Self::Storage(_) | Self::Config(_) => true,
            Self::Cart(err) => matches!(err, CartError::Storage(_) | CartError::Serialize(_)),
            Self::Submission(err) => matches!(err, SubmissionError::Catalog(_)),
            Self::Validation(_) | Self::NotFound(_) | Self::BadRequest(_) => false,
        }
    }

    /// Convert into the notice shown to the user, capturing internal
    /// failures to Sentry first.
    #[must_use]
    pub fn into_notice(self) -> Notice {
        if self.is_internal() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        }
        self.notice()
    }

    /// Notice shown to the user.
    ///
    /// Internal error details are never exposed.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Validation(errors) => Notice::from(errors),
            Self::Submission(SubmissionError::EmptyCart) => Notice::empty_cart(),
            Self::Submission(SubmissionError::Catalog(_)) => Notice::submission_failed(),
            Self::Catalog(CatalogError::NotFound(what)) | Self::NotFound(what) => {
                Notice::error(format!("Not found: {what}"))
            }
            Self::Catalog(_) => Notice::error("The catalog is unavailable. Please try again later."),
            Self::Cart(CartError::InvalidQuantity(_) | CartError::LineNotFound(_))
            | Self::BadRequest(_) => Notice::error(self.user_message()),
            Self::Cart(_) | Self::Storage(_) | Self::Config(_) => {
                Notice::error("Your cart could not be saved. Please try again.")
            }
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::Cart(err) => err.to_string(),
            Self::BadRequest(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added product", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineKey;
    use crate::notice::NoticeLevel;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_empty_cart_submission_notice() {
        let notice = AppError::from(SubmissionError::EmptyCart).notice();
        assert_eq!(notice, Notice::empty_cart());
    }

    #[test]
    fn test_submission_failure_hides_details() {
        let err = AppError::from(SubmissionError::Catalog(CatalogError::Status {
            status: 500,
            body: "stack trace with secrets".to_string(),
        }));

        let notice = err.notice();
        assert_eq!(notice, Notice::submission_failed());
        assert!(!notice.message.contains("secrets"));
        assert!(err.is_internal());
    }

    #[test]
    fn test_user_errors_are_not_internal() {
        let err = AppError::from(CartError::LineNotFound(LineKey::new("A", "red")));
        assert!(!err.is_internal());

        let notice = err.notice();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Cart line not found: A (red)");
    }
}
