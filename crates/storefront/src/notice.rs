//! Transient user-facing alerts.
//!
//! The storefront has a single feedback channel: one alert at a time,
//! replaced by the next one. Front-ends that display notices on screen hide
//! them after [`Notice::DISPLAY_DURATION`].

use std::time::Duration;

use crate::checkout::ValidationErrors;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message for the buyer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// How long a notice stays visible.
    pub const DISPLAY_DURATION: Duration = Duration::from_secs(3);

    /// Informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Shown instead of totals when the cart has no lines.
    #[must_use]
    pub fn empty_cart() -> Self {
        Self::info("Your cart is empty!")
    }

    /// Shown when the order could not be placed.
    #[must_use]
    pub fn submission_failed() -> Self {
        Self::error("An error occurred while placing your order. Please try again later.")
    }
}

impl From<&ValidationErrors> for Notice {
    fn from(errors: &ValidationErrors) -> Self {
        let message = errors
            .violations()
            .iter()
            .map(crate::checkout::FieldViolation::message)
            .collect::<Vec<_>>()
            .join("\n");
        Self::error(message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_display_duration() {
        assert_eq!(Notice::DISPLAY_DURATION, Duration::from_secs(3));
    }

    #[test]
    fn test_levels() {
        assert_eq!(Notice::empty_cart().level, NoticeLevel::Info);
        assert_eq!(Notice::submission_failed().level, NoticeLevel::Error);
    }

    #[test]
    fn test_from_validation_errors_lists_each_field() {
        let errors = crate::checkout::validate(&HashMap::from([
            ("firstName".to_string(), "Ada".to_string()),
            ("lastName".to_string(), "Lovelace".to_string()),
            ("address".to_string(), "1 rue".to_string()),
            ("email".to_string(), "not-an-email".to_string()),
        ]))
        .unwrap_err();

        let notice = Notice::from(&errors);
        assert_eq!(
            notice.message,
            "Field \"city\" must not be empty.\nPlease enter a valid email address."
        );
    }
}
