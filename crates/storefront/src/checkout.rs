//! Checkout contact form validation.
//!
//! Every field is checked in one pass so the buyer sees all problems at once.

use core::fmt;
use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use kanap_core::Email;

/// Fields of the checkout contact form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContactField {
    FirstName,
    LastName,
    Address,
    City,
    Email,
}

impl ContactField {
    /// Every required field, in display order.
    pub const ALL: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Address,
        Self::City,
        Self::Email,
    ];

    /// Form/wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Address => "address",
            Self::City => "city",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What is wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// Blank after trimming.
    Empty,
    /// Not shaped like `local@domain.tld`.
    InvalidEmail,
}

/// One rejected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldViolation {
    pub field: ContactField,
    pub kind: ViolationKind,
}

impl FieldViolation {
    /// Message shown to the buyer.
    #[must_use]
    pub fn message(&self) -> String {
        match self.kind {
            ViolationKind::Empty => format!("Field \"{}\" must not be empty.", self.field),
            ViolationKind::InvalidEmail => "Please enter a valid email address.".to_string(),
        }
    }
}

/// All violations found in one validation pass, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} invalid contact field(s): {}", .violations.len(), describe(.violations))]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    /// Violations in field order.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether `field` has at least one violation.
    #[must_use]
    pub fn has(&self, field: ContactField) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Distinct fields that failed, in field order.
    #[must_use]
    pub fn fields(&self) -> Vec<ContactField> {
        let mut fields: Vec<_> = self.violations.iter().map(|v| v.field).collect();
        fields.dedup();
        fields
    }
}

fn describe(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(FieldViolation::message)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Accepted buyer contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub email: Email,
}

/// Validate raw form input keyed by field name (`firstName`, `email`, ...).
///
/// Values are trimmed; a missing key counts as empty. The email is also
/// checked against the address pattern even when it is empty, so an empty
/// email reports both violations.
///
/// # Errors
///
/// Returns every violation found if any field is invalid.
pub fn validate(raw: &HashMap<String, String>) -> Result<ContactInfo, ValidationErrors> {
    let mut violations = Vec::new();

    let mut value_of = |field: ContactField| -> String {
        let value = raw
            .get(field.as_str())
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        if value.is_empty() {
            violations.push(FieldViolation {
                field,
                kind: ViolationKind::Empty,
            });
        }
        value
    };

    let first_name = value_of(ContactField::FirstName);
    let last_name = value_of(ContactField::LastName);
    let address = value_of(ContactField::Address);
    let city = value_of(ContactField::City);
    let email = value_of(ContactField::Email);

    let email = Email::parse(&email).map_err(|_| FieldViolation {
        field: ContactField::Email,
        kind: ViolationKind::InvalidEmail,
    });

    match email {
        Ok(email) if violations.is_empty() => Ok(ContactInfo {
            first_name,
            last_name,
            address,
            city,
            email,
        }),
        Ok(_) => Err(ValidationErrors { violations }),
        Err(violation) => {
            violations.push(violation);
            Err(ValidationErrors { violations })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn valid_form() -> HashMap<String, String> {
        form(&[
            ("firstName", "Ada"),
            ("lastName", "Lovelace"),
            ("address", "12 rue des Lilas"),
            ("city", "Paris"),
            ("email", "ada@example.com"),
        ])
    }

    #[test]
    fn test_valid_form_is_trimmed() {
        let mut raw = valid_form();
        raw.insert("city".to_string(), "  Paris \t".to_string());
        raw.insert("email".to_string(), " ada@example.com ".to_string());

        let contact = validate(&raw).unwrap();
        assert_eq!(contact.city, "Paris");
        assert_eq!(contact.email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_reports_every_violation() {
        let mut raw = valid_form();
        raw.insert("city".to_string(), String::new());
        raw.insert("email".to_string(), "not-an-email".to_string());

        let errors = validate(&raw).unwrap_err();
        assert_eq!(errors.fields(), vec![ContactField::City, ContactField::Email]);
        assert_eq!(
            errors.violations(),
            &[
                FieldViolation {
                    field: ContactField::City,
                    kind: ViolationKind::Empty
                },
                FieldViolation {
                    field: ContactField::Email,
                    kind: ViolationKind::InvalidEmail
                },
            ]
        );
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let mut raw = valid_form();
        raw.insert("lastName".to_string(), "   ".to_string());

        let errors = validate(&raw).unwrap_err();
        assert!(errors.has(ContactField::LastName));
        assert_eq!(errors.violations().len(), 1);
    }

    #[test]
    fn test_empty_email_reports_both_checks() {
        let mut raw = valid_form();
        raw.remove("email");

        let errors = validate(&raw).unwrap_err();
        let kinds: Vec<_> = errors.violations().iter().map(|v| v.kind).collect();
        assert_eq!(kinds, vec![ViolationKind::Empty, ViolationKind::InvalidEmail]);
        assert_eq!(errors.fields(), vec![ContactField::Email]);
    }

    #[test]
    fn test_empty_form_flags_all_fields() {
        let errors = validate(&HashMap::new()).unwrap_err();
        assert_eq!(errors.fields(), ContactField::ALL.to_vec());
    }

    #[test]
    fn test_messages() {
        let violation = FieldViolation {
            field: ContactField::City,
            kind: ViolationKind::Empty,
        };
        assert_eq!(violation.message(), "Field \"city\" must not be empty.");
    }

    #[test]
    fn test_contact_serializes_camel_case() {
        let contact = validate(&valid_form()).unwrap();
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert_eq!(json["email"], "ada@example.com");
    }
}
