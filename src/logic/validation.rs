// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Pure field validation rules shared by blur, input, and submit handling.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::FieldIssue;
use crate::models::field::{FieldKind, FormField, Validity};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone pattern compiles"));

/// Minimum length of a cleaned phone number (including a leading `+`).
const MIN_PHONE_LEN: usize = 10;

/// `local@domain.tld` with no whitespace and at least one dot after the `@`.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Strip spaces, dashes, and parentheses, then require an optional `+`,
/// a non-zero first digit, up to 15 more digits, and at least 10 characters.
pub fn is_valid_phone(value: &str) -> bool {
    let cleaned: String = value
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '-' | '(' | ')')))
        .collect();
    PHONE_RE.is_match(&cleaned) && cleaned.len() >= MIN_PHONE_LEN
}

/// Validate a field's current value without touching its marker.
///
/// Returns `Ok(())` when the field passes, or the first issue found:
/// - required and empty after trimming → [`FieldIssue::Required`]
/// - email kind with a malformed address → [`FieldIssue::InvalidEmail`]
/// - tel kind with a malformed number → [`FieldIssue::InvalidPhone`]
///
/// Checkbox fields count as empty unless their value is `"on"`.
pub fn validate(field: &FormField) -> Result<(), FieldIssue> {
    let value = field.value.trim();

    if field.required && !field.is_filled() {
        return Err(FieldIssue::Required);
    }
    if value.is_empty() {
        return Ok(());
    }

    match field.kind {
        FieldKind::Email if !is_valid_email(value) => Err(FieldIssue::InvalidEmail),
        FieldKind::Tel if !is_valid_phone(value) => Err(FieldIssue::InvalidPhone),
        _ => Ok(()),
    }
}

/// Validate and record the outcome on the field's marker.
pub fn apply(field: &mut FormField) -> Result<(), FieldIssue> {
    let verdict = validate(field);
    match verdict {
        Ok(()) => {
            field.validity = Validity::Valid;
            field.error = None;
        }
        Err(issue) => {
            field.validity = Validity::Invalid;
            field.error = Some(issue.to_string());
        }
    }
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field::FieldId;

    fn field(kind: FieldKind, value: &str) -> FormField {
        let mut f = FormField::new(FieldId::SellerName, "Field", kind, true);
        f.value = value.into();
        f
    }

    #[test]
    fn required_empty_fields_are_invalid() {
        for kind in [FieldKind::Text, FieldKind::Email, FieldKind::Tel] {
            assert_eq!(validate(&field(kind, "   ")), Err(FieldIssue::Required));
        }
    }

    #[test]
    fn optional_empty_field_is_valid() {
        let mut f = field(FieldKind::Email, "");
        f.required = false;
        assert_eq!(validate(&f), Ok(()));
    }

    #[test]
    fn email_shape_is_enforced() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@shop.example.ph"));
        assert!(!is_valid_email("abc"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@@b.co"));
        assert_eq!(
            validate(&field(FieldKind::Email, "abc")),
            Err(FieldIssue::InvalidEmail)
        );
    }

    #[test]
    fn phone_needs_ten_characters_and_valid_digits() {
        assert!(!is_valid_phone("123"));
        assert!(is_valid_phone("+12345678901"));
        assert!(!is_valid_phone("(0917) 123-4567"));
        assert!(is_valid_phone("(917) 123-4567"));
        assert!(!is_valid_phone("12345678901234567"));
        assert!(!is_valid_phone("+1234abc890"));
        assert_eq!(
            validate(&field(FieldKind::Tel, "123")),
            Err(FieldIssue::InvalidPhone)
        );
    }

    #[test]
    fn apply_sets_marker_and_message() {
        let mut f = field(FieldKind::Email, "nope");
        assert_eq!(apply(&mut f), Err(FieldIssue::InvalidEmail));
        assert_eq!(f.validity, Validity::Invalid);
        assert_eq!(f.error.as_deref(), Some("Please enter a valid email address"));

        f.value = "ok@shop.ph".into();
        assert!(apply(&mut f).is_ok());
        assert_eq!(f.validity, Validity::Valid);
        assert!(f.error.is_none());
    }

    #[test]
    fn revalidating_same_value_is_stable() {
        let mut f = field(FieldKind::Tel, "+12345678901");
        let first = apply(&mut f);
        let snapshot = f.clone();
        let second = apply(&mut f);
        assert_eq!(first, second);
        assert_eq!(f, snapshot);
    }
}
