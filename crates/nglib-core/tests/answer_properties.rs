//! Property-based tests for answer validation and filtering

use nglib_core::answers::validate::{
    normalize_scope, slugify, validate_email, validate_library_name, validate_scope,
};
use proptest::prelude::*;

fn is_slug(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !s.starts_with('-')
        && !s.ends_with('-')
        && !s.contains("--")
}

/// Slugs only ever hold lowercase ASCII letters, digits and single inner hyphens
#[test]
fn prop_slugify_produces_package_safe_names() {
    proptest!(|(input in any::<String>())| {
        let slug = slugify(&input);
        prop_assert!(is_slug(&slug), "not a slug: {:?} -> {:?}", input, slug);
    });
}

/// An existing slug is left unchanged
#[test]
fn prop_slugify_is_stable_on_slugs() {
    proptest!(|(input in "[a-z][a-z0-9]{0,8}(-[a-z0-9]{1,8}){0,3}")| {
        prop_assert_eq!(slugify(&input), input);
    });
}

/// The library name validator accepts exactly the inputs with a non-empty slug
#[test]
fn prop_library_name_validator_matches_slug() {
    proptest!(|(input in any::<String>())| {
        prop_assert_eq!(validate_library_name(&input).is_ok(), !slugify(&input).is_empty());
    });
}

/// Any `@`-prefixed scope is accepted and gets exactly one trailing separator
#[test]
fn prop_scope_with_at_sign_is_normalized() {
    proptest!(|(org in "[a-z0-9-]{1,12}")| {
        let scope = format!("@{}", org);
        prop_assert!(validate_scope(&scope).is_ok());
        prop_assert_eq!(normalize_scope(&scope), format!("@{}/", org));
    });
}

/// A non-empty scope without the leading `@` is rejected
#[test]
fn prop_scope_without_at_sign_is_rejected() {
    proptest!(|(scope in "[a-z0-9/-][a-z0-9@/-]{0,12}")| {
        prop_assert!(validate_scope(&scope).is_err());
    });
}

/// Well-formed `local@domain.tld` addresses pass the email check
#[test]
fn prop_simple_emails_are_accepted() {
    proptest!(|(
        local in "[a-zA-Z0-9._%+-]{1,16}",
        domain in "[a-zA-Z0-9-]{1,16}",
        tld in "[a-zA-Z]{2,4}",
    )| {
        let email = format!("{}@{}.{}", local, domain, tld);
        prop_assert!(validate_email(&email).is_ok(), "rejected {}", email);
    });
}

/// Text without an `@` is never an email
#[test]
fn prop_text_without_at_sign_is_rejected() {
    proptest!(|(input in "[^@]*")| {
        prop_assert!(validate_email(&input).is_err());
    });
}
