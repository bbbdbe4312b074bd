//! Property-based tests for registration and login input rules

use proptest::prelude::*;
use todoboard::shared::user::{is_valid_email, LoginRequest, RegisterRequest};

proptest! {
    #[test]
    fn test_well_formed_emails_accepted(
        local in "[a-z0-9._+-]{1,16}",
        host in "[a-z0-9-]{1,12}",
        tld in "[a-z]{2,6}",
    ) {
        let email = format!("{local}@{host}.{tld}");
        prop_assert!(is_valid_email(&email), "{}", email);
    }

    #[test]
    fn test_email_without_at_rejected(text in "[a-z0-9.]{0,20}") {
        prop_assert!(!is_valid_email(&text));
    }

    #[test]
    fn test_email_with_whitespace_rejected(
        local in "[a-z]{1,8}",
        space in "[ \t]",
        domain in "[a-z]{1,8}",
    ) {
        let email = format!("{local}{space}@{domain}.com");
        prop_assert!(!is_valid_email(&email));
    }

    #[test]
    fn test_short_password_rejected(password in ".{0,5}") {
        prop_assume!(password.chars().count() < 6);
        let request = RegisterRequest::new("Ann", "ann@example.com", password);
        prop_assert!(request.validate().is_err());
    }

    #[test]
    fn test_login_needs_password(email_local in "[a-z]{1,8}") {
        let request = LoginRequest::new(format!("{email_local}@example.com"), "");
        prop_assert!(request.validate().is_err());
    }

    #[test]
    fn test_debug_never_shows_password(password in "[a-zA-Z0-9]{12,20}") {
        let request = RegisterRequest::new("Ann", "ann@example.com", password.clone());
        let debug = format!("{request:?}");
        prop_assert!(!debug.contains(&password));
    }
}
