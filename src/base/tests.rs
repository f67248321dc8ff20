use crate::base::error::CookieError;
use std::io::{Error, ErrorKind};

#[test]
fn test_rejections_are_classified() {
    assert!(CookieError::CookiePublicSuffix.is_rejection());
    assert!(CookieError::CookieInsecureOrigin.is_rejection());
    assert!(CookieError::CookieDomainMismatch {
        domain: "other.com".to_string(),
        host: "example.com".to_string(),
    }
    .is_rejection());

    let io = CookieError::io("/tmp/cookies", Error::new(ErrorKind::Other, "boom"));
    assert!(!io.is_rejection());
    assert!(!CookieError::InvalidPolicy("sometimes".to_string()).is_rejection());
}

#[test]
fn test_io_error_message_names_path() {
    let err = CookieError::io("/tmp/cookies", Error::new(ErrorKind::NotFound, "gone"));
    let msg = err.to_string();
    assert!(msg.contains("/tmp/cookies"));
    assert!(msg.contains("gone"));
}

#[test]
fn test_domain_mismatch_message() {
    let err = CookieError::CookieDomainMismatch {
        domain: "other.com".to_string(),
        host: "example.com".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Cookie domain other.com does not match host example.com"
    );
}
