//! Field Validation
//!
//! Synchronous per-field checks. Results are shown inline; they do not
//! block submission.

use reqwest::Url;

use crate::schema::Validator;

pub const URL_REQUIRED: &str = "URL is required";
pub const URL_INVALID: &str = "Enter a full URL, e.g. https://example.com";
pub const VALUE_REQUIRED: &str = "This field is required";

/// `Err` carries the inline message
pub fn check(validator: Validator, value: &str) -> Result<(), &'static str> {
    match validator {
        Validator::Url => check_url(value),
        Validator::NonEmpty if value.trim().is_empty() => Err(VALUE_REQUIRED),
        Validator::NonEmpty => Ok(()),
    }
}

fn check_url(value: &str) -> Result<(), &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(URL_REQUIRED);
    }
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => Ok(()),
        _ => Err(URL_INVALID),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_shapes() {
        assert_eq!(check(Validator::Url, ""), Err(URL_REQUIRED));
        assert_eq!(check(Validator::Url, "not-a-url"), Err(URL_INVALID));
        assert_eq!(check(Validator::Url, "ftp://example.com"), Err(URL_INVALID));
        assert_eq!(check(Validator::Url, "https://example.com"), Ok(()));
        assert_eq!(check(Validator::Url, " http://localhost:3000/a?b=c "), Ok(()));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(check(Validator::NonEmpty, "  "), Err(VALUE_REQUIRED));
        assert_eq!(check(Validator::NonEmpty, "x"), Ok(()));
    }
}
