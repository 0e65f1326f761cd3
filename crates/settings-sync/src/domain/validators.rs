//! # Field Validators
//!
//! Pure, synchronous, side-effect-free predicates. They return `false`
//! for anything invalid and never panic; there is no error detail beyond
//! the boolean, because local validation is surfaced as helper text, not
//! as an error value.

use regex::Regex;
use shared_types::LanguageEntry;
use std::sync::LazyLock;
use url::Url;

/// Maximum email length in bytes, before and after percent-encoding.
pub const MAX_EMAIL_LENGTH: usize = 320;

// RFC-5322-ish address grammar (the HTML5 email pattern): printable
// local part, dot-separated label domain without leading/trailing hyphens.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email regex is valid")
});

static TWITTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@?[A-Za-z0-9_]{1,15}$").expect("twitter regex is valid"));

static FEDIVERSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@?[A-Za-z0-9_.-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("fediverse regex is valid")
});

/// Validate an email address.
///
/// Grammar match, at most 320 bytes plain and percent-encoded (the server
/// stores addresses percent-encoded in the lookup payload), and no
/// trailing newline.
#[must_use]
pub fn validate_email(s: &str) -> bool {
    if s.ends_with('\n') || s.len() > MAX_EMAIL_LENGTH {
        return false;
    }
    if urlencoding::encode(s).len() > MAX_EMAIL_LENGTH {
        return false;
    }
    EMAIL_RE.is_match(s)
}

/// Validate that `s` parses as an absolute URL.
#[must_use]
pub fn validate_url(s: &str) -> bool {
    Url::parse(s).is_ok()
}

/// Validate a phone number.
///
/// Grammar check on the normalized digits: the international `+` form is
/// always accepted (8-15 digits); a national form is accepted only when a
/// default region is supplied.
#[must_use]
pub fn validate_phone(s: &str, default_region: Option<&str>) -> bool {
    let normalized: String = s
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.' | '/'))
        .collect();

    if let Some(rest) = normalized.strip_prefix('+') {
        return rest.len() >= 8 && rest.len() <= 15 && rest.chars().all(|c| c.is_ascii_digit());
    }

    match default_region {
        Some(region) if !region.is_empty() => {
            normalized.len() >= 4
                && normalized.len() <= 15
                && normalized.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

/// Validate a language option: non-empty code and defined, non-empty name.
#[must_use]
pub fn validate_language(entry: &LanguageEntry) -> bool {
    !entry.code.is_empty() && !entry.name.is_empty()
}

/// Validate a locale option: same shape as a language option.
#[must_use]
pub fn validate_locale(entry: &LanguageEntry) -> bool {
    validate_language(entry)
}

/// Validate a wire boolean (`"0" | "1" | "true" | "false"`).
#[must_use]
pub fn validate_boolean(s: &str) -> bool {
    matches!(s, "0" | "1" | "true" | "false")
}

/// Validate a twitter handle, with or without the leading `@`.
#[must_use]
pub fn validate_twitter(s: &str) -> bool {
    TWITTER_RE.is_match(s)
}

/// Validate a fediverse handle (`user@host`, optional leading `@`).
#[must_use]
pub fn validate_fediverse(s: &str) -> bool {
    FEDIVERSE_RE.is_match(s)
}
