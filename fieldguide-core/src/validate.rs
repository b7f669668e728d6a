//! Input validators for login and order edits.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Minimum password length accepted by the login form.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Pattern for a plausible e-mail address.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

fn digit_count(input: &str) -> usize {
    input.chars().filter(char::is_ascii_digit).count()
}

/// Returns true for a plausible e-mail address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Returns true if the password meets the minimum length.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Returns true for a 10-digit phone number, ignoring punctuation.
pub fn is_valid_phone(phone: &str) -> bool {
    digit_count(phone) == 10
}

/// Returns true for a 10-digit cédula, ignoring punctuation.
pub fn is_valid_cedula(cedula: &str) -> bool {
    digit_count(cedula) == 10
}

/// Returns true if the value is not blank.
pub fn is_required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Returns true if `value` parses as an absolute URL.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}
