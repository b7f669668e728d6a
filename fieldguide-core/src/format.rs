//! Display formatters for order and stock data.

use regex::Regex;
use std::sync::LazyLock;

/// Anything that is not an ASCII decimal digit.
static NON_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("Invalid regex"));

/// Anything that is not a hex digit.
static NON_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-fA-F0-9]").expect("Invalid regex"));

fn digits_only(input: &str) -> String {
    NON_DIGIT.replace_all(input, "").into_owned()
}

/// Uppercases the first character and lowercases the rest.
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Cuts `text` to `max_chars` characters, appending `...` when shortened.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}...")
}

/// Formats a 10-digit phone number as `(xxx) xxx-xxxx`.
///
/// Anything else is returned unchanged.
pub fn format_phone(phone: &str) -> String {
    let digits = digits_only(phone);
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        phone.to_string()
    }
}

/// Formats a 10-digit cédula as `xx-xxxx-xxxx`.
pub fn format_cedula(cedula: &str) -> String {
    let digits = digits_only(cedula);
    if digits.len() == 10 {
        format!("{}-{}-{}", &digits[..2], &digits[2..6], &digits[6..])
    } else {
        cedula.to_string()
    }
}

/// Formats a MAC address as `AA:BB:CC:DD:EE:FF`.
pub fn format_mac(mac: &str) -> String {
    let hex = NON_HEX.replace_all(mac, "").to_uppercase();
    if hex.len() != 12 {
        return mac.to_string();
    }
    hex.as_bytes()
        .chunks(2)
        .map(|pair| String::from_utf8_lossy(pair).into_owned())
        .collect::<Vec<_>>()
        .join(":")
}

/// Groups a serial number in blocks of four characters.
pub fn format_serial_number(serial: &str) -> String {
    serial
        .trim()
        .chars()
        .collect::<Vec<_>>()
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Masks all but the last `visible` characters with `mask`.
pub fn mask_sensitive(data: &str, visible: usize, mask: char) -> String {
    let len = data.chars().count();
    if len <= visible {
        return data.to_string();
    }
    let tail: String = data.chars().skip(len - visible).collect();
    format!("{}{tail}", mask.to_string().repeat(len - visible))
}

/// Hides most of the local part of an e-mail address.
pub fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return email.to_string();
    };
    let visible = (local.chars().count() / 2).min(3);
    let head: String = local.chars().take(visible).collect();
    format!("{head}***@{domain}")
}

/// Up to `max` initials of a name, uppercased.
pub fn initials(name: &str, max: usize) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(max)
        .collect()
}

/// Lowercases, trims, and strips Spanish accents for search comparisons.
pub fn normalize_text(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' | 'Á' | 'À' | 'Ä' | 'Â' => 'a',
            'é' | 'è' | 'ë' | 'ê' | 'É' | 'È' | 'Ë' | 'Ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' | 'Í' | 'Ì' | 'Ï' | 'Î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' | 'Ó' | 'Ò' | 'Ö' | 'Ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' | 'Ú' | 'Ù' | 'Ü' | 'Û' => 'u',
            'ñ' | 'Ñ' => 'n',
            other => other,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Formats a quantity, dropping the fraction for whole numbers.
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{quantity:.0}")
    } else {
        format!("{quantity:.2}")
    }
}
