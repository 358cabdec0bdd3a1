//! Callsign helpers: prefix extraction, country class, canonical form.

use crate::config::RuleSet;

/// Characters before the first digit, e.g. `"VE"` for `"VE3ABC"`.
pub fn prefix(call: &str) -> &str {
    match call.find(|c: char| c.is_ascii_digit()) {
        Some(i) => &call[..i],
        None => call,
    }
}

pub fn is_us(call: &str, rules: &RuleSet) -> bool {
    let p = prefix(call);
    match p.chars().next() {
        Some('K' | 'N' | 'W') => true,
        Some(_) => rules.us_prefixes.contains(p),
        None => false,
    }
}

pub fn is_canadian(call: &str, rules: &RuleSet) -> bool {
    rules.canadian_prefixes.contains(prefix(call))
}

/// Neither US nor Canadian.
pub fn is_foreign(call: &str, rules: &RuleSet) -> bool {
    !(is_us(call, rules) || is_canadian(call, rules))
}

/// Drops portable/mobile decorations: everything from the first `/`.
pub fn canonical(call: &str) -> &str {
    call.split('/').next().unwrap_or(call)
}

/// Alphanumeric plus `/`, at least 3 characters, at least one digit.
pub fn is_valid_format(call: &str) -> bool {
    call.len() >= 3
        && call.chars().all(|c| c.is_ascii_alphanumeric() || c == '/')
        && call.chars().any(|c| c.is_ascii_digit())
}
