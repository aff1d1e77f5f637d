// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Live typing aids: phone normalization, store-name hint, business-type guess,
//! and the address character counter.

/// Soft limit shown by the business address counter.
pub const ADDRESS_MAX_CHARS: usize = 500;

/// Keep digits only; once ten or more are typed, cap the value at eleven.
pub fn normalize_phone_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 10 {
        digits.chars().take(11).collect()
    } else {
        digits
    }
}

/// Placeholder for an empty store name, derived from the seller name.
pub fn store_name_hint(seller_name: &str) -> Option<String> {
    let name = seller_name.trim();
    (!name.is_empty()).then(|| format!("{name}'s Tech Store"))
}

/// Guess a business type value from words in the store name.
pub fn suggest_business_type(store_name: &str) -> Option<&'static str> {
    let lower = store_name.to_lowercase();
    if lower.contains("corp") || lower.contains("inc") {
        Some("corporation")
    } else if lower.contains("llc") {
        Some("llc")
    } else if lower.contains("partnership") {
        Some("partnership")
    } else {
        None
    }
}

/// Character count for the address box and whether it is past 90% of the limit.
pub fn address_counter(text: &str) -> (usize, bool) {
    let count = text.chars().count();
    (count, count * 10 > ADDRESS_MAX_CHARS * 9)
}
