//! City derivation from free-text addresses.

/// Derives a city name from a comma-separated address.
///
/// Takes the last-but-one comma token, trimmed. Listing addresses follow
/// the `"street, area, city, postal-code"` convention, so the city sits
/// just before the trailing postal code.
///
/// Returns `None` when the address has fewer than two comma-separated
/// tokens or the derived token is empty.
pub fn derive_city(address: &str) -> Option<String> {
    let tokens: Vec<&str> = address.split(',').collect();

    if tokens.len() < 2 {
        return None;
    }

    let city = tokens[tokens.len() - 2].trim();
    if city.is_empty() {
        return None;
    }

    Some(city.to_string())
}
