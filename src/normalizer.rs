// Cleanup of scraped numeric text before parsing

/// Drops thousands separators: "1,234.5" -> "1234.5".
pub fn strip_thousands(text: &str) -> String {
    text.trim().replace(',', "")
}

/// Drops thousands separators and plus signs: "+1,234" -> "1234".
pub fn strip_count(text: &str) -> String {
    strip_thousands(text).replace('+', "")
}

pub fn parse_price(text: &str) -> Option<f64> {
    strip_thousands(text)
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
}

pub fn parse_count(text: &str) -> Option<i64> {
    strip_count(text).parse::<i64>().ok()
}
