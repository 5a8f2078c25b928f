use rust_decimal::{Decimal, RoundingStrategy};

/// Descriptions longer than this are cut in list views.
const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Mask a phone number as (XXX) XXX-XXXX.
/// Accepts 10 digits, or 11 with a leading country code 1; anything else is returned unchanged.
pub fn mask_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    let local = match digits.len() {
        10 => digits.as_str(),
        11 if digits.starts_with('1') => &digits[1..],
        _ => return phone.to_string(),
    };

    format!("({}) {}-{}", &local[0..3], &local[3..6], &local[6..10])
}

/// Cut a description to the preview length, marking the cut with " ...".
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        description.to_string()
    } else {
        let head: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{} ...", head)
    }
}

/// Format a price as dollars with two decimals, e.g. `$12.50`.
pub fn format_price(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("5551234567"), "(555) 123-4567");
        assert_eq!(mask_phone("15551234567"), "(555) 123-4567");
        assert_eq!(mask_phone("555-123-4567"), "(555) 123-4567");
        assert_eq!(mask_phone("(555) 123-4567"), "(555) 123-4567");
        assert_eq!(mask_phone("123"), "123");
    }

    #[test]
    fn test_truncate_description() {
        assert_eq!(truncate_description("Short"), "Short");

        let long = "a".repeat(120);
        let cut = truncate_description(&long);
        assert_eq!(cut, format!("{} ...", "a".repeat(100)));

        let exact = "b".repeat(100);
        assert_eq!(truncate_description(&exact), exact);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::new(1299, 2)), "$12.99");
        assert_eq!(format_price(Decimal::new(5, 0)), "$5.00");
        assert_eq!(format_price(Decimal::new(12345, 3)), "$12.35");
        assert_eq!(format_price(Decimal::new(125, 1)), "$12.50");
    }
}
