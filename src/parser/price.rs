// Brazilian currency text -> numbers
use regex::Regex;
use std::sync::LazyLock;

static INSTALLMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*x\s*de\s*R\$\s*([\d.,]+)").expect("installment pattern")
});

/// Parses a price such as `R$ 1.234,56` into `1234.56`.
///
/// `None` is the out-of-stock sentinel: absent text, garbage, and anything that
/// does not parse to a finite number all end up here. Never panics.
pub fn parse_price(text: Option<&str>) -> Option<f64> {
    let text = text?;
    let cleaned: String = text
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Extracts `(installments, installment_price)` from text like `12x de R$ 74,01`.
pub fn parse_installments(text: &str) -> Option<(u32, f64)> {
    let caps = INSTALLMENTS.captures(text)?;
    let count = caps[1].parse::<u32>().ok()?;
    let price = parse_price(Some(&caps[2]))?;
    Some((count, price))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_brazilian_format() {
        assert_eq!(parse_price(Some("R$ 1.234,56")), Some(1234.56));
        assert_eq!(parse_price(Some("R$\u{a0}899,90")), Some(899.90));
        assert_eq!(parse_price(Some("  2.499,00 ")), Some(2499.0));
        assert_eq!(parse_price(Some("R$ 12.345.678,9")), Some(12345678.9));
    }

    #[test]
    fn garbage_is_out_of_stock() {
        assert_eq!(parse_price(None), None);
        assert_eq!(parse_price(Some("")), None);
        assert_eq!(parse_price(Some("N/A")), None);
        assert_eq!(parse_price(Some("Esgotado")), None);
        assert_eq!(parse_price(Some("R$ 1,2,3")), None);
        assert_eq!(parse_price(Some("inf")), None);
        assert_eq!(parse_price(Some("NaN")), None);
        assert_eq!(parse_price(Some("-10,00")), None);
    }

    #[test]
    fn installments_from_card_text() {
        assert_eq!(
            parse_installments("ou 12x de R$ 74,01 sem juros"),
            Some((12, 74.01))
        );
        assert_eq!(parse_installments("10 x de R$1.049,90"), Some((10, 1049.90)));
        assert_eq!(parse_installments("à vista no PIX"), None);
    }
}
