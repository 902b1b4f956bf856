//! Locale-dependent currency formatting
//!
//! A small table of conventions covering the common English, German, French
//! and Japanese locales. Unknown languages format like `en-US`.

use rust_decimal::RoundingStrategy;
use upview_client::Amount;
use upview_utils::group_digits;

/// Environment variables consulted, most specific first
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MONETARY", "LANG"];

const FALLBACK_TAG: &str = "en-US";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    /// `$12.50`
    Before,
    /// `12,50 €`
    After,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    tag: String,
    decimal_separator: &'static str,
    group_separator: &'static str,
    symbol_position: SymbolPosition,
    home_currency: Option<&'static str>,
}

impl Default for Locale {
    fn default() -> Self {
        Self::parse(FALLBACK_TAG)
    }
}

impl Locale {
    /// Parse a BCP 47 (`en-AU`) or POSIX (`en_AU.UTF-8`) locale name
    pub fn parse(name: &str) -> Self {
        let base = name
            .split(|c: char| c == '.' || c == '@')
            .next()
            .unwrap_or_default()
            .trim()
            .replace('_', "-");

        if base.is_empty() || base.eq_ignore_ascii_case("C") || base.eq_ignore_ascii_case("POSIX") {
            return Self::parse(FALLBACK_TAG);
        }

        let mut parts = base.split('-');
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let region = parts.next().map(|r| r.to_ascii_uppercase());

        let (decimal_separator, group_separator, symbol_position) = match language.as_str() {
            "de" => (",", ".", SymbolPosition::After),
            "fr" => (",", "\u{202f}", SymbolPosition::After),
            _ => (".", ",", SymbolPosition::Before),
        };

        let tag = match (&region, language.as_str()) {
            (Some(region), _) => format!("{}-{}", language, region),
            (None, "en") => FALLBACK_TAG.to_string(),
            (None, _) => language.clone(),
        };

        let home_currency = region
            .as_deref()
            .and_then(home_currency_for_region)
            .or_else(|| if tag == FALLBACK_TAG { Some("USD") } else { None });

        Self {
            tag,
            decimal_separator,
            group_separator,
            symbol_position,
            home_currency,
        }
    }

    /// Locale of the running environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        LOCALE_ENV_VARS
            .iter()
            .filter_map(|key| lookup(key))
            .find(|value| !value.trim().is_empty())
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// Configured locale if given, otherwise the environment's
    pub fn resolve(configured: Option<&str>) -> Self {
        match configured {
            Some(name) if !name.trim().is_empty() => Self::parse(name),
            _ => Self::from_env(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    fn symbol_for(&self, currency_code: &str) -> Option<&'static str> {
        let code = currency_code.to_ascii_uppercase();
        if self.home_currency == Some(code.as_str()) {
            if let Some(symbol) = local_symbol(&code) {
                return Some(symbol);
            }
        }
        international_symbol(&code)
    }

    /// Format an amount as a currency string
    pub fn format_amount(&self, amount: &Amount) -> String {
        let exponent = amount.exponent();
        let mut value = amount
            .decimal()
            .round_dp_with_strategy(exponent, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(exponent);

        let negative = value.is_sign_negative() && !value.is_zero();
        let digits = value.abs().to_string();
        let (integer, fraction) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits.as_str(), None),
        };

        let mut number = group_digits(integer, self.group_separator);
        if let Some(fraction) = fraction {
            number.push_str(self.decimal_separator);
            number.push_str(fraction);
        }

        let sign = if negative { "-" } else { "" };
        match (self.symbol_for(&amount.currency_code), self.symbol_position) {
            (Some(symbol), SymbolPosition::Before) => format!("{}{}{}", sign, symbol, number),
            (Some(symbol), SymbolPosition::After) => format!("{}{}\u{a0}{}", sign, number, symbol),
            (None, SymbolPosition::Before) => {
                format!("{}{}\u{a0}{}", sign, amount.currency_code.to_ascii_uppercase(), number)
            }
            (None, SymbolPosition::After) => {
                format!("{}{}\u{a0}{}", sign, number, amount.currency_code.to_ascii_uppercase())
            }
        }
    }
}

fn home_currency_for_region(region: &str) -> Option<&'static str> {
    match region {
        "AU" => Some("AUD"),
        "US" => Some("USD"),
        "GB" => Some("GBP"),
        "NZ" => Some("NZD"),
        "CA" => Some("CAD"),
        "JP" => Some("JPY"),
        "AT" | "BE" | "DE" | "ES" | "FI" | "FR" | "IE" | "IT" | "LU" | "NL" | "PT" => Some("EUR"),
        _ => None,
    }
}

/// Symbol used for a currency inside its own country
fn local_symbol(code: &str) -> Option<&'static str> {
    match code {
        "AUD" | "USD" | "NZD" | "CAD" => Some("$"),
        "JPY" => Some("￥"),
        _ => None,
    }
}

/// Symbol used for a currency everywhere else.
///
/// A fixed table approximating CLDR: CLDR varies this per locale (en-AU shows
/// `USD 3.00`, de-DE shows `12,50 AU$`), this table uses one symbol everywhere.
fn international_symbol(code: &str) -> Option<&'static str> {
    match code {
        "AUD" => Some("A$"),
        "USD" => Some("US$"),
        "NZD" => Some("NZ$"),
        "CAD" => Some("CA$"),
        "HKD" => Some("HK$"),
        "GBP" => Some("£"),
        "EUR" => Some("€"),
        "JPY" => Some("¥"),
        "CNY" => Some("CN¥"),
        "INR" => Some("₹"),
        "KRW" => Some("₩"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aud(value: &str) -> Amount {
        Amount::from_value("AUD", value)
    }

    #[test]
    fn test_parse_locale_names() {
        assert_eq!(Locale::parse("en_AU.UTF-8").tag(), "en-AU");
        assert_eq!(Locale::parse("de-DE").tag(), "de-DE");
        assert_eq!(Locale::parse("fr_FR@euro").tag(), "fr-FR");
        assert_eq!(Locale::parse("C").tag(), "en-US");
        assert_eq!(Locale::parse("POSIX").tag(), "en-US");
        assert_eq!(Locale::parse("").tag(), "en-US");
        assert_eq!(Locale::parse("en").tag(), "en-US");
    }

    #[test]
    fn test_env_lookup_order() {
        let locale = Locale::from_lookup(|key| match key {
            "LC_ALL" => Some(String::new()),
            "LC_MONETARY" => Some("de_DE.UTF-8".to_string()),
            "LANG" => Some("en_AU.UTF-8".to_string()),
            _ => None,
        });
        assert_eq!(locale.tag(), "de-DE");

        let locale = Locale::from_lookup(|_| None);
        assert_eq!(locale.tag(), "en-US");
    }

    #[test]
    fn test_resolve_prefers_configured() {
        assert_eq!(Locale::resolve(Some("en-GB")).tag(), "en-GB");
    }

    #[test]
    fn test_en_au_formats_aud_with_dollar() {
        let locale = Locale::parse("en-AU");
        assert_eq!(locale.format_amount(&aud("12.50")), "$12.50");
        assert_eq!(locale.format_amount(&aud("-4.50")), "-$4.50");
        assert_eq!(locale.format_amount(&aud("1234567.8")), "$1,234,567.80");
        assert_eq!(locale.format_amount(&aud("0.00")), "$0.00");
        assert_eq!(locale.format_amount(&aud("-0.00")), "$0.00");
    }

    #[test]
    fn test_foreign_currency_uses_international_symbol() {
        assert_eq!(Locale::parse("en-US").format_amount(&aud("12.50")), "A$12.50");
        assert_eq!(Locale::parse("en-AU").format_amount(&Amount::from_value("USD", "3")), "US$3.00");
        assert_eq!(
            Locale::parse("en-AU").format_amount(&Amount::from_value("XYZ", "3.5")),
            "XYZ\u{a0}3.50"
        );
    }

    #[test]
    fn test_suffix_locales() {
        let de = Locale::parse("de_DE.UTF-8");
        assert_eq!(de.format_amount(&Amount::from_value("EUR", "-1234.5")), "-1.234,50\u{a0}€");
        assert_eq!(de.format_amount(&aud("12.50")), "12,50\u{a0}A$");

        let fr = Locale::parse("fr-FR");
        assert_eq!(fr.format_amount(&Amount::from_value("EUR", "1234.5")), "1\u{202f}234,50\u{a0}€");
    }

    #[test]
    fn test_zero_decimal_currency() {
        let ja = Locale::parse("ja-JP");
        assert_eq!(ja.format_amount(&Amount::from_value("JPY", "1200")), "￥1,200");
        assert_eq!(Locale::parse("en-AU").format_amount(&Amount::from_value("JPY", "1200.4")), "¥1,200");
    }

    #[test]
    fn test_rounds_to_currency_exponent() {
        let locale = Locale::parse("en-AU");
        assert_eq!(locale.format_amount(&aud("2.345")), "$2.35");
        assert_eq!(locale.format_amount(&aud("-2.345")), "-$2.35");
    }
}
