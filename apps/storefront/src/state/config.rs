//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! `STOREFRONT_*` environment variables win over the defaults below.
//! The config is shared read-only behind an `Arc` once the app starts.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use storefront_core::{Money, PriceRange, ProductFilter, DEFAULT_PRICE_CEILING};

/// Storefront settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Store name shown in the shell banner and on confirmations.
    pub store_name: String,

    /// Prefix for every rendered price.
    pub currency_symbol: String,

    /// How long the simulated payment takes before the order is confirmed.
    #[serde(with = "duration_ms")]
    pub payment_delay: Duration,

    /// Top of the price slider.
    pub price_ceiling: Money,

    /// How many related products the detail view lists.
    pub related_limit: usize,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Store: "Storefront"
    /// - Currency symbol: `$`
    /// - Payment delay: 2 seconds
    /// - Price slider: $0 to $200
    fn default() -> Self {
        AppConfig {
            store_name: "Storefront".to_string(),
            currency_symbol: String::from("$"),
            payment_delay: Duration::from_millis(2000),
            price_ceiling: DEFAULT_PRICE_CEILING,
            related_limit: 4,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the process environment.
    ///
    /// ## Variables
    /// - `STOREFRONT_STORE_NAME`: Override store name
    /// - `STOREFRONT_CURRENCY_SYMBOL`: Override currency symbol
    /// - `STOREFRONT_PAYMENT_DELAY_MS`: Override payment delay
    /// - `STOREFRONT_PRICE_CEILING`: Override the price slider maximum, e.g. `500` or `149.99`
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(store_name) = lookup("STOREFRONT_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("STOREFRONT_PAYMENT_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.payment_delay = Duration::from_millis(ms),
                Err(_) => warn!(value = %raw, "ignoring invalid STOREFRONT_PAYMENT_DELAY_MS"),
            }
        }

        if let Some(raw) = lookup("STOREFRONT_PRICE_CEILING") {
            match Money::from_decimal_str(&raw) {
                Ok(ceiling) if !ceiling.is_negative() => config.price_ceiling = ceiling,
                _ => warn!(value = %raw, "ignoring invalid STOREFRONT_PRICE_CEILING"),
            }
        }

        config
    }

    /// The grid filter a fresh page starts with.
    pub fn default_filter(&self) -> ProductFilter {
        match PriceRange::new(Money::zero(), self.price_ceiling) {
            Ok(range) => ProductFilter::default().with_price_range(range),
            Err(_) => ProductFilter::default(),
        }
    }

    /// Renders an amount with the configured symbol, e.g. `$12.34`.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_app::state::AppConfig;
    /// use storefront_core::Money;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!(
            "{sign}{}{}.{:02}",
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency() {
        let config = AppConfig::default();
        let rendered: Vec<String> = [12999, 100, 5, 0, -1234]
            .into_iter()
            .map(|c| config.format_currency(Money::from_cents(c)))
            .collect();
        assert_eq!(rendered, vec!["$129.99", "$1.00", "$0.05", "$0.00", "-$12.34"]);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("STOREFRONT_STORE_NAME", "Threads"),
            ("STOREFRONT_CURRENCY_SYMBOL", "€"),
            ("STOREFRONT_PAYMENT_DELAY_MS", "0"),
            ("STOREFRONT_PRICE_CEILING", "149.99"),
        ]));
        assert_eq!(config.store_name, "Threads");
        assert_eq!(config.format_currency(Money::from_cents(250)), "€2.50");
        assert_eq!(config.payment_delay, Duration::ZERO);
        assert_eq!(config.price_ceiling, Money::from_cents(14999));
    }

    #[test]
    fn test_from_lookup_ignores_garbage() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("STOREFRONT_PAYMENT_DELAY_MS", "soon"),
            ("STOREFRONT_PRICE_CEILING", "-5"),
        ]));
        let defaults = AppConfig::default();
        assert_eq!(config.payment_delay, defaults.payment_delay);
        assert_eq!(config.price_ceiling, defaults.price_ceiling);

        for huge in ["99999999999999999", "1e30"] {
            let config = AppConfig::from_lookup(lookup_from(&[("STOREFRONT_PRICE_CEILING", huge)]));
            assert_eq!(config.price_ceiling, defaults.price_ceiling);
            assert_eq!(config.default_filter().price_range.max(), DEFAULT_PRICE_CEILING);
        }
    }

    #[test]
    fn test_default_filter_uses_ceiling() {
        let config = AppConfig {
            price_ceiling: Money::from_cents(6000),
            ..AppConfig::default()
        };
        assert_eq!(config.default_filter().price_range.max().cents(), 6000);
    }
}
