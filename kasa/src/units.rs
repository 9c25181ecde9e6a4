//! Fixed-point unit conversion for on-chain amounts.
//!
//! Chain balances arrive as integer base units (wei, satoshi, token base
//! units). These helpers convert them to human-readable decimal strings
//! without going through floating point.

use crate::error::{Error, Result};

/// Format an integer base-unit amount as a decimal string with the given
/// number of fractional digits.
///
/// Trailing zeros in the fractional part are trimmed; a whole amount
/// renders without a decimal point.
///
/// ```
/// use kasa::units::format_units;
///
/// assert_eq!(format_units(1_500_000_000_000_000_000, 18), "1.5");
/// assert_eq!(format_units(150_000_000, 8), "1.5");
/// ```
pub fn format_units(raw: u128, decimals: u8) -> String {
    let raw = raw.to_string();
    if decimals == 0 || raw == "0" {
        return raw;
    }

    let decimals = usize::from(decimals);

    if raw.len() <= decimals {
        // Amount smaller than one whole unit.
        let padding = decimals - raw.len();
        let fraction = format!("{}{}", "0".repeat(padding), raw);
        let trimmed = fraction.trim_end_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            format!("0.{trimmed}")
        }
    } else {
        let (integer, fraction) = raw.split_at(raw.len() - decimals);
        let trimmed = fraction.trim_end_matches('0');
        if trimmed.is_empty() {
            integer.to_string()
        } else {
            format!("{integer}.{trimmed}")
        }
    }
}

/// Parse a JSON-RPC hex quantity (`"0x1b4"`) into an integer.
///
/// Accepts an optional `0x` prefix. Values wider than 128 bits are
/// rejected rather than truncated.
pub fn parse_hex_quantity(quantity: &str) -> Result<u128> {
    let body = quantity
        .strip_prefix("0x")
        .or_else(|| quantity.strip_prefix("0X"))
        .unwrap_or(quantity);

    if body.is_empty() || body.len() > 32 {
        return Err(Error::InvalidEncoding);
    }

    u128::from_str_radix(body, 16).map_err(|_| Error::InvalidEncoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_amounts() {
        // 1 ETH = 10^18 wei
        assert_eq!(format_units(1_000_000_000_000_000_000, 18), "1");
        // 1 BTC = 10^8 satoshi
        assert_eq!(format_units(100_000_000, 8), "1");
        assert_eq!(format_units(1_000_000, 6), "1");
    }

    #[test]
    fn fractional_amounts() {
        assert_eq!(format_units(1_500_000_000_000_000_000, 18), "1.5");
        assert_eq!(format_units(1_000_000_000_000_000, 18), "0.001");
        assert_eq!(format_units(12_345, 8), "0.00012345");
    }

    #[test]
    fn zero() {
        assert_eq!(format_units(0, 18), "0");
        assert_eq!(format_units(0, 0), "0");
    }

    #[test]
    fn zero_decimals() {
        assert_eq!(format_units(42, 0), "42");
    }

    #[test]
    fn parse_quantities() {
        assert_eq!(parse_hex_quantity("0x0").unwrap(), 0);
        assert_eq!(parse_hex_quantity("0x1b4").unwrap(), 436);
        assert_eq!(parse_hex_quantity("de0b6b3a7640000").unwrap(), 10u128.pow(18));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_hex_quantity("0x").is_err());
        assert!(parse_hex_quantity("0xzz").is_err());
        assert!(parse_hex_quantity("0x123456789012345678901234567890123").is_err());
    }
}
