//! Display helpers.

use alloy_primitives::U256;

/// Shortens an address to `0x1234...abcd`.
///
/// Inputs of ten characters or fewer are returned unchanged.
#[must_use]
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_owned();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Formats a base-unit amount as a decimal string with exactly `precision`
/// fractional digits, rounding half up.
///
/// `format_units(U256::from(1_500_000_000_000_000_000u128), 18, 4)` is `"1.5000"`.
#[must_use]
pub fn format_units(amount: U256, decimals: u8, precision: usize) -> String {
    let decimals = usize::from(decimals);
    let (scaled, padding) = if precision < decimals {
        (round_div_pow10(amount, decimals - precision), 0)
    } else {
        (amount, precision - decimals)
    };
    let mut digits = scaled.to_string();
    digits.push_str(&"0".repeat(padding));
    if precision == 0 {
        return digits;
    }
    let digits = format!("{digits:0>width$}", width = precision + 1);
    let (int_part, frac_part) = digits.split_at(digits.len() - precision);
    format!("{int_part}.{frac_part}")
}

/// `amount / 10^exponent`, rounded half up.
fn round_div_pow10(amount: U256, exponent: usize) -> U256 {
    let Some(scale) = U256::from(10u8).checked_pow(U256::from(exponent)) else {
        return U256::ZERO;
    };
    let quotient = amount / scale;
    let remainder = amount % scale;
    if remainder >= scale - remainder {
        quotient + U256::from(1u8)
    } else {
        quotient
    }
}
