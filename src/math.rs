// src/math.rs
use anyhow::{anyhow, bail, Result};
use ethers::types::U256;

/// All amounts cross the contract boundary as integers scaled by 10^18.
pub const DECIMALS: usize = 18;

/// Parse a human decimal string into its fixed-point integer representation.
pub fn parse_amount(text: &str) -> Result<U256> {
    let text = text.trim();
    if text.is_empty() {
        bail!("empty amount");
    }

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        bail!("malformed amount: {}", text);
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        bail!("malformed amount: {}", text);
    }
    if frac_part.len() > DECIMALS {
        bail!("too many decimal places (max {}): {}", DECIMALS, text);
    }

    let int_value = if int_part.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(int_part).map_err(|e| anyhow!("malformed amount {}: {:?}", text, e))?
    };
    let frac_value = if frac_part.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(frac_part).map_err(|e| anyhow!("malformed amount {}: {:?}", text, e))?
            * U256::exp10(DECIMALS - frac_part.len())
    };

    int_value
        .checked_mul(U256::exp10(DECIMALS))
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(|| anyhow!("amount out of range: {}", text))
}

/// Format a fixed-point integer amount back into a decimal string.
/// Trailing fractional zeros are trimmed down to a single digit, so whole
/// numbers render as "50.0".
pub fn format_amount(value: U256) -> String {
    let raw = value.to_string();
    let raw = if raw.len() <= DECIMALS {
        format!("{}{}", "0".repeat(DECIMALS + 1 - raw.len()), raw)
    } else {
        raw
    };

    let (int_part, frac_part) = raw.split_at(raw.len() - DECIMALS);
    let frac_trimmed = frac_part.trim_end_matches('0');
    if frac_trimmed.is_empty() {
        format!("{}.0", int_part)
    } else {
        format!("{}.{}", int_part, frac_trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(s: &str) -> U256 {
        U256::from_dec_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("0.1").unwrap(), wei("100000000000000000"));
        assert_eq!(parse_amount("10").unwrap(), wei("10000000000000000000"));
        assert_eq!(parse_amount("1.5").unwrap(), wei("1500000000000000000"));
        assert_eq!(parse_amount(".5").unwrap(), wei("500000000000000000"));
        assert_eq!(parse_amount("0.000000000000000001").unwrap(), U256::one());
        assert_eq!(parse_amount(" 2 ").unwrap(), wei("2000000000000000000"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount(".").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("1.2.3").is_err());
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("1e5").is_err());
        // 19 fractional digits is one more than the contract scale
        assert!(parse_amount("0.0000000000000000001").is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(wei("50000000000000000000")), "50.0");
        assert_eq!(format_amount(wei("100000000000000000")), "0.1");
        assert_eq!(format_amount(wei("1500000000000000000")), "1.5");
        assert_eq!(format_amount(U256::zero()), "0.0");
        assert_eq!(format_amount(U256::one()), "0.000000000000000001");
    }

    #[test]
    fn test_round_trip_preserves_value() {
        for text in ["0.1", "1", "50.0", "123.456", "0.000000000000000001"] {
            let parsed = parse_amount(text).unwrap();
            assert_eq!(parse_amount(&format_amount(parsed)).unwrap(), parsed);
        }
    }
}
