//! Parsing for quantity strings carrying an optional unit suffix.
//!
//! Visum exports write lengths and speeds as text like `0.081km`, `500` or
//! `50km/h`, with either `.` or `,` as the decimal separator. These helpers
//! normalize lengths to meters and speeds to km/h.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static LENGTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([\d.,]+)\s*([a-zA-Z]*)").expect("length pattern is valid"));

static SPEED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([\d.,]+)\s*([a-zA-Z/]*)").expect("speed pattern is valid"));

/// Parses a length string into meters.
///
/// Recognized suffixes: `km`, `m`, `cm`, `mm`, `mi`, `ft`. A missing or
/// unrecognized suffix means the value is already in meters. An empty
/// string is 0.
pub fn parse_length(s: &str) -> Result<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    let (value, unit) = split_quantity(&LENGTH_RE, s, "length")?;
    let meters = match unit.as_str() {
        "km" => value * 1000.0,
        "" | "m" => value,
        "cm" => value / 100.0,
        "mm" => value / 1000.0,
        "mi" => value * 1609.34,
        "ft" => value * 0.3048,
        _ => value,
    };
    Ok(meters)
}

/// Parses a speed string into km/h.
///
/// Recognized suffixes: `km/h`, `m/s`, `mph`, `mi/h`, `km/min`, `m/min`,
/// `ft/s`. A missing or unrecognized suffix leaves the value unconverted.
/// An empty string is 0.
pub fn parse_speed(s: &str) -> Result<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    let (value, unit) = split_quantity(&SPEED_RE, s, "speed")?;
    let kmh = match unit.as_str() {
        "" | "km/h" => value,
        "m/s" => value * 3.6,
        "mph" | "mi/h" => value * 1.60934,
        "km/min" => value * 60.0,
        "m/min" => value * 0.06,
        "ft/s" => value * 1.09728,
        _ => value,
    };
    Ok(kmh)
}

fn split_quantity(re: &Regex, s: &str, kind: &'static str) -> Result<(f64, String)> {
    let caps = re.captures(s).ok_or_else(|| Error::BadQuantity {
        kind,
        value: s.to_string(),
    })?;
    let number = caps[1].replace(',', ".");
    let value: f64 = number.parse().map_err(|_| Error::BadQuantity {
        kind,
        value: s.to_string(),
    })?;
    let unit = caps
        .get(2)
        .map(|m| m.as_str().to_ascii_lowercase())
        .unwrap_or_default();
    Ok((value, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {} got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_length_with_km_suffix() {
        assert_close(parse_length("0.081km").unwrap(), 81.0);
        assert_close(parse_length("2km").unwrap(), 2000.0);
    }

    #[test]
    fn test_length_without_suffix_is_meters() {
        assert_close(parse_length("500").unwrap(), 500.0);
        assert_close(parse_length("12.5").unwrap(), 12.5);
    }

    #[test]
    fn test_length_small_units_not_shadowed_by_meters() {
        assert_close(parse_length("10cm").unwrap(), 0.1);
        assert_close(parse_length("250mm").unwrap(), 0.25);
    }

    #[test]
    fn test_length_imperial_units() {
        assert_close(parse_length("5mi").unwrap(), 8046.7);
        assert_close(parse_length("10ft").unwrap(), 3.048);
    }

    #[test]
    fn test_length_decimal_comma() {
        assert_close(parse_length("3,5").unwrap(), 3.5);
        assert_close(parse_length("0,081km").unwrap(), 81.0);
    }

    #[test]
    fn test_length_empty_is_zero() {
        assert_close(parse_length("").unwrap(), 0.0);
        assert_close(parse_length("  ").unwrap(), 0.0);
    }

    #[test]
    fn test_length_unrecognized_suffix_stays_meters() {
        assert_close(parse_length("7yd").unwrap(), 7.0);
    }

    #[test]
    fn test_length_garbage_is_error() {
        assert!(parse_length("abc").is_err());
        assert!(parse_length("..km").is_err());
    }

    #[test]
    fn test_speed_kmh_and_bare_number() {
        assert_close(parse_speed("50km/h").unwrap(), 50.0);
        assert_close(parse_speed("50").unwrap(), 50.0);
    }

    #[test]
    fn test_speed_conversions() {
        assert_close(parse_speed("20m/s").unwrap(), 72.0);
        assert_close(parse_speed("10mph").unwrap(), 16.0934);
        assert_close(parse_speed("10mi/h").unwrap(), 16.0934);
        assert_close(parse_speed("1km/min").unwrap(), 60.0);
        assert_close(parse_speed("100m/min").unwrap(), 6.0);
        assert_close(parse_speed("10ft/s").unwrap(), 10.9728);
    }

    #[test]
    fn test_speed_empty_is_zero() {
        assert_close(parse_speed("").unwrap(), 0.0);
    }

    #[test]
    fn test_speed_unrecognized_suffix_unconverted() {
        assert_close(parse_speed("30kph").unwrap(), 30.0);
    }

    #[test]
    fn test_speed_garbage_is_error() {
        assert!(parse_speed("fast").is_err());
    }

    #[test]
    fn test_whitespace_between_number_and_unit() {
        assert_close(parse_length("12.5 km").unwrap(), 12500.0);
        assert_close(parse_speed("30 m/s").unwrap(), 108.0);
    }
}
