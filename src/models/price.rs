use serde::{de, Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A fixed-point decimal kept in its literal form, e.g. `"8.500"`.
///
/// The text is never re-rendered, so whatever precision the client sent is
/// what gets stored and returned. Ordering against integer bounds is exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Price(String);

impl Price {
    pub fn parse(value: &str) -> Option<Self> {
        let digits = value.strip_prefix('-').unwrap_or(value);
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits, None),
        };

        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || frac_part.map_or(false, |f| !all_digits(f)) {
            return None;
        }

        Some(Price(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares this price with a whole number without going through floats.
    pub fn cmp_integer(&self, bound: i64) -> Ordering {
        let negative = self.0.starts_with('-');
        let digits = self.0.trim_start_matches('-');
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
        let int_part = int_part.trim_start_matches('0');
        let has_fraction = frac_part.bytes().any(|b| b != b'0');
        let is_zero = int_part.is_empty() && !has_fraction;

        let bound_digits = bound.unsigned_abs().to_string();
        let bound_digits = bound_digits.trim_start_matches('0');

        let magnitude = int_part
            .len()
            .cmp(&bound_digits.len())
            .then_with(|| int_part.cmp(bound_digits))
            .then_with(|| {
                if has_fraction {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            });

        match (negative && !is_zero, bound < 0) {
            (false, false) => magnitude,
            (true, true) => magnitude.reverse(),
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Accepts `"8.500"` as well as bare JSON numbers such as `8500`
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Literal {
            Text(String),
            Number(serde_json::Number),
        }

        let text = match Literal::deserialize(deserializer)
            .map_err(|_| de::Error::custom("Input should be a valid decimal"))?
        {
            Literal::Text(text) => text,
            Literal::Number(number) => number.to_string(),
        };

        Price::parse(text.trim())
            .ok_or_else(|| de::Error::custom("Input should be a valid decimal"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(value: &str) -> Price {
        Price::parse(value).unwrap()
    }

    #[test]
    fn parse_keeps_literal() {
        assert_eq!(price("8.500").as_str(), "8.500");
        assert_eq!(price("7000").as_str(), "7000");
        assert_eq!(price("-0.10").as_str(), "-0.10");
    }

    #[test]
    fn parse_rejects_non_decimal_text() {
        for value in ["", "abc", "1.", ".5", "1.2.3", "1e5", "--1", "1,5"] {
            assert!(Price::parse(value).is_none(), "{value} should be rejected");
        }
    }

    #[test]
    fn cmp_integer_handles_fractions() {
        assert_eq!(price("8.500").cmp_integer(8), Ordering::Greater);
        assert_eq!(price("8.000").cmp_integer(8), Ordering::Equal);
        assert_eq!(price("7.999").cmp_integer(8), Ordering::Less);
        assert_eq!(price("0008").cmp_integer(8), Ordering::Equal);
    }

    #[test]
    fn cmp_integer_handles_magnitude_and_sign() {
        assert_eq!(price("6000").cmp_integer(5000), Ordering::Greater);
        assert_eq!(price("999").cmp_integer(5000), Ordering::Less);
        assert_eq!(price("0").cmp_integer(0), Ordering::Equal);
        assert_eq!(price("-0.00").cmp_integer(0), Ordering::Equal);
        assert_eq!(price("-1.5").cmp_integer(-1), Ordering::Less);
        assert_eq!(price("-0.5").cmp_integer(-1), Ordering::Greater);
        assert_eq!(price("1").cmp_integer(-1), Ordering::Greater);
        assert_eq!(price("-1").cmp_integer(0), Ordering::Less);
        assert_eq!(price("5").cmp_integer(i64::MIN), Ordering::Greater);
    }

    #[test]
    fn deserialize_accepts_strings_and_numbers() {
        let from_text: Price = serde_json::from_str(r#""7.500""#).unwrap();
        let from_number: Price = serde_json::from_str("8500").unwrap();

        assert_eq!(from_text.as_str(), "7.500");
        assert_eq!(from_number.as_str(), "8500");
        assert!(serde_json::from_str::<Price>("true").is_err());
        assert!(serde_json::from_str::<Price>(r#""cheap""#).is_err());
    }
}
