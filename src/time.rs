//! Exact rational time values.
//!
//! The interchange format expresses every time as an exact fraction of
//! seconds (`10s`, `1001/30000s`), so the core never touches floating point
//! for placement arithmetic. Values stay unreduced through arithmetic to
//! avoid repeated normalization; canonical reduction happens at format time.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An exact time value in seconds, stored as `num / den`.
///
/// The denominator is always positive; the sign lives on the numerator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RationalTime {
    num: i64,
    den: i32,
}

/// Error returned when parsing a rational time literal fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid rational time literal '{0}'")]
pub struct ParseRationalTimeError(pub String);

impl RationalTime {
    /// Zero seconds, canonically `0/1`.
    pub const ZERO: Self = Self { num: 0, den: 1 };

    /// Create a time value from a numerator and a non-zero denominator.
    ///
    /// A negative denominator is normalized by moving the sign to the
    /// numerator. Panics on a zero denominator; that is a programming error,
    /// not an input condition.
    pub fn new(num: i64, den: i32) -> Self {
        assert!(den != 0, "rational time denominator must be non-zero");
        if den < 0 {
            Self { num: -num, den: -den }
        } else {
            Self { num, den }
        }
    }

    /// Whole seconds.
    pub fn from_seconds(secs: i64) -> Self {
        Self { num: secs, den: 1 }
    }

    pub fn numerator(&self) -> i64 {
        self.num
    }

    pub fn denominator(&self) -> i32 {
        self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    pub fn is_positive(&self) -> bool {
        self.num > 0
    }

    pub fn is_negative(&self) -> bool {
        self.num < 0
    }

    /// The value in lowest terms.
    pub fn reduced(&self) -> Self {
        if self.num == 0 {
            return Self::ZERO;
        }
        let g = gcd(self.num.unsigned_abs(), self.den as u64) as i64;
        Self {
            num: self.num / g,
            den: (self.den as i64 / g) as i32,
        }
    }

    /// Approximate value in seconds, for display and debugging only.
    /// Placement arithmetic never goes through this.
    pub fn as_seconds_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Shared add/sub over unreduced fractions.
    ///
    /// Same-denominator operands keep their denominator untouched. Mixed
    /// denominators combine over the lcm; reduction only kicks in when the
    /// combined denominator would not fit in `i32`.
    fn combine(self, other: Self, sign: i64) -> Self {
        if self.den == other.den {
            return Self {
                num: self.num + sign * other.num,
                den: self.den,
            };
        }
        let g = gcd(self.den as u64, other.den as u64) as i64;
        let lcm = self.den as i64 / g * other.den as i64;
        let num = self.num * (lcm / self.den as i64) + sign * other.num * (lcm / other.den as i64);
        if lcm <= i32::MAX as i64 {
            return Self { num, den: lcm as i32 };
        }
        let g2 = gcd(num.unsigned_abs(), lcm as u64).max(1) as i64;
        if lcm / g2 <= i32::MAX as i64 {
            return Self {
                num: num / g2,
                den: (lcm / g2) as i32,
            };
        }
        // Coprime denominators this large never come from real media
        // timescales; round to nanosecond resolution rather than overflow.
        const NANOS: i64 = 1_000_000_000;
        let rounded = (num as i128 * NANOS as i128 / lcm as i128) as i64;
        Self {
            num: rounded,
            den: NANOS as i32,
        }
    }
}

impl Default for RationalTime {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for RationalTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.combine(rhs, 1)
    }
}

impl Sub for RationalTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.combine(rhs, -1)
    }
}

impl PartialEq for RationalTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RationalTime {}

impl PartialOrd for RationalTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RationalTime {
    fn cmp(&self, other: &Self) -> Ordering {
        // Exact comparison: cross-multiply in i128, which cannot overflow
        // for i64 numerators and i32 denominators.
        let lhs = self.num as i128 * other.den as i128;
        let rhs = other.num as i128 * self.den as i128;
        lhs.cmp(&rhs)
    }
}

impl Hash for RationalTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash the reduced form so equal values hash equally.
        let r = self.reduced();
        r.num.hash(state);
        r.den.hash(state);
    }
}

impl fmt::Display for RationalTime {
    /// Canonical interchange form: `<int>s` when the reduced denominator is
    /// 1, otherwise `<num>/<den>s` in lowest terms. Never a decimal point.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.reduced();
        if r.den == 1 {
            write!(f, "{}s", r.num)
        } else {
            write!(f, "{}/{}s", r.num, r.den)
        }
    }
}

impl FromStr for RationalTime {
    type Err = ParseRationalTimeError;

    /// Parses both canonical forms: `10s`, `-3s`, `1001/30000s`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRationalTimeError(s.to_string());
        let body = s.strip_suffix('s').ok_or_else(err)?;
        match body.split_once('/') {
            Some((num, den)) => {
                let num: i64 = num.trim().parse().map_err(|_| err())?;
                let den: i32 = den.trim().parse().map_err(|_| err())?;
                if den == 0 {
                    return Err(err());
                }
                Ok(Self::new(num, den))
            }
            None => {
                let num: i64 = body.trim().parse().map_err(|_| err())?;
                Ok(Self::from_seconds(num))
            }
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_negative_denominator() {
        let t = RationalTime::new(1, -2);
        assert_eq!(t.numerator(), -1);
        assert_eq!(t.denominator(), 2);
    }

    #[test]
    #[should_panic]
    fn test_zero_denominator_panics() {
        let _ = RationalTime::new(1, 0);
    }

    #[test]
    fn test_add_same_denominator_stays_unreduced() {
        let a = RationalTime::new(1, 4);
        let b = RationalTime::new(1, 4);
        let sum = a + b;
        // 2/4, not 1/2: reduction is deferred to format time.
        assert_eq!(sum.numerator(), 2);
        assert_eq!(sum.denominator(), 4);
        assert_eq!(sum, RationalTime::new(1, 2));
    }

    #[test]
    fn test_add_mixed_denominators() {
        let a = RationalTime::new(1, 2);
        let b = RationalTime::new(1, 3);
        assert_eq!(a + b, RationalTime::new(5, 6));
    }

    #[test]
    fn test_sub() {
        let a = RationalTime::from_seconds(10);
        let b = RationalTime::new(1, 2);
        assert_eq!(a - b, RationalTime::new(19, 2));
    }

    #[test]
    fn test_add_same_large_denominator_keeps_fast_path() {
        let a = RationalTime::new(1, 2_000_000_000);
        let sum = a + a;
        assert_eq!(sum, RationalTime::new(1, 1_000_000_000));
    }

    #[test]
    fn test_add_pathological_denominators_rounds_to_nanos() {
        // lcm(1_500_000_000, 2_000_000_000) = 6e9 does not fit i32 and the
        // sum 7/6e9 cannot be reduced into range.
        let a = RationalTime::new(1, 1_500_000_000);
        let b = RationalTime::new(1, 2_000_000_000);
        let sum = a + b;
        assert_eq!(sum, RationalTime::new(1, 1_000_000_000));
    }

    #[test]
    fn test_ordering_is_exact() {
        let a = RationalTime::new(1, 3);
        let b = RationalTime::new(333_333_333, 1_000_000_000);
        assert!(b < a);
        assert!(RationalTime::ZERO < a);
        assert!(RationalTime::new(-1, 3) < RationalTime::ZERO);
    }

    #[test]
    fn test_equality_across_denominators() {
        assert_eq!(RationalTime::new(2, 4), RationalTime::new(1, 2));
        assert_eq!(RationalTime::new(0, 7), RationalTime::ZERO);
    }

    #[test]
    fn test_display_integer_seconds() {
        assert_eq!(RationalTime::from_seconds(10).to_string(), "10s");
        assert_eq!(RationalTime::new(20, 2).to_string(), "10s");
        assert_eq!(RationalTime::ZERO.to_string(), "0s");
    }

    #[test]
    fn test_display_reduces_fraction() {
        assert_eq!(RationalTime::new(2, 4).to_string(), "1/2s");
        assert_eq!(RationalTime::new(1001, 30000).to_string(), "1001/30000s");
        assert_eq!(RationalTime::new(-3, 6).to_string(), "-1/2s");
    }

    #[test]
    fn test_parse_roundtrip() {
        for s in ["10s", "-3s", "1001/30000s", "1/2s"] {
            let t: RationalTime = s.parse().unwrap();
            assert_eq!(t.to_string(), s);
        }
    }

    #[test]
    fn test_parse_rejects_bad_literals() {
        assert!("10".parse::<RationalTime>().is_err());
        assert!("1/0s".parse::<RationalTime>().is_err());
        assert!("s".parse::<RationalTime>().is_err());
        assert!("1.5s".parse::<RationalTime>().is_err());
    }

    #[test]
    fn test_hash_agrees_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(RationalTime::new(1, 2));
        assert!(set.contains(&RationalTime::new(2, 4)));
    }
}
