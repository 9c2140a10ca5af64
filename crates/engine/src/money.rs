use std::{
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

use crate::{
    Currency, EngineError, ResultEngine,
    util::{self, Excess, FixedError},
};

/// Signed money amount represented as integer **minor units**.
///
/// Use this type for **all** monetary values in the engine (expense totals,
/// per-person amounts, unequal entries) to avoid floating-point drift.
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.format(Currency::Inr), "₹12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// more decimals than the currency has):
///
/// ```rust
/// use engine::{Currency, Money};
///
/// assert_eq!(Money::parse_major("10", Currency::Inr).unwrap().minor(), 1000);
/// assert_eq!(Money::parse_major("10,5", Currency::Inr).unwrap().minor(), 1050);
/// assert!(Money::parse_major("12.345", Currency::Inr).is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);
    pub const MAX: Money = Money(i64::MAX);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn abs(self) -> Money {
        Money(self.0.abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Parses a major-unit decimal string (e.g. `"12.50"`) for `currency`.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    /// Rejects empty strings, garbage and more fraction digits than
    /// `currency.minor_units()`.
    pub fn parse_major(s: &str, currency: Currency) -> ResultEngine<Money> {
        util::parse_fixed(s, currency.minor_units(), Excess::Reject)
            .map(Money)
            .map_err(|err| {
                EngineError::InvalidAmount(match err {
                    FixedError::Empty => "empty amount".to_string(),
                    FixedError::Invalid => format!("invalid amount: {s:?}"),
                    FixedError::TooManyDecimals => "too many decimals".to_string(),
                    FixedError::Overflow => "amount too large".to_string(),
                })
            })
    }

    /// Like [`Money::parse_major`], but rounds extra fraction digits instead of
    /// rejecting them. Used for lenient UI input.
    pub(crate) fn parse_major_rounded(s: &str, currency: Currency) -> Option<Money> {
        util::parse_fixed(s, currency.minor_units(), Excess::Round)
            .ok()
            .map(Money)
    }

    /// Formats the amount with the currency symbol, e.g. `₹1250.00`.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{sign}{}{}", currency.symbol(), self.abs().format_plain(currency))
    }

    /// Formats the amount as a bare decimal, e.g. `-1250.00`.
    #[must_use]
    pub fn format_plain(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = currency.scale().unsigned_abs();
        let width = usize::from(currency.minor_units());
        format!("{sign}{}.{:0width$}", abs / scale, abs % scale)
    }

    /// Returns `self × num / den`, rounded half away from zero.
    ///
    /// A zero denominator yields [`Money::ZERO`].
    #[must_use]
    pub fn ratio(self, num: u64, den: u64) -> Money {
        Money(util::mul_div_round(self.0, num, den))
    }

    /// Splits the amount into `parts` pieces that sum back to `self`.
    ///
    /// Leftover minor units go to the earliest parts, one each.
    #[must_use]
    pub fn split_even(self, parts: usize) -> Vec<Money> {
        self.split_weighted(&vec![1; parts])
    }

    /// Splits the amount proportionally to `weights` using the largest
    /// remainder method. The result always sums back to `self`; ties are
    /// resolved in favour of the earlier weight.
    ///
    /// If every weight is zero, every part is zero.
    #[must_use]
    pub fn split_weighted(self, weights: &[u64]) -> Vec<Money> {
        util::distribute(self.0, weights)
            .into_iter()
            .map(Money)
            .collect()
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_uses_currency_symbol() {
        assert_eq!(Money::new(0).format(Currency::Inr), "₹0.00");
        assert_eq!(Money::new(1).format(Currency::Inr), "₹0.01");
        assert_eq!(Money::new(125_000).format(Currency::Inr), "₹1250.00");
        assert_eq!(Money::new(-305).format(Currency::Eur), "-€3.05");
        assert_eq!(Money::new(-305).format_plain(Currency::Eur), "-3.05");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        let parse = |s| Money::parse_major(s, Currency::Inr).unwrap().minor();
        assert_eq!(parse("10"), 1000);
        assert_eq!(parse("10.5"), 1050);
        assert_eq!(parse("10,50"), 1050);
        assert_eq!(parse(".5"), 50);
        assert_eq!(parse("7."), 700);
        assert_eq!(parse("-0.01"), -1);
        assert_eq!(parse("+1.00"), 100);
        assert_eq!(parse("  2.30 "), 230);
    }

    #[test]
    fn parse_rejects_garbage() {
        for input in ["", "  ", "-", ".", "abc", "1.2.3", "12.345", "1e3"] {
            assert!(
                Money::parse_major(input, Currency::Inr).is_err(),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn ratio_rounds_half_away_from_zero() {
        assert_eq!(Money::new(10_000).ratio(1, 4), Money::new(2_500));
        assert_eq!(Money::new(100).ratio(1, 3), Money::new(33));
        assert_eq!(Money::new(100).ratio(2, 3), Money::new(67));
        assert_eq!(Money::new(-100).ratio(2, 3), Money::new(-67));
        assert_eq!(Money::new(5).ratio(1, 2), Money::new(3));
        assert_eq!(Money::new(100).ratio(1, 0), Money::ZERO);
    }

    #[test]
    fn split_even_sums_back() {
        let parts = Money::new(10_000).split_even(3);
        assert_eq!(parts, vec![Money::new(3_334), Money::new(3_333), Money::new(3_333)]);
        assert_eq!(parts.into_iter().sum::<Money>(), Money::new(10_000));
        assert!(Money::new(100).split_even(0).is_empty());
    }

    #[test]
    fn split_weighted_uses_largest_remainder() {
        let parts = Money::new(1_000).split_weighted(&[1, 1, 1, 3]);
        assert_eq!(
            parts,
            vec![Money::new(167), Money::new(167), Money::new(166), Money::new(500)]
        );
        assert_eq!(parts.iter().copied().sum::<Money>(), Money::new(1_000));
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        assert_eq!(Money::MAX.checked_add(Money::new(1)), None);
        assert_eq!(Money::new(-2).checked_sub(Money::MAX), None);
        assert_eq!(Money::new(5).checked_sub(Money::new(7)), Some(Money::new(-2)));
    }

    #[test]
    fn split_weighted_all_zero_weights() {
        assert_eq!(Money::new(500).split_weighted(&[0, 0]), vec![Money::ZERO; 2]);
    }
}
