//! Read-side views of a draft: per-participant display values and the
//! aggregate summary line shown under the participant list.

use std::fmt;

use serde::Serialize;

use crate::{Currency, Money, Percent};

/// Marker shown for participants that are not part of the split.
pub const NOT_INCLUDED: &str = "not included";

/// Entered amounts balance when they differ from the expense total by
/// strictly less than this.
pub const AMOUNT_TOLERANCE: Money = Money::new(1);

/// What to show next to a participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DisplayValue {
    NotIncluded,
    Amount(Money),
    Percent(Percent),
}

impl DisplayValue {
    #[must_use]
    pub fn render(&self, currency: Currency) -> String {
        match self {
            DisplayValue::NotIncluded => NOT_INCLUDED.to_string(),
            DisplayValue::Amount(amount) => amount.format(currency),
            DisplayValue::Percent(percent) => percent.to_string(),
        }
    }
}

/// Consistency summary of the current entries.
///
/// Rendering through [`fmt::Display`] gives the text the split screen shows;
/// [`Summary::is_balanced`] tells callers whether applying should be allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Summary {
    /// Equal split with at least one participant.
    EachPays { amount: Money, currency: Currency },
    /// Equal split with nobody selected.
    SelectParticipants,
    PercentTotal { total: Percent },
    ShareTotal { shares: u64 },
    AmountTotal {
        total: Money,
        expected: Money,
        currency: Currency,
    },
}

impl Summary {
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        match self {
            Summary::EachPays { .. } => true,
            Summary::SelectParticipants => false,
            Summary::PercentTotal { total } => *total == Percent::FULL,
            Summary::ShareTotal { shares } => *shares > 0,
            Summary::AmountTotal {
                total, expected, ..
            } => amounts_match(*total, *expected),
        }
    }
}

pub(crate) fn amounts_match(total: Money, expected: Money) -> bool {
    total
        .checked_sub(expected)
        .is_some_and(|diff| diff.minor().unsigned_abs() < AMOUNT_TOLERANCE.minor().unsigned_abs())
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::EachPays { amount, currency } => {
                write!(f, "Each person pays {}", amount.format(*currency))
            }
            Summary::SelectParticipants => f.write_str("Select people to split with"),
            Summary::PercentTotal { total } => {
                if self.is_balanced() {
                    write!(f, "Total: {total} ✓")
                } else {
                    write!(f, "Total: {total} (should be 100%)")
                }
            }
            Summary::ShareTotal { shares } => write!(f, "Total: {shares} shares"),
            Summary::AmountTotal {
                total,
                expected,
                currency,
            } => {
                if self.is_balanced() {
                    write!(f, "Total: {} ✓", total.format(*currency))
                } else {
                    write!(
                        f,
                        "Total: {} ≠ {}",
                        total.format(*currency),
                        expected.format(*currency)
                    )
                }
            }
        }
    }
}
