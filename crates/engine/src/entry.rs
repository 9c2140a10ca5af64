//! Per-participant split entries.
//!
//! An entry is what a participant typed for the current [`SplitMethod`]:
//! a percentage, a share count or an explicit amount. Raw text is parsed at
//! the boundary into a typed [`EntryValue`]; nothing downstream handles
//! strings.
//!
//! Two parsers exist:
//! - [`EntryValue::parse_lenient`] never fails and substitutes the method
//!   default (`0.00%`, `1` share, zero amount) for malformed input. This is
//!   what keystroke-level updates use.
//! - [`EntryValue::parse_strict`] validates and reports why a value is
//!   unacceptable.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Currency, EngineError, Money, ParticipantId, ResultEngine, Roster, SplitMethod,
    util::{self, Excess, FixedError},
};

/// A percentage stored in hundredths of a point: `10000` is `100.00%`.
///
/// Single entries fit in `u32`; the wider storage holds totals over many
/// entries without capping them.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Percent(u64);

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const FULL: Percent = Percent(10_000);

    #[must_use]
    pub const fn from_hundredths(hundredths: u64) -> Self {
        Self(hundredths)
    }

    #[must_use]
    pub const fn hundredths(self) -> u64 {
        self.0
    }

    /// Strict parse: `0..=100`, at most two decimals.
    pub fn parse(raw: &str) -> ResultEngine<Percent> {
        let hundredths = util::parse_fixed(raw, 2, Excess::Reject).map_err(|err| {
            EngineError::InvalidPercent(match err {
                FixedError::Empty => "empty percentage".to_string(),
                FixedError::TooManyDecimals => "at most 2 decimals".to_string(),
                FixedError::Invalid | FixedError::Overflow => format!("invalid value: {raw:?}"),
            })
        })?;
        match u64::try_from(hundredths) {
            Ok(h) if h <= Self::FULL.0 => Ok(Percent(h)),
            _ => Err(EngineError::InvalidPercent(format!(
                "{raw} is outside 0-100"
            ))),
        }
    }

    fn parse_lenient(raw: &str) -> Percent {
        util::parse_fixed(raw, 2, Excess::Round)
            .ok()
            .and_then(|h| u32::try_from(h).ok())
            .map_or(Percent::ZERO, |h| Percent(u64::from(h)))
    }

    /// `100% / parts`, distributed so that the parts add up to exactly 100%.
    #[must_use]
    pub fn split_full(parts: usize) -> Vec<Percent> {
        util::distribute(Self::FULL.0 as i64, &vec![1; parts])
            .into_iter()
            .map(|h| Percent(h.unsigned_abs()))
            .collect()
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

/// Typed value of a single entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EntryValue {
    Percent(Percent),
    Shares(u32),
    Amount(Money),
}

impl EntryValue {
    /// Value given to a participant selected after entries were initialized.
    ///
    /// Shares use 1 rather than 0 so the share floor holds.
    #[must_use]
    pub fn placeholder(method: SplitMethod) -> Option<EntryValue> {
        match method {
            SplitMethod::Equal => None,
            SplitMethod::Percentage => Some(EntryValue::Percent(Percent::ZERO)),
            SplitMethod::Shares => Some(EntryValue::Shares(1)),
            SplitMethod::Unequal => Some(EntryValue::Amount(Money::ZERO)),
        }
    }

    /// Parse user input without ever failing.
    ///
    /// Returns `None` only for [`SplitMethod::Equal`], which has no entries.
    #[must_use]
    pub fn parse_lenient(method: SplitMethod, raw: &str, currency: Currency) -> Option<EntryValue> {
        match method {
            SplitMethod::Equal => None,
            SplitMethod::Percentage => Some(EntryValue::Percent(Percent::parse_lenient(raw))),
            SplitMethod::Shares => {
                let shares = raw.trim().parse::<u32>().unwrap_or(1).max(1);
                Some(EntryValue::Shares(shares))
            }
            SplitMethod::Unequal => {
                let amount = Money::parse_major_rounded(raw, currency)
                    .filter(|m| !m.is_negative())
                    .unwrap_or(Money::ZERO);
                Some(EntryValue::Amount(amount))
            }
        }
    }

    /// Parse user input, reporting malformed or out-of-range values.
    pub fn parse_strict(method: SplitMethod, raw: &str, currency: Currency) -> ResultEngine<EntryValue> {
        match method {
            SplitMethod::Equal => Err(EngineError::InvalidMethod(
                "equal split takes no entries".to_string(),
            )),
            SplitMethod::Percentage => Percent::parse(raw).map(EntryValue::Percent),
            SplitMethod::Shares => {
                let shares = raw
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| EngineError::InvalidShares(format!("not a whole number: {raw:?}")))?;
                if shares == 0 {
                    return Err(EngineError::InvalidShares(
                        "at least 1 share is required".to_string(),
                    ));
                }
                Ok(EntryValue::Shares(shares))
            }
            SplitMethod::Unequal => {
                let amount = Money::parse_major(raw, currency)?;
                if amount.is_negative() {
                    return Err(EngineError::InvalidAmount(
                        "amount must not be negative".to_string(),
                    ));
                }
                Ok(EntryValue::Amount(amount))
            }
        }
    }

    /// The method this value belongs to.
    #[must_use]
    pub const fn method(self) -> SplitMethod {
        match self {
            EntryValue::Percent(_) => SplitMethod::Percentage,
            EntryValue::Shares(_) => SplitMethod::Shares,
            EntryValue::Amount(_) => SplitMethod::Unequal,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitEntry {
    pub participant_id: ParticipantId,
    pub value: EntryValue,
}

/// Entries for one split method, in insertion order.
///
/// Lookups for a participant without an entry fall back to the method
/// default. Totals only count participants selected in the given roster.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitEntries {
    method: SplitMethod,
    entries: Vec<SplitEntry>,
}

impl SplitEntries {
    #[must_use]
    pub fn new(method: SplitMethod) -> Self {
        Self {
            method,
            entries: Vec::new(),
        }
    }

    /// Default entries for `method` over the selected participants of
    /// `roster`: an equal slice of 100%, an equal slice of `total`, or one
    /// share each. Percent and amount slices add up exactly.
    #[must_use]
    pub fn defaults_for(method: SplitMethod, roster: &Roster, total: Money) -> Self {
        let selected: Vec<&ParticipantId> = roster.selected().map(|p| &p.id).collect();
        let values: Vec<EntryValue> = match method {
            SplitMethod::Equal => Vec::new(),
            SplitMethod::Percentage => Percent::split_full(selected.len())
                .into_iter()
                .map(EntryValue::Percent)
                .collect(),
            SplitMethod::Shares => vec![EntryValue::Shares(1); selected.len()],
            SplitMethod::Unequal => total
                .split_even(selected.len())
                .into_iter()
                .map(EntryValue::Amount)
                .collect(),
        };
        let entries = selected
            .into_iter()
            .zip(values)
            .map(|(id, value)| SplitEntry {
                participant_id: id.clone(),
                value,
            })
            .collect();
        Self { method, entries }
    }

    #[must_use]
    pub fn method(&self) -> SplitMethod {
        self.method
    }

    pub fn iter(&self) -> impl Iterator<Item = &SplitEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn value_of(&self, id: &ParticipantId) -> Option<EntryValue> {
        self.entries
            .iter()
            .find(|e| &e.participant_id == id)
            .map(|e| e.value)
    }

    /// Stored percentage, `0.00%` when missing.
    #[must_use]
    pub fn percent_of(&self, id: &ParticipantId) -> Percent {
        match self.value_of(id) {
            Some(EntryValue::Percent(p)) => p,
            _ => Percent::ZERO,
        }
    }

    /// Stored share count, floored at 1. Missing entries count as 1 share.
    #[must_use]
    pub fn shares_of(&self, id: &ParticipantId) -> u32 {
        match self.value_of(id) {
            Some(EntryValue::Shares(n)) => n.max(1),
            _ => 1,
        }
    }

    /// Stored amount, zero when missing.
    #[must_use]
    pub fn amount_of(&self, id: &ParticipantId) -> Money {
        match self.value_of(id) {
            Some(EntryValue::Amount(m)) => m,
            _ => Money::ZERO,
        }
    }

    /// Replace (or insert) the value for `id`. Other entries are untouched.
    ///
    /// Fails if `value` belongs to a different method than these entries.
    pub fn set(&mut self, id: &ParticipantId, value: EntryValue) -> ResultEngine<()> {
        if value.method() != self.method {
            return Err(EngineError::InvalidMethod(format!(
                "{} value given to a {} split",
                value.method(),
                self.method
            )));
        }
        self.upsert(id, value);
        Ok(())
    }

    /// Pure form of [`SplitEntries::set`].
    pub fn with_value(&self, id: &ParticipantId, value: EntryValue) -> ResultEngine<Self> {
        let mut next = self.clone();
        next.set(id, value)?;
        Ok(next)
    }

    /// Leniently parse `raw` and store it. A no-op for equal splits.
    pub fn update_raw(&mut self, id: &ParticipantId, raw: &str, currency: Currency) {
        if let Some(value) = EntryValue::parse_lenient(self.method, raw, currency) {
            self.upsert(id, value);
        }
    }

    /// Add the method placeholder for `id` unless it already has an entry.
    pub fn ensure_entry(&mut self, id: &ParticipantId) {
        if self.value_of(id).is_some() {
            return;
        }
        if let Some(value) = EntryValue::placeholder(self.method) {
            self.upsert(id, value);
        }
    }

    /// Step a share count by one. A no-op unless these are share entries.
    ///
    /// Decrementing never goes below 1; incrementing is unbounded.
    pub fn adjust_share_count(&mut self, id: &ParticipantId, increment: bool) {
        if self.method != SplitMethod::Shares {
            return;
        }
        let current = self.shares_of(id);
        let next = if increment {
            current.saturating_add(1)
        } else {
            current.saturating_sub(1).max(1)
        };
        self.upsert(id, EntryValue::Shares(next));
    }

    fn upsert(&mut self, id: &ParticipantId, value: EntryValue) {
        match self.entries.iter_mut().find(|e| &e.participant_id == id) {
            Some(entry) => entry.value = value,
            None => self.entries.push(SplitEntry {
                participant_id: id.clone(),
                value,
            }),
        }
    }

    /// Sum of the selected participants' percentages.
    #[must_use]
    pub fn percent_total(&self, roster: &Roster) -> Percent {
        Percent(
            roster
                .selected()
                .map(|p| self.percent_of(&p.id).hundredths())
                .fold(0, u64::saturating_add),
        )
    }

    /// Sum of the selected participants' share counts.
    #[must_use]
    pub fn share_total(&self, roster: &Roster) -> u64 {
        roster
            .selected()
            .map(|p| u64::from(self.shares_of(&p.id)))
            .sum()
    }

    /// Sum of the selected participants' explicit amounts, saturating at
    /// [`Money::MAX`].
    #[must_use]
    pub fn amount_total(&self, roster: &Roster) -> Money {
        self.checked_amount_total(roster).unwrap_or(Money::MAX)
    }

    /// Sum of the selected participants' explicit amounts, `None` on
    /// overflow.
    #[must_use]
    pub fn checked_amount_total(&self, roster: &Roster) -> Option<Money> {
        roster
            .selected()
            .try_fold(Money::ZERO, |sum, p| sum.checked_add(self.amount_of(&p.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Participant;

    fn roster() -> Roster {
        Roster::new(vec![
            Participant::new("a", "A"),
            Participant::new("b", "B"),
            Participant::new("c", "C"),
            Participant::new("d", "D").selected(false),
        ])
        .unwrap()
    }

    fn id(s: &str) -> ParticipantId {
        ParticipantId::new(s)
    }

    #[test]
    fn percent_display_has_two_decimals() {
        assert_eq!(Percent::ZERO.to_string(), "0.00%");
        assert_eq!(Percent::from_hundredths(3333).to_string(), "33.33%");
        assert_eq!(Percent::FULL.to_string(), "100.00%");
    }

    #[test]
    fn lenient_parse_substitutes_defaults() {
        let cur = Currency::Inr;
        let lenient = |m, raw| EntryValue::parse_lenient(m, raw, cur).unwrap();
        assert_eq!(
            lenient(SplitMethod::Percentage, ""),
            EntryValue::Percent(Percent::ZERO)
        );
        assert_eq!(
            lenient(SplitMethod::Percentage, "abc"),
            EntryValue::Percent(Percent::ZERO)
        );
        assert_eq!(
            lenient(SplitMethod::Percentage, "33.333"),
            EntryValue::Percent(Percent::from_hundredths(3333))
        );
        assert_eq!(lenient(SplitMethod::Shares, ""), EntryValue::Shares(1));
        assert_eq!(lenient(SplitMethod::Shares, "0"), EntryValue::Shares(1));
        assert_eq!(lenient(SplitMethod::Shares, "x"), EntryValue::Shares(1));
        assert_eq!(lenient(SplitMethod::Shares, " 4 "), EntryValue::Shares(4));
        assert_eq!(
            lenient(SplitMethod::Unequal, "12.5"),
            EntryValue::Amount(Money::new(1250))
        );
        assert_eq!(
            lenient(SplitMethod::Unequal, "-3"),
            EntryValue::Amount(Money::ZERO)
        );
        assert_eq!(EntryValue::parse_lenient(SplitMethod::Equal, "5", cur), None);
    }

    #[test]
    fn strict_parse_reports_problems() {
        let cur = Currency::Inr;
        assert!(matches!(
            EntryValue::parse_strict(SplitMethod::Percentage, "100.01", cur),
            Err(EngineError::InvalidPercent(_))
        ));
        assert!(matches!(
            EntryValue::parse_strict(SplitMethod::Percentage, "1.234", cur),
            Err(EngineError::InvalidPercent(_))
        ));
        assert!(matches!(
            EntryValue::parse_strict(SplitMethod::Shares, "0", cur),
            Err(EngineError::InvalidShares(_))
        ));
        assert!(matches!(
            EntryValue::parse_strict(SplitMethod::Shares, "1.5", cur),
            Err(EngineError::InvalidShares(_))
        ));
        assert!(matches!(
            EntryValue::parse_strict(SplitMethod::Unequal, "-1", cur),
            Err(EngineError::InvalidAmount(_))
        ));
        assert_eq!(
            EntryValue::parse_strict(SplitMethod::Percentage, "12,5", cur),
            Ok(EntryValue::Percent(Percent::from_hundredths(1250)))
        );
    }

    #[test]
    fn defaults_cover_selected_only_and_add_up() {
        let roster = roster();
        let pct = SplitEntries::defaults_for(SplitMethod::Percentage, &roster, Money::ZERO);
        assert_eq!(pct.len(), 3);
        assert_eq!(pct.value_of(&id("d")), None);
        assert_eq!(pct.percent_total(&roster), Percent::FULL);

        let amounts = SplitEntries::defaults_for(SplitMethod::Unequal, &roster, Money::new(1000));
        assert_eq!(amounts.amount_total(&roster), Money::new(1000));

        let shares = SplitEntries::defaults_for(SplitMethod::Shares, &roster, Money::new(1000));
        assert_eq!(shares.share_total(&roster), 3);

        assert!(SplitEntries::defaults_for(SplitMethod::Equal, &roster, Money::new(1)).is_empty());
    }

    #[test]
    fn with_value_leaves_others_untouched() {
        let roster = roster();
        let before = SplitEntries::defaults_for(SplitMethod::Percentage, &roster, Money::ZERO);
        let after = before
            .with_value(&id("b"), EntryValue::Percent(Percent::from_hundredths(5000)))
            .unwrap();
        assert_eq!(after.percent_of(&id("a")), before.percent_of(&id("a")));
        assert_eq!(after.percent_of(&id("c")), before.percent_of(&id("c")));
        assert_eq!(after.percent_of(&id("b")), Percent::from_hundredths(5000));
        assert_eq!(before.percent_of(&id("b")), Percent::from_hundredths(3333));
    }

    #[test]
    fn set_rejects_values_of_another_method() {
        let mut entries = SplitEntries::new(SplitMethod::Shares);
        assert!(matches!(
            entries.set(&id("a"), EntryValue::Amount(Money::new(1))),
            Err(EngineError::InvalidMethod(_))
        ));
    }

    #[test]
    fn share_count_has_floor_but_no_ceiling() {
        let mut entries = SplitEntries::new(SplitMethod::Shares);
        entries.adjust_share_count(&id("a"), false);
        assert_eq!(entries.shares_of(&id("a")), 1);
        for _ in 0..50 {
            entries.adjust_share_count(&id("a"), true);
        }
        assert_eq!(entries.shares_of(&id("a")), 51);
    }

    #[test]
    fn share_adjustment_ignored_for_other_methods() {
        let mut entries = SplitEntries::new(SplitMethod::Unequal);
        entries.adjust_share_count(&id("a"), true);
        assert!(entries.is_empty());
    }

    #[test]
    fn totals_ignore_unselected_entries() {
        let roster = roster();
        let mut entries = SplitEntries::new(SplitMethod::Percentage);
        entries.update_raw(&id("a"), "50", Currency::Inr);
        entries.update_raw(&id("b"), "50", Currency::Inr);
        entries.update_raw(&id("d"), "40", Currency::Inr);
        assert_eq!(entries.percent_total(&roster), Percent::FULL);
    }

    #[test]
    fn huge_entries_do_not_cap_or_wrap_totals() {
        let roster = roster();
        let mut percents = SplitEntries::new(SplitMethod::Percentage);
        percents.update_raw(&id("a"), "40000000", Currency::Inr);
        percents.update_raw(&id("b"), "40000000", Currency::Inr);
        assert_eq!(
            percents.percent_total(&roster).to_string(),
            "80000000.00%"
        );

        let mut amounts = SplitEntries::new(SplitMethod::Unequal);
        amounts.update_raw(&id("a"), "90000000000000000", Currency::Inr);
        amounts.update_raw(&id("b"), "90000000000000000", Currency::Inr);
        assert_eq!(amounts.checked_amount_total(&roster), None);
        assert_eq!(amounts.amount_total(&roster), Money::MAX);
    }
}
