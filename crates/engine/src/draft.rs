//! The split being edited on the "split options" screen.
//!
//! A [`SplitDraft`] owns everything the allocator needs: the expense total,
//! its currency, the participants with their selection flags, the chosen
//! [`SplitMethod`] and the typed entries for that method. Every query is a
//! pure function of the draft, so callers may recompute display values and
//! the summary on every keystroke.

use crate::{
    Currency, DisplayValue, EngineError, EntryValue, Money, Participant, ParticipantId,
    ResultEngine, Roster, SplitEntries, SplitMethod, Summary,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitDraft {
    total: Money,
    currency: Currency,
    roster: Roster,
    method: SplitMethod,
    entries: SplitEntries,
}

impl SplitDraft {
    /// Return a builder for `SplitDraft`.
    pub fn builder() -> SplitDraftBuilder {
        SplitDraftBuilder::default()
    }

    #[must_use]
    pub fn total(&self) -> Money {
        self.total
    }

    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    #[must_use]
    pub fn method(&self) -> SplitMethod {
        self.method
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn entries(&self) -> &SplitEntries {
        &self.entries
    }

    /// What an equal split charges each selected participant, zero when
    /// nobody is selected.
    #[must_use]
    pub fn per_head(&self) -> Money {
        self.total.ratio(1, self.roster.selected_count() as u64)
    }

    /// Value shown next to a participant for the current method.
    ///
    /// Unknown or unselected participants are [`DisplayValue::NotIncluded`].
    #[must_use]
    pub fn display_value(&self, id: &ParticipantId) -> DisplayValue {
        if !self.roster.is_selected(id) {
            return DisplayValue::NotIncluded;
        }
        match self.method {
            SplitMethod::Equal => DisplayValue::Amount(self.per_head()),
            SplitMethod::Percentage => DisplayValue::Percent(self.entries.percent_of(id)),
            SplitMethod::Shares => {
                let shares = u64::from(self.entries.shares_of(id));
                let share_total = self.entries.share_total(&self.roster);
                DisplayValue::Amount(self.total.ratio(shares, share_total))
            }
            SplitMethod::Unequal => DisplayValue::Amount(self.entries.amount_of(id)),
        }
    }

    /// [`SplitDraft::display_value`] rendered in the draft currency.
    #[must_use]
    pub fn display_string(&self, id: &ParticipantId) -> String {
        self.display_value(id).render(self.currency)
    }

    #[must_use]
    pub fn summarize(&self) -> Summary {
        match self.method {
            SplitMethod::Equal => {
                if self.roster.selected_count() == 0 {
                    Summary::SelectParticipants
                } else {
                    Summary::EachPays {
                        amount: self.per_head(),
                        currency: self.currency,
                    }
                }
            }
            SplitMethod::Percentage => Summary::PercentTotal {
                total: self.entries.percent_total(&self.roster),
            },
            SplitMethod::Shares => Summary::ShareTotal {
                shares: self.entries.share_total(&self.roster),
            },
            SplitMethod::Unequal => Summary::AmountTotal {
                total: self.entries.amount_total(&self.roster),
                expected: self.total,
                currency: self.currency,
            },
        }
    }

    /// Store what the user typed for `id`. Malformed input falls back to the
    /// method default; nothing else changes.
    pub fn update_entry_value(&mut self, id: &ParticipantId, raw: &str) -> ResultEngine<()> {
        self.ensure_known(id)?;
        self.entries.update_raw(id, raw, self.currency);
        tracing::trace!(participant = %id, method = %self.method, "entry updated");
        Ok(())
    }

    /// Pure form of [`SplitDraft::update_entry_value`].
    pub fn with_entry_value(&self, id: &ParticipantId, raw: &str) -> ResultEngine<Self> {
        let mut next = self.clone();
        next.update_entry_value(id, raw)?;
        Ok(next)
    }

    /// Store an already validated value, e.g. one from
    /// [`EntryValue::parse_strict`]. The value must match the current method.
    pub fn set_entry(&mut self, id: &ParticipantId, value: EntryValue) -> ResultEngine<()> {
        self.ensure_known(id)?;
        self.entries.set(id, value)
    }

    /// The +/- share stepper. Ignored unless the method is shares.
    pub fn adjust_share_count(&mut self, id: &ParticipantId, increment: bool) -> ResultEngine<()> {
        self.ensure_known(id)?;
        self.entries.adjust_share_count(id, increment);
        Ok(())
    }

    /// Switch split method. Entries of the previous method are dropped and
    /// defaults are computed from the current selection. Selecting the
    /// current method again keeps the entries.
    pub fn set_method(&mut self, method: SplitMethod) {
        if method == self.method {
            return;
        }
        tracing::debug!(from = %self.method, to = %method, "split method changed");
        self.method = method;
        self.entries = SplitEntries::defaults_for(method, &self.roster, self.total);
    }

    /// Flip a participant's selection and return the new state.
    ///
    /// A newly selected participant without an entry gets the method
    /// placeholder. Other participants' entries are never rebalanced.
    pub fn toggle_participant(&mut self, id: &ParticipantId) -> ResultEngine<bool> {
        let selected = self.roster.toggle(id)?;
        if selected {
            self.entries.ensure_entry(id);
        }
        tracing::debug!(participant = %id, selected, "participant toggled");
        Ok(selected)
    }

    /// Replace the expense total. Entries are left as they are.
    pub fn set_total(&mut self, total: Money) -> ResultEngine<()> {
        ensure_non_negative(total)?;
        self.total = total;
        Ok(())
    }

    fn ensure_known(&self, id: &ParticipantId) -> ResultEngine<()> {
        if self.roster.contains(id) {
            Ok(())
        } else {
            Err(EngineError::UnknownParticipant(id.to_string()))
        }
    }
}

fn ensure_non_negative(total: Money) -> ResultEngine<()> {
    if total.is_negative() {
        return Err(EngineError::InvalidAmount(
            "total must not be negative".to_string(),
        ));
    }
    Ok(())
}

/// The builder for `SplitDraft`.
#[derive(Default)]
pub struct SplitDraftBuilder {
    total: Money,
    currency: Currency,
    participants: Vec<Participant>,
    method: SplitMethod,
}

impl SplitDraftBuilder {
    pub fn total(mut self, total: Money) -> SplitDraftBuilder {
        self.total = total;
        self
    }

    pub fn currency(mut self, currency: Currency) -> SplitDraftBuilder {
        self.currency = currency;
        self
    }

    pub fn participant(mut self, participant: Participant) -> SplitDraftBuilder {
        self.participants.push(participant);
        self
    }

    pub fn participants(
        mut self,
        participants: impl IntoIterator<Item = Participant>,
    ) -> SplitDraftBuilder {
        self.participants.extend(participants);
        self
    }

    pub fn method(mut self, method: SplitMethod) -> SplitDraftBuilder {
        self.method = method;
        self
    }

    /// Construct `SplitDraft` with default entries for the chosen method.
    pub fn build(self) -> ResultEngine<SplitDraft> {
        ensure_non_negative(self.total)?;
        let roster = Roster::new(self.participants)?;
        let entries = SplitEntries::defaults_for(self.method, &roster, self.total);
        Ok(SplitDraft {
            total: self.total,
            currency: self.currency,
            roster,
            method: self.method,
            entries,
        })
    }
}
