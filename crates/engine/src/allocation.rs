//! Committing a draft.
//!
//! Display values are rounded one participant at a time, so they may not add
//! up to the total. An [`Allocation`] is what gets persisted once the user
//! applies the split: exact amounts per selected participant that always add
//! up to the expense total.

use serde::{Deserialize, Serialize};

use crate::{
    Currency, EngineError, Money, ParticipantId, Percent, ResultEngine, SplitDraft, SplitMethod,
    summary::amounts_match,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwedShare {
    pub participant_id: ParticipantId,
    pub name: String,
    pub amount: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub currency: Currency,
    pub total: Money,
    pub method: SplitMethod,
    pub shares: Vec<OwedShare>,
}

impl Allocation {
    #[must_use]
    pub fn amount_for(&self, id: &ParticipantId) -> Option<Money> {
        self.shares
            .iter()
            .find(|s| &s.participant_id == id)
            .map(|s| s.amount)
    }

    /// Sum of every owed share. Equals `total` for committed drafts.
    #[must_use]
    pub fn allocated(&self) -> Money {
        self.shares.iter().map(|s| s.amount).sum()
    }
}

impl SplitDraft {
    /// Validate the draft and turn it into exact per-participant amounts.
    ///
    /// Fails when nobody is selected, when percentages do not add up to
    /// 100%, or when explicit amounts do not add up to the total. Shares are
    /// always valid.
    pub fn commit(&self) -> ResultEngine<Allocation> {
        let selected: Vec<_> = self.roster().selected().collect();
        if selected.is_empty() {
            return Err(EngineError::NoParticipants);
        }

        let entries = self.entries();
        let amounts: Vec<Money> = match self.method() {
            SplitMethod::Equal => self.total().split_even(selected.len()),
            SplitMethod::Percentage => {
                let percent_total = entries.percent_total(self.roster());
                if percent_total != Percent::FULL {
                    tracing::debug!(%percent_total, "commit rejected");
                    return Err(EngineError::PercentageMismatch(percent_total.to_string()));
                }
                let weights: Vec<u64> = selected
                    .iter()
                    .map(|p| entries.percent_of(&p.id).hundredths())
                    .collect();
                self.total().split_weighted(&weights)
            }
            SplitMethod::Shares => {
                let weights: Vec<u64> = selected
                    .iter()
                    .map(|p| u64::from(entries.shares_of(&p.id)))
                    .collect();
                self.total().split_weighted(&weights)
            }
            SplitMethod::Unequal => {
                let amount_total = entries.amount_total(self.roster());
                let balanced = entries
                    .checked_amount_total(self.roster())
                    .is_some_and(|sum| amounts_match(sum, self.total()));
                if !balanced {
                    tracing::debug!(
                        actual = amount_total.minor(),
                        expected = self.total().minor(),
                        "commit rejected"
                    );
                    return Err(EngineError::AmountMismatch {
                        actual: amount_total.format(self.currency()),
                        expected: self.total().format(self.currency()),
                    });
                }
                selected.iter().map(|p| entries.amount_of(&p.id)).collect()
            }
        };

        let shares = selected
            .into_iter()
            .zip(amounts)
            .map(|(participant, amount)| OwedShare {
                participant_id: participant.id.clone(),
                name: participant.name.clone(),
                amount,
            })
            .collect();

        tracing::debug!(method = %self.method(), total = self.total().minor(), "split committed");
        Ok(Allocation {
            currency: self.currency(),
            total: self.total(),
            method: self.method(),
            shares,
        })
    }
}
