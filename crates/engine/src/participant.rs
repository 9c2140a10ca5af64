//! Participants of a split.
//!
//! A [`Participant`] is someone who may owe part of an expense. Only
//! participants flagged as selected take part in any computation; the others
//! keep whatever entry they had but are shown as "not included".

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine};

/// Opaque participant identifier handed out by the auth provider.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub is_selected: bool,
}

impl Participant {
    /// Creates a selected participant. The display name is trimmed and
    /// NFC-normalized so visually equal names compare equal.
    #[must_use]
    pub fn new(id: impl Into<ParticipantId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: normalize_name(name),
            is_selected: true,
        }
    }

    #[must_use]
    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().nfc().collect()
}

/// Ordered set of participants known to a split.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Builds a roster, rejecting duplicated ids.
    pub fn new(participants: Vec<Participant>) -> ResultEngine<Self> {
        let mut roster = Self::default();
        for participant in participants {
            roster.push(participant)?;
        }
        Ok(roster)
    }

    pub fn push(&mut self, participant: Participant) -> ResultEngine<()> {
        if self.get(&participant.id).is_some() {
            return Err(EngineError::DuplicateParticipant(
                participant.id.to_string(),
            ));
        }
        self.participants.push(participant);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.get(id).is_some()
    }

    /// `true` only for known participants that are currently selected.
    #[must_use]
    pub fn is_selected(&self, id: &ParticipantId) -> bool {
        self.get(id).is_some_and(|p| p.is_selected)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn selected(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.is_selected)
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Flips the selection flag and returns the new state.
    pub fn toggle(&mut self, id: &ParticipantId) -> ResultEngine<bool> {
        let participant = self
            .participants
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| EngineError::UnknownParticipant(id.to_string()))?;
        participant.is_selected = !participant.is_selected;
        Ok(participant.is_selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::new(vec![
            Participant::new("a", "Asha"),
            Participant::new("b", "Bilal").selected(false),
            Participant::new("c", "Chen"),
        ])
        .unwrap()
    }

    #[test]
    fn names_are_trimmed_and_normalized() {
        let composed = Participant::new("x", "  Jos\u{e9} ");
        let decomposed = Participant::new("y", "Jose\u{301}");
        assert_eq!(composed.name, "Jos\u{e9}");
        assert_eq!(composed.name, decomposed.name);
    }

    #[test]
    fn selection_queries_skip_unselected() {
        let roster = roster();
        assert_eq!(roster.selected_count(), 2);
        assert!(roster.is_selected(&"a".into()));
        assert!(!roster.is_selected(&"b".into()));
        assert!(!roster.is_selected(&"missing".into()));
    }

    #[test]
    fn toggle_flips_and_reports_unknown() {
        let mut roster = roster();
        assert!(roster.toggle(&"b".into()).unwrap());
        assert_eq!(roster.selected_count(), 3);
        assert_eq!(
            roster.toggle(&"zz".into()),
            Err(EngineError::UnknownParticipant("zz".to_string()))
        );
    }

    #[test]
    fn duplicated_ids_are_rejected() {
        let err = Roster::new(vec![Participant::new("a", "A"), Participant::new("a", "B")])
            .unwrap_err();
        assert_eq!(err, EngineError::DuplicateParticipant("a".to_string()));
    }
}
