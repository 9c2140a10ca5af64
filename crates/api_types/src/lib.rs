use serde::{Deserialize, Serialize};

pub mod split {
    use super::*;

    /// One person as sent by the client.
    ///
    /// `value` is the raw text of the entry field for the requested method
    /// (percentage, share count or amount). It is ignored for equal splits.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ParticipantIn {
        pub id: String,
        pub name: String,
        #[serde(default = "selected_by_default")]
        pub selected: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub value: Option<String>,
    }

    fn selected_by_default() -> bool {
        true
    }

    /// A split as typed on the split options screen.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SplitRequest {
        /// Expense total in major units, e.g. `"500"` or `"12.50"`.
        pub total: String,
        /// Currency code; the configured default when missing.
        #[serde(default)]
        pub currency: Option<String>,
        /// `equal`, `percentage`, `shares` or `unequal`; `equal` when missing.
        #[serde(default)]
        pub method: Option<String>,
        pub participants: Vec<ParticipantIn>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ParticipantLine {
        pub id: String,
        pub name: String,
        pub display: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct OwedLine {
        pub id: String,
        pub name: String,
        /// Major units without symbol, e.g. `"33.34"`.
        pub amount: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SplitResponse {
        pub currency: String,
        pub method: String,
        pub total: String,
        pub lines: Vec<ParticipantLine>,
        pub summary: String,
        pub balanced: bool,
        /// Present only when the split was committed.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub owed: Option<Vec<OwedLine>>,
    }
}
