//! Split allocation for group expenses.
//!
//! Given an expense total, the people who may share it and a
//! [`SplitMethod`], the engine works out what each selected participant owes,
//! what to display next to each of them, and whether the entered values are
//! consistent.
//!
//! ```rust
//! use engine::{Money, Participant, SplitDraft, SplitMethod};
//!
//! let mut draft = SplitDraft::builder()
//!     .total(Money::new(10_000))
//!     .participants([
//!         Participant::new("u1", "Asha"),
//!         Participant::new("u2", "Bilal"),
//!         Participant::new("u3", "Chen"),
//!     ])
//!     .method(SplitMethod::Shares)
//!     .build()
//!     .unwrap();
//!
//! draft.adjust_share_count(&"u3".into(), true).unwrap();
//! assert_eq!(draft.display_string(&"u1".into()), "₹25.00");
//! assert_eq!(draft.display_string(&"u3".into()), "₹50.00");
//! assert_eq!(draft.summarize().to_string(), "Total: 4 shares");
//! ```

pub use allocation::{Allocation, OwedShare};
pub use currency::Currency;
pub use draft::{SplitDraft, SplitDraftBuilder};
pub use entry::{EntryValue, Percent, SplitEntries, SplitEntry};
pub use error::EngineError;
pub use method::SplitMethod;
pub use money::Money;
pub use participant::{Participant, ParticipantId, Roster};
pub use summary::{AMOUNT_TOLERANCE, DisplayValue, NOT_INCLUDED, Summary};

mod allocation;
mod currency;
mod draft;
mod entry;
mod error;
mod method;
mod money;
mod participant;
mod summary;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
