//! Turns a raw [`SplitRequest`] into a typed [`SplitDraft`] and the draft
//! back into a [`SplitResponse`].

use api_types::split::{OwedLine, ParticipantLine, SplitRequest, SplitResponse};
use engine::{
    Allocation, Currency, EntryValue, Money, Participant, ParticipantId, SplitDraft, SplitMethod,
};

use crate::error::{AppError, Result};

/// Build a draft from a request.
///
/// With `strict`, every selected participant needs a value and every value
/// must parse cleanly; otherwise missing or malformed values fall back to the
/// method default like the interactive screen does.
pub fn build_draft(request: &SplitRequest, fallback: Currency, strict: bool) -> Result<SplitDraft> {
    let currency = match request.currency.as_deref() {
        Some(code) => Currency::try_from(code)?,
        None => fallback,
    };
    let method: SplitMethod = match request.method.as_deref() {
        Some(name) => name.parse()?,
        None => SplitMethod::default(),
    };
    let total = Money::parse_major(&request.total, currency)?;
    if request.participants.is_empty() {
        return Err(AppError::Request("request has no participants".to_string()));
    }

    let participants = request
        .participants
        .iter()
        .map(|p| Participant::new(p.id.as_str(), &p.name).selected(p.selected));
    let mut draft = SplitDraft::builder()
        .total(total)
        .currency(currency)
        .participants(participants)
        .method(method)
        .build()?;

    if method.needs_entries() {
        for participant in &request.participants {
            let Some(raw) = participant.value.as_deref() else {
                if strict && participant.selected {
                    return Err(AppError::Request(format!(
                        "no {method} value for participant {}",
                        participant.id
                    )));
                }
                continue;
            };
            let id = ParticipantId::from(participant.id.as_str());
            if strict {
                let value = EntryValue::parse_strict(method, raw, currency)?;
                draft.set_entry(&id, value)?;
            } else {
                draft.update_entry_value(&id, raw)?;
            }
        }
    }

    tracing::info!(
        method = %method,
        participants = draft.roster().len(),
        selected = draft.roster().selected_count(),
        "split request loaded"
    );
    Ok(draft)
}

pub fn report(draft: &SplitDraft, allocation: Option<&Allocation>) -> SplitResponse {
    let currency = draft.currency();
    let summary = draft.summarize();
    let lines = draft
        .roster()
        .iter()
        .map(|p| ParticipantLine {
            id: p.id.to_string(),
            name: p.name.clone(),
            display: draft.display_string(&p.id),
        })
        .collect();
    let owed = allocation.map(|allocation| {
        allocation
            .shares
            .iter()
            .map(|share| OwedLine {
                id: share.participant_id.to_string(),
                name: share.name.clone(),
                amount: share.amount.format_plain(currency),
            })
            .collect()
    });

    SplitResponse {
        currency: currency.code().to_string(),
        method: draft.method().as_str().to_string(),
        total: draft.total().format(currency),
        lines,
        summary: summary.to_string(),
        balanced: summary.is_balanced(),
        owed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::split::ParticipantIn;

    fn request(method: &str, values: &[(&str, bool, &str)]) -> SplitRequest {
        SplitRequest {
            total: "100".to_string(),
            currency: None,
            method: Some(method.to_string()),
            participants: values
                .iter()
                .map(|(id, selected, value)| ParticipantIn {
                    id: id.to_string(),
                    name: id.to_uppercase(),
                    selected: *selected,
                    value: Some(value.to_string()),
                })
                .collect(),
        }
    }

    #[test]
    fn lenient_build_reports_mismatch() {
        let request = request("percentage", &[("a", true, "60"), ("b", true, "oops")]);
        let draft = build_draft(&request, Currency::Inr, false).unwrap();
        let response = report(&draft, None);
        assert_eq!(response.summary, "Total: 60.00% (should be 100%)");
        assert!(!response.balanced);
        assert_eq!(response.lines[1].display, "0.00%");
    }

    #[test]
    fn strict_build_rejects_malformed_values() {
        let request = request("percentage", &[("a", true, "60"), ("b", true, "oops")]);
        let err = build_draft(&request, Currency::Inr, true).unwrap_err();
        assert!(matches!(
            err,
            AppError::Engine(engine::EngineError::InvalidPercent(_))
        ));
    }

    #[test]
    fn report_includes_owed_amounts() {
        let request = request("shares", &[("a", true, "1"), ("b", true, "2"), ("c", false, "5")]);
        let draft = build_draft(&request, Currency::Eur, true).unwrap();
        let allocation = draft.commit().unwrap();
        let response = report(&draft, Some(&allocation));

        assert_eq!(response.currency, "EUR");
        assert_eq!(response.lines[2].display, "not included");
        let owed = response.owed.unwrap();
        assert_eq!(owed.len(), 2);
        assert_eq!(owed[0].amount, "33.33");
        assert_eq!(owed[1].amount, "66.67");
    }

    #[test]
    fn strict_build_requires_selected_values() {
        let mut request = request(
            "percentage",
            &[("a", true, "60"), ("b", true, "40"), ("c", false, "")],
        );
        request.participants[2].value = None;
        assert!(build_draft(&request, Currency::Inr, true).is_ok());

        request.participants[1].value = None;
        let err = build_draft(&request, Currency::Inr, true).unwrap_err();
        assert!(matches!(err, AppError::Request(ref msg) if msg.contains("participant b")));
        assert!(build_draft(&request, Currency::Inr, false).is_ok());
    }

    #[test]
    fn empty_participants_rejected() {
        let request = request("equal", &[]);
        assert!(matches!(
            build_draft(&request, Currency::Inr, false),
            Err(AppError::Request(_))
        ));
    }
}
