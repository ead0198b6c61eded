//! Coarse progress classification for the "resume your booking?" prompt.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::BookingFormState;

/// How far the visitor got, judged from which blocks are filled in.
///
/// Variants are ordered; later checks win regardless of gaps, so a draft
/// with contact info but no consultant still reports `ContactInfoEntered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftProgress {
    Started,
    ConsultantSelected,
    DateTimeSelected,
    ContactInfoEntered,
    BillingInfoEntered,
}

impl DraftProgress {
    pub fn of(form: &BookingFormState) -> Self {
        let mut progress = DraftProgress::Started;
        if form.has_consultant() {
            progress = DraftProgress::ConsultantSelected;
        }
        if form.has_date_time() {
            progress = DraftProgress::DateTimeSelected;
        }
        if form.has_contact_info() {
            progress = DraftProgress::ContactInfoEntered;
        }
        if form.has_billing_info() {
            progress = DraftProgress::BillingInfoEntered;
        }
        progress
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Started => "Booking started",
            Self::ConsultantSelected => "Consultant selected",
            Self::DateTimeSelected => "Date and time selected",
            Self::ContactInfoEntered => "Contact info entered",
            Self::BillingInfoEntered => "Billing info entered",
        }
    }
}

impl fmt::Display for DraftProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Independent presence flags behind [`DraftProgress`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftMilestones {
    pub has_consultant: bool,
    pub has_date_time: bool,
    pub has_contact_info: bool,
    pub has_billing_info: bool,
}

impl DraftMilestones {
    pub fn of(form: &BookingFormState) -> Self {
        Self {
            has_consultant: form.has_consultant(),
            has_date_time: form.has_date_time(),
            has_contact_info: form.has_contact_info(),
            has_billing_info: form.has_billing_info(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::booking::{BillingInfo, ConsultantRef, ContactInfo, PaymentMethod, TimeSlot};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn empty_form_is_started() {
        let form = BookingFormState::new();
        assert_eq!(DraftProgress::of(&form), DraftProgress::Started);
        assert_eq!(DraftMilestones::of(&form), DraftMilestones::default());
    }

    #[test]
    fn consultant_only() {
        let form = BookingFormState::new().with_consultant(ConsultantRef::new("c-1"));
        assert_eq!(
            DraftProgress::of(&form).to_string(),
            "Consultant selected"
        );
        let m = DraftMilestones::of(&form);
        assert!(m.has_consultant);
        assert!(!m.has_date_time);
    }

    #[test]
    fn contact_wins_over_earlier_fields() {
        let form = BookingFormState::new()
            .with_consultant(ConsultantRef::new("c-1"))
            .with_date_time(date(), TimeSlot::new("10:00", "11:00"))
            .with_contact_info(ContactInfo::new("Ada", "Lovelace", "ada@example.com"));
        assert_eq!(DraftProgress::of(&form), DraftProgress::ContactInfoEntered);
        let m = DraftMilestones::of(&form);
        assert!(m.has_consultant && m.has_date_time && m.has_contact_info);
        assert!(!m.has_billing_info);
    }

    #[test]
    fn last_match_wins_even_with_gaps() {
        let form = BookingFormState::new().with_billing_info(BillingInfo {
            payment_method: Some(PaymentMethod::Invoice),
            ..BillingInfo::default()
        });
        assert_eq!(DraftProgress::of(&form), DraftProgress::BillingInfoEntered);
        assert!(!DraftMilestones::of(&form).has_consultant);
    }

    #[test]
    fn variants_are_ordered_by_wizard_depth() {
        assert!(DraftProgress::Started < DraftProgress::ConsultantSelected);
        assert!(DraftProgress::ContactInfoEntered < DraftProgress::BillingInfoEntered);
    }
}
