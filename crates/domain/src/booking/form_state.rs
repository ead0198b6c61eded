//! Booking wizard form state.
//!
//! Every field is optional: absence means the visitor has not reached that
//! part of the wizard yet. Field names serialize in camelCase so the same
//! record is readable by the web frontend.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::none_if_blank;

/// Working state of the consultation-booking wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingFormState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_consultant: Option<ConsultantRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_time_slot: Option<TimeSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_info: Option<BillingInfo>,
}

impl BookingFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_consultant(mut self, consultant: ConsultantRef) -> Self {
        self.selected_consultant = Some(consultant);
        self
    }

    pub fn with_date_time(mut self, date: NaiveDate, slot: TimeSlot) -> Self {
        self.selected_date = Some(date);
        self.selected_time_slot = Some(slot);
        self
    }

    pub fn with_contact_info(mut self, contact: ContactInfo) -> Self {
        self.contact_info = Some(contact);
        self
    }

    pub fn with_billing_info(mut self, billing: BillingInfo) -> Self {
        self.billing_info = Some(billing);
        self
    }

    /// Returns a copy that is safe to persist.
    ///
    /// Payment secrets never leave memory; the rest of the billing block
    /// (address, VAT number, chosen method) is kept.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if let Some(billing) = copy.billing_info.as_mut() {
            billing.payment_details = None;
        }
        copy
    }

    pub fn has_payment_secrets(&self) -> bool {
        self.billing_info
            .as_ref()
            .is_some_and(|b| b.payment_details.is_some())
    }

    pub fn has_consultant(&self) -> bool {
        self.selected_consultant
            .as_ref()
            .is_some_and(|c| none_if_blank(&c.id).is_some())
    }

    /// Both halves are needed: a date without a slot is not bookable.
    pub fn has_date_time(&self) -> bool {
        self.selected_date.is_some() && self.selected_time_slot.is_some()
    }

    pub fn has_contact_info(&self) -> bool {
        self.contact_info.as_ref().is_some_and(ContactInfo::is_entered)
    }

    pub fn has_billing_info(&self) -> bool {
        self.billing_info.as_ref().is_some_and(BillingInfo::is_entered)
    }
}

/// Reference to the consultant picked in the first step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultantRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ConsultantRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            title: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A bookable slot on the selected date, as offered by the availability API.
///
/// Times are kept as the "HH:MM" strings the API returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub start_time: String,
    pub end_time: String,
}

impl TimeSlot {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            id: None,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ContactInfo {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// The step form mounts with an empty block, so presence alone
    /// doesn't mean anything was typed.
    pub fn is_entered(&self) -> bool {
        none_if_blank(&self.email).is_some()
            || none_if_blank(&self.first_name).is_some()
            || none_if_blank(&self.last_name).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Invoice,
    Card,
    Paypal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillingInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// Secret block, stripped by [`BookingFormState::redacted`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_details: Option<PaymentDetails>,
}

impl BillingInfo {
    pub fn is_entered(&self) -> bool {
        self.payment_method.is_some()
            || [
                &self.company_name,
                &self.street,
                &self.postal_code,
                &self.city,
                &self.country,
                &self.vat_number,
            ]
            .into_iter()
            .flatten()
            .any(|v| none_if_blank(v).is_some())
    }
}

/// Card data typed into the billing step.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentDetails {
    pub card_number: String,
    pub cardholder_name: String,
    pub expiry: String,
    pub cvc: String,
}

impl fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("card_number", &"<redacted>")
            .field("cardholder_name", &self.cardholder_name)
            .field("expiry", &"<redacted>")
            .field("cvc", &"<redacted>")
            .finish()
    }
}
