//! Persisted booking draft envelope.
//!
//! Layout on disk / in browser storage:
//! `{ "data": {..form state..}, "timestamp": <epoch ms>, "expiresAt": <epoch ms> }`

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::BookingFormState;
use crate::common::{from_epoch_millis, to_epoch_millis};
use crate::DomainError;

/// Drafts are valid for exactly 24 hours after being saved.
pub const DRAFT_TTL_MILLIS: i64 = 24 * 60 * 60 * 1000;

pub fn draft_ttl() -> Duration {
    Duration::milliseconds(DRAFT_TTL_MILLIS)
}

/// A saved draft as written to storage.
///
/// All three fields are required; a record missing any of them fails to
/// deserialize and is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftEnvelope {
    pub data: BookingFormState,
    pub timestamp: i64,
    pub expires_at: i64,
}

impl DraftEnvelope {
    /// Builds an envelope from live wizard state. Payment secrets are
    /// stripped here so no caller can persist them by accident.
    pub fn seal(form: &BookingFormState, saved_at: DateTime<Utc>) -> Self {
        let timestamp = to_epoch_millis(saved_at);
        Self {
            data: form.redacted(),
            timestamp,
            expires_at: timestamp + DRAFT_TTL_MILLIS,
        }
    }

    /// Expired strictly after `expires_at`; the boundary millisecond is
    /// still valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        to_epoch_millis(now) > self.expires_at
    }

    /// Checks invariants a record written by [`DraftEnvelope::seal`] always
    /// satisfies.
    pub fn validate(&self) -> Result<(), DomainError> {
        let Some(expected) = self.timestamp.checked_add(DRAFT_TTL_MILLIS) else {
            return Err(DomainError::validation(format!(
                "draft save time {} overflows expiry",
                self.timestamp
            )));
        };
        if self.expires_at != expected {
            return Err(DomainError::constraint(format!(
                "draft expiry {} is not {}ms after save time {}",
                self.expires_at,
                DRAFT_TTL_MILLIS,
                self.timestamp
            )));
        }
        if self.saved_at().is_none() || self.expires_at().is_none() {
            return Err(DomainError::validation("draft timestamps out of range"));
        }
        if self.data.has_payment_secrets() {
            return Err(DomainError::constraint(
                "persisted draft contains payment details",
            ));
        }
        Ok(())
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_millis(self.timestamp)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_millis(self.expires_at)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::booking::{BillingInfo, ConsultantRef, PaymentDetails};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn seal_sets_expiry_exactly_one_ttl_later() {
        let env = DraftEnvelope::seal(&BookingFormState::new(), t0());
        assert_eq!(env.expires_at - env.timestamp, 86_400_000);
        assert_eq!(env.saved_at(), Some(t0()));
        assert_eq!(env.expires_at(), Some(t0() + draft_ttl()));
        assert!(env.validate().is_ok());
    }

    #[test]
    fn seal_redacts_payment_details() {
        let form = BookingFormState::new().with_billing_info(BillingInfo {
            payment_details: Some(PaymentDetails::default()),
            ..BillingInfo::default()
        });
        let env = DraftEnvelope::seal(&form, t0());
        assert!(!env.data.has_payment_secrets());
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let env = DraftEnvelope::seal(&BookingFormState::new(), t0());
        let one_ms = Duration::milliseconds(1);
        assert!(!env.is_expired_at(t0() + draft_ttl() - one_ms));
        assert!(!env.is_expired_at(t0() + draft_ttl()));
        assert!(env.is_expired_at(t0() + draft_ttl() + one_ms));
    }

    #[test]
    fn validate_rejects_extended_expiry() {
        let mut env = DraftEnvelope::seal(&BookingFormState::new(), t0());
        env.expires_at += 1;
        assert!(matches!(env.validate(), Err(DomainError::Constraint(_))));
    }

    #[test]
    fn validate_rejects_save_time_at_i64_max() {
        let env = DraftEnvelope {
            data: BookingFormState::new(),
            timestamp: i64::MAX,
            expires_at: 0,
        };
        assert!(matches!(env.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validate_rejects_injected_payment_details() {
        let mut env = DraftEnvelope::seal(&BookingFormState::new(), t0());
        env.data.billing_info = Some(BillingInfo {
            payment_details: Some(PaymentDetails::default()),
            ..BillingInfo::default()
        });
        assert!(env.validate().is_err());
    }

    #[test]
    fn wire_layout_uses_frontend_field_names() {
        let form = BookingFormState::new().with_consultant(ConsultantRef::new("c-7"));
        let env = DraftEnvelope::seal(&form, t0());
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["data"]["selectedConsultant"]["id"], "c-7");
        assert_eq!(json["timestamp"], env.timestamp);
        assert_eq!(json["expiresAt"], env.expires_at);
    }

    #[test]
    fn partial_record_fails_to_parse() {
        let result = serde_json::from_str::<DraftEnvelope>(r#"{ "data": {}, "timestamp": 1 }"#);
        assert!(result.is_err());
    }
}
