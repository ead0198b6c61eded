//! Booking wizard steps.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// A step of the consultation-booking wizard, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStep {
    /// Canonical first step; the fallback when no step was recorded.
    #[default]
    Consultant,
    DateTime,
    Contact,
    Billing,
    Review,
}

impl BookingStep {
    pub const FIRST: BookingStep = BookingStep::Consultant;

    /// Identifier persisted under the step key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consultant => "consultant",
            Self::DateTime => "date-time",
            Self::Contact => "contact",
            Self::Billing => "billing",
            Self::Review => "review",
        }
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookingStep {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "consultant" => Ok(Self::Consultant),
            "date-time" | "datetime" => Ok(Self::DateTime),
            "contact" => Ok(Self::Contact),
            "billing" => Ok(Self::Billing),
            "review" => Ok(Self::Review),
            _ => Err(DomainError::parse(format!("Unknown booking step: {}", s))),
        }
    }
}
