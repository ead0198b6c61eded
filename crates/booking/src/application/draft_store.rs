//! Booking draft store - save and resume a half-finished booking wizard.
//!
//! The draft is written to two media: a short-lived session store read
//! first, and a long-lived backup read when the session copy is missing.
//! Drafts expire 24h after the save that wrote them; expiry is checked
//! lazily on every read, and an expired or corrupt draft is removed from
//! both media on the spot.
//!
//! Wizard integration:
//! - mount: [`BookingDraftStore::resume`] (or `has_saved_data` /
//!   `saved_data_info`, then `load`)
//! - each step transition: [`BookingDraftStore::save`]
//! - booking submitted or "start over": [`BookingDraftStore::clear`]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use magnetiq_domain::{
    BookingFormState, BookingStep, DraftEnvelope, DraftMilestones, DraftProgress,
};

use super::DraftError;
use crate::config::DraftKeys;
use crate::ports::outbound::{ClockPort, DraftStorage, StorageMedium};

/// Result of [`BookingDraftStore::load`]. Both fields are `None` when there
/// is no usable draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedDraft {
    pub form_state: Option<BookingFormState>,
    pub current_step: Option<BookingStep>,
}

impl LoadedDraft {
    pub fn absent() -> Self {
        Self::default()
    }
}

/// Metadata for the "resume your booking?" prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDraftInfo {
    pub saved_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub progress: DraftProgress,
    pub progress_description: &'static str,
    #[serde(flatten)]
    pub milestones: DraftMilestones,
}

impl SavedDraftInfo {
    /// `None` if the envelope's timestamps are outside the representable range.
    pub fn from_envelope(envelope: &DraftEnvelope) -> Option<Self> {
        let form = &envelope.data;
        let progress = DraftProgress::of(form);
        Some(Self {
            saved_at: envelope.saved_at()?,
            expires_at: envelope.expires_at()?,
            progress,
            progress_description: progress.description(),
            milestones: DraftMilestones::of(form),
        })
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.saved_at
    }

    /// Zero once expired.
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }
}

/// Everything the wizard needs to offer and perform a resume, from one read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumedDraft {
    pub info: SavedDraftInfo,
    pub form_state: BookingFormState,
    pub current_step: BookingStep,
}

/// A valid, unexpired draft and where it was read from.
struct FoundDraft {
    medium: StorageMedium,
    envelope: DraftEnvelope,
}

/// Value a medium held before `save` overwrote it.
struct Overwritten<'a> {
    medium: StorageMedium,
    storage: &'a Arc<dyn DraftStorage>,
    key: &'a str,
    previous: Option<String>,
}

/// Single-slot, self-expiring store for the booking wizard's working state.
pub struct BookingDraftStore {
    session: Arc<dyn DraftStorage>,
    local: Arc<dyn DraftStorage>,
    clock: Arc<dyn ClockPort>,
    keys: DraftKeys,
}

impl BookingDraftStore {
    pub fn new(
        session: Arc<dyn DraftStorage>,
        local: Arc<dyn DraftStorage>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            session,
            local,
            clock,
            keys: DraftKeys::default(),
        }
    }

    pub fn with_keys(mut self, keys: DraftKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Media in read order: session first, local as fallback.
    fn media(&self) -> [(StorageMedium, &Arc<dyn DraftStorage>); 2] {
        [
            (StorageMedium::Session, &self.session),
            (StorageMedium::Local, &self.local),
        ]
    }

    fn storage_for(&self, medium: StorageMedium) -> &Arc<dyn DraftStorage> {
        match medium {
            StorageMedium::Session => &self.session,
            StorageMedium::Local => &self.local,
        }
    }

    /// Persist the wizard state and current step, replacing any earlier draft.
    ///
    /// Payment details are stripped before anything is encoded. The record
    /// and step go to both media; if any write fails, or a key's current
    /// value cannot be read first, media already written are restored to
    /// their previous values and the error is returned.
    pub fn save(
        &self,
        form_state: &BookingFormState,
        current_step: BookingStep,
    ) -> Result<SavedDraftInfo, DraftError> {
        let envelope = DraftEnvelope::seal(form_state, self.clock.now());
        let info = SavedDraftInfo::from_envelope(&envelope)
            .ok_or_else(|| DraftError::serialization("draft timestamp out of range"))?;
        let encoded = serde_json::to_string(&envelope).map_err(|e| {
            tracing::warn!(error = %e, "Failed to encode booking draft");
            DraftError::serialization(e)
        })?;

        let writes = [
            (self.keys.draft.as_str(), encoded.as_str()),
            (self.keys.step.as_str(), current_step.as_str()),
        ];

        let mut overwritten: Vec<Overwritten<'_>> = Vec::with_capacity(4);
        for (medium, storage) in self.media() {
            for (key, value) in writes {
                // Without a snapshot the write could not be undone.
                let previous = match storage.get(key) {
                    Ok(previous) => previous,
                    Err(source) => {
                        tracing::warn!(%medium, key, error = %source, "Could not snapshot key before save");
                        self.roll_back(&overwritten);
                        return Err(DraftError::storage(medium, "read", source));
                    }
                };

                if let Err(source) = storage.set(key, value) {
                    tracing::warn!(%medium, key, error = %source, "Failed to save booking draft");
                    self.roll_back(&overwritten);
                    return Err(DraftError::storage(medium, "write", source));
                }

                overwritten.push(Overwritten {
                    medium,
                    storage,
                    key,
                    previous,
                });
            }
        }

        tracing::info!(
            step = %current_step,
            progress = %info.progress,
            expires_at = %info.expires_at,
            "Booking draft saved"
        );
        Ok(info)
    }

    /// Undo a partial save, newest write first.
    fn roll_back(&self, overwritten: &[Overwritten<'_>]) {
        for entry in overwritten.iter().rev() {
            let restored = match &entry.previous {
                Some(value) => entry.storage.set(entry.key, value),
                None => entry.storage.delete(entry.key),
            };
            if let Err(e) = restored {
                tracing::warn!(
                    medium = %entry.medium,
                    key = entry.key,
                    error = %e,
                    "Failed to roll back booking draft write"
                );
            }
        }
    }

    /// Read the saved draft, if any.
    ///
    /// The step falls back to the wizard's first step when the draft is
    /// valid but no (recognisable) step was recorded.
    pub fn load(&self) -> LoadedDraft {
        match self.find() {
            Some(found) => {
                let step = self.read_step(found.medium);
                tracing::debug!(medium = %found.medium, %step, "Booking draft loaded");
                LoadedDraft {
                    form_state: Some(found.envelope.data),
                    current_step: Some(step),
                }
            }
            None => LoadedDraft::absent(),
        }
    }

    /// Whether a usable draft exists. Expired drafts are cleaned up.
    pub fn has_saved_data(&self) -> bool {
        self.find().is_some()
    }

    /// Prompt metadata for the saved draft, if any. Expired drafts are
    /// cleaned up.
    pub fn saved_data_info(&self) -> Option<SavedDraftInfo> {
        self.find()
            .and_then(|found| SavedDraftInfo::from_envelope(&found.envelope))
    }

    /// Metadata and contents together, from a single read.
    pub fn resume(&self) -> Option<ResumedDraft> {
        let found = self.find()?;
        let info = SavedDraftInfo::from_envelope(&found.envelope)?;
        let current_step = self.read_step(found.medium);
        Some(ResumedDraft {
            info,
            form_state: found.envelope.data,
            current_step,
        })
    }

    /// Remove the draft and step from both media.
    ///
    /// Every medium is attempted even if an earlier one fails. Succeeds only
    /// when nothing is left behind, since a surviving copy in either medium
    /// would be picked up again by `load`. Clearing an empty store succeeds.
    pub fn clear(&self) -> Result<(), DraftError> {
        let mut failures = Vec::new();
        for (medium, storage) in self.media() {
            for key in [self.keys.draft.as_str(), self.keys.step.as_str()] {
                if let Err(e) = storage.delete(key) {
                    tracing::warn!(%medium, key, error = %e, "Failed to clear booking draft");
                    failures.push((medium, e));
                }
            }
        }

        if failures.is_empty() {
            tracing::info!("Booking draft cleared");
            Ok(())
        } else {
            Err(DraftError::PartialClear { failures })
        }
    }

    /// Locate a valid, unexpired draft.
    ///
    /// Session is read first and local is the fallback; a failed read counts
    /// as missing. A record that fails to parse or breaks the draft
    /// invariants, or that has expired, is removed from both media.
    fn find(&self) -> Option<FoundDraft> {
        let mut found = None;
        for (medium, storage) in self.media() {
            match storage.get(&self.keys.draft) {
                Ok(Some(raw)) => {
                    found = Some((medium, raw));
                    break;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(%medium, error = %e, "Failed to read booking draft");
                }
            }
        }
        let (medium, raw) = found?;

        let envelope = match decode(&raw) {
            Ok(envelope) => envelope,
            Err(reason) => {
                tracing::warn!(%medium, %reason, "Discarding corrupt booking draft");
                self.discard();
                return None;
            }
        };

        let now = self.clock.now();
        if envelope.is_expired_at(now) {
            tracing::info!(
                %medium,
                expired_at = envelope.expires_at,
                now = now.timestamp_millis(),
                "Booking draft expired"
            );
            self.discard();
            return None;
        }

        Some(FoundDraft { medium, envelope })
    }

    fn discard(&self) {
        if let Err(e) = self.clear() {
            tracing::warn!(error = %e, "Could not remove stale booking draft");
        }
    }

    /// Step from the medium the draft came from, else the other one.
    fn read_step(&self, medium: StorageMedium) -> BookingStep {
        let other = match medium {
            StorageMedium::Session => StorageMedium::Local,
            StorageMedium::Local => StorageMedium::Session,
        };

        for source in [medium, other] {
            match self.storage_for(source).get(&self.keys.step) {
                Ok(Some(raw)) => match raw.parse::<BookingStep>() {
                    Ok(step) => return step,
                    Err(e) => {
                        tracing::warn!(medium = %source, error = %e, "Ignoring unknown booking step");
                    }
                },
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(medium = %source, error = %e, "Failed to read booking step");
                }
            }
        }
        BookingStep::FIRST
    }
}

fn decode(raw: &str) -> Result<DraftEnvelope, String> {
    let envelope: DraftEnvelope = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    envelope.validate().map_err(|e| e.to_string())?;
    Ok(envelope)
}
