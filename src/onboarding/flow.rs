//! OnboardingFlow: coordinates step transitions, field input and the final
//! profile write.

use std::sync::Arc;

use crate::error::FlowError;
use crate::picture::{ImagePicker, PickOutcome, PictureRef, encode_picture};
use crate::store::ProfileStore;

use super::model::ProfileRecord;
use super::state::{OnboardingState, OnboardingStep};
use super::validate::validate_profile_picture;

/// Default JPEG quality for stored pictures.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Drives one onboarding run: phone number → first name → profile picture.
///
/// Each field can only be edited while its step is active. `advance` is
/// gated by the active step's validator; `back` never validates.
pub struct OnboardingFlow {
    store: Arc<dyn ProfileStore>,
    state: OnboardingState,
    jpeg_quality: u8,
}

impl OnboardingFlow {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self {
            store,
            state: OnboardingState::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Override the JPEG quality used when encoding the picture.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    pub fn step(&self) -> OnboardingStep {
        self.state.step
    }

    pub fn state(&self) -> &OnboardingState {
        &self.state
    }

    pub fn phone_number(&self) -> &str {
        &self.state.phone_number
    }

    pub fn first_name(&self) -> &str {
        &self.state.first_name
    }

    pub fn picture(&self) -> Option<&PictureRef> {
        self.state.picture.as_ref()
    }

    /// Progress-bar fraction for the current step.
    pub fn progress(&self) -> f32 {
        self.state.step.progress()
    }

    /// Whether a back action is available (hidden on the first step).
    pub fn can_go_back(&self) -> bool {
        self.state.step.can_go_back()
    }

    fn require_step(&self, expected: OnboardingStep) -> Result<(), FlowError> {
        if self.state.step != expected {
            return Err(FlowError::WrongStep {
                expected,
                actual: self.state.step,
            });
        }
        Ok(())
    }

    pub fn set_phone_number(&mut self, value: impl Into<String>) -> Result<(), FlowError> {
        self.require_step(OnboardingStep::PhoneNumber)?;
        self.state.phone_number = value.into();
        tracing::debug!(len = self.state.phone_number.len(), "Phone number updated");
        Ok(())
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) -> Result<(), FlowError> {
        self.require_step(OnboardingStep::FirstName)?;
        self.state.first_name = value.into();
        tracing::debug!(len = self.state.first_name.len(), "First name updated");
        Ok(())
    }

    /// Replace the selected picture.
    pub fn set_picture(&mut self, picture: PictureRef) -> Result<(), FlowError> {
        self.require_step(OnboardingStep::ProfilePicture)?;
        tracing::debug!(dimensions = ?picture.dimensions(), "Picture selected");
        self.state.picture = Some(picture);
        Ok(())
    }

    pub fn clear_picture(&mut self) -> Result<(), FlowError> {
        self.require_step(OnboardingStep::ProfilePicture)?;
        self.state.picture = None;
        Ok(())
    }

    /// Ask the picker for a picture. Returns `true` if one was selected.
    ///
    /// Cancellation leaves the current picture (or its absence) untouched.
    pub async fn pick_picture(&mut self, picker: &dyn ImagePicker) -> Result<bool, FlowError> {
        self.require_step(OnboardingStep::ProfilePicture)?;
        match picker.pick().await? {
            PickOutcome::Selected(picture) => {
                self.set_picture(picture)?;
                Ok(true)
            }
            PickOutcome::Cancelled => {
                tracing::debug!("Picture selection cancelled");
                Ok(false)
            }
        }
    }

    /// Move to the next step if the current step's value is accepted.
    ///
    /// On rejection the flow stays where it is. The final step completes
    /// through [`finish`](Self::finish) instead.
    pub fn advance(&mut self) -> Result<OnboardingStep, FlowError> {
        let next = self.state.step.next().ok_or(FlowError::FinishRequired)?;
        self.state.validate_current()?;
        tracing::debug!(from = %self.state.step, to = %next, "Onboarding step advanced");
        self.state.step = next;
        Ok(next)
    }

    /// Go back one step. A no-op on the first step.
    pub fn back(&mut self) -> OnboardingStep {
        if let Some(previous) = self.state.step.previous() {
            tracing::debug!(from = %self.state.step, to = %previous, "Onboarding step back");
            self.state.step = previous;
        }
        self.state.step
    }

    /// Encode the picture and write the profile record.
    ///
    /// On success the whole flow resets to an empty first step and the
    /// written record is returned. On failure the flow stays on the picture
    /// step with every field intact so the user can retry.
    pub async fn finish(&mut self) -> Result<ProfileRecord, FlowError> {
        self.require_step(OnboardingStep::ProfilePicture)?;
        let picture = validate_profile_picture(self.state.picture.as_ref())?;

        let profile_picture = encode_picture(picture, self.jpeg_quality).map_err(|e| {
            tracing::warn!("Failed to encode profile picture: {}", e);
            e
        })?;

        let record = ProfileRecord {
            phone_number: self.state.phone_number.clone(),
            first_name: self.state.first_name.clone(),
            profile_picture,
        };

        if let Err(e) = self.store.create_profile(&record).await {
            tracing::warn!("Failed to store profile, staying on {}: {}", self.state.step, e);
            return Err(e.into());
        }

        tracing::info!(
            picture_bytes = record.profile_picture.len(),
            "Onboarding complete"
        );
        self.reset();
        Ok(record)
    }

    /// Discard all collected values and return to the first step.
    pub fn reset(&mut self) {
        self.state = OnboardingState::default();
    }
}
