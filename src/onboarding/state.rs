//! Onboarding state machine: tracks which step the user is on and the
//! values collected so far.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::picture::PictureRef;

use super::validate::{validate_first_name, validate_phone_number, validate_profile_picture};

/// The steps of the onboarding wizard.
///
/// Progresses linearly: PhoneNumber → FirstName → ProfilePicture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    #[default]
    PhoneNumber,
    FirstName,
    ProfilePicture,
}

impl OnboardingStep {
    /// Number of steps in the flow.
    pub const COUNT: usize = 3;

    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<OnboardingStep> {
        use OnboardingStep::*;
        match self {
            PhoneNumber => Some(FirstName),
            FirstName => Some(ProfilePicture),
            ProfilePicture => None,
        }
    }

    /// Get the step a back action returns to, if any.
    pub fn previous(&self) -> Option<OnboardingStep> {
        use OnboardingStep::*;
        match self {
            PhoneNumber => None,
            FirstName => Some(PhoneNumber),
            ProfilePicture => Some(FirstName),
        }
    }

    /// Whether this is the last step (completed through `finish`).
    pub fn is_final(&self) -> bool {
        self.next().is_none()
    }

    /// Whether a back action would move anywhere.
    pub fn can_go_back(&self) -> bool {
        self.previous().is_some()
    }

    /// Zero-based position in the flow.
    pub fn index(&self) -> usize {
        match self {
            Self::PhoneNumber => 0,
            Self::FirstName => 1,
            Self::ProfilePicture => 2,
        }
    }

    /// Progress-bar fraction for this step: 0.0, 0.5, 1.0.
    pub fn progress(&self) -> f32 {
        self.index() as f32 / (Self::COUNT - 1) as f32
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::PhoneNumber => "phone_number",
            Self::FirstName => "first_name",
            Self::ProfilePicture => "profile_picture",
        };
        write!(f, "{s}")
    }
}

/// Transient state of one onboarding run.
#[derive(Debug, Clone, Default)]
pub struct OnboardingState {
    /// Current step.
    pub step: OnboardingStep,
    pub phone_number: String,
    pub first_name: String,
    /// Absent until the user selects a picture.
    pub picture: Option<PictureRef>,
}

impl OnboardingState {
    /// Run the validator belonging to the current step.
    pub fn validate_current(&self) -> Result<(), ValidationError> {
        match self.step {
            OnboardingStep::PhoneNumber => validate_phone_number(&self.phone_number),
            OnboardingStep::FirstName => validate_first_name(&self.first_name),
            OnboardingStep::ProfilePicture => {
                validate_profile_picture(self.picture.as_ref()).map(|_| ())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OnboardingStep; 3] = [
        OnboardingStep::PhoneNumber,
        OnboardingStep::FirstName,
        OnboardingStep::ProfilePicture,
    ];

    #[test]
    fn next_walks_all_steps() {
        let mut current = OnboardingStep::default();
        assert_eq!(current, OnboardingStep::PhoneNumber);
        for expected in &ALL[1..] {
            let next = current.next().unwrap();
            assert_eq!(next, *expected);
            current = next;
        }
        assert!(current.next().is_none());
        assert!(current.is_final());
    }

    #[test]
    fn previous_is_inverse_of_next() {
        for step in ALL {
            if let Some(next) = step.next() {
                assert_eq!(next.previous(), Some(step), "{next} should go back to {step}");
            }
        }
        assert!(OnboardingStep::PhoneNumber.previous().is_none());
        assert!(!OnboardingStep::PhoneNumber.can_go_back());
        assert!(OnboardingStep::FirstName.can_go_back());
        assert!(OnboardingStep::ProfilePicture.can_go_back());
    }

    #[test]
    fn progress_fractions() {
        assert_eq!(OnboardingStep::PhoneNumber.progress(), 0.0);
        assert_eq!(OnboardingStep::FirstName.progress(), 0.5);
        assert_eq!(OnboardingStep::ProfilePicture.progress(), 1.0);
    }

    #[test]
    fn display_matches_serde() {
        for step in ALL {
            let display = format!("{step}");
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{display}\""), json, "mismatch for {step:?}");
        }
    }

    #[test]
    fn validate_current_follows_step() {
        let mut state = OnboardingState {
            phone_number: "5551234567".to_string(),
            ..Default::default()
        };
        assert!(state.validate_current().is_ok());

        // First name is still empty
        state.step = OnboardingStep::FirstName;
        assert_eq!(
            state.validate_current(),
            Err(ValidationError::EmptyFirstName)
        );

        state.step = OnboardingStep::ProfilePicture;
        assert_eq!(
            state.validate_current(),
            Err(ValidationError::NoPictureSelected)
        );
    }

    #[test]
    fn default_state_is_empty() {
        let state = OnboardingState::default();
        assert_eq!(state.step, OnboardingStep::PhoneNumber);
        assert!(state.phone_number.is_empty());
        assert!(state.first_name.is_empty());
        assert!(state.picture.is_none());
    }
}
