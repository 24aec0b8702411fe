//! Onboarding: the three-step first-launch flow.
//!
//! The user enters a phone number, then a first name, then picks a profile
//! picture. Each step is gated by its validator. Finishing writes one
//! `ProfileRecord` to the injected `ProfileStore` and resets the flow.

pub mod flow;
pub mod model;
pub mod state;
pub mod validate;

pub use flow::OnboardingFlow;
pub use model::ProfileRecord;
pub use state::{OnboardingState, OnboardingStep};
pub use validate::{validate_first_name, validate_phone_number, validate_profile_picture};
