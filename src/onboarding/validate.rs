//! Step validators. Each one gates advancing past its step.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::picture::PictureRef;

/// Required number of digits in a phone number.
pub const PHONE_NUMBER_LEN: usize = 10;

/// Accepts exactly ten decimal digits, in any script (Unicode `Nd`).
pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    if phone_number.is_empty() {
        return Err(ValidationError::EmptyPhoneNumber);
    }
    let len = phone_number.chars().count();
    if len != PHONE_NUMBER_LEN {
        return Err(ValidationError::PhoneNumberLength { len });
    }
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let digits = DIGITS.get_or_init(|| Regex::new(r"^\d+$").expect("Invalid digits regex"));
    if !digits.is_match(phone_number) {
        return Err(ValidationError::PhoneNumberNotNumeric);
    }
    Ok(())
}

/// Accepts any non-empty name.
pub fn validate_first_name(first_name: &str) -> Result<(), ValidationError> {
    if first_name.is_empty() {
        return Err(ValidationError::EmptyFirstName);
    }
    Ok(())
}

/// Accepts once a picture has been selected, handing it back.
pub fn validate_profile_picture(
    picture: Option<&PictureRef>,
) -> Result<&PictureRef, ValidationError> {
    picture.ok_or(ValidationError::NoPictureSelected)
}
