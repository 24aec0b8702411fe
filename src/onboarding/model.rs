//! Profile record produced by a completed onboarding run.

use serde::{Deserialize, Serialize};

/// The durable unit written to the profile store, one per completed flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Exactly ten decimal digits.
    pub phone_number: String,
    pub first_name: String,
    /// Base64 of the JPEG-compressed picture.
    pub profile_picture: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_snake_case_fields() {
        let record = ProfileRecord {
            phone_number: "5551234567".to_string(),
            first_name: "Ana".to_string(),
            profile_picture: "/9j/4AAQ".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["phone_number"], "5551234567");
        assert_eq!(json["first_name"], "Ana");
        assert_eq!(json["profile_picture"], "/9j/4AAQ");
    }
}
