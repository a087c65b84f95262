//! Input validation functions
//!
//! Profile form values arrive as text. These validators coerce and check
//! them at the submission boundary so downstream calculations only ever
//! see well-formed numbers.

/// Maximum accepted age in years
pub const MAX_AGE_YEARS: u32 = 150;

/// Maximum accepted weight in kilograms
pub const MAX_WEIGHT_KG: f64 = 500.0;

/// Maximum accepted height in centimeters
pub const MAX_HEIGHT_CM: f64 = 300.0;

/// Validate a display name
pub fn validate_name(name: &str) -> Result<String, String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if trimmed.chars().count() > 100 {
        return Err("Name too long".to_string());
    }
    Ok(trimmed.to_string())
}

/// Validate age in whole years
pub fn validate_age(age: &str) -> Result<u32, String> {
    let trimmed = age.trim();
    if trimmed.is_empty() {
        return Err("Age is required".to_string());
    }
    let years: u32 = trimmed
        .parse()
        .map_err(|_| "Age must be a whole number".to_string())?;
    if years == 0 {
        return Err("Age must be at least 1 year".to_string());
    }
    if years > MAX_AGE_YEARS {
        return Err(format!("Age cannot exceed {} years", MAX_AGE_YEARS));
    }
    Ok(years)
}

fn parse_measurement(value: &str, what: &str) -> Result<f64, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{} is required", what));
    }
    let number: f64 = trimmed
        .parse()
        .map_err(|_| format!("{} must be a number", what))?;
    if number.is_nan() || number.is_infinite() {
        return Err(format!("{} must be a valid number", what));
    }
    Ok(number)
}

/// Validate weight (in kg)
pub fn validate_weight_kg(weight: &str) -> Result<f64, String> {
    let weight_kg = parse_measurement(weight, "Weight")?;
    if weight_kg <= 0.0 {
        return Err("Weight must be greater than 0 kg".to_string());
    }
    if weight_kg > MAX_WEIGHT_KG {
        return Err(format!("Weight must be at most {} kg", MAX_WEIGHT_KG));
    }
    Ok(weight_kg)
}

/// Validate height (in cm)
pub fn validate_height_cm(height: &str) -> Result<f64, String> {
    let height_cm = parse_measurement(height, "Height")?;
    if height_cm <= 0.0 {
        return Err("Height must be greater than 0 cm".to_string());
    }
    if height_cm > MAX_HEIGHT_CM {
        return Err(format!("Height must be at most {} cm", MAX_HEIGHT_CM));
    }
    Ok(height_cm)
}

/// Valid gender values
pub const VALID_GENDERS: &[&str] = &["female"];

/// Validate gender
pub fn validate_gender(gender: &str) -> Result<(), String> {
    let normalized = gender.trim().to_lowercase();
    if VALID_GENDERS.contains(&normalized.as_str()) {
        Ok(())
    } else {
        Err(format!(
            "Invalid gender. Must be one of: {}",
            VALID_GENDERS.join(", ")
        ))
    }
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "name" => "Name",
        "age" => "Age",
        "gender" => "Gender",
        "weight" | "weight_kg" => "Weight",
        "height" | "height_cm" => "Height",
        "healthScore" => "Health Score",
        "option" => "Answer",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

impl From<ValidationError> for crate::errors::AssessmentError {
    fn from(err: ValidationError) -> Self {
        crate::errors::AssessmentError::InvalidInput {
            field: err.field,
            message: err.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Asha Rao ").unwrap(), "Asha Rao");
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_age() {
        assert_eq!(validate_age("29").unwrap(), 29);
        assert_eq!(validate_age(" 1 ").unwrap(), 1);
        assert_eq!(validate_age("150").unwrap(), 150);
        assert!(validate_age("0").is_err());
        assert!(validate_age("151").is_err());
        assert!(validate_age("-3").is_err());
        assert!(validate_age("29.5").is_err());
        assert!(validate_age("abc").is_err());
        assert!(validate_age("").is_err());
    }

    #[test]
    fn test_validate_weight() {
        assert_eq!(validate_weight_kg("60").unwrap(), 60.0);
        assert_eq!(validate_weight_kg("72.5").unwrap(), 72.5);
        assert!(validate_weight_kg("500").is_ok());
        assert!(validate_weight_kg("0").is_err());
        assert!(validate_weight_kg("-1").is_err());
        assert!(validate_weight_kg("600").is_err());
        assert!(validate_weight_kg("NaN").is_err());
        assert!(validate_weight_kg("inf").is_err());
        assert!(validate_weight_kg("sixty").is_err());
    }

    #[test]
    fn test_validate_height_cm() {
        assert_eq!(validate_height_cm("160").unwrap(), 160.0);
        assert!(validate_height_cm("300").is_ok());
        assert!(validate_height_cm("300.1").is_err());
        assert!(validate_height_cm("0").is_err());
        assert!(validate_height_cm("-10").is_err());
        assert!(validate_height_cm("").is_err());
    }

    #[test]
    fn test_validate_gender() {
        assert!(validate_gender("Female").is_ok());
        assert!(validate_gender("FEMALE").is_ok());
        assert!(validate_gender("male").is_err());
        assert!(validate_gender("").is_err());
    }

    #[test]
    fn test_field_display_labels() {
        assert_eq!(get_field_display_label("weight"), "Weight");
        assert_eq!(get_field_display_label("height_cm"), "Height");
        assert_eq!(get_field_display_label("healthScore"), "Health Score");
        assert_eq!(get_field_display_label("unknown_field"), "unknown_field");
    }

    #[test]
    fn test_validation_error_converts_to_invalid_input() {
        let err = ValidationError::new("height", "must be greater than 0 cm");
        assert_eq!(err.user_message(), "Height: must be greater than 0 cm");

        let converted: crate::errors::AssessmentError = err.into();
        assert_eq!(converted.code(), "INVALID_INPUT");
        assert_eq!(converted.field(), Some("height"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_valid_height_range(height in 0.1f64..=300.0) {
            prop_assert!(validate_height_cm(&height.to_string()).is_ok(),
                "Height {} should be valid", height);
        }

        #[test]
        fn prop_non_positive_height_rejected(height in -500.0f64..=0.0) {
            prop_assert!(validate_height_cm(&height.to_string()).is_err());
        }

        #[test]
        fn prop_valid_age_range(age in 1u32..=150) {
            prop_assert_eq!(validate_age(&age.to_string()).unwrap(), age);
        }
    }
}
