//! Biometric profile
//!
//! The profile form is submitted once per session. Values are validated and
//! coerced here, at the write boundary, so a stored [`Profile`] is always
//! complete and numerically sound.

use crate::errors::{AssessmentError, AssessmentResult};
use crate::validation::{
    validate_age, validate_gender, validate_height_cm, validate_name, validate_weight_kg,
    ValidationError,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Demographic selector for the assessment catalog.
/// Only the female assessment exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Female,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_gender(s)?;
        Ok(Gender::Female)
    }
}

/// Raw profile form, as typed by the user.
///
/// This is also the persisted `userDetails` layout: every field is text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "is required"))]
    pub age: String,
    #[validate(length(min = 1, message = "is required"))]
    pub gender: String,
    #[validate(length(min = 1, message = "is required"))]
    pub weight: String,
    #[validate(length(min = 1, message = "is required"))]
    pub height: String,
}

/// Form field names in display order
const FORM_FIELDS: [&str; 5] = ["name", "age", "gender", "weight", "height"];

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            gender: Gender::default().label().to_string(),
            weight: String::new(),
            height: String::new(),
        }
    }
}

impl ProfileForm {
    /// Validate and coerce the form into a [`Profile`].
    ///
    /// The first failing field, in form order, is reported.
    pub fn parse(&self) -> AssessmentResult<Profile> {
        if let Err(errors) = self.validate() {
            let field_errors = errors.field_errors();
            for field in FORM_FIELDS {
                if field_errors.contains_key(field) {
                    return Err(ValidationError::new(field, "is required").into());
                }
            }
        }

        let name = validate_name(&self.name).map_err(|m| ValidationError::new("name", &m))?;
        let age = validate_age(&self.age).map_err(|m| ValidationError::new("age", &m))?;
        let gender: Gender = self
            .gender
            .parse()
            .map_err(|m: String| ValidationError::new("gender", &m))?;
        let weight_kg =
            validate_weight_kg(&self.weight).map_err(|m| ValidationError::new("weight", &m))?;
        let height_cm =
            validate_height_cm(&self.height).map_err(|m| ValidationError::new("height", &m))?;

        Ok(Profile {
            name,
            age,
            gender,
            weight_kg,
            height_cm,
        })
    }
}

/// Validated biometric profile. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub weight_kg: f64,
    pub height_cm: f64,
}

impl Profile {
    /// Canonical form representation used for persistence
    pub fn to_form(&self) -> ProfileForm {
        ProfileForm {
            name: self.name.clone(),
            age: self.age.to_string(),
            gender: self.gender.label().to_string(),
            weight: self.weight_kg.to_string(),
            height: self.height_cm.to_string(),
        }
    }
}

impl TryFrom<&ProfileForm> for Profile {
    type Error = AssessmentError;

    fn try_from(form: &ProfileForm) -> Result<Self, Self::Error> {
        form.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn form(name: &str, age: &str, weight: &str, height: &str) -> ProfileForm {
        ProfileForm {
            name: name.to_string(),
            age: age.to_string(),
            gender: "Female".to_string(),
            weight: weight.to_string(),
            height: height.to_string(),
        }
    }

    #[test]
    fn test_parse_valid_form() {
        let profile = form("Meera", "31", "60", "160").parse().unwrap();
        assert_eq!(profile.name, "Meera");
        assert_eq!(profile.age, 31);
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.weight_kg, 60.0);
        assert_eq!(profile.height_cm, 160.0);
    }

    #[test]
    fn test_missing_field_reported_in_form_order() {
        let err = form("", "31", "", "160").parse().unwrap_err();
        assert_eq!(err.field(), Some("name"));

        let err = form("Meera", "31", "60", "").parse().unwrap_err();
        assert_eq!(err, AssessmentError::invalid("height", "is required"));
    }

    #[test]
    fn test_non_numeric_weight_is_invalid_input() {
        let err = form("Meera", "31", "sixty", "160").parse().unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
        assert_eq!(err.field(), Some("weight"));
    }

    #[test]
    fn test_zero_height_is_invalid_input() {
        let err = form("Meera", "31", "60", "0").parse().unwrap_err();
        assert_eq!(err.field(), Some("height"));
    }

    #[test]
    fn test_unknown_gender_rejected() {
        let mut f = form("Meera", "31", "60", "160");
        f.gender = "other".to_string();
        assert_eq!(f.parse().unwrap_err().field(), Some("gender"));
    }

    #[test]
    fn test_default_form_is_prefilled_with_female() {
        assert_eq!(ProfileForm::default().gender, "Female");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let name: String = Name().fake();
        let f = form(&name, "45", "72.5", "168");
        let first = f.parse().unwrap();
        let second = f.parse().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_form(), second.to_form());
    }

    #[test]
    fn test_to_form_round_trips_through_parse() {
        let profile = form(" Meera ", "31", "60.0", "160").parse().unwrap();
        let canonical = profile.to_form();
        assert_eq!(canonical.name, "Meera");
        assert_eq!(canonical.weight, "60");
        assert_eq!(canonical.parse().unwrap(), profile);
    }

    #[test]
    fn test_profile_form_json_layout() {
        let json = serde_json::to_value(form("Meera", "31", "60", "160")).unwrap();
        assert_eq!(json["name"], "Meera");
        assert_eq!(json["age"], "31");
        assert_eq!(json["gender"], "Female");
        assert_eq!(json["weight"], "60");
        assert_eq!(json["height"], "160");
    }
}
