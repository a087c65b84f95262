//! Health metrics calculations module
//!
//! Body-mass-index calculation and classification.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Guarded Inputs**: Non-finite or non-positive measurements are rejected
//! 3. **Type Safety**: Categories are enums, labels and colors derive from them

use crate::errors::{AssessmentError, AssessmentResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Get the BMI range for this category
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, 18.5),
            BmiCategory::Normal => (18.5, 24.9),
            BmiCategory::Overweight => (24.9, 29.9),
            BmiCategory::Obese => (29.9, f64::INFINITY),
        }
    }

    /// Get a human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Chart color for this category
    pub fn color(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "#3B82F6",
            BmiCategory::Normal => "#10B981",
            BmiCategory::Overweight => "#F59E0B",
            BmiCategory::Obese => "#EF4444",
        }
    }
}

/// BMI calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// BMI rounded to one decimal place
    pub value: f64,
    /// Category of the rounded value
    pub category: BmiCategory,
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> AssessmentResult<f64> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(AssessmentError::invalid(
            "height",
            "Height must be a positive number",
        ));
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(AssessmentError::invalid(
            "weight",
            "Weight must be a positive number",
        ));
    }
    let height_m = height_cm / 100.0;
    Ok(weight_kg / (height_m * height_m))
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 24.9 {
        BmiCategory::Normal
    } else if bmi < 29.9 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Round BMI to the one decimal place shown to users
pub fn round_bmi(bmi: f64) -> f64 {
    (bmi * 10.0).round() / 10.0
}

/// Calculate complete BMI result.
///
/// The category is taken from the displayed (rounded) value so the label
/// always agrees with the number next to it.
pub fn calculate_bmi_result(weight_kg: f64, height_cm: f64) -> AssessmentResult<BmiResult> {
    let value = round_bmi(calculate_bmi(weight_kg, height_cm)?);
    Ok(BmiResult {
        value,
        category: classify_bmi(value),
    })
}
