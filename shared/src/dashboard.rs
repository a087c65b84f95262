//! Dashboard view model
//!
//! Everything the summary view shows, derived on demand from the stored
//! profile and raw score.

use crate::catalog::Catalog;
use crate::errors::AssessmentResult;
use crate::health_metrics::{calculate_bmi_result, BmiResult};
use crate::profile::Profile;
use crate::scoring::{check_raw_total, ScoreResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Upper end of the BMI gauge
pub const BMI_GAUGE_MAX: f64 = 40.0;

/// Two-slice gauge: the value and what remains up to the gauge maximum
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    pub value: f64,
    pub remaining: f64,
    pub color: &'static str,
}

impl Gauge {
    fn new(value: f64, max: f64, color: &'static str) -> Self {
        Self {
            value,
            remaining: (max - value).max(0.0),
            color,
        }
    }
}

/// Identity card shown next to the charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub name: String,
    pub gender: &'static str,
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
}

/// General advice card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: &'static str,
    pub detail: &'static str,
}

pub const RECOMMENDATIONS: [Recommendation; 3] = [
    Recommendation {
        title: "Physical Activity",
        detail: "Aim for at least 30 minutes of moderate exercise daily.",
    },
    Recommendation {
        title: "Healthy Diet",
        detail: "Include more fruits, vegetables, and whole grains in your diet.",
    },
    Recommendation {
        title: "Regular Check-ups",
        detail: "Schedule regular health check-ups and screenings.",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub profile: ProfileSummary,
    pub bmi: BmiResult,
    pub bmi_label: &'static str,
    pub bmi_gauge: Gauge,
    pub score: ScoreResult,
    pub score_label: &'static str,
    pub score_gauge: Gauge,
    pub recommendations: Vec<Recommendation>,
    pub generated_at: DateTime<Utc>,
}

impl Dashboard {
    pub fn build(profile: &Profile, raw_total: u32, catalog: &Catalog) -> AssessmentResult<Self> {
        let raw_total = check_raw_total(raw_total, catalog.max_score())?;
        let bmi = calculate_bmi_result(profile.weight_kg, profile.height_cm)?;
        let score = ScoreResult::compute(raw_total, catalog.max_score());

        Ok(Self {
            profile: ProfileSummary {
                name: profile.name.clone(),
                gender: profile.gender.label(),
                age: profile.age,
                weight_kg: profile.weight_kg,
                height_cm: profile.height_cm,
            },
            bmi_label: bmi.category.label(),
            bmi_gauge: Gauge::new(bmi.value, BMI_GAUGE_MAX, bmi.category.color()),
            bmi,
            score_label: score.category.label(),
            score_gauge: Gauge::new(
                f64::from(score.percentage),
                100.0,
                score.category.color(),
            ),
            score,
            recommendations: RECOMMENDATIONS.to_vec(),
            generated_at: Utc::now(),
        })
    }
}
