//! Health Assessment WASM Module
//!
//! Browser bindings for the assessment core. The host page owns rendering
//! and `localStorage`: it passes the stored `userDetails`/`healthScore`
//! strings in when constructing [`AssessmentApp`] and writes
//! [`AssessmentApp::user_details`]/[`AssessmentApp::health_score`] back after
//! each submission.
//!
//! Fallible calls return a JSON envelope, `{"data": ...}` or
//! `{"error": {"code", "message", "field"}}`.

use health_assessment_shared::storage::{HEALTH_SCORE_KEY, USER_DETAILS_KEY};
use health_assessment_shared::types::to_envelope;
use health_assessment_shared::{
    classify_bmi, classify_score, AssessmentError, CatalogRegistry, KeyValueStore, MemoryStore, ProfileForm,
    QuestionKey, Selection, Session, SessionState, SessionStore,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// One assessment session driven from JavaScript
#[wasm_bindgen]
pub struct AssessmentApp {
    session: Session<MemoryStore>,
}

#[derive(Serialize)]
struct SelectionView {
    score: u32,
    expanded: Option<String>,
}

#[wasm_bindgen]
impl AssessmentApp {
    /// Resume from the values currently held in `localStorage`
    #[wasm_bindgen(constructor)]
    pub fn new(
        user_details: Option<String>,
        health_score: Option<String>,
    ) -> Result<AssessmentApp, JsValue> {
        let catalogs = CatalogRegistry::builtin().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::resume(catalogs, user_details, health_score))
    }

    /// Current stage: `collecting_profile`, `answering_assessment` or `viewing_dashboard`
    pub fn stage(&self) -> String {
        match self.session.state() {
            SessionState::CollectingProfile { .. } => "collecting_profile",
            SessionState::AnsweringAssessment { .. } => "answering_assessment",
            SessionState::ViewingDashboard { .. } => "viewing_dashboard",
        }
        .to_string()
    }

    /// Message to show above the profile form
    pub fn notice(&self) -> Option<String> {
        self.session.notice().map(str::to_string)
    }

    /// Sections and questions for the current profile
    pub fn catalog(&self) -> String {
        to_envelope(self.session.catalog())
    }

    /// Submit the profile form (JSON with string fields)
    pub fn submit_profile(&mut self, form_json: &str) -> String {
        let result = serde_json::from_str::<ProfileForm>(form_json)
            .map_err(|e| AssessmentError::invalid("profile", e.to_string()))
            .and_then(|form| self.session.submit_profile(&form).cloned());
        to_envelope(result)
    }

    /// Select an option for a question
    pub fn select_option(&mut self, section: &str, index: usize, option: usize) -> String {
        let key = QuestionKey::new(section, index);
        let result = self.session.select_option(&key, option).map(|score| SelectionView {
            score,
            expanded: self.session.view().expanded().map(str::to_string),
        });
        to_envelope(result)
    }

    /// Selected score, or `undefined` when unanswered
    pub fn current_selection(&self, section: &str, index: usize) -> Option<u32> {
        match self.session.current_selection(&QuestionKey::new(section, index)) {
            Selection::Answered(score) => Some(score),
            Selection::Unanswered => None,
        }
    }

    /// Toggle a section open or closed, returning the open section
    pub fn toggle_section(&mut self, section: &str) -> Option<String> {
        self.session.view_mut().toggle(section).map(str::to_string)
    }

    pub fn expanded_section(&self) -> Option<String> {
        self.session.view().expanded().map(str::to_string)
    }

    pub fn completion(&self) -> String {
        to_envelope(self.session.completion())
    }

    /// Submit the assessment and return the dashboard
    pub fn submit_assessment(&mut self) -> String {
        to_envelope(self.session.submit_assessment())
    }

    pub fn dashboard(&self) -> String {
        to_envelope(self.session.dashboard())
    }

    /// Clear stored data and return to the profile form
    pub fn reset(&mut self) -> String {
        to_envelope(self.session.reset())
    }

    /// Value to write to `localStorage.userDetails`
    pub fn user_details(&self) -> Option<String> {
        self.session
            .store()
            .backend()
            .get(USER_DETAILS_KEY)
            .ok()
            .flatten()
    }

    /// Value to write to `localStorage.healthScore`
    pub fn health_score(&self) -> Option<String> {
        self.session
            .store()
            .backend()
            .get(HEALTH_SCORE_KEY)
            .ok()
            .flatten()
    }
}

impl AssessmentApp {
    fn resume(
        catalogs: CatalogRegistry,
        user_details: Option<String>,
        health_score: Option<String>,
    ) -> Self {
        let stored = [(USER_DETAILS_KEY, user_details), (HEALTH_SCORE_KEY, health_score)];
        let backend = MemoryStore::with_entries(
            stored
                .into_iter()
                .filter_map(|(key, value)| value.map(|value| (key, value))),
        );
        Self {
            session: Session::resume(catalogs, SessionStore::new(backend)),
        }
    }
}

/// BMI category label for a chart widget
#[wasm_bindgen]
pub fn bmi_category(bmi: f64) -> String {
    classify_bmi(bmi).label().to_string()
}

/// Health score category label for a chart widget
#[wasm_bindgen]
pub fn score_category(percentage: u32) -> String {
    classify_score(percentage).label().to_string()
}
