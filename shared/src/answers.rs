//! Answer collection
//!
//! An [`AnswerSet`] holds at most one selected score per catalog question.
//! Unanswered questions have no entry and contribute nothing to the total.

use crate::catalog::{Catalog, QuestionKey};
use crate::errors::{AssessmentError, AssessmentResult};
use serde::Serialize;
use std::collections::BTreeMap;

/// Selection state of a single question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "score", rename_all = "snake_case")]
pub enum Selection {
    Unanswered,
    Answered(u32),
}

impl Selection {
    pub fn score(&self) -> Option<u32> {
        match self {
            Selection::Unanswered => None,
            Selection::Answered(score) => Some(*score),
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, Selection::Answered(_))
    }
}

/// Sparse map of answered questions to their selected score
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    entries: BTreeMap<QuestionKey, u32>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) the score selected for a question.
    ///
    /// The score must be one of the question's declared scores. Returns the
    /// previous selection.
    pub fn record_answer(
        &mut self,
        catalog: &Catalog,
        key: &QuestionKey,
        score: u32,
    ) -> AssessmentResult<Selection> {
        let question = catalog
            .question(key)
            .ok_or_else(|| AssessmentError::UnknownQuestion(key.to_string()))?;
        if !question.accepts(score) {
            return Err(AssessmentError::ScoreOutOfDomain {
                question: key.to_string(),
                score,
            });
        }

        let previous = self.entries.insert(key.clone(), score);
        Ok(previous.map_or(Selection::Unanswered, Selection::Answered))
    }

    /// Record the score of the option at `option_index`
    pub fn select_option(
        &mut self,
        catalog: &Catalog,
        key: &QuestionKey,
        option_index: usize,
    ) -> AssessmentResult<u32> {
        let question = catalog
            .question(key)
            .ok_or_else(|| AssessmentError::UnknownQuestion(key.to_string()))?;
        let score = question.score_for(option_index).ok_or_else(|| {
            AssessmentError::invalid(
                "option",
                format!(
                    "choose an option between 1 and {}",
                    question.options.len()
                ),
            )
        })?;
        self.record_answer(catalog, key, score)?;
        Ok(score)
    }

    pub fn current_selection(&self, key: &QuestionKey) -> Selection {
        self.entries
            .get(key)
            .copied()
            .map_or(Selection::Unanswered, Selection::Answered)
    }

    pub fn scores(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.values().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Ephemeral display state: which section is expanded.
///
/// Not part of the scoring model and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    expanded: Option<String>,
}

impl ViewState {
    /// Initial view with the catalog's first section open
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self {
            expanded: catalog.first_section().map(str::to_string),
        }
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn is_expanded(&self, section: &str) -> bool {
        self.expanded.as_deref() == Some(section)
    }

    pub fn expand(&mut self, section: &str) {
        self.expanded = Some(section.to_string());
    }

    pub fn collapse(&mut self) {
        self.expanded = None;
    }

    /// Open `section`, or close it if it is already open
    pub fn toggle(&mut self, section: &str) -> Option<&str> {
        if self.is_expanded(section) {
            self.collapse();
        } else {
            self.expand(section);
        }
        self.expanded()
    }
}
