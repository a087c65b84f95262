//! Assessment session
//!
//! A session walks one user through three stages:
//!
//! ```text
//! CollectingProfile -> AnsweringAssessment -> ViewingDashboard
//! ```
//!
//! Each stage carries the data it needs, so reaching the dashboard without a
//! profile cannot be represented. Transitions only move forward. Every
//! accepted submission is written through to the [`SessionStore`] so a later
//! session can [`Session::resume`] where this one stopped.

use crate::answers::{AnswerSet, Selection, ViewState};
use crate::catalog::{Catalog, CatalogRegistry, QuestionKey};
use crate::dashboard::Dashboard;
use crate::errors::{AssessmentError, AssessmentResult};
use crate::profile::{Profile, ProfileForm};
use crate::scoring::{check_raw_total, raw_total, Completion};
use crate::storage::{KeyValueStore, SessionStore};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Current stage and the data it owns
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    CollectingProfile {
        /// Message explaining why the user was sent back here
        notice: Option<String>,
    },
    AnsweringAssessment {
        profile: Profile,
        answers: AnswerSet,
    },
    ViewingDashboard {
        profile: Profile,
        raw_total: u32,
    },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::CollectingProfile { .. } => "collecting profile",
            SessionState::AnsweringAssessment { .. } => "answering assessment",
            SessionState::ViewingDashboard { .. } => "viewing dashboard",
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            SessionState::CollectingProfile { .. } => None,
            SessionState::AnsweringAssessment { profile, .. }
            | SessionState::ViewingDashboard { profile, .. } => Some(profile),
        }
    }

    fn collecting(error: Option<&AssessmentError>) -> Self {
        SessionState::CollectingProfile {
            notice: error.map(AssessmentError::user_message),
        }
    }
}

pub struct Session<S> {
    id: Uuid,
    catalogs: CatalogRegistry,
    store: SessionStore<S>,
    state: SessionState,
    view: ViewState,
}

impl<S: KeyValueStore> Session<S> {
    /// Start a fresh session at the profile form
    pub fn new(catalogs: CatalogRegistry, store: SessionStore<S>) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            catalogs,
            store,
            state: SessionState::collecting(None),
            view: ViewState::default(),
        };
        info!(session_id = %session.id, "Session started");
        session
    }

    /// Rebuild the stage from whatever the store holds.
    ///
    /// Unreadable or missing data sends the user back to the profile form
    /// with a notice instead of failing.
    pub fn resume(catalogs: CatalogRegistry, store: SessionStore<S>) -> Self {
        let mut session = Self::new(catalogs, store);

        let profile = session.store.load_profile();
        let score = session.store.load_health_score();

        session.state = match (profile, score) {
            (Ok(Some(profile)), Ok(Some(raw_total))) => {
                match session.check_stored_score(&profile, raw_total) {
                    Ok(raw_total) => SessionState::ViewingDashboard { profile, raw_total },
                    Err(err) => {
                        warn!(session_id = %session.id, error = %err, "Discarding stored score");
                        SessionState::collecting(Some(&err))
                    }
                }
            }
            (Ok(Some(profile)), Ok(None)) => SessionState::AnsweringAssessment {
                profile,
                answers: AnswerSet::new(),
            },
            (Ok(None), Ok(Some(_))) => {
                warn!(session_id = %session.id, "Stored score has no profile");
                SessionState::collecting(Some(&AssessmentError::MissingProfile))
            }
            (Ok(None), Ok(None)) => SessionState::collecting(None),
            (Err(err), _) | (_, Err(err)) => {
                warn!(session_id = %session.id, error = %err, "Discarding unreadable session data");
                SessionState::collecting(Some(&err))
            }
        };

        if let SessionState::AnsweringAssessment { profile, .. } = &session.state {
            if let Ok(catalog) = session.catalogs.select(profile.gender) {
                session.view = ViewState::for_catalog(catalog);
            }
        }

        info!(session_id = %session.id, stage = session.state.name(), "Session resumed");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub fn into_store(self) -> SessionStore<S> {
        self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    /// Notice to show on the profile form, if any
    pub fn notice(&self) -> Option<&str> {
        match &self.state {
            SessionState::CollectingProfile { notice } => notice.as_deref(),
            _ => None,
        }
    }

    /// Catalog for the current profile
    pub fn catalog(&self) -> AssessmentResult<&Catalog> {
        let profile = self
            .state
            .profile()
            .ok_or(AssessmentError::MissingProfile)?;
        self.catalogs.select(profile.gender)
    }

    /// A stored total must be reachable with the profile's catalog
    fn check_stored_score(&self, profile: &Profile, raw_total: u32) -> AssessmentResult<u32> {
        let catalog = self.catalogs.select(profile.gender)?;
        check_raw_total(raw_total, catalog.max_score())
    }

    fn invalid_transition(&self, action: &'static str) -> AssessmentError {
        AssessmentError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }

    /// Validate and store the profile, then move on to the assessment.
    ///
    /// On failure the session stays on the profile form with the error as
    /// its notice.
    pub fn submit_profile(&mut self, form: &ProfileForm) -> AssessmentResult<&Profile> {
        if !matches!(self.state, SessionState::CollectingProfile { .. }) {
            return Err(self.invalid_transition("submit profile"));
        }

        match self.accept_profile(form) {
            Ok((profile, view)) => {
                info!(session_id = %self.id, "Profile accepted");
                self.view = view;
                self.state = SessionState::AnsweringAssessment {
                    profile,
                    answers: AnswerSet::new(),
                };
            }
            Err(err) => {
                warn!(session_id = %self.id, error = %err, "Profile rejected");
                self.state = SessionState::collecting(Some(&err));
                return Err(err);
            }
        }

        self.state
            .profile()
            .ok_or(AssessmentError::MissingProfile)
    }

    fn accept_profile(&mut self, form: &ProfileForm) -> AssessmentResult<(Profile, ViewState)> {
        let profile = form.parse()?;
        let view = ViewState::for_catalog(self.catalogs.select(profile.gender)?);
        self.store.save_profile(&profile)?;
        Ok((profile, view))
    }

    /// Record a score for a question
    pub fn record_answer(&mut self, key: &QuestionKey, score: u32) -> AssessmentResult<Selection> {
        let state_name = self.state.name();
        match &mut self.state {
            SessionState::AnsweringAssessment { profile, answers } => {
                let catalog = self.catalogs.select(profile.gender)?;
                let previous = answers.record_answer(catalog, key, score)?;
                debug!(session_id = %self.id, question = %key, score, "Answer recorded");
                Ok(previous)
            }
            _ => Err(AssessmentError::InvalidTransition {
                action: "record answer",
                state: state_name,
            }),
        }
    }

    /// Record the option at `option_index` for a question, returning its score
    pub fn select_option(&mut self, key: &QuestionKey, option_index: usize) -> AssessmentResult<u32> {
        let state_name = self.state.name();
        match &mut self.state {
            SessionState::AnsweringAssessment { profile, answers } => {
                let catalog = self.catalogs.select(profile.gender)?;
                let score = answers.select_option(catalog, key, option_index)?;
                debug!(session_id = %self.id, question = %key, option_index, score, "Option selected");
                Ok(score)
            }
            _ => Err(AssessmentError::InvalidTransition {
                action: "select option",
                state: state_name,
            }),
        }
    }

    /// Selection for a question. Outside the assessment stage nothing is answered.
    pub fn current_selection(&self, key: &QuestionKey) -> Selection {
        match &self.state {
            SessionState::AnsweringAssessment { answers, .. } => answers.current_selection(key),
            _ => Selection::Unanswered,
        }
    }

    pub fn completion(&self) -> AssessmentResult<Completion> {
        match &self.state {
            SessionState::AnsweringAssessment { profile, answers } => {
                let catalog = self.catalogs.select(profile.gender)?;
                Ok(Completion::of(answers, catalog))
            }
            _ => Err(self.invalid_transition("check completion")),
        }
    }

    /// Store the raw total and move to the dashboard.
    ///
    /// Unanswered questions count as zero; full completion is not required.
    pub fn submit_assessment(&mut self) -> AssessmentResult<Dashboard> {
        let (profile, total) = match &self.state {
            SessionState::AnsweringAssessment { profile, answers } => {
                (profile.clone(), raw_total(answers))
            }
            SessionState::CollectingProfile { .. } => return Err(AssessmentError::MissingProfile),
            SessionState::ViewingDashboard { .. } => {
                return Err(self.invalid_transition("submit assessment"))
            }
        };

        let catalog = self.catalogs.select(profile.gender)?;
        let dashboard = Dashboard::build(&profile, total, catalog)?;
        self.store.save_health_score(total)?;

        info!(
            session_id = %self.id,
            raw_total = total,
            percentage = dashboard.score.percentage,
            "Assessment submitted"
        );
        self.view.collapse();
        self.state = SessionState::ViewingDashboard {
            profile,
            raw_total: total,
        };
        Ok(dashboard)
    }

    /// Build the dashboard for the current stage
    pub fn dashboard(&self) -> AssessmentResult<Dashboard> {
        match &self.state {
            SessionState::ViewingDashboard { profile, raw_total } => {
                let catalog = self.catalogs.select(profile.gender)?;
                Dashboard::build(profile, *raw_total, catalog)
            }
            SessionState::CollectingProfile { .. } => Err(AssessmentError::MissingProfile),
            SessionState::AnsweringAssessment { .. } => {
                Err(self.invalid_transition("view dashboard"))
            }
        }
    }

    /// Route back to the profile form after a failure, keeping the message
    pub fn fail_to_start(&mut self, err: &AssessmentError) {
        warn!(session_id = %self.id, error = %err, "Returning to profile form");
        self.view.collapse();
        self.state = SessionState::collecting(Some(err));
    }

    /// Forget everything and start over at the profile form
    pub fn reset(&mut self) -> AssessmentResult<()> {
        self.store.clear()?;
        self.view.collapse();
        self.state = SessionState::collecting(None);
        info!(session_id = %self.id, "Session reset");
        Ok(())
    }
}
