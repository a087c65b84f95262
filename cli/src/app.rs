//! Application loop
//!
//! Dispatches to the view for the session's current stage until the
//! dashboard has been shown or input runs out.

use crate::config::StorageConfig;
use crate::error::CliResult;
use crate::views::{self, Console, Step};
use health_assessment_shared::{CatalogRegistry, KeyValueStore, Session, SessionState, SessionStore};
use std::io::{BufRead, Write};
use tracing::info;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The dashboard was shown
    Completed,
    /// Input closed before the dashboard was reached
    InputClosed,
}

pub struct App<S, R, W> {
    session: Session<S>,
    console: Console<R, W>,
}

impl<S, R, W> App<S, R, W>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    pub fn new(session: Session<S>, console: Console<R, W>) -> Self {
        Self { session, console }
    }

    /// Open a session over `backend` as configured
    pub fn start(
        catalogs: CatalogRegistry,
        backend: S,
        storage: &StorageConfig,
        console: Console<R, W>,
    ) -> CliResult<Self> {
        let store = SessionStore::new(backend);
        let session = if storage.resume {
            Session::resume(catalogs, store)
        } else {
            let mut session = Session::new(catalogs, store);
            session.reset()?;
            session
        };
        Ok(Self::new(session, console))
    }

    pub fn run(&mut self) -> CliResult<Outcome> {
        loop {
            let step = match self.session.state() {
                SessionState::CollectingProfile { .. } => {
                    views::profile::show(&mut self.session, &mut self.console)?
                }
                SessionState::AnsweringAssessment { .. } => {
                    views::questionnaire::show(&mut self.session, &mut self.console)?
                }
                SessionState::ViewingDashboard { .. } => {
                    let step = views::dashboard::show(&mut self.session, &mut self.console)?;
                    if step == Step::Quit {
                        info!(session_id = %self.session.id(), "Dashboard shown");
                        return Ok(Outcome::Completed);
                    }
                    step
                }
            };

            if step == Step::Quit {
                info!(
                    session_id = %self.session.id(),
                    stage = self.session.state().name(),
                    "Input closed"
                );
                return Ok(Outcome::InputClosed);
            }
        }
    }

    pub fn into_parts(self) -> (Session<S>, Console<R, W>) {
        (self.session, self.console)
    }
}
