//! Health Assessment Shared Library
//!
//! The scoring and assessment-state core used by the terminal front-end
//! and the WASM bindings: profile validation, the question catalog,
//! answer collection, score aggregation, BMI metrics and the session
//! state machine.

pub mod answers;
pub mod catalog;
pub mod dashboard;
pub mod errors;
pub mod health_metrics;
pub mod profile;
pub mod scoring;
pub mod session;
pub mod storage;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use answers::{AnswerSet, Selection, ViewState};
pub use catalog::{Catalog, CatalogRegistry, Question, QuestionKey};
pub use dashboard::Dashboard;
pub use errors::*;
pub use health_metrics::*;
pub use profile::{Gender, Profile, ProfileForm};
pub use scoring::*;
pub use session::{Session, SessionState};
pub use storage::{KeyValueStore, MemoryStore, SessionStore, HEALTH_SCORE_KEY, USER_DETAILS_KEY};
