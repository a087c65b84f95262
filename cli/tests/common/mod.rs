//! Common test utilities for integration tests
//!
//! Drives the app with scripted stdin over an in-memory store.

#![allow(dead_code)]

use health_assessment_cli::{
    app::{App, Outcome},
    config::{StorageBackend, StorageConfig},
    views::Console,
};
use health_assessment_shared::{
    CatalogRegistry, KeyValueStore, MemoryStore, Session, HEALTH_SCORE_KEY, USER_DETAILS_KEY,
};
use std::io::Cursor;
use std::path::PathBuf;

/// Profile lines for a 31 year old, 60 kg, 160 cm (BMI 23.4)
pub const PROFILE: [&str; 4] = ["Meera", "31", "60", "160"];

/// Number of questions in the built-in catalog
pub const QUESTION_COUNT: usize = 15;

/// Result of one scripted run
pub struct TestRun {
    pub outcome: Outcome,
    pub output: String,
    pub session: Session<MemoryStore>,
}

impl TestRun {
    pub fn stored(&self, key: &str) -> Option<String> {
        self.session
            .store()
            .backend()
            .get(key)
            .expect("memory store never fails")
    }

    pub fn health_score(&self) -> Option<String> {
        self.stored(HEALTH_SCORE_KEY)
    }

    pub fn user_details(&self) -> Option<serde_json::Value> {
        self.stored(USER_DETAILS_KEY)
            .map(|json| serde_json::from_str(&json).expect("stored profile is JSON"))
    }
}

pub fn storage_config(resume: bool) -> StorageConfig {
    StorageConfig {
        backend: StorageBackend::Memory,
        path: PathBuf::from("unused.json"),
        resume,
    }
}

/// Join lines into stdin text, one reply per line
pub fn script(lines: &[&str]) -> String {
    let mut input = lines.join("\n");
    input.push('\n');
    input
}

/// Profile followed by the same option for every question
pub fn answer_all(option: &str) -> Vec<&str> {
    let mut lines = PROFILE.to_vec();
    lines.extend(std::iter::repeat(option).take(QUESTION_COUNT));
    lines
}

pub fn run_with(store: MemoryStore, resume: bool, input: &str) -> TestRun {
    let catalogs = CatalogRegistry::builtin().expect("built-in catalog is valid");
    let console = Console::new(Cursor::new(input.to_string()), Vec::new());

    let mut app = App::start(catalogs, store, &storage_config(resume), console)
        .expect("memory store never fails");
    let outcome = app.run().expect("scripted run succeeds");

    let (session, console) = app.into_parts();
    let output = String::from_utf8(console.into_output()).expect("output is UTF-8");
    TestRun {
        outcome,
        output,
        session,
    }
}

pub fn run(lines: &[&str]) -> TestRun {
    run_with(MemoryStore::new(), true, &script(lines))
}
