//! Health Assessment CLI Library
//!
//! Terminal front-end for the assessment core. Exposed as a library so the
//! integration tests can drive the app with scripted input.

pub mod app;
pub mod config;
pub mod error;
pub mod storage;
pub mod views;
