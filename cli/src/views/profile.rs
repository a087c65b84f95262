//! Profile entry view

use super::{Console, Step};
use crate::error::CliResult;
use health_assessment_shared::{Gender, KeyValueStore, ProfileForm, Session};
use std::io::{BufRead, Write};
use tracing::debug;

/// Ask for the profile and submit it.
///
/// A rejected form leaves the session on this view with a notice; the app
/// loop shows the form again.
pub fn show<S, R, W>(session: &mut Session<S>, console: &mut Console<R, W>) -> CliResult<Step>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    console.heading("Women's Health Assessment")?;
    console.line("Please fill in your information to continue")?;
    if let Some(notice) = session.notice() {
        console.line(format!("! {}", notice))?;
    }
    console.line(format!("Gender: {}", Gender::Female))?;

    let Some(name) = console.prompt("Name")? else {
        return Ok(Step::Quit);
    };
    let Some(age) = console.prompt("Age (years)")? else {
        return Ok(Step::Quit);
    };
    let Some(weight) = console.prompt("Weight (kg)")? else {
        return Ok(Step::Quit);
    };
    let Some(height) = console.prompt("Height (cm)")? else {
        return Ok(Step::Quit);
    };

    let form = ProfileForm {
        name,
        age,
        gender: Gender::Female.label().to_string(),
        weight,
        height,
    };

    if let Err(err) = session.submit_profile(&form) {
        debug!(code = err.code(), field = ?err.field(), "Profile form rejected");
    }
    Ok(Step::Continue)
}
