//! Dashboard view

use super::{gauge_bar, Console, Step};
use crate::error::CliResult;
use health_assessment_shared::{Dashboard, KeyValueStore, Session};
use std::io::{BufRead, Write};

const GAUGE_WIDTH: usize = 20;

/// Render the dashboard, or send the user back to the profile form if it
/// cannot be built.
pub fn show<S, R, W>(session: &mut Session<S>, console: &mut Console<R, W>) -> CliResult<Step>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    match session.dashboard() {
        Ok(dashboard) => {
            render(&dashboard, console)?;
            Ok(Step::Quit)
        }
        Err(err) => {
            session.fail_to_start(&err);
            Ok(Step::Continue)
        }
    }
}

pub fn render<R, W>(dashboard: &Dashboard, console: &mut Console<R, W>) -> CliResult<()>
where
    R: BufRead,
    W: Write,
{
    let profile = &dashboard.profile;
    console.heading(&profile.name)?;
    console.line(format!("{}, {} years", profile.gender, profile.age))?;
    console.line(format!("Weight: {} kg", profile.weight_kg))?;
    console.line(format!("Height: {} cm", profile.height_cm))?;

    console.heading("BMI Score")?;
    console.line(format!(
        "{} {:.1} ({})",
        gauge_bar(dashboard.bmi_gauge.value, dashboard.bmi_gauge.remaining, GAUGE_WIDTH),
        dashboard.bmi.value,
        dashboard.bmi_label
    ))?;

    console.heading("Health Score")?;
    console.line(format!(
        "{} {}% ({})",
        gauge_bar(
            dashboard.score_gauge.value,
            dashboard.score_gauge.remaining,
            GAUGE_WIDTH
        ),
        dashboard.score.percentage,
        dashboard.score_label
    ))?;
    console.line(format!(
        "Raw score {} of {}",
        dashboard.score.raw_total, dashboard.score.max_possible
    ))?;

    console.heading("Recommendations")?;
    for tip in &dashboard.recommendations {
        console.line(format!("- {}: {}", tip.title, tip.detail))?;
    }

    console.blank()?;
    console.line(format!(
        "Generated {}",
        dashboard.generated_at.format("%Y-%m-%d %H:%M UTC")
    ))?;
    Ok(())
}
