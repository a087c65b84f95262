//! Questionnaire view
//!
//! Sections are opened one after another. Each question takes an option
//! number; a blank line skips it and `s` submits straight away.

use super::{Console, Step};
use crate::error::CliResult;
use health_assessment_shared::{KeyValueStore, QuestionKey, Selection, Session};
use std::io::{BufRead, Write};
use tracing::warn;

enum Reply {
    Answered,
    Skipped,
    SubmitNow,
    Closed,
}

pub fn show<S, R, W>(session: &mut Session<S>, console: &mut Console<R, W>) -> CliResult<Step>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    let catalog = match session.catalog() {
        Ok(catalog) => catalog.clone(),
        Err(err) => {
            session.fail_to_start(&err);
            return Ok(Step::Continue);
        }
    };

    console.heading("Women's Health Assessment")?;

    'sections: for (section, questions) in catalog.sections() {
        session.view_mut().expand(section);
        console.heading(section)?;

        for (index, question) in questions.iter().enumerate() {
            let key = QuestionKey::new(section, index);
            console.blank()?;
            console.line(&question.prompt)?;
            let selected = session.current_selection(&key);
            for (option, label) in question.options.iter().enumerate() {
                let marker = match selected {
                    Selection::Answered(score) if question.option_for(score) == Some(option) => "*",
                    _ => " ",
                };
                console.line(format!("  {}{}) {}", marker, option + 1, label))?;
            }

            match ask(session, console, &key, question.options.len())? {
                Reply::Answered | Reply::Skipped => {}
                Reply::SubmitNow => break 'sections,
                Reply::Closed => return Ok(Step::Quit),
            }
        }
    }

    if let Ok(completion) = session.completion() {
        console.blank()?;
        console.line(format!(
            "Answered {} of {} questions",
            completion.answered, completion.total
        ))?;
        if !completion.is_complete() {
            console.line("Unanswered questions score 0")?;
        }
    }

    if let Err(err) = session.submit_assessment() {
        session.fail_to_start(&err);
    }
    Ok(Step::Continue)
}

fn ask<S, R, W>(
    session: &mut Session<S>,
    console: &mut Console<R, W>,
    key: &QuestionKey,
    option_count: usize,
) -> CliResult<Reply>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    let label = format!("Choose 1-{} (Enter to skip, s to submit)", option_count);
    loop {
        let Some(reply) = console.prompt(&label)? else {
            return Ok(Reply::Closed);
        };
        if reply.is_empty() {
            return Ok(Reply::Skipped);
        }
        if reply.eq_ignore_ascii_case("s") {
            return Ok(Reply::SubmitNow);
        }

        let chosen = reply
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .unwrap_or(usize::MAX);
        match session.select_option(key, chosen) {
            Ok(_) => return Ok(Reply::Answered),
            Err(err) => {
                warn!(question = %key, reply = %reply, "Rejected answer");
                console.line(format!("! {}", err.user_message()))?;
            }
        }
    }
}
