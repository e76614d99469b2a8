use colored::Colorize;

use crate::{Error, ErrorKind, Report, Reporter, RunState, Warning};

/// Progress line for a run state; `None` for states with nothing to show
pub fn render_state(state: RunState) -> Option<String> {
    let line = match state {
        RunState::Validating => "Checking URL...",
        RunState::Fetching => "Fetching content...",
        RunState::Splitting => "Splitting content...",
        RunState::Summarizing => "Summarizing...",
        RunState::Idle | RunState::Done | RunState::Failed => return None,
    };
    Some(line.dimmed().to_string())
}

pub fn render_warning(warning: &Warning) -> String {
    format!("{} {warning}", "warning:".yellow().bold())
}

/// Success panel with the joined summaries
pub fn render_report(report: &Report) -> String {
    let heading = match &report.title {
        Some(title) => format!("{} {}", "Summary:".green().bold(), title.bold()),
        None => "Summary".green().bold().to_string(),
    };
    let mut out = format!("{heading}\n\n{}", report.output);
    if report.truncated() {
        let note = format!(
            "Summarized the first {} of {} chunks.",
            report.summaries.len(),
            report.total_chunks
        );
        out.push_str(&format!("\n\n{}", note.dimmed()));
    }
    out
}

/// Error panel: message, guidance for known kinds, diagnostics for the rest
pub fn render_error(err: &Error) -> String {
    let kind = err.kind();
    let mut out = match kind {
        ErrorKind::Unclassified => format!("{} Something went wrong: {err}", "error:".red().bold()),
        _ => format!("{} {err}", "error:".red().bold()),
    };

    if let Some(guidance) = kind.guidance() {
        out.push_str(&format!("\n\n{}", guidance.cyan()));
    }

    if kind == ErrorKind::Unclassified {
        out.push_str(&format!("\n\n{}\n{err:?}", "details:".dimmed()));
    }
    out
}

/// Prints run progress to stderr
#[derive(Debug, Default)]
pub struct TerminalReporter {
    pub verbose: bool,
}

impl Reporter for TerminalReporter {
    fn state(&mut self, state: RunState) {
        if let Some(line) = render_state(state) {
            eprintln!("{line}");
        }
    }

    fn warning(&mut self, warning: &Warning) {
        eprintln!("{}", render_warning(warning));
    }

    fn chunk(&mut self, index: usize, of: usize) {
        if self.verbose {
            eprintln!("{}", format!("  chunk {index}/{of}").dimmed());
        }
    }
}
