//! Interactive browse shell
//!
//! Reads one command per line, applies it to the browse session or the job
//! board, and writes a text reply. Failed commands print `error: <message>`
//! and leave all state untouched.

use crate::command::{Command, Target};
use crate::render::{
    Card, DetailView, JobsView, ListView, SectionsView, StatsView, HELP,
};
use anchor_common::jobs::JobBoard;
use anchor_common::sections::instrument_counts;
use anchor_common::{BrowseEvent, BrowseSession, Catalog, Error, Result, ViewState};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// Text produced by one command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    pub text: String,
    /// The shell should stop reading input
    pub quit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }
}

pub struct Shell<'a> {
    session: BrowseSession<'a>,
    board: JobBoard,
    section_limit: usize,
    prompt: bool,
}

impl<'a> Shell<'a> {
    pub fn new(catalog: &'a Catalog, board: JobBoard, section_limit: usize) -> Self {
        Self {
            session: BrowseSession::new(catalog),
            board,
            section_limit,
            prompt: false,
        }
    }

    /// Print `> ` before each line (for a terminal)
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn session(&self) -> &BrowseSession<'a> {
        &self.session
    }

    pub fn board(&self) -> &JobBoard {
        &self.board
    }

    pub fn welcome(&self) -> String {
        format!(
            "Anchor: {} musicians, {} jobs. Signed in as {} '{}'. Type 'help' for commands.",
            self.session.catalog().len(),
            self.board.jobs().len(),
            self.board.role(),
            self.board.user_id()
        )
    }

    /// Parse and execute one input line; errors become the reply text
    pub fn handle_line(&mut self, line: &str) -> Reply {
        if line.trim().is_empty() {
            return Reply::default();
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => return Reply::text(format!("error: {}", e)),
        };

        match self.execute(command) {
            Ok(reply) => reply,
            Err(e) => {
                debug!(error = %e, "Command failed");
                Reply::text(format!("error: {}", e))
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        match command {
            Command::Browse(event) => self.browse(event),
            Command::Open(target) => {
                let record = match target {
                    Target::Index(n) => {
                        let rendered = self.session.rendered();
                        let entry = n.checked_sub(1).and_then(|i| rendered.get(i));
                        let record = entry.copied().ok_or_else(|| {
                            Error::NotFound(format!(
                                "no entry {} in a list of {}",
                                n,
                                rendered.len()
                            ))
                        })?;
                        self.session.select_record(record);
                        record
                    }
                    Target::Id(id) => self.session.select_by_id(&id)?,
                };
                Ok(Reply::text(DetailView(record).to_string()))
            }
            Command::List => Ok(Reply::text(self.list_text())),
            Command::Sections => {
                let sections = self.session.sections(self.section_limit);
                let counts = instrument_counts(self.session.rendered());
                Ok(Reply::text(
                    SectionsView {
                        sections: &sections,
                        counts: &counts,
                    }
                    .to_string(),
                ))
            }
            Command::Jobs { tab, query } => {
                let jobs = self.board.jobs_in_tab(tab, &query)?;
                let applied = |id: &str| self.board.has_applied(id);
                Ok(Reply::text(
                    JobsView {
                        tab,
                        jobs: &jobs,
                        applied: &applied,
                    }
                    .to_string(),
                ))
            }
            Command::Apply { job_id } => {
                let job = self.board.apply(&job_id)?;
                info!(job_id = %job.id, "Application submitted");
                Ok(Reply::text(format!(
                    "Applied to {} '{}' ({} applicants)",
                    job.id, job.title, job.applicants
                )))
            }
            Command::Post(draft) => {
                let job = self.board.post(draft)?;
                info!(job_id = %job.id, "Job posted");
                Ok(Reply::text(format!("Posted {} '{}'", job.id, job.title)))
            }
            Command::Stats => Ok(Reply::text(StatsView(self.board.stats()).to_string())),
            Command::Help => Ok(Reply::text(HELP)),
            Command::Quit => Ok(Reply {
                text: "Goodbye.".to_string(),
                quit: true,
            }),
        }
    }

    /// Forward a criteria edit or back navigation to the session
    fn browse(&mut self, event: BrowseEvent) -> Result<Reply> {
        if let Ok(json) = serde_json::to_string(&event) {
            debug!(event = %json, "Browse command");
        }
        let criteria_change = event.is_criteria_change();
        self.session.dispatch(event)?;
        if criteria_change {
            if let Ok(json) = serde_json::to_string(self.session.criteria()) {
                debug!(criteria = %json, rendered = self.session.rendered().len(), "Criteria updated");
            }
        }

        let mut text = self.list_text();
        if criteria_change {
            if let ViewState::ViewingDetail(record) = self.session.view() {
                text.push_str(&format!("\n(still viewing {})", Card(record)));
            }
        }
        Ok(Reply::text(text))
    }

    fn list_text(&self) -> String {
        ListView {
            records: self.session.rendered(),
            criteria: self.session.criteria(),
        }
        .to_string()
    }

    /// Read commands until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "{}", self.welcome())?;
        self.show_prompt(&mut output)?;

        for line in input.lines() {
            let reply = self.handle_line(&line?);
            if !reply.text.is_empty() {
                writeln!(output, "{}", reply.text)?;
            }
            if reply.quit {
                break;
            }
            self.show_prompt(&mut output)?;
        }

        output.flush()
    }

    fn show_prompt<W: Write>(&self, output: &mut W) -> io::Result<()> {
        if self.prompt {
            write!(output, "> ")?;
            output.flush()?;
        }
        Ok(())
    }
}
