//! Job board: job postings, search, role-dependent tabs, apply and post
//!
//! Everything here is session-local. Applications and new postings live in
//! the [`JobBoard`] until the process exits.

use crate::catalog::Category;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Seed job postings compiled into the library
const BUILTIN_JOBS: &str = include_str!("../data/jobs.json");

/// Who is using the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Client,
    Musician,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Client => write!(f, "client"),
            UserRole::Musician => write!(f, "musician"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "client" => Ok(UserRole::Client),
            "musician" => Ok(UserRole::Musician),
            "admin" => Ok(UserRole::Admin),
            other => Err(Error::InvalidInput(format!("unknown role: {}", other))),
        }
    }
}

/// Lifecycle of a job posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Open => write!(f, "Open"),
            JobStatus::InProgress => write!(f, "In-progress"),
            JobStatus::Completed => write!(f, "Completed"),
            JobStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A client's request for musicians
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Client display name
    pub client: String,
    pub client_id: String,
    /// Budget in Naira
    pub budget: f64,
    pub location: String,
    /// Event date
    pub date: NaiveDate,
    pub duration_hours: u32,
    pub instruments: Vec<String>,
    pub category: Category,
    pub status: JobStatus,
    #[serde(default)]
    pub applicants: u32,
    pub posted_date: NaiveDate,
    #[serde(default)]
    pub event_type: String,
}

impl JobPosting {
    /// Check the posting against the same rules `JobBoard::post` enforces
    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidInput(format!(
                "job '{}' has an empty id",
                self.title
            )));
        }
        if self.instruments.is_empty() {
            return Err(Error::InvalidInput(format!(
                "job {} has no instruments",
                self.id
            )));
        }
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(Error::InvalidInput(format!(
                "job {} has invalid budget {}",
                self.id, self.budget
            )));
        }
        if self.duration_hours == 0 {
            return Err(Error::InvalidInput(format!(
                "job {} has a zero-hour duration",
                self.id
            )));
        }
        Ok(())
    }
}

/// Reject seed jobs that break posting rules or share an id
pub fn validate_jobs(jobs: &[JobPosting]) -> Result<()> {
    let mut seen = HashSet::with_capacity(jobs.len());
    for job in jobs {
        job.validate()?;
        if !seen.insert(job.id.as_str()) {
            return Err(Error::InvalidInput(format!("duplicate job id: {}", job.id)));
        }
    }
    Ok(())
}

/// Parse and validate a JSON array of job postings
pub fn jobs_from_json_str(json: &str) -> Result<Vec<JobPosting>> {
    let jobs: Vec<JobPosting> = serde_json::from_str(json)?;
    validate_jobs(&jobs)?;
    Ok(jobs)
}

/// Load replacement job seed data
pub fn load_jobs(path: &Path) -> Result<Vec<JobPosting>> {
    let content = std::fs::read_to_string(path)?;
    let jobs = jobs_from_json_str(&content)?;
    info!("Loaded {} jobs from {}", jobs.len(), path.display());
    Ok(jobs)
}

/// Job postings compiled into the library
pub fn builtin_jobs() -> Result<Vec<JobPosting>> {
    jobs_from_json_str(BUILTIN_JOBS)
}

// =============================================================================
// Search
// =============================================================================

/// Job search box and dropdowns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobQuery {
    /// Matched against title, instruments and location
    pub text: String,
    /// Exact instrument (case-insensitive, Unicode-aware)
    pub instrument: Option<String>,
    /// Location substring (case-insensitive)
    pub location: Option<String>,
}

impl JobQuery {
    pub fn matches(&self, job: &JobPosting) -> bool {
        if !self.text.is_empty() {
            let needle = self.text.to_lowercase();
            let hit = job.title.to_lowercase().contains(&needle)
                || job.instruments.iter().any(|i| i.to_lowercase().contains(&needle))
                || job.location.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        if let Some(instrument) = &self.instrument {
            let wanted = instrument.to_lowercase();
            if !job.instruments.iter().any(|i| i.to_lowercase() == wanted) {
                return false;
            }
        }

        if let Some(location) = &self.location {
            if !job.location.to_lowercase().contains(&location.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

/// Jobs matching `query`, in input order
pub fn filter_jobs<'a, I>(jobs: I, query: &JobQuery) -> Vec<&'a JobPosting>
where
    I: IntoIterator<Item = &'a JobPosting>,
{
    jobs.into_iter().filter(|job| query.matches(job)).collect()
}

// =============================================================================
// Board
// =============================================================================

/// Tabs on the jobs page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobTab {
    All,
    /// Jobs the current musician applied to
    Applied,
    /// Jobs the current client posted
    Posted,
}

impl JobTab {
    /// Tabs shown for a role
    pub fn available_for(role: UserRole) -> &'static [JobTab] {
        match role {
            UserRole::Client => &[JobTab::All, JobTab::Posted],
            UserRole::Musician => &[JobTab::All, JobTab::Applied],
            UserRole::Admin => &[JobTab::All],
        }
    }
}

impl std::fmt::Display for JobTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobTab::All => write!(f, "all"),
            JobTab::Applied => write!(f, "applied"),
            JobTab::Posted => write!(f, "posted"),
        }
    }
}

impl std::str::FromStr for JobTab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(JobTab::All),
            "applied" => Ok(JobTab::Applied),
            "posted" | "mine" => Ok(JobTab::Posted),
            other => Err(Error::InvalidInput(format!("unknown tab: {}", other))),
        }
    }
}

/// Fields a client fills in to post a job
#[derive(Debug, Clone, PartialEq)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub location: String,
    pub date: NaiveDate,
    pub duration_hours: u32,
    pub instruments: Vec<String>,
    pub category: Category,
    pub event_type: String,
}

/// Counters shown above the job list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct JobStats {
    pub total: usize,
    pub open: usize,
    pub applied: usize,
    pub posted: usize,
}

/// The jobs page for one signed-in user
#[derive(Debug, Clone)]
pub struct JobBoard {
    jobs: Vec<JobPosting>,
    role: UserRole,
    user_id: String,
    /// Display name used on new postings
    user_name: String,
    applied: HashSet<String>,
    posted_on: NaiveDate,
}

impl JobBoard {
    pub fn new(jobs: Vec<JobPosting>, role: UserRole, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self {
            jobs,
            role,
            user_name: user_id.clone(),
            user_id,
            applied: HashSet::new(),
            posted_on: chrono::Local::now().date_naive(),
        }
    }

    /// Name shown as the client on postings made from this board
    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = name.into();
        self
    }

    /// Date stamped on new postings (defaults to today)
    pub fn with_posted_on(mut self, date: NaiveDate) -> Self {
        self.posted_on = date;
        self
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn get(&self, id: &str) -> Option<&JobPosting> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn has_applied(&self, id: &str) -> bool {
        self.applied.contains(id)
    }

    /// Jobs in a tab that match the query
    pub fn jobs_in_tab(&self, tab: JobTab, query: &JobQuery) -> Result<Vec<&JobPosting>> {
        if !JobTab::available_for(self.role).contains(&tab) {
            return Err(Error::InvalidInput(format!(
                "the {} tab is not available to a {}",
                tab, self.role
            )));
        }

        let in_tab = self.jobs.iter().filter(|job| match tab {
            JobTab::All => true,
            JobTab::Applied => self.applied.contains(&job.id),
            JobTab::Posted => job.client_id == self.user_id,
        });
        Ok(filter_jobs(in_tab, query))
    }

    /// Apply to an open job as a musician
    pub fn apply(&mut self, id: &str) -> Result<&JobPosting> {
        if self.role != UserRole::Musician {
            return Err(Error::InvalidInput(format!(
                "only musicians can apply to jobs (signed in as {})",
                self.role
            )));
        }
        if self.applied.contains(id) {
            return Err(Error::InvalidInput(format!("already applied to job {}", id)));
        }

        let job = self
            .jobs
            .iter_mut()
            .find(|job| job.id == id)
            .ok_or_else(|| Error::NotFound(format!("job {}", id)))?;
        if job.status != JobStatus::Open {
            return Err(Error::InvalidInput(format!(
                "job {} is {} and no longer accepts applications",
                id, job.status
            )));
        }

        job.applicants += 1;
        self.applied.insert(id.to_string());
        debug!(job_id = id, user_id = %self.user_id, "Applied to job");
        Ok(&*job)
    }

    /// Post a new job as a client
    pub fn post(&mut self, draft: JobDraft) -> Result<&JobPosting> {
        if self.role != UserRole::Client {
            return Err(Error::InvalidInput(format!(
                "only clients can post jobs (signed in as {})",
                self.role
            )));
        }
        if draft.title.trim().is_empty() {
            return Err(Error::InvalidInput("job title is required".to_string()));
        }
        if draft.instruments.is_empty() {
            return Err(Error::InvalidInput(
                "at least one instrument is required".to_string(),
            ));
        }
        if !draft.budget.is_finite() || draft.budget < 0.0 {
            return Err(Error::InvalidInput(format!("invalid budget {}", draft.budget)));
        }
        if draft.duration_hours == 0 {
            return Err(Error::InvalidInput(
                "duration must be at least one hour".to_string(),
            ));
        }

        let id = self.next_job_id();
        debug!(job_id = %id, title = %draft.title, "Posting job");
        self.jobs.push(JobPosting {
            id,
            title: draft.title,
            description: draft.description,
            client: self.user_name.clone(),
            client_id: self.user_id.clone(),
            budget: draft.budget,
            location: draft.location,
            date: draft.date,
            duration_hours: draft.duration_hours,
            instruments: draft.instruments,
            category: draft.category,
            status: JobStatus::Open,
            applicants: 0,
            posted_date: self.posted_on,
            event_type: draft.event_type,
        });
        let posted = self.jobs.len() - 1;
        Ok(&self.jobs[posted])
    }

    pub fn stats(&self) -> JobStats {
        JobStats {
            total: self.jobs.len(),
            open: self.jobs.iter().filter(|j| j.status == JobStatus::Open).count(),
            applied: self.applied.len(),
            posted: self
                .jobs
                .iter()
                .filter(|j| j.client_id == self.user_id)
                .count(),
        }
    }

    fn next_job_id(&self) -> String {
        let mut n = self.jobs.len() + 1;
        loop {
            let candidate = format!("job-{}", n);
            if self.get(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}
