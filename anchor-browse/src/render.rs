//! Plain-text views for the browse shell
//!
//! Each view is a small `Display` wrapper over borrowed data so the shell can
//! `format!` it straight into a reply.

use anchor_common::jobs::{JobPosting, JobStats, JobTab};
use anchor_common::sections::{BrowseSections, InstrumentCount};
use anchor_common::{FilterCriteria, MusicianRecord};
use std::fmt;

/// Instruments shown on a card before collapsing into "+N more"
pub const CARD_INSTRUMENTS: usize = 3;

pub const HELP: &str = "\
Browse
  search <text>         name, instrument or bio contains text (empty clears)
  location <text>       location contains text (empty clears)
  instrument <name>     toggle an instrument filter (exact name)
  skill <level|any>     Beginner, Intermediate, Advanced, Professional
  type <kind|any>       individual or band
  clear                 reset all filters
  list                  show the filtered list
  sections              featured, top rated, new members, near you
  open <n|id>           show a profile from the list
  back                  return to the list
Jobs
  jobs [all|applied|posted] [in:<instrument>] [at:<location>] [text]
  apply <job id>        apply to an open job (musicians)
  post <title> | <budget> | <YYYY-MM-DD> | <hours> | <location> | <instr, ...> | <individual|band> [| <event type> [| <description>]]
  stats                 job counters
Other
  help                  this text
  quit                  leave";

/// Format a Naira amount with thousands separators
pub fn naira(amount: f64) -> String {
    let whole = amount.round() as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('₦');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Instrument list trimmed to [`CARD_INSTRUMENTS`]
fn card_instruments(instruments: &[String]) -> String {
    let shown = instruments
        .iter()
        .take(CARD_INSTRUMENTS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    match instruments.len().saturating_sub(CARD_INSTRUMENTS) {
        0 => shown,
        more => format!("{} +{} more", shown, more),
    }
}

/// One-line card
pub struct Card<'a>(pub &'a MusicianRecord);

impl fmt::Display for Card<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        write!(
            f,
            "{} [{}] {} | {:.1}★ | {}/hr | {}",
            r.name,
            r.category.display_name(),
            r.location,
            r.rating,
            naira(r.hourly_rate),
            card_instruments(&r.instruments)
        )?;
        if r.is_new {
            write!(f, " (new)")?;
        }
        Ok(())
    }
}

/// Summary of the active filters, or "no filters"
pub struct CriteriaSummary<'a>(pub &'a FilterCriteria);

impl fmt::Display for CriteriaSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        if c.is_empty() {
            return write!(f, "no filters");
        }

        let mut parts = Vec::new();
        if !c.query().is_empty() {
            parts.push(format!("search \"{}\"", c.query()));
        }
        if !c.location().is_empty() {
            parts.push(format!("location \"{}\"", c.location()));
        }
        if !c.instruments().is_empty() {
            parts.push(format!("instruments {}", c.instruments().join(" or ")));
        }
        if let Some(level) = c.skill_level() {
            parts.push(format!("skill {}", level));
        }
        if let Some(category) = c.category() {
            parts.push(format!("type {}", category.display_name()));
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// The numbered filtered list
pub struct ListView<'a> {
    pub records: &'a [&'a MusicianRecord],
    pub criteria: &'a FilterCriteria,
}

impl fmt::Display for ListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.records.len() == 1 { "musician" } else { "musicians" };
        write!(
            f,
            "{} {} found ({})",
            self.records.len(),
            noun,
            CriteriaSummary(self.criteria)
        )?;
        if self.records.is_empty() {
            return write!(f, "\n  No musicians match these filters. Try 'clear'.");
        }
        for (i, record) in self.records.iter().enumerate() {
            write!(f, "\n  {:>2}. {}", i + 1, Card(record))?;
        }
        Ok(())
    }
}

/// Full profile
pub struct DetailView<'a>(pub &'a MusicianRecord);

impl fmt::Display for DetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        writeln!(f, "{} ({})", r.name, r.id)?;
        writeln!(f, "  {} · {} · {}", r.category.display_name(), r.skill_level, r.location)?;
        writeln!(
            f,
            "  Rating {:.1}/5 from {} reviews · {} gigs completed · {} years experience",
            r.rating, r.review_count, r.completed_gigs, r.experience_years
        )?;
        writeln!(f, "  Rate {}/hr", naira(r.hourly_rate))?;
        writeln!(f, "  Instruments: {}", r.instruments.join(", "))?;
        if !r.availability.is_empty() {
            writeln!(f, "  Available: {}", r.availability.join(", "))?;
        }
        writeln!(f)?;
        writeln!(f, "  {}", r.bio)?;
        write!(f, "(type 'back' to return to the list)")
    }
}

/// Browse sections followed by the instrument tally
pub struct SectionsView<'a> {
    pub sections: &'a BrowseSections<'a>,
    pub counts: &'a [InstrumentCount],
}

impl fmt::Display for SectionsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (kind, records) in self.sections.iter() {
            writeln!(f, "== {} ({}) ==", kind.title(), records.len())?;
            if records.is_empty() {
                writeln!(f, "  (none)")?;
            }
            for record in records {
                writeln!(f, "  - {}", Card(record))?;
            }
        }
        write!(f, "== Instruments ==")?;
        for count in self.counts {
            write!(f, "\n  {}: {}", count.instrument, count.count)?;
        }
        Ok(())
    }
}

/// One job per line
pub struct JobsView<'a> {
    pub tab: JobTab,
    pub jobs: &'a [&'a JobPosting],
    /// Marks jobs the signed-in musician has applied to
    pub applied: &'a dyn Fn(&str) -> bool,
}

impl fmt::Display for JobsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} jobs in '{}'", self.jobs.len(), self.tab)?;
        for job in self.jobs {
            write!(
                f,
                "\n  {} | {} | {} | {} | {} | {}h | {} | {} applicants",
                job.id,
                job.title,
                job.status,
                naira(job.budget),
                job.location,
                job.duration_hours,
                job.date.format("%Y-%m-%d"),
                job.applicants
            )?;
            if (self.applied)(&job.id) {
                write!(f, " | applied")?;
            }
        }
        Ok(())
    }
}

pub struct StatsView(pub JobStats);

impl fmt::Display for StatsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        write!(
            f,
            "Total jobs: {}\nOpen: {}\nApplied: {}\nPosted: {}",
            s.total, s.open, s.applied, s.posted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_common::{Category, SkillLevel};

    fn record() -> MusicianRecord {
        MusicianRecord {
            id: "m-x".to_string(),
            name: "Ada".to_string(),
            category: Category::Individual,
            location: "Lagos".to_string(),
            instruments: vec!["Piano".into(), "Keyboard".into(), "Organ".into(), "Vocals".into()],
            skill_level: SkillLevel::Professional,
            hourly_rate: 25000.0,
            rating: 4.9,
            ..Default::default()
        }
    }

    #[test]
    fn test_naira_separators() {
        assert_eq!(naira(0.0), "₦0");
        assert_eq!(naira(950.0), "₦950");
        assert_eq!(naira(25000.0), "₦25,000");
        assert_eq!(naira(1234567.0), "₦1,234,567");
    }

    #[test]
    fn test_card_collapses_instruments() {
        let line = Card(&record()).to_string();
        assert!(line.contains("Piano, Keyboard, Organ +1 more"));
        assert!(line.contains("₦25,000/hr"));
        assert!(line.contains("4.9★"));
    }

    #[test]
    fn test_criteria_summary() {
        assert_eq!(CriteriaSummary(&FilterCriteria::new()).to_string(), "no filters");

        let criteria = FilterCriteria::new()
            .with_query("jazz")
            .with_instruments(["Piano", "Drums"]);
        assert_eq!(
            CriteriaSummary(&criteria).to_string(),
            "search \"jazz\", instruments Piano or Drums"
        );
    }

    #[test]
    fn test_empty_list_hint() {
        let criteria = FilterCriteria::new().with_query("nobody");
        let text = ListView { records: &[], criteria: &criteria }.to_string();
        assert!(text.starts_with("0 musicians found"));
        assert!(text.contains("Try 'clear'"));
    }
}
