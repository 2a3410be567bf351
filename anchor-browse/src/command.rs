//! Shell command parsing
//!
//! One command per input line. Verbs are case-insensitive; arguments keep
//! their case because instrument membership is an exact match.

use anchor_common::catalog::{Category, SkillLevel};
use anchor_common::jobs::{JobDraft, JobQuery, JobTab};
use anchor_common::BrowseEvent;
use chrono::NaiveDate;
use std::str::FromStr;
use thiserror::Error;

/// Which record `open` refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// 1-based position in the rendered list
    Index(usize),
    Id(String),
}

/// A parsed shell command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Criteria edit or back navigation, forwarded to the browse session
    Browse(BrowseEvent),
    Open(Target),
    List,
    Sections,
    Jobs { tab: JobTab, query: JobQuery },
    Apply { job_id: String },
    Post(JobDraft),
    Stats,
    Help,
    Quit,
}

/// Errors from parsing a command line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{command}': {message}")]
    InvalidArgument {
        command: &'static str,
        message: String,
    },
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        if verb.is_empty() {
            return Err(CommandError::Empty);
        }

        match verb.to_lowercase().as_str() {
            "search" | "find" => Ok(Command::Browse(BrowseEvent::SetQuery {
                query: rest.to_string(),
            })),
            "location" | "loc" => Ok(Command::Browse(BrowseEvent::SetLocation {
                location: rest.to_string(),
            })),
            "instrument" | "inst" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "instrument",
                        argument: "an instrument name",
                    });
                }
                Ok(Command::Browse(BrowseEvent::ToggleInstrument {
                    instrument: rest.to_string(),
                }))
            }
            "skill" => Ok(Command::Browse(BrowseEvent::SetSkillLevel {
                skill_level: parse_optional::<SkillLevel>("skill", rest)?,
            })),
            "type" => Ok(Command::Browse(BrowseEvent::SetCategory {
                category: parse_optional::<Category>("type", rest)?,
            })),
            "clear" => Ok(Command::Browse(BrowseEvent::ClearFilters)),
            "back" => Ok(Command::Browse(BrowseEvent::GoBack)),
            "open" | "view" => parse_target(rest).map(Command::Open),
            "list" | "ls" => Ok(Command::List),
            "sections" => Ok(Command::Sections),
            "jobs" => Ok(parse_jobs(rest)),
            "apply" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "apply",
                        argument: "a job id",
                    });
                }
                Ok(Command::Apply {
                    job_id: rest.to_string(),
                })
            }
            "post" => parse_post(rest).map(Command::Post),
            "stats" => Ok(Command::Stats),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::UnknownCommand(verb.to_string())),
        }
    }
}

/// Empty or `any` clears the field; anything else must parse
fn parse_optional<T>(command: &'static str, raw: &str) -> Result<Option<T>, CommandError>
where
    T: FromStr<Err = anchor_common::Error>,
{
    if raw.is_empty() || raw.eq_ignore_ascii_case("any") || raw.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|e| CommandError::InvalidArgument {
            command,
            message: e.to_string(),
        })
}

fn parse_target(raw: &str) -> Result<Target, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingArgument {
            command: "open",
            argument: "a list number or musician id",
        });
    }
    match raw.parse::<usize>() {
        Ok(0) => Err(CommandError::InvalidArgument {
            command: "open",
            message: "list numbers start at 1".to_string(),
        }),
        Ok(n) => Ok(Target::Index(n)),
        Err(_) => Ok(Target::Id(raw.to_string())),
    }
}

/// `jobs [all|applied|posted] [in:<instrument>] [at:<location>] [text...]`
fn parse_jobs(raw: &str) -> Command {
    let mut words = raw.split_whitespace().peekable();
    let tab = match words.peek().and_then(|w| w.parse::<JobTab>().ok()) {
        Some(tab) => {
            words.next();
            tab
        }
        None => JobTab::All,
    };

    let mut query = JobQuery::default();
    let mut text = Vec::new();
    for word in words {
        // A bare `in:` or `at:` clears that field
        if let Some(instrument) = word.strip_prefix("in:") {
            query.instrument = non_empty(instrument);
        } else if let Some(location) = word.strip_prefix("at:") {
            query.location = non_empty(location);
        } else {
            text.push(word);
        }
    }
    query.text = text.join(" ");

    Command::Jobs { tab, query }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// `post title | budget | YYYY-MM-DD | hours | location | instr1, instr2 | individual|band [| event type [| description]]`
fn parse_post(raw: &str) -> Result<JobDraft, CommandError> {
    let fields: Vec<&str> = raw.split('|').map(str::trim).collect();
    if fields.len() < 7 {
        return Err(CommandError::MissingArgument {
            command: "post",
            argument: "title | budget | date | hours | location | instruments | type",
        });
    }

    let invalid = |message: String| CommandError::InvalidArgument {
        command: "post",
        message,
    };

    let budget = fields[1]
        .parse::<f64>()
        .map_err(|_| invalid(format!("budget '{}' is not a number", fields[1])))?;
    let date = NaiveDate::parse_from_str(fields[2], "%Y-%m-%d")
        .map_err(|_| invalid(format!("date '{}' is not YYYY-MM-DD", fields[2])))?;
    let duration_hours = fields[3]
        .parse::<u32>()
        .map_err(|_| invalid(format!("hours '{}' is not a whole number", fields[3])))?;
    let instruments: Vec<String> = fields[5]
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let category = fields[6]
        .parse::<Category>()
        .map_err(|e| invalid(e.to_string()))?;

    Ok(JobDraft {
        title: fields[0].to_string(),
        description: fields.get(8).copied().unwrap_or_default().to_string(),
        budget,
        location: fields[4].to_string(),
        date,
        duration_hours,
        instruments,
        category,
        event_type: fields.get(7).copied().unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_criteria_commands() {
        assert_eq!(
            "search gui".parse::<Command>().unwrap(),
            Command::Browse(BrowseEvent::SetQuery { query: "gui".into() })
        );
        assert_eq!(
            "SEARCH".parse::<Command>().unwrap(),
            Command::Browse(BrowseEvent::SetQuery { query: String::new() })
        );
        assert_eq!(
            "instrument Piano".parse::<Command>().unwrap(),
            Command::Browse(BrowseEvent::ToggleInstrument { instrument: "Piano".into() })
        );
        assert_eq!(
            "type band".parse::<Command>().unwrap(),
            Command::Browse(BrowseEvent::SetCategory { category: Some(Category::Ensemble) })
        );
        assert_eq!(
            "skill any".parse::<Command>().unwrap(),
            Command::Browse(BrowseEvent::SetSkillLevel { skill_level: None })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert!(matches!(
            "dance".parse::<Command>(),
            Err(CommandError::UnknownCommand(v)) if v == "dance"
        ));
        assert!(matches!(
            "instrument".parse::<Command>(),
            Err(CommandError::MissingArgument { .. })
        ));
        assert!(matches!(
            "skill wizard".parse::<Command>(),
            Err(CommandError::InvalidArgument { command: "skill", .. })
        ));
        assert!(matches!(
            "open 0".parse::<Command>(),
            Err(CommandError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_parse_open_target() {
        assert_eq!("open 3".parse::<Command>().unwrap(), Command::Open(Target::Index(3)));
        assert_eq!(
            "open m-004".parse::<Command>().unwrap(),
            Command::Open(Target::Id("m-004".into()))
        );
    }

    #[test]
    fn test_parse_jobs() {
        assert_eq!(
            "jobs".parse::<Command>().unwrap(),
            Command::Jobs { tab: JobTab::All, query: JobQuery::default() }
        );

        let Command::Jobs { tab, query } =
            "jobs applied in:Piano at:lagos wedding gig".parse::<Command>().unwrap()
        else {
            panic!("expected jobs command");
        };
        assert_eq!(tab, JobTab::Applied);
        assert_eq!(query.instrument.as_deref(), Some("Piano"));
        assert_eq!(query.location.as_deref(), Some("lagos"));
        assert_eq!(query.text, "wedding gig");
    }

    #[test]
    fn test_parse_jobs_empty_prefix_is_unset() {
        let Command::Jobs { query, .. } = "jobs in: at: wedding".parse::<Command>().unwrap() else {
            panic!("expected jobs command");
        };
        assert_eq!(query.instrument, None);
        assert_eq!(query.location, None);
        assert_eq!(query.text, "wedding");
    }

    #[test]
    fn test_parse_post() {
        let cmd = "post Drummer Needed | 50000 | 2026-12-01 | 3 | Ibadan | Drums, Percussion | individual | Concert"
            .parse::<Command>()
            .unwrap();
        let Command::Post(draft) = cmd else {
            panic!("expected post command");
        };
        assert_eq!(draft.title, "Drummer Needed");
        assert_eq!(draft.budget, 50000.0);
        assert_eq!(draft.duration_hours, 3);
        assert_eq!(draft.instruments, ["Drums", "Percussion"]);
        assert_eq!(draft.category, Category::Individual);
        assert_eq!(draft.event_type, "Concert");
        assert!(draft.description.is_empty());

        assert!(matches!(
            "post Only a title".parse::<Command>(),
            Err(CommandError::MissingArgument { command: "post", .. })
        ));
        assert!(matches!(
            "post T | lots | 2026-12-01 | 3 | X | Drums | band".parse::<Command>(),
            Err(CommandError::InvalidArgument { .. })
        ));
    }
}
