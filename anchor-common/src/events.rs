//! Browse events
//!
//! Every user interaction the search surface can produce, as one serializable
//! enum. A shell (CLI, test harness, view layer) turns its input into these
//! and hands them to [`crate::session::BrowseSession::dispatch`].

use crate::catalog::{Category, SkillLevel};
use serde::{Deserialize, Serialize};

/// User interaction on the search surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BrowseEvent {
    /// Free-text search box changed (empty clears it)
    SetQuery { query: String },

    /// Location box changed (empty clears it)
    SetLocation { location: String },

    /// Instrument chip clicked
    ToggleInstrument { instrument: String },

    /// Skill level dropdown changed (`None` = all levels)
    SetSkillLevel { skill_level: Option<SkillLevel> },

    /// Type dropdown changed (`None` = both)
    SetCategory { category: Option<Category> },

    /// "Clear all filters"
    ClearFilters,

    /// Card clicked in the rendered list
    SelectRecord { id: String },

    /// Back button on the detail view
    GoBack,
}

impl BrowseEvent {
    /// Whether this event edits the filter criteria
    pub fn is_criteria_change(&self) -> bool {
        !matches!(self, BrowseEvent::SelectRecord { .. } | BrowseEvent::GoBack)
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            BrowseEvent::SetQuery { .. } => "SetQuery",
            BrowseEvent::SetLocation { .. } => "SetLocation",
            BrowseEvent::ToggleInstrument { .. } => "ToggleInstrument",
            BrowseEvent::SetSkillLevel { .. } => "SetSkillLevel",
            BrowseEvent::SetCategory { .. } => "SetCategory",
            BrowseEvent::ClearFilters => "ClearFilters",
            BrowseEvent::SelectRecord { .. } => "SelectRecord",
            BrowseEvent::GoBack => "GoBack",
        }
    }
}
