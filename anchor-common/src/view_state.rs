//! Browse/detail view state machine
//!
//! ```text
//! Browsing      --select_record(r)--> ViewingDetail(r)
//! ViewingDetail --select_record(r')-> ViewingDetail(r')
//! ViewingDetail --go_back()---------> Browsing
//! ```
//!
//! The selected record lives inside the `ViewingDetail` variant, so a
//! detail view without a selection cannot be represented.

use crate::catalog::MusicianRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which screen the search surface is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    /// Filtered list
    Browsing,
    /// Single selected profile
    ViewingDetail,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Browsing => write!(f, "Browsing"),
            ViewMode::ViewingDetail => write!(f, "ViewingDetail"),
        }
    }
}

/// Current navigational state, borrowing the selected record from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ViewState<'a> {
    #[default]
    Browsing,
    ViewingDetail(&'a MusicianRecord),
}

impl<'a> ViewState<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        match self {
            ViewState::Browsing => ViewMode::Browsing,
            ViewState::ViewingDetail(_) => ViewMode::ViewingDetail,
        }
    }

    /// Selected record, present exactly when viewing a detail
    pub fn selected(&self) -> Option<&'a MusicianRecord> {
        match *self {
            ViewState::Browsing => None,
            ViewState::ViewingDetail(record) => Some(record),
        }
    }

    /// Switch to the detail view for `record`, replacing any prior selection
    pub fn select_record(&mut self, record: &'a MusicianRecord) {
        debug!(from = %self.mode(), record_id = %record.id, "Selecting record");
        *self = ViewState::ViewingDetail(record);
    }

    /// Return to browsing; a no-op when already browsing
    pub fn go_back(&mut self) {
        debug!(from = %self.mode(), "Going back to browsing");
        *self = ViewState::Browsing;
    }
}
