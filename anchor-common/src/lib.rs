//! # Anchor Common Library
//!
//! Browsing core for the Anchor musician marketplace:
//! - Musician catalog and seed data
//! - Catalog filter (`apply_filters`) and derived browse sections
//! - Browse/detail view state and the event-driven browse session
//! - Job board (search, tabs, apply, post)
//! - Configuration loading

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod filter;
pub mod jobs;
pub mod sections;
pub mod session;
pub mod view_state;

pub use catalog::{Catalog, Category, MusicianRecord, SkillLevel};
pub use error::{Error, Result};
pub use events::BrowseEvent;
pub use filter::{apply_filters, FilterCriteria};
pub use session::BrowseSession;
pub use view_state::{ViewMode, ViewState};
