//! Musician catalog: record types and the read-only seed collection
//!
//! The catalog is loaded once at startup (from the embedded seed data or a
//! replacement JSON file) and never modified afterwards. Every other part of
//! the browsing core borrows records from it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Seed catalog compiled into the library
const BUILTIN_MUSICIANS: &str = include_str!("../data/musicians.json");

/// Highest rating a musician can hold
pub const MAX_RATING: f64 = 5.0;

/// Whether a profile belongs to a solo performer or a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Solo performer
    #[default]
    Individual,
    /// Band, choir or other team
    #[serde(rename = "band")]
    Ensemble,
}

impl Category {
    /// Get human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Individual => "Individual",
            Category::Ensemble => "Team/Band",
        }
    }

    /// Get all category variants
    pub fn all_variants() -> &'static [Category] {
        &[Category::Individual, Category::Ensemble]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    /// Accepts `individual`/`solo` and `band`/`ensemble`/`team` (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "individual" | "solo" => Ok(Category::Individual),
            "band" | "ensemble" | "team" => Ok(Category::Ensemble),
            other => Err(Error::InvalidInput(format!("unknown category: {}", other))),
        }
    }
}

/// Self-declared skill level of a musician
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Professional,
}

impl SkillLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Professional => "Professional",
        }
    }

    /// Get all skill levels, lowest first
    pub fn all_variants() -> &'static [SkillLevel] {
        &[
            SkillLevel::Beginner,
            SkillLevel::Intermediate,
            SkillLevel::Advanced,
            SkillLevel::Professional,
        ]
    }
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for SkillLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SkillLevel::all_variants()
            .iter()
            .copied()
            .find(|level| level.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidInput(format!("unknown skill level: {}", s.trim())))
    }
}

/// One musician (or band) profile in the catalog
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MusicianRecord {
    /// Opaque unique identifier
    pub id: String,
    /// Name shown on cards and the detail view
    pub name: String,
    pub category: Category,
    /// Free-text location label (usually a city)
    pub location: String,
    /// Free-text biography
    pub bio: String,
    /// Instrument tags (never empty in a validated catalog)
    pub instruments: Vec<String>,
    pub skill_level: SkillLevel,
    /// Hourly rate in Naira
    pub hourly_rate: f64,
    /// Average review rating in [0, 5]
    pub rating: f64,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub experience_years: u32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub completed_gigs: u32,
    /// Availability labels shown on the profile (display only)
    #[serde(default)]
    pub availability: Vec<String>,
}

impl MusicianRecord {
    /// Check the record against catalog invariants
    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidInput(format!(
                "record '{}' has an empty id",
                self.name
            )));
        }
        if self.instruments.is_empty() {
            return Err(Error::InvalidInput(format!(
                "record {} has no instruments",
                self.id
            )));
        }
        if !self.hourly_rate.is_finite() || self.hourly_rate < 0.0 {
            return Err(Error::InvalidInput(format!(
                "record {} has invalid hourly rate {}",
                self.id, self.hourly_rate
            )));
        }
        if !self.rating.is_finite() || !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(Error::InvalidInput(format!(
                "record {} has rating {} outside [0, {}]",
                self.id, self.rating, MAX_RATING
            )));
        }
        Ok(())
    }
}

/// Immutable, validated collection of musician records
///
/// Insertion order is preserved; filters and sections rely on it for stable
/// output.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<MusicianRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting records that break catalog invariants
    pub fn new(records: Vec<MusicianRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record.validate()?;
            if !seen.insert(record.id.as_str()) {
                return Err(Error::InvalidInput(format!(
                    "duplicate record id: {}",
                    record.id
                )));
            }
        }
        debug!("Catalog built with {} records", records.len());
        Ok(Self { records })
    }

    /// Parse a JSON array of records
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<MusicianRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Load a replacement seed file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        info!(
            "Loaded {} musicians from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Catalog seeded from the data compiled into the library
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_MUSICIANS)
    }

    pub fn records(&self) -> &[MusicianRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MusicianRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Option<&MusicianRecord> {
        self.records.iter().find(|record| record.id == id)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MusicianRecord;
    type IntoIter = std::slice::Iter<'a, MusicianRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
