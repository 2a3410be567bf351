//! Profile catalog filter
//!
//! Computes the subset of the catalog matching every active criterion.
//! Criteria combine with AND; the required-instrument set matches when the
//! record plays ANY of the listed instruments. Empty or unset criteria never
//! constrain the result.
//!
//! The filter is a pure linear scan, cheap enough to re-run on every
//! keystroke for catalogs of a few hundred records.

use crate::catalog::{Category, MusicianRecord, SkillLevel};
use serde::Serialize;
use tracing::debug;

/// Active filter constraints for the search view
///
/// Created empty, edited one field at a time, reset by [`FilterCriteria::clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    query: String,
    location: String,
    /// Ordered, de-duplicated instrument set
    instruments: Vec<String>,
    skill_level: Option<SkillLevel>,
    category: Option<Category>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Builder-style constructors
    // ------------------------------------------------------------------

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.set_query(query);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.set_location(location);
        self
    }

    /// Add every instrument in `instruments` (duplicates collapse)
    pub fn with_instruments<I, S>(mut self, instruments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for instrument in instruments {
            let instrument = instrument.into();
            if !self.instruments.contains(&instrument) {
                self.instruments.push(instrument);
            }
        }
        self
    }

    pub fn with_skill_level(mut self, level: SkillLevel) -> Self {
        self.skill_level = Some(level);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    // ------------------------------------------------------------------
    // Field-by-field mutation
    // ------------------------------------------------------------------

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    /// Add the instrument if absent, remove it if present
    ///
    /// Returns `true` when the instrument is selected after the call.
    pub fn toggle_instrument(&mut self, instrument: &str) -> bool {
        if let Some(pos) = self.instruments.iter().position(|i| i == instrument) {
            self.instruments.remove(pos);
            false
        } else {
            self.instruments.push(instrument.to_string());
            true
        }
    }

    pub fn set_skill_level(&mut self, level: Option<SkillLevel>) {
        self.skill_level = level;
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
    }

    /// Reset every field to "no constraint"
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn instruments(&self) -> &[String] {
        &self.instruments
    }

    pub fn skill_level(&self) -> Option<SkillLevel> {
        self.skill_level
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// True when no field constrains the result
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && self.location.is_empty()
            && self.instruments.is_empty()
            && self.skill_level.is_none()
            && self.category.is_none()
    }

    /// Check a single record against all active criteria
    pub fn matches(&self, record: &MusicianRecord) -> bool {
        PreparedCriteria::new(self).matches(record)
    }
}

/// Criteria with text fields lowercased once per filter run
struct PreparedCriteria<'c> {
    query: Option<String>,
    location: Option<String>,
    criteria: &'c FilterCriteria,
}

impl<'c> PreparedCriteria<'c> {
    fn new(criteria: &'c FilterCriteria) -> Self {
        let lowered = |s: &str| (!s.is_empty()).then(|| s.to_lowercase());
        Self {
            query: lowered(&criteria.query),
            location: lowered(&criteria.location),
            criteria,
        }
    }

    fn matches(&self, record: &MusicianRecord) -> bool {
        if let Some(query) = &self.query {
            let hit = contains_ci(&record.name, query)
                || record.instruments.iter().any(|tag| contains_ci(tag, query))
                || contains_ci(&record.bio, query);
            if !hit {
                return false;
            }
        }

        if let Some(location) = &self.location {
            if !contains_ci(&record.location, location) {
                return false;
            }
        }

        let required = &self.criteria.instruments;
        if !required.is_empty() && !record.instruments.iter().any(|tag| required.contains(tag)) {
            return false;
        }

        if let Some(level) = self.criteria.skill_level {
            if record.skill_level != level {
                return false;
            }
        }

        if let Some(category) = self.criteria.category {
            if record.category != category {
                return false;
            }
        }

        true
    }
}

/// Case-insensitive substring test; `needle_lower` must already be lowercase
fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Return the records matching every active criterion, in input order
///
/// Accepts any iterator of record references, so the output of one call can
/// be fed straight back in.
///
/// # Examples
///
/// ```
/// use anchor_common::catalog::Catalog;
/// use anchor_common::filter::{apply_filters, FilterCriteria};
///
/// let catalog = Catalog::builtin().unwrap();
/// let everyone = apply_filters(&catalog, &FilterCriteria::new());
/// assert_eq!(everyone.len(), catalog.len());
///
/// let pianists = apply_filters(&catalog, &FilterCriteria::new().with_instruments(["Piano"]));
/// assert!(pianists.iter().all(|r| r.instruments.iter().any(|i| i == "Piano")));
/// ```
pub fn apply_filters<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a MusicianRecord>
where
    I: IntoIterator<Item = &'a MusicianRecord>,
{
    let prepared = PreparedCriteria::new(criteria);
    let filtered: Vec<&'a MusicianRecord> = records
        .into_iter()
        .filter(|record| prepared.matches(record))
        .collect();

    debug!(
        query = criteria.query.as_str(),
        location = criteria.location.as_str(),
        instruments = ?criteria.instruments,
        skill_level = ?criteria.skill_level,
        category = ?criteria.category,
        matched = filtered.len(),
        "Applied filters"
    );

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn musician(id: &str, name: &str, instruments: &[&str], location: &str) -> MusicianRecord {
        MusicianRecord {
            id: id.to_string(),
            name: name.to_string(),
            location: location.to_string(),
            instruments: instruments.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_toggle_instrument_adds_then_removes() {
        let mut criteria = FilterCriteria::new();
        assert!(criteria.toggle_instrument("Piano"));
        assert!(criteria.toggle_instrument("Drums"));
        assert_eq!(criteria.instruments(), ["Piano", "Drums"]);

        assert!(!criteria.toggle_instrument("Piano"));
        assert_eq!(criteria.instruments(), ["Drums"]);
    }

    #[test]
    fn test_criteria_serialize_for_logging() {
        let criteria = FilterCriteria::new()
            .with_query("jazz")
            .with_instruments(["Piano"])
            .with_category(Category::Ensemble);
        let json = serde_json::to_value(&criteria).unwrap();
        assert_eq!(json["query"], "jazz");
        assert_eq!(json["instruments"], serde_json::json!(["Piano"]));
        assert_eq!(json["category"], "band");
        assert!(json["skill_level"].is_null());
    }

    #[test]
    fn test_with_instruments_dedups() {
        let criteria = FilterCriteria::new().with_instruments(["Piano", "Piano", "Bass"]);
        assert_eq!(criteria.instruments(), ["Piano", "Bass"]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut criteria = FilterCriteria::new()
            .with_query("jazz")
            .with_location("Lagos")
            .with_instruments(["Guitar"])
            .with_skill_level(SkillLevel::Advanced)
            .with_category(Category::Ensemble);
        assert!(!criteria.is_empty());

        criteria.clear();
        assert!(criteria.is_empty());
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn test_query_matches_name_instrument_or_bio() {
        let mut rec = musician("1", "Ada", &["Piano"], "Lagos");
        rec.bio = "Loves HIGHLIFE".to_string();

        assert!(FilterCriteria::new().with_query("ADA").matches(&rec));
        assert!(FilterCriteria::new().with_query("pia").matches(&rec));
        assert!(FilterCriteria::new().with_query("highlife").matches(&rec));
        assert!(!FilterCriteria::new().with_query("drum").matches(&rec));
    }

    #[test]
    fn test_location_is_substring_case_insensitive() {
        let rec = musician("1", "Ada", &["Piano"], "Port Harcourt, Nigeria");
        assert!(FilterCriteria::new().with_location("harcourt").matches(&rec));
        assert!(!FilterCriteria::new().with_location("Lagos").matches(&rec));
    }

    #[test]
    fn test_instrument_membership_is_exact() {
        let rec = musician("1", "Ada", &["Piano"], "Lagos");
        assert!(!FilterCriteria::new().with_instruments(["piano"]).matches(&rec));
        assert!(!FilterCriteria::new().with_instruments(["Pia"]).matches(&rec));
        assert!(FilterCriteria::new().with_instruments(["Drums", "Piano"]).matches(&rec));
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let mut rec = musician("1", "Ada", &["Piano"], "Lagos");
        rec.skill_level = SkillLevel::Professional;

        let both = FilterCriteria::new()
            .with_location("lagos")
            .with_skill_level(SkillLevel::Professional);
        assert!(both.matches(&rec));

        let wrong_level = both.clone().with_skill_level(SkillLevel::Beginner);
        assert!(!wrong_level.matches(&rec));

        let wrong_category = both.with_category(Category::Ensemble);
        assert!(!wrong_category.matches(&rec));
    }

    #[test]
    fn test_apply_filters_preserves_order() {
        let records = vec![
            musician("1", "C", &["Guitar"], "Lagos"),
            musician("2", "A", &["Piano"], "Abuja"),
            musician("3", "B", &["Guitar"], "Lagos"),
        ];
        let result = apply_filters(&records, &FilterCriteria::new().with_instruments(["Guitar"]));
        let ids: Vec<_> = result.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }
}
