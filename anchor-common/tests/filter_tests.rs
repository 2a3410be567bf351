//! Integration tests for the catalog filter, browse sections and view state
//!
//! Covers:
//! - Subset, identity, partition and idempotence properties of `apply_filters`
//! - The two-record Ada/Bo scenarios
//! - Select/back transitions through a browse session

use anchor_common::catalog::{Catalog, Category, MusicianRecord, SkillLevel};
use anchor_common::filter::{apply_filters, FilterCriteria};
use anchor_common::sections::{top_rated, BrowseSections};
use anchor_common::session::BrowseSession;
use anchor_common::view_state::{ViewMode, ViewState};
use std::collections::HashSet;

/// Test helper: the two-record catalog used by the concrete scenarios
fn ada_and_bo() -> Catalog {
    Catalog::new(vec![
        MusicianRecord {
            id: "ada".to_string(),
            name: "Ada".to_string(),
            instruments: vec!["Piano".to_string()],
            location: "Lagos".to_string(),
            rating: 4.9,
            ..Default::default()
        },
        MusicianRecord {
            id: "bo".to_string(),
            name: "Bo".to_string(),
            instruments: vec!["Guitar".to_string()],
            location: "Abuja".to_string(),
            rating: 4.2,
            ..Default::default()
        },
    ])
    .expect("scenario catalog is valid")
}

fn names(records: &[&MusicianRecord]) -> Vec<String> {
    records.iter().map(|r| r.name.clone()).collect()
}

/// A spread of criteria exercising every field, alone and combined
fn criteria_samples() -> Vec<FilterCriteria> {
    vec![
        FilterCriteria::new(),
        FilterCriteria::new().with_query("a"),
        FilterCriteria::new().with_query("JAZZ"),
        FilterCriteria::new().with_location("lagos"),
        FilterCriteria::new().with_instruments(["Piano"]),
        FilterCriteria::new().with_instruments(["Violin", "Drums"]),
        FilterCriteria::new().with_skill_level(SkillLevel::Professional),
        FilterCriteria::new().with_category(Category::Ensemble),
        FilterCriteria::new()
            .with_query("o")
            .with_location("Nigeria")
            .with_instruments(["Guitar", "Vocals", "Keyboard"])
            .with_skill_level(SkillLevel::Advanced),
        FilterCriteria::new().with_query("no such musician anywhere"),
    ]
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_result_is_subset_without_duplicates() {
    let catalog = Catalog::builtin().unwrap();
    let all_ids: HashSet<&str> = catalog.iter().map(|r| r.id.as_str()).collect();

    for criteria in criteria_samples() {
        let result = apply_filters(&catalog, &criteria);
        let ids: HashSet<&str> = result.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), result.len(), "duplicates for {:?}", criteria);
        assert!(ids.is_subset(&all_ids), "foreign records for {:?}", criteria);
    }
}

#[test]
fn test_empty_criteria_is_identity() {
    let catalog = Catalog::builtin().unwrap();
    let result = apply_filters(&catalog, &FilterCriteria::new());

    assert_eq!(result.len(), catalog.len());
    for (got, expected) in result.iter().zip(catalog.iter()) {
        assert!(std::ptr::eq(*got, expected));
    }
}

#[test]
fn test_instrument_filter_partitions_catalog() {
    let catalog = Catalog::builtin().unwrap();
    let required = ["Violin", "Saxophone"];
    let criteria = FilterCriteria::new().with_instruments(required);
    let result = apply_filters(&catalog, &criteria);

    let plays_any = |r: &MusicianRecord| r.instruments.iter().any(|t| required.contains(&t.as_str()));
    assert!(result.iter().all(|r| plays_any(*r)));

    let kept: HashSet<&str> = result.iter().map(|r| r.id.as_str()).collect();
    for excluded in catalog.iter().filter(|r| !kept.contains(r.id.as_str())) {
        assert!(!plays_any(excluded), "{} should have matched", excluded.id);
    }
}

#[test]
fn test_filter_is_idempotent() {
    let catalog = Catalog::builtin().unwrap();
    for criteria in criteria_samples() {
        let once = apply_filters(&catalog, &criteria);
        let twice = apply_filters(once.iter().copied(), &criteria);
        assert_eq!(once, twice, "not idempotent for {:?}", criteria);
    }
}

#[test]
fn test_filter_preserves_catalog_order() {
    let catalog = Catalog::builtin().unwrap();
    let position = |id: &str| catalog.iter().position(|r| r.id == id).unwrap();

    for criteria in criteria_samples() {
        let result = apply_filters(&catalog, &criteria);
        let positions: Vec<usize> = result.iter().map(|r| position(&r.id)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

// =============================================================================
// Concrete scenarios
// =============================================================================

#[test]
fn test_piano_filter_returns_ada() {
    let catalog = ada_and_bo();
    let result = apply_filters(&catalog, &FilterCriteria::new().with_instruments(["Piano"]));
    assert_eq!(names(&result), ["Ada"]);
}

#[test]
fn test_query_gui_returns_bo() {
    let catalog = ada_and_bo();
    let result = apply_filters(&catalog, &FilterCriteria::new().with_query("gui"));
    assert_eq!(names(&result), ["Bo"]);
}

#[test]
fn test_top_rated_orders_ada_before_bo() {
    let catalog = ada_and_bo();
    let filtered = apply_filters(&catalog, &FilterCriteria::new());
    assert_eq!(names(&top_rated(&filtered)), ["Ada", "Bo"]);

    let sections = BrowseSections::build(&filtered, 6);
    assert_eq!(names(&sections.top_rated), ["Ada", "Bo"]);
    assert_eq!(names(&sections.near_you), ["Ada", "Bo"]);
    assert!(sections.featured.is_empty());
}

#[test]
fn test_reselection_replaces_selected_record() {
    let catalog = ada_and_bo();
    let mut session = BrowseSession::new(&catalog);

    session.select_by_id("bo").unwrap();
    assert_eq!(session.view().mode(), ViewMode::ViewingDetail);
    assert_eq!(session.view().selected().map(|r| r.name.as_str()), Some("Bo"));

    session.select_by_id("ada").unwrap();
    assert_eq!(session.view().selected().map(|r| r.name.as_str()), Some("Ada"));
}

#[test]
fn test_select_then_back_always_browsing() {
    let catalog = Catalog::builtin().unwrap();
    let ids: Vec<String> = catalog.iter().map(|r| r.id.clone()).collect();

    for id in ids {
        let mut session = BrowseSession::new(&catalog);
        session.select_by_id(&id).unwrap();
        session.go_back();
        assert_eq!(session.view(), ViewState::Browsing);
        assert!(session.view().selected().is_none());
    }
}
