//! Browse session: one search surface's criteria, rendered list and view state
//!
//! The session borrows the catalog for its whole life. Criteria edits re-run
//! the filter immediately so the rendered list is always the list the user
//! is looking at; selection is only valid against that list.

use crate::catalog::{Catalog, MusicianRecord};
use crate::events::BrowseEvent;
use crate::filter::{apply_filters, FilterCriteria};
use crate::sections::BrowseSections;
use crate::view_state::ViewState;
use crate::{Error, Result};
use tracing::debug;

pub struct BrowseSession<'a> {
    catalog: &'a Catalog,
    criteria: FilterCriteria,
    rendered: Vec<&'a MusicianRecord>,
    view: ViewState<'a>,
}

impl<'a> BrowseSession<'a> {
    /// Start browsing with empty criteria (the whole catalog is rendered)
    pub fn new(catalog: &'a Catalog) -> Self {
        let criteria = FilterCriteria::new();
        let rendered = apply_filters(catalog, &criteria);
        Self {
            catalog,
            criteria,
            rendered,
            view: ViewState::new(),
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Most recently rendered filtered list
    pub fn rendered(&self) -> &[&'a MusicianRecord] {
        &self.rendered
    }

    pub fn view(&self) -> ViewState<'a> {
        self.view
    }

    /// Derived sections over the rendered list
    pub fn sections(&self, limit: usize) -> BrowseSections<'a> {
        BrowseSections::build(&self.rendered, limit)
    }

    /// Edit the criteria and re-render
    pub fn update_criteria<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut FilterCriteria),
    {
        edit(&mut self.criteria);
        self.rendered = apply_filters(self.catalog, &self.criteria);
    }

    /// Show the detail view for a record from the rendered list
    ///
    /// Passing a record that is not in the rendered list is a caller bug.
    pub fn select_record(&mut self, record: &'a MusicianRecord) {
        debug_assert!(
            self.rendered.iter().any(|r| std::ptr::eq(*r, record)),
            "selected record {} is not in the rendered list",
            record.id
        );
        self.view.select_record(record);
    }

    /// Resolve `id` against the rendered list and select it
    pub fn select_by_id(&mut self, id: &str) -> Result<&'a MusicianRecord> {
        let record = self
            .rendered
            .iter()
            .copied()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("musician {} is not in the current list", id)))?;
        self.select_record(record);
        Ok(record)
    }

    pub fn go_back(&mut self) {
        self.view.go_back();
    }

    /// Apply one user interaction
    pub fn dispatch(&mut self, event: BrowseEvent) -> Result<()> {
        debug!(event = event.name(), "Dispatching browse event");
        match event {
            BrowseEvent::SetQuery { query } => self.update_criteria(|c| c.set_query(query)),
            BrowseEvent::SetLocation { location } => {
                self.update_criteria(|c| c.set_location(location))
            }
            BrowseEvent::ToggleInstrument { instrument } => self.update_criteria(|c| {
                c.toggle_instrument(&instrument);
            }),
            BrowseEvent::SetSkillLevel { skill_level } => {
                self.update_criteria(|c| c.set_skill_level(skill_level))
            }
            BrowseEvent::SetCategory { category } => {
                self.update_criteria(|c| c.set_category(category))
            }
            BrowseEvent::ClearFilters => self.update_criteria(FilterCriteria::clear),
            BrowseEvent::SelectRecord { id } => {
                self.select_by_id(&id)?;
            }
            BrowseEvent::GoBack => self.go_back(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::ViewMode;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_new_session_renders_everything() {
        let catalog = catalog();
        let session = BrowseSession::new(&catalog);
        assert_eq!(session.rendered().len(), catalog.len());
        assert_eq!(session.view().mode(), ViewMode::Browsing);
    }

    #[test]
    fn test_criteria_events_rerender() {
        let catalog = catalog();
        let mut session = BrowseSession::new(&catalog);

        session
            .dispatch(BrowseEvent::ToggleInstrument { instrument: "Violin".into() })
            .unwrap();
        assert!(!session.rendered().is_empty());
        assert!(session
            .rendered()
            .iter()
            .all(|r| r.instruments.iter().any(|i| i == "Violin")));

        session.dispatch(BrowseEvent::ClearFilters).unwrap();
        assert_eq!(session.rendered().len(), catalog.len());
        assert!(session.criteria().is_empty());
    }

    #[test]
    fn test_select_by_id_requires_rendered_record() {
        let catalog = catalog();
        let mut session = BrowseSession::new(&catalog);
        session
            .dispatch(BrowseEvent::SetLocation { location: "Kano".into() })
            .unwrap();

        let outside = catalog.iter().find(|r| !r.location.contains("Kano")).unwrap();
        let err = session.select_by_id(&outside.id).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(session.view().mode(), ViewMode::Browsing);
    }

    #[test]
    fn test_select_and_back_through_events() {
        let catalog = catalog();
        let mut session = BrowseSession::new(&catalog);
        let first = session.rendered()[0].id.clone();

        session
            .dispatch(BrowseEvent::SelectRecord { id: first.clone() })
            .unwrap();
        assert_eq!(session.view().selected().map(|r| r.id.clone()), Some(first));

        session.dispatch(BrowseEvent::GoBack).unwrap();
        assert_eq!(session.view(), ViewState::Browsing);
    }

    #[test]
    fn test_criteria_change_keeps_detail_view() {
        let catalog = catalog();
        let mut session = BrowseSession::new(&catalog);
        let first = session.rendered()[0].id.clone();
        session.select_by_id(&first).unwrap();

        session
            .dispatch(BrowseEvent::SetQuery { query: "zzzz-no-match".into() })
            .unwrap();
        assert!(session.rendered().is_empty());
        assert_eq!(session.view().mode(), ViewMode::ViewingDetail);
    }
}
