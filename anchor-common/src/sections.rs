//! Derived browse sections built on top of the filtered list
//!
//! Each section is a pure transformation of the filter output. Nothing here
//! is stored state and nothing reorders the caller's list.

use crate::catalog::MusicianRecord;
use serde::Serialize;

/// Number of cards shown per section unless configured otherwise
pub const DEFAULT_SECTION_LIMIT: usize = 6;

/// The four sections of the search page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SectionKind {
    Featured,
    TopRated,
    NewMembers,
    /// Positional prefix of the filtered list; no geography involved
    NearYou,
}

impl SectionKind {
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Featured => "Featured Musicians",
            SectionKind::TopRated => "Top Rated",
            SectionKind::NewMembers => "New Members",
            SectionKind::NearYou => "Near You",
        }
    }

    /// Sections in page order
    pub fn all_variants() -> &'static [SectionKind] {
        &[
            SectionKind::Featured,
            SectionKind::TopRated,
            SectionKind::NewMembers,
            SectionKind::NearYou,
        ]
    }
}

/// Records flagged as featured, in filtered order
pub fn featured<'a>(filtered: &[&'a MusicianRecord]) -> Vec<&'a MusicianRecord> {
    filtered.iter().copied().filter(|r| r.featured).collect()
}

/// Records sorted by rating, highest first
///
/// The sort is stable, so equal ratings keep their filtered order.
pub fn top_rated<'a>(filtered: &[&'a MusicianRecord]) -> Vec<&'a MusicianRecord> {
    let mut sorted = filtered.to_vec();
    sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    sorted
}

/// Records flagged as new members, in filtered order
pub fn new_members<'a>(filtered: &[&'a MusicianRecord]) -> Vec<&'a MusicianRecord> {
    filtered.iter().copied().filter(|r| r.is_new).collect()
}

/// First `limit` records of the filtered list
pub fn nearby<'a>(filtered: &[&'a MusicianRecord], limit: usize) -> Vec<&'a MusicianRecord> {
    filtered.iter().copied().take(limit).collect()
}

/// All four sections, each truncated to the section limit
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseSections<'a> {
    pub featured: Vec<&'a MusicianRecord>,
    pub top_rated: Vec<&'a MusicianRecord>,
    pub new_members: Vec<&'a MusicianRecord>,
    pub near_you: Vec<&'a MusicianRecord>,
}

impl<'a> BrowseSections<'a> {
    pub fn build(filtered: &[&'a MusicianRecord], limit: usize) -> Self {
        let truncate = |mut v: Vec<&'a MusicianRecord>| {
            v.truncate(limit);
            v
        };
        Self {
            featured: truncate(featured(filtered)),
            top_rated: truncate(top_rated(filtered)),
            new_members: truncate(new_members(filtered)),
            near_you: nearby(filtered, limit),
        }
    }

    pub fn section(&self, kind: SectionKind) -> &[&'a MusicianRecord] {
        match kind {
            SectionKind::Featured => &self.featured,
            SectionKind::TopRated => &self.top_rated,
            SectionKind::NewMembers => &self.new_members,
            SectionKind::NearYou => &self.near_you,
        }
    }

    /// Sections in page order, paired with their kind
    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, &[&'a MusicianRecord])> + '_ {
        SectionKind::all_variants()
            .iter()
            .map(move |kind| (*kind, self.section(*kind)))
    }
}

/// Number of filtered records carrying an instrument tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentCount {
    pub instrument: String,
    pub count: usize,
}

/// Count records per instrument tag, in first-seen order
pub fn instrument_counts(filtered: &[&MusicianRecord]) -> Vec<InstrumentCount> {
    let mut counts: Vec<InstrumentCount> = Vec::new();
    for record in filtered {
        for tag in &record.instruments {
            match counts.iter_mut().find(|c| &c.instrument == tag) {
                Some(entry) => entry.count += 1,
                None => counts.push(InstrumentCount {
                    instrument: tag.clone(),
                    count: 1,
                }),
            }
        }
    }
    counts
}
