//! Filter cascade: the year → city → source → tag selection path.
//!
//! A [`Selection`] is plain data. It only changes through [`reduce`], which
//! takes the current selection and one [`SelectionEvent`] and returns the next
//! selection. Choosing a level always unsets every deeper level, so a stale
//! id from one branch can never show up as selected in another.
//!
//! Ids are checked against the tree: an id that is not offered at its level
//! (or a pick at a level whose parent is unset) clears that level instead of
//! being stored.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::campaign::{AdTag, Campaign, City, Level, Node, Source, Year, find};

// ─── Selection ───────────────────────────────────────────────────────────────

/// The current path through the hierarchy. Each level is unset or the id of
/// an entity offered by the level above.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
  pub year:   Option<String>,
  pub city:   Option<String>,
  pub source: Option<String>,
  pub tag:    Option<String>,
}

/// A user pick, one per level, or a reset of a level and everything below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
  SelectYear(String),
  SelectCity(String),
  SelectSource(String),
  SelectTag(String),
  Clear(Level),
}

impl SelectionEvent {
  /// Build the pick event for `level`.
  pub fn select(level: Level, id: impl Into<String>) -> Self {
    let id = id.into();
    match level {
      Level::Year => Self::SelectYear(id),
      Level::City => Self::SelectCity(id),
      Level::Source => Self::SelectSource(id),
      Level::Tag => Self::SelectTag(id),
    }
  }
}

impl Selection {
  /// First year selected, nothing else.
  pub fn initial(campaign: &Campaign) -> Self {
    Self {
      year: campaign.years.first().map(|year| year.id.clone()),
      ..Self::default()
    }
  }

  pub fn get(&self, level: Level) -> Option<&str> {
    self.slot(level).as_deref()
  }

  fn slot(&self, level: Level) -> &Option<String> {
    match level {
      Level::Year => &self.year,
      Level::City => &self.city,
      Level::Source => &self.source,
      Level::Tag => &self.tag,
    }
  }

  fn slot_mut(&mut self, level: Level) -> &mut Option<String> {
    match level {
      Level::Year => &mut self.year,
      Level::City => &mut self.city,
      Level::Source => &mut self.source,
      Level::Tag => &mut self.tag,
    }
  }

  /// Unset `level` and every level below it.
  fn clear_from(&mut self, level: Level) {
    for l in Level::iter().filter(|l| *l >= level) {
      *self.slot_mut(l) = None;
    }
  }

  /// Shorthand for [`reduce`].
  pub fn apply(&self, campaign: &Campaign, event: SelectionEvent) -> Self {
    reduce(campaign, self, event)
  }

  /// Drop any level that no longer resolves against `campaign`, together
  /// with everything below it. Use after the backing tree was replaced.
  pub fn reconcile(&self, campaign: &Campaign) -> Self {
    let mut next = self.clone();
    for level in Level::iter() {
      let Some(id) = next.get(level) else { continue };
      if !view(campaign, &next).offers(level, id) {
        tracing::debug!(%level, id, "dropping stale selection");
        next.clear_from(level);
        break;
      }
    }
    next
  }
}

// ─── Reducer ─────────────────────────────────────────────────────────────────

/// Apply one event to `selection`, returning the next selection.
pub fn reduce(
  campaign: &Campaign,
  selection: &Selection,
  event: SelectionEvent,
) -> Selection {
  let mut next = selection.clone();
  let (level, id) = match event {
    SelectionEvent::Clear(level) => {
      next.clear_from(level);
      return next;
    }
    SelectionEvent::SelectYear(id) => (Level::Year, id),
    SelectionEvent::SelectCity(id) => (Level::City, id),
    SelectionEvent::SelectSource(id) => (Level::Source, id),
    SelectionEvent::SelectTag(id) => (Level::Tag, id),
  };

  next.clear_from(level);
  if view(campaign, &next).offers(level, &id) {
    *next.slot_mut(level) = Some(id);
  } else {
    tracing::debug!(%level, %id, campaign = %campaign.id, "ignoring unavailable selection");
  }
  next
}

// ─── Derived view ────────────────────────────────────────────────────────────

/// What each level offers under a selection, resolved through the tree.
#[derive(Debug, Clone, Copy)]
pub struct CascadeView<'a> {
  pub years:   &'a [Year],
  pub cities:  &'a [City],
  pub sources: &'a [Source],
  pub tags:    &'a [AdTag],

  pub year:   Option<&'a Year>,
  pub city:   Option<&'a City>,
  pub source: Option<&'a Source>,
  pub tag:    Option<&'a AdTag>,
}

/// Resolve `selection` against `campaign`.
///
/// A level whose id does not resolve offers nothing below it.
pub fn view<'a>(campaign: &'a Campaign, selection: &Selection) -> CascadeView<'a> {
  let year = selection.year.as_deref().and_then(|id| find(&campaign.years, id));
  let cities = year.map(|y| y.cities.as_slice()).unwrap_or_default();

  let city = selection.city.as_deref().and_then(|id| find(cities, id));
  let sources = city.map(|c| c.sources.as_slice()).unwrap_or_default();

  let source = selection.source.as_deref().and_then(|id| find(sources, id));
  let tags = source.map(|s| s.ad_tags.as_slice()).unwrap_or_default();

  let tag = selection.tag.as_deref().and_then(|id| find(tags, id));

  CascadeView {
    years: &campaign.years,
    cities,
    sources,
    tags,
    year,
    city,
    source,
    tag,
  }
}

impl CascadeView<'_> {
  /// Whether `id` is offered at `level`.
  pub fn offers(&self, level: Level, id: &str) -> bool {
    self.ids(level).contains(&id)
  }

  /// Ids offered at `level`, in tree order.
  pub fn ids(&self, level: Level) -> Vec<&str> {
    fn ids_of<T: Node>(items: &[T]) -> Vec<&str> {
      items.iter().map(Node::id).collect()
    }
    match level {
      Level::Year => ids_of(self.years),
      Level::City => ids_of(self.cities),
      Level::Source => ids_of(self.sources),
      Level::Tag => ids_of(self.tags),
    }
  }
}
