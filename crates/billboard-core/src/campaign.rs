//! Campaign entities: the year → city → source → ad-tag tree.
//!
//! Entities are immutable once built. An edit never touches a campaign in
//! place: the `with_*` helpers return a new [`Campaign`] in which only the
//! path down to the replaced entity is rebuilt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::{Error, Result};

// ─── Levels ──────────────────────────────────────────────────────────────────

/// One level of the containment hierarchy, broadest first.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Level {
  Year,
  City,
  Source,
  Tag,
}

impl Level {
  /// The level directly below this one, if any.
  pub fn child(self) -> Option<Level> {
    match self {
      Level::Year => Some(Level::City),
      Level::City => Some(Level::Source),
      Level::Source => Some(Level::Tag),
      Level::Tag => None,
    }
  }
}

/// Anything addressable by a string id within its parent collection.
pub trait Node {
  fn id(&self) -> &str;
}

/// Find the entity with `id` in `items`.
pub fn find<'a, T: Node>(items: &'a [T], id: &str) -> Option<&'a T> {
  items.iter().find(|item| item.id() == id)
}

/// Copy `items`, swapping in `replacement` for the entry with the same id.
fn replaced<T: Node + Clone>(
  items: &[T],
  replacement: T,
  level: Level,
) -> Result<Vec<T>> {
  let index = items
    .iter()
    .position(|item| item.id() == replacement.id())
    .ok_or_else(|| Error::not_found(level, replacement.id()))?;
  let mut out = items.to_vec();
  out[index] = replacement;
  Ok(out)
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Lifecycle status of a campaign.
///
/// The set is closed; a value outside it is kept verbatim in `Other` so it can
/// still be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CampaignStatus {
  Active,
  Inactive,
  Scheduled,
  Completed,
  Other(String),
}

impl CampaignStatus {
  /// The known statuses, in display order.
  pub const KNOWN: [CampaignStatus; 4] = [
    CampaignStatus::Active,
    CampaignStatus::Inactive,
    CampaignStatus::Scheduled,
    CampaignStatus::Completed,
  ];

  /// Wire form of the status.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Active => "active",
      Self::Inactive => "inactive",
      Self::Scheduled => "scheduled",
      Self::Completed => "completed",
      Self::Other(raw) => raw,
    }
  }
}

impl From<String> for CampaignStatus {
  fn from(raw: String) -> Self {
    match raw.as_str() {
      "active" => Self::Active,
      "inactive" => Self::Inactive,
      "scheduled" => Self::Scheduled,
      "completed" => Self::Completed,
      _ => Self::Other(raw),
    }
  }
}

impl From<CampaignStatus> for String {
  fn from(status: CampaignStatus) -> Self {
    match status {
      CampaignStatus::Other(raw) => raw,
      known => known.as_str().to_string(),
    }
  }
}

// ─── Tree ────────────────────────────────────────────────────────────────────

/// An individual ad creative. Leaf of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdTag {
  pub id:   String,
  pub name: String,
  /// Objective of the ad, e.g. "conversion" or "awareness".
  #[serde(rename = "type")]
  pub kind: String,
}

/// An advertising channel within a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
  pub id:       String,
  pub name:     String,
  /// Channel family, e.g. "social", "search", "outdoor".
  pub platform: String,
  #[serde(default)]
  pub ad_tags:  Vec<AdTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
  pub id:      String,
  pub name:    String,
  #[serde(default)]
  pub sources: Vec<Source>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Year {
  pub id:     String,
  pub year:   i32,
  #[serde(default)]
  pub cities: Vec<City>,
}

/// Aggregate performance figures shown on a campaign card.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignStats {
  pub impressions:      u64,
  pub clicks:           u64,
  pub conversions:      u64,
  /// Click-through rate, in percent.
  pub ctr:              f64,
  /// Conversions per click, in percent.
  pub conversion_rate:  f64,
  pub spend:            f64,
  pub leads_registered: u64,
}

/// Root of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
  pub id:           String,
  pub name:         String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description:  Option<String>,
  pub status:       CampaignStatus,
  pub created:      DateTime<Utc>,
  #[serde(default)]
  pub years:        Vec<Year>,

  // Presentation-only extensions.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub publish_date: Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub end_date:     Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub legal_line:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_by:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub stats:        Option<CampaignStats>,
}

impl Node for AdTag {
  fn id(&self) -> &str { &self.id }
}

impl Node for Source {
  fn id(&self) -> &str { &self.id }
}

impl Node for City {
  fn id(&self) -> &str { &self.id }
}

impl Node for Year {
  fn id(&self) -> &str { &self.id }
}

// ─── Copy-on-write edits ─────────────────────────────────────────────────────

impl Campaign {
  pub fn year(&self, year_id: &str) -> Option<&Year> {
    find(&self.years, year_id)
  }

  /// Replace the year whose id matches `year.id`.
  pub fn with_year(&self, year: Year) -> Result<Campaign> {
    Ok(Campaign {
      years: replaced(&self.years, year, Level::Year)?,
      ..self.clone()
    })
  }

  /// Replace the city whose id matches `city.id` under `year_id`.
  pub fn with_city(&self, year_id: &str, city: City) -> Result<Campaign> {
    let year = self
      .year(year_id)
      .ok_or_else(|| Error::not_found(Level::Year, year_id))?;
    self.with_year(Year {
      cities: replaced(&year.cities, city, Level::City)?,
      ..year.clone()
    })
  }

  /// Replace the source whose id matches `source.id` under
  /// `year_id`/`city_id`.
  pub fn with_source(
    &self,
    year_id: &str,
    city_id: &str,
    source: Source,
  ) -> Result<Campaign> {
    let city = self
      .year(year_id)
      .ok_or_else(|| Error::not_found(Level::Year, year_id))?
      .city(city_id)
      .ok_or_else(|| Error::not_found(Level::City, city_id))?;
    self.with_city(year_id, City {
      sources: replaced(&city.sources, source, Level::Source)?,
      ..city.clone()
    })
  }

  /// Replace the ad tag whose id matches `tag.id` under
  /// `year_id`/`city_id`/`source_id`.
  pub fn with_tag(
    &self,
    year_id: &str,
    city_id: &str,
    source_id: &str,
    tag: AdTag,
  ) -> Result<Campaign> {
    let source = self
      .year(year_id)
      .ok_or_else(|| Error::not_found(Level::Year, year_id))?
      .city(city_id)
      .ok_or_else(|| Error::not_found(Level::City, city_id))?
      .source(source_id)
      .ok_or_else(|| Error::not_found(Level::Source, source_id))?;
    self.with_source(year_id, city_id, Source {
      ad_tags: replaced(&source.ad_tags, tag, Level::Tag)?,
      ..source.clone()
    })
  }
}

impl Year {
  pub fn city(&self, city_id: &str) -> Option<&City> {
    find(&self.cities, city_id)
  }
}

impl City {
  pub fn source(&self, source_id: &str) -> Option<&Source> {
    find(&self.sources, source_id)
  }
}

impl Source {
  pub fn tag(&self, tag_id: &str) -> Option<&AdTag> {
    find(&self.ad_tags, tag_id)
  }
}
