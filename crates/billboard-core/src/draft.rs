//! Campaign drafts: the state behind the "new campaign" form.
//!
//! A [`CampaignDraft`] is edited field by field and only turns into a
//! [`Campaign`] through [`CampaignDraft::build`], which validates the whole
//! draft first. A draft that fails validation never produces a partial
//! campaign.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::campaign::{
  AdTag, Campaign, CampaignStats, CampaignStatus, City, Source, Year,
};

/// Cities offered by the form.
pub const AVAILABLE_CITIES: &[&str] = &[
  "Los Angeles",
  "New York",
  "Miami",
  "Chicago",
  "Houston",
  "Phoenix",
  "Philadelphia",
  "San Antonio",
  "San Diego",
  "Dallas",
];

/// Platforms offered by the form.
pub const AVAILABLE_PLATFORMS: &[&str] = &[
  "Facebook",
  "Instagram",
  "TikTok",
  "YouTube",
  "Google",
  "Twitter",
  "Pinterest",
  "LinkedIn",
  "Snapchat",
];

/// Name and objective of the ad tag every new source starts with.
pub const DEFAULT_TAG_NAME: &str = "Ad - Tag";
pub const DEFAULT_TAG_KIND: &str = "conversion";

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Why a draft cannot be submitted. Checked in declaration order; only the
/// first failure is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
  #[error("campaign name is required")]
  NameRequired,

  #[error("a start and end date are required unless the campaign never ends")]
  DateRangeRequired,

  #[error("the end date {ends_on} is before the start date {starts_on}")]
  DateRangeInverted {
    starts_on: NaiveDate,
    ends_on:   NaiveDate,
  },

  #[error("location {position} has no city selected")]
  LocationWithoutCity { position: usize },

  #[error("location {position} ({city}) has no platform selected")]
  LocationWithoutPlatform { position: usize, city: String },
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// One row of the locations list: a city and the platforms to run there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDraft {
  pub id:        Uuid,
  pub city:      String,
  pub platforms: Vec<String>,
}

impl LocationDraft {
  fn empty() -> Self {
    Self { id: Uuid::new_v4(), city: String::new(), platforms: Vec::new() }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDraft {
  pub name:        String,
  pub description: String,
  /// Legal disclaimer printed under the ads.
  pub legal_line:  String,
  pub starts_on:   Option<NaiveDate>,
  pub ends_on:     Option<NaiveDate>,
  pub never_ends:  bool,
  pub locations:   Vec<LocationDraft>,
}

impl Default for CampaignDraft {
  fn default() -> Self { Self::new() }
}

impl CampaignDraft {
  /// An empty draft with a single empty location.
  pub fn new() -> Self {
    Self {
      name:        String::new(),
      description: String::new(),
      legal_line:  String::new(),
      starts_on:   None,
      ends_on:     None,
      never_ends:  false,
      locations:   vec![LocationDraft::empty()],
    }
  }

  // ── Locations ───────────────────────────────────────────────────────────

  /// Append an empty location and return its id.
  pub fn add_location(&mut self) -> Uuid {
    let location = LocationDraft::empty();
    let id = location.id;
    self.locations.push(location);
    id
  }

  /// Remove a location. The last remaining location is never removed.
  pub fn remove_location(&mut self, id: Uuid) {
    if self.locations.len() == 1 {
      return;
    }
    self.locations.retain(|loc| loc.id != id);
  }

  pub fn set_city(&mut self, id: Uuid, city: impl Into<String>) {
    if let Some(loc) = self.location_mut(id) {
      loc.city = city.into();
    }
  }

  /// Add `platform` to a location, or remove it if already present.
  pub fn toggle_platform(&mut self, id: Uuid, platform: &str) {
    let Some(loc) = self.location_mut(id) else { return };
    if let Some(pos) = loc.platforms.iter().position(|p| p == platform) {
      loc.platforms.remove(pos);
    } else {
      loc.platforms.push(platform.to_string());
    }
  }

  fn location_mut(&mut self, id: Uuid) -> Option<&mut LocationDraft> {
    self.locations.iter_mut().find(|loc| loc.id == id)
  }

  // ── Submission ──────────────────────────────────────────────────────────

  /// Check the draft, reporting the first problem found.
  pub fn validate(&self) -> Result<(), DraftError> {
    if self.name.trim().is_empty() {
      return Err(DraftError::NameRequired);
    }

    if !self.never_ends && (self.starts_on.is_none() || self.ends_on.is_none()) {
      return Err(DraftError::DateRangeRequired);
    }

    // A campaign that never ends keeps no end date, so a stale one is moot.
    if !self.never_ends
      && let (Some(starts_on), Some(ends_on)) = (self.starts_on, self.ends_on)
      && ends_on < starts_on
    {
      return Err(DraftError::DateRangeInverted { starts_on, ends_on });
    }

    for (index, loc) in self.locations.iter().enumerate() {
      if loc.city.trim().is_empty() {
        return Err(DraftError::LocationWithoutCity { position: index + 1 });
      }
    }

    for (index, loc) in self.locations.iter().enumerate() {
      if loc.platforms.is_empty() {
        return Err(DraftError::LocationWithoutPlatform {
          position: index + 1,
          city:     loc.city.clone(),
        });
      }
    }

    Ok(())
  }

  /// Validate the draft and assemble a scheduled campaign from it.
  ///
  /// Everything lands in a single year: the calendar year of `now`.
  pub fn build(
    &self,
    now: DateTime<Utc>,
    created_by: &str,
  ) -> Result<Campaign, DraftError> {
    self.validate()?;

    let year = now.year();
    let cities = self
      .locations
      .iter()
      .map(|loc| City {
        id:      format!("city-{}", Uuid::new_v4()),
        name:    loc.city.trim().to_string(),
        sources: loc.platforms.iter().map(|p| default_source(p)).collect(),
      })
      .collect();

    let campaign = Campaign {
      id:           format!("campaign-{}", Uuid::new_v4()),
      name:         self.name.trim().to_string(),
      description:  non_blank(&self.description),
      status:       CampaignStatus::Scheduled,
      created:      now,
      years:        vec![Year { id: format!("year-{year}"), year, cities }],
      publish_date: self.starts_on.map(start_of_day),
      end_date:     if self.never_ends {
        None
      } else {
        self.ends_on.map(start_of_day)
      },
      legal_line:   non_blank(&self.legal_line),
      created_by:   Some(created_by.to_string()),
      stats:        Some(CampaignStats::default()),
    };

    tracing::info!(
      id = %campaign.id,
      name = %campaign.name,
      cities = campaign.years[0].cities.len(),
      "built campaign from draft"
    );
    Ok(campaign)
  }
}

/// A source for `platform` holding the single default ad tag.
fn default_source(platform: &str) -> Source {
  Source {
    id:       format!("source-{}", Uuid::new_v4()),
    name:     platform.to_string(),
    platform: platform.to_lowercase(),
    ad_tags:  vec![AdTag {
      id:   format!("tag-{}", Uuid::new_v4()),
      name: DEFAULT_TAG_NAME.to_string(),
      kind: DEFAULT_TAG_KIND.to_string(),
    }],
  }
}

fn non_blank(value: &str) -> Option<String> {
  let trimmed = value.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
  date.and_time(chrono::NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap() }

  fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

  /// A draft that passes validation.
  fn valid() -> CampaignDraft {
    let mut draft = CampaignDraft::new();
    draft.name = "Promo".into();
    draft.starts_on = Some(date(2025, 4, 1));
    draft.ends_on = Some(date(2025, 4, 30));
    let id = draft.locations[0].id;
    draft.set_city(id, "Miami");
    draft.toggle_platform(id, "Facebook");
    draft
  }

  #[test]
  fn new_draft_has_one_empty_location() {
    let draft = CampaignDraft::new();
    assert_eq!(draft.locations.len(), 1);
    assert!(draft.locations[0].city.is_empty());
    assert!(draft.locations[0].platforms.is_empty());
  }

  #[test]
  fn last_location_cannot_be_removed() {
    let mut draft = CampaignDraft::new();
    let only = draft.locations[0].id;
    draft.remove_location(only);
    assert_eq!(draft.locations.len(), 1);

    let second = draft.add_location();
    draft.remove_location(only);
    assert_eq!(draft.locations.len(), 1);
    assert_eq!(draft.locations[0].id, second);
  }

  #[test]
  fn toggle_platform_adds_then_removes() {
    let mut draft = CampaignDraft::new();
    let id = draft.locations[0].id;
    draft.toggle_platform(id, "TikTok");
    draft.toggle_platform(id, "Google");
    assert_eq!(draft.locations[0].platforms, ["TikTok", "Google"]);

    draft.toggle_platform(id, "TikTok");
    assert_eq!(draft.locations[0].platforms, ["Google"]);
  }

  #[test]
  fn edits_to_unknown_location_are_ignored() {
    let mut draft = CampaignDraft::new();
    let before = draft.clone();
    draft.set_city(Uuid::new_v4(), "Dallas");
    draft.toggle_platform(Uuid::new_v4(), "Google");
    assert_eq!(draft, before);
  }

  #[test]
  fn blank_name_is_rejected_first() {
    let mut draft = valid();
    draft.name = "   ".into();
    draft.starts_on = None;
    assert_eq!(draft.validate(), Err(DraftError::NameRequired));
  }

  #[test]
  fn missing_date_is_rejected_unless_never_ends() {
    let mut draft = valid();
    draft.ends_on = None;
    assert_eq!(draft.validate(), Err(DraftError::DateRangeRequired));

    draft.never_ends = true;
    assert_eq!(draft.validate(), Ok(()));
  }

  #[test]
  fn inverted_range_is_rejected() {
    let mut draft = valid();
    draft.ends_on = Some(date(2025, 3, 1));
    assert!(matches!(
      draft.validate(),
      Err(DraftError::DateRangeInverted { .. })
    ));
  }

  #[test]
  fn never_ending_campaign_ignores_stale_end_date() {
    let mut draft = valid();
    draft.ends_on = Some(date(2025, 3, 1));
    draft.never_ends = true;
    assert_eq!(draft.validate(), Ok(()));

    let campaign = draft.build(now(), "Current user").unwrap();
    assert_eq!(campaign.end_date, None);
  }

  #[test]
  fn location_checks_report_position() {
    let mut draft = valid();
    let second = draft.add_location();
    assert_eq!(
      draft.validate(),
      Err(DraftError::LocationWithoutCity { position: 2 })
    );

    draft.set_city(second, "Dallas");
    assert_eq!(
      draft.validate(),
      Err(DraftError::LocationWithoutPlatform {
        position: 2,
        city:     "Dallas".into(),
      })
    );
  }

  #[test]
  fn build_assembles_a_scheduled_campaign() {
    let mut draft = valid();
    draft.description = "  Spring push ".into();
    let id = draft.locations[0].id;
    draft.toggle_platform(id, "YouTube");

    let campaign = draft.build(now(), "Current user").unwrap();
    assert_eq!(campaign.name, "Promo");
    assert_eq!(campaign.status, CampaignStatus::Scheduled);
    assert_eq!(campaign.description.as_deref(), Some("Spring push"));
    assert_eq!(campaign.legal_line, None);
    assert_eq!(campaign.created, now());
    assert_eq!(campaign.created_by.as_deref(), Some("Current user"));
    assert_eq!(campaign.stats, Some(CampaignStats::default()));
    assert_eq!(
      campaign.publish_date,
      Some(Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(
      campaign.end_date,
      Some(Utc.with_ymd_and_hms(2025, 4, 30, 0, 0, 0).unwrap())
    );

    let sources = &campaign.years[0].cities[0].sources;
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[1].name, "YouTube");
    assert_eq!(sources[1].platform, "youtube");
    assert_ne!(sources[0].ad_tags[0].id, sources[1].ad_tags[0].id);
  }

  #[test]
  fn never_ending_campaign_has_no_end_date() {
    let mut draft = valid();
    draft.never_ends = true;
    let campaign = draft.build(now(), "Current user").unwrap();
    assert_eq!(campaign.end_date, None);
    assert!(campaign.publish_date.is_some());
  }
}
