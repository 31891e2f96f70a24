//! Flat cross-cuts of a campaign tree.
//!
//! All results follow tree traversal order (year, then city, then source) and
//! are never deduplicated unless the function says so.

use crate::campaign::{AdTag, Campaign, City, Source};

/// Every city of every year, in year order then city order.
pub fn all_cities(campaign: &Campaign) -> Vec<&City> {
  campaign
    .years
    .iter()
    .flat_map(|year| year.cities.iter())
    .collect()
}

/// Every source of every (year, city) pair.
pub fn all_sources(campaign: &Campaign) -> Vec<&Source> {
  campaign
    .years
    .iter()
    .flat_map(|year| year.cities.iter())
    .flat_map(|city| city.sources.iter())
    .collect()
}

/// Every ad tag in the tree.
pub fn all_tags(campaign: &Campaign) -> Vec<&AdTag> {
  all_sources(campaign)
    .into_iter()
    .flat_map(|source| source.ad_tags.iter())
    .collect()
}

/// Distinct city names in first-seen order.
pub fn location_names(campaign: &Campaign) -> Vec<&str> {
  distinct(all_cities(campaign).into_iter().map(|city| city.name.as_str()))
}

/// Distinct source names in first-seen order.
pub fn source_names(campaign: &Campaign) -> Vec<&str> {
  distinct(
    all_sources(campaign)
      .into_iter()
      .map(|source| source.name.as_str()),
  )
}

fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
  let mut out: Vec<&str> = Vec::new();
  for name in names {
    if !out.contains(&name) {
      out.push(name);
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::dataset::sample_campaigns;

  #[test]
  fn all_cities_follows_year_then_city_order() {
    let campaigns = sample_campaigns().unwrap();
    let tour = &campaigns[0];

    let names: Vec<_> = all_cities(tour).iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, [
      "Los Angeles",
      "Salt Lake City",
      "Columbus",
      "Indianapolis"
    ]);
  }

  #[test]
  fn all_sources_counts_every_city() {
    for campaign in sample_campaigns().unwrap() {
      let expected: usize = campaign
        .years
        .iter()
        .flat_map(|y| &y.cities)
        .map(|c| c.sources.len())
        .sum();
      assert_eq!(all_sources(&campaign).len(), expected);
    }
  }

  #[test]
  fn duplicates_are_preserved() {
    let mut campaign = sample_campaigns().unwrap().remove(0);
    let first = campaign.years[0].clone();
    campaign.years.push(first);

    let cities = all_cities(&campaign);
    assert_eq!(cities.len(), 6);
    assert_eq!(cities[0].id, cities[4].id);
    // The names view does collapse them.
    assert_eq!(location_names(&campaign).len(), 4);
  }

  #[test]
  fn no_years_is_empty() {
    let mut campaign = sample_campaigns().unwrap().remove(0);
    campaign.years.clear();

    assert!(all_cities(&campaign).is_empty());
    assert!(all_sources(&campaign).is_empty());
    assert!(all_tags(&campaign).is_empty());
    assert!(source_names(&campaign).is_empty());
  }

  #[test]
  fn source_names_are_first_seen_order() {
    let tour = sample_campaigns().unwrap().remove(0);
    assert_eq!(source_names(&tour), [
      "Facebook",
      "Instagram",
      "Google",
      "Tik Tok",
      "Car Wrap"
    ]);
  }
}
