//! The campaign dataset: a bundled sample, or a JSON file of the same shape.

use std::path::Path;

use crate::{Result, campaign::Campaign};

const SAMPLE: &str = include_str!("../data/campaigns.json");

/// Parse the bundled sample campaigns.
pub fn sample_campaigns() -> Result<Vec<Campaign>> {
  parse_campaigns(SAMPLE)
}

/// Parse a JSON array of campaigns.
pub fn parse_campaigns(json: &str) -> Result<Vec<Campaign>> {
  Ok(serde_json::from_str(json)?)
}

/// Read and parse a JSON array of campaigns from `path`.
pub fn load_campaigns(path: &Path) -> Result<Vec<Campaign>> {
  let raw = std::fs::read_to_string(path)?;
  let campaigns = parse_campaigns(&raw)?;
  tracing::debug!(path = %path.display(), count = campaigns.len(), "loaded dataset");
  Ok(campaigns)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{Error, campaign::CampaignStatus};

  #[test]
  fn sample_has_three_campaigns() {
    let campaigns = sample_campaigns().unwrap();
    assert_eq!(campaigns.len(), 3);

    let tour = &campaigns[0];
    assert_eq!(tour.name, "Milagros Tour");
    assert_eq!(tour.status, CampaignStatus::Active);
    assert_eq!(tour.years.len(), 2);
    assert_eq!(tour.years[1].year, 2025);
    assert_eq!(tour.years[1].cities[0].sources[2].ad_tags[0].kind, "outdoor");
    assert_eq!(tour.stats.map(|s| s.impressions), Some(98_750));
  }

  #[test]
  fn optional_fields_may_be_absent() {
    let json = r#"[{
      "id": "x",
      "name": "Bare",
      "status": "archived",
      "created": "2024-05-01T00:00:00Z",
      "years": []
    }]"#;

    let campaigns = parse_campaigns(json).unwrap();
    assert_eq!(campaigns[0].status, CampaignStatus::Other("archived".into()));
    assert!(campaigns[0].description.is_none());
    assert!(campaigns[0].stats.is_none());
  }

  #[test]
  fn malformed_json_is_a_serialization_error() {
    let err = parse_campaigns("{not json").unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
  }

  #[test]
  fn missing_file_is_an_io_error() {
    let err = load_campaigns(Path::new("/nonexistent/campaigns.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
  }
}
