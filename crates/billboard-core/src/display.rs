//! Display lookups for statuses and platforms.
//!
//! Both sets are small and closed, so these are plain tables with a defined
//! default rather than per-variant behaviour.

use crate::campaign::CampaignStatus;

/// Colour family a status badge is drawn in. Renderers map it to real
/// colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
  Positive,
  Muted,
  Info,
  Accent,
  Neutral,
}

impl CampaignStatus {
  /// Human-readable label. Unrecognised statuses show their raw value.
  pub fn label(&self) -> &str {
    match self {
      Self::Active => "Active",
      Self::Inactive => "Inactive",
      Self::Scheduled => "Scheduled",
      Self::Completed => "Completed",
      Self::Other(raw) => raw,
    }
  }

  pub fn tone(&self) -> Tone {
    match self {
      Self::Active => Tone::Positive,
      Self::Inactive => Tone::Muted,
      Self::Scheduled => Tone::Info,
      Self::Completed => Tone::Accent,
      Self::Other(_) => Tone::Neutral,
    }
  }
}

const PLATFORM_GLYPHS: &[(&str, &str)] = &[
  ("facebook", "📘"),
  ("instagram", "📸"),
  ("google", "🔍"),
  ("tik tok", "🎵"),
  ("tiktok", "🎵"),
  ("youtube", "▶️"),
  ("twitter", "🐦"),
  ("linkedin", "💼"),
  ("pinterest", "📌"),
  ("snapchat", "👻"),
  ("car wrap", "🚗"),
];

const DEFAULT_GLYPH: &str = "🌐";

/// Icon for a source name, matched case-insensitively.
pub fn platform_glyph(name: &str) -> &'static str {
  let key = name.trim().to_lowercase();
  PLATFORM_GLYPHS
    .iter()
    .find(|(platform, _)| *platform == key)
    .map(|(_, glyph)| *glyph)
    .unwrap_or(DEFAULT_GLYPH)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_statuses_have_labels_and_tones() {
    assert_eq!(CampaignStatus::Active.label(), "Active");
    assert_eq!(CampaignStatus::Completed.tone(), Tone::Accent);
  }

  #[test]
  fn unknown_status_falls_back_to_raw() {
    let status = CampaignStatus::Other("paused".into());
    assert_eq!(status.label(), "paused");
    assert_eq!(status.tone(), Tone::Neutral);
  }

  #[test]
  fn platform_lookup_ignores_case() {
    assert_eq!(platform_glyph("Facebook"), "📘");
    assert_eq!(platform_glyph("Tik Tok"), "🎵");
    assert_eq!(platform_glyph("Billboard"), DEFAULT_GLYPH);
  }
}
