//! Placeholder performance statistics.
//!
//! The dashboard has no analytics backend. Figures come from a
//! [`StatsSource`]: either all zeros or random samples. Campaigns that carry
//! their own `stats` always show those instead.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::campaign::{Campaign, CampaignStats};

/// Month labels for the monthly series.
pub const MONTHS: [&str; 12] = [
  "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov",
  "Dec",
];

/// One point of the monthly performance series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyStats {
  pub month:       &'static str,
  pub impressions: u64,
  pub clicks:      u64,
  pub conversions: u64,
  /// Click-through rate, in percent.
  pub ctr:         f64,
}

/// Supplies statistics for campaigns that have none of their own.
pub trait StatsSource {
  fn summary(&mut self, campaign: &Campaign) -> CampaignStats;

  /// Twelve points, January first.
  fn monthly(&mut self, campaign: &Campaign) -> Vec<MonthlyStats>;
}

/// The campaign's own figures, falling back to `source`.
pub fn stats_for(source: &mut dyn StatsSource, campaign: &Campaign) -> CampaignStats {
  campaign.stats.unwrap_or_else(|| source.summary(campaign))
}

// ─── Zero ────────────────────────────────────────────────────────────────────

/// Every figure is zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroStats;

impl StatsSource for ZeroStats {
  fn summary(&mut self, _campaign: &Campaign) -> CampaignStats { CampaignStats::default() }

  fn monthly(&mut self, _campaign: &Campaign) -> Vec<MonthlyStats> {
    MONTHS
      .iter()
      .map(|&month| MonthlyStats {
        month,
        impressions: 0,
        clicks: 0,
        conversions: 0,
        ctr: 0.0,
      })
      .collect()
  }
}

// ─── Random ──────────────────────────────────────────────────────────────────

/// Uniform random samples below fixed ceilings.
#[derive(Debug, Clone)]
pub struct RandomStats {
  rng: StdRng,
}

impl RandomStats {
  pub fn from_entropy() -> Self { Self { rng: StdRng::from_entropy() } }

  pub fn seeded(seed: u64) -> Self { Self { rng: StdRng::seed_from_u64(seed) } }
}

impl StatsSource for RandomStats {
  fn summary(&mut self, _campaign: &Campaign) -> CampaignStats {
    CampaignStats {
      impressions:      self.rng.gen_range(0..100_000),
      clicks:           self.rng.gen_range(0..10_000),
      conversions:      self.rng.gen_range(0..1_000),
      ctr:              self.rng.gen_range(0.0..10.0),
      conversion_rate:  self.rng.gen_range(0.0..5.0),
      spend:            self.rng.gen_range(0.0..5_000.0),
      leads_registered: self.rng.gen_range(0..500),
    }
  }

  fn monthly(&mut self, _campaign: &Campaign) -> Vec<MonthlyStats> {
    MONTHS
      .iter()
      .map(|&month| MonthlyStats {
        month,
        impressions: self.rng.gen_range(0..100_000),
        clicks: self.rng.gen_range(0..10_000),
        conversions: self.rng.gen_range(0..1_000),
        ctr: self.rng.gen_range(0.0..10.0),
      })
      .collect()
  }
}

// ─── Totals ──────────────────────────────────────────────────────────────────

/// Sums over a monthly series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
  pub impressions: u64,
  pub clicks:      u64,
  pub conversions: u64,
}

impl Totals {
  pub fn from_monthly(series: &[MonthlyStats]) -> Self {
    series.iter().fold(Self::default(), |acc, point| Self {
      impressions: acc.impressions + point.impressions,
      clicks:      acc.clicks + point.clicks,
      conversions: acc.conversions + point.conversions,
    })
  }

  /// Clicks per impression, in percent; zero without impressions.
  pub fn ctr(&self) -> f64 { percent(self.clicks, self.impressions) }

  /// Conversions per click, in percent; zero without clicks.
  pub fn conversion_rate(&self) -> f64 { percent(self.conversions, self.clicks) }
}

fn percent(part: u64, whole: u64) -> f64 {
  if whole == 0 {
    0.0
  } else {
    part as f64 / whole as f64 * 100.0
  }
}
