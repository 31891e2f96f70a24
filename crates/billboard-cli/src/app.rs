//! Application state machine and event dispatcher.

use std::collections::HashMap;

use billboard_core::{
  campaign::{Campaign, CampaignStats, Level},
  cascade::{Selection, SelectionEvent, view},
  stats::{MonthlyStats, StatsSource, stats_for},
};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};

use crate::form::{FormOutcome, NewCampaignForm};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  /// Campaign list with a preview card on the right.
  CampaignList,
  /// Full-width detail of one campaign.
  CampaignDetail,
  /// The new-campaign form, drawn over the list.
  NewCampaign,
}

// ─── Detail state ─────────────────────────────────────────────────────────────

/// One selectable line on a detail tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
  pub id:     String,
  pub label:  String,
  pub detail: String,
  /// Events that select this row, top level first.
  pub path:   Vec<SelectionEvent>,
}

/// State of the detail screen for one campaign.
#[derive(Debug, Clone)]
pub struct Detail {
  /// Index into [`App::campaigns`].
  pub index:     usize,
  pub selection: Selection,
  /// The level whose tab is showing.
  pub tab:       Level,
  pub cursor:    usize,
  /// On the Cities/Sources tabs, list the whole campaign instead of the
  /// current selection's branch.
  pub show_all:  bool,
  pub summary:   CampaignStats,
  pub monthly:   Vec<MonthlyStats>,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  pub campaigns: Vec<Campaign>,

  /// Card figures per campaign id, sampled once so they don't change
  /// between frames.
  pub card_stats: HashMap<String, CampaignStats>,

  /// Current fuzzy-filter string (only active when `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* campaign list.
  pub list_cursor: usize,

  pub detail: Option<Detail>,

  pub form: Option<NewCampaignForm>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  stats: Box<dyn StatsSource>,

  /// Author recorded on campaigns created in this session.
  created_by: String,
}

impl App {
  pub fn new(
    campaigns: Vec<Campaign>,
    mut stats: Box<dyn StatsSource>,
    created_by: String,
  ) -> Self {
    let card_stats = campaigns
      .iter()
      .map(|c| (c.id.clone(), stats_for(stats.as_mut(), c)))
      .collect();
    Self {
      screen: Screen::CampaignList,
      campaigns,
      card_stats,
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      detail: None,
      form: None,
      status_msg: String::new(),
      stats,
      created_by,
    }
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  /// Indices of campaigns whose name matches the current filter query.
  pub fn filtered_indices(&self) -> Vec<usize> {
    if self.filter.is_empty() {
      return (0..self.campaigns.len()).collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .campaigns
      .iter()
      .enumerate()
      .filter(|(_, c)| matcher.fuzzy_match(&c.name, &self.filter).is_some())
      .map(|(i, _)| i)
      .collect()
  }

  /// The campaign under the list cursor in the filtered view, if any.
  pub fn cursor_campaign(&self) -> Option<&Campaign> {
    let index = *self.filtered_indices().get(self.list_cursor)?;
    self.campaigns.get(index)
  }

  pub fn detail_campaign(&self) -> Option<&Campaign> {
    self.detail.as_ref().and_then(|d| self.campaigns.get(d.index))
  }

  // ── Detail rows ───────────────────────────────────────────────────────────

  /// The rows of the current detail tab.
  pub fn detail_rows(&self) -> Vec<Row> {
    let (Some(detail), Some(campaign)) = (&self.detail, self.detail_campaign()) else {
      return Vec::new();
    };
    if detail.show_all {
      match detail.tab {
        Level::City => return all_city_rows(campaign),
        Level::Source => return all_source_rows(campaign),
        _ => {}
      }
    }

    let v = view(campaign, &detail.selection);
    match detail.tab {
      Level::Year => v
        .years
        .iter()
        .map(|y| Row {
          id:     y.id.clone(),
          label:  y.year.to_string(),
          detail: format!("{} cities", y.cities.len()),
          path:   vec![SelectionEvent::SelectYear(y.id.clone())],
        })
        .collect(),
      Level::City => v
        .cities
        .iter()
        .map(|c| Row {
          id:     c.id.clone(),
          label:  c.name.clone(),
          detail: format!("{} sources", c.sources.len()),
          path:   vec![SelectionEvent::SelectCity(c.id.clone())],
        })
        .collect(),
      Level::Source => v
        .sources
        .iter()
        .map(|s| Row {
          id:     s.id.clone(),
          label:  s.name.clone(),
          detail: s.platform.clone(),
          path:   vec![SelectionEvent::SelectSource(s.id.clone())],
        })
        .collect(),
      Level::Tag => v
        .tags
        .iter()
        .map(|t| Row {
          id:     t.id.clone(),
          label:  t.name.clone(),
          detail: t.kind.clone(),
          path:   vec![SelectionEvent::SelectTag(t.id.clone())],
        })
        .collect(),
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    // Filter input mode: all printable keys go into the filter string.
    if self.filter_active {
      self.handle_filter_key(key);
      return true;
    }

    match self.screen {
      Screen::CampaignList => self.handle_list_key(key),
      Screen::CampaignDetail => self.handle_detail_key(key),
      Screen::NewCampaign => {
        self.handle_form_key(key);
        true
      }
    }
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
        // Immediately open detail if there's exactly one match.
        if let [index] = self.filtered_indices()[..] {
          self.open_detail(index);
        }
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
  }

  fn handle_list_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_indices().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(&index) = self.filtered_indices().get(self.list_cursor) {
          self.open_detail(index);
        }
      }

      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }

      KeyCode::Char('n') => {
        self.form = Some(NewCampaignForm::new());
        self.screen = Screen::NewCampaign;
        self.status_msg.clear();
      }

      _ => {}
    }
    true
  }

  fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::CampaignList;
        self.detail = None;
      }

      KeyCode::Tab => self.switch_tab(1),
      KeyCode::BackTab => self.switch_tab(-1),

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.detail_rows().len();
        if let Some(detail) = &mut self.detail
          && detail.cursor + 1 < len
        {
          detail.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if let Some(detail) = &mut self.detail {
          detail.cursor = detail.cursor.saturating_sub(1);
        }
      }

      KeyCode::Enter => self.select_cursor_row(),

      KeyCode::Backspace => {
        if let Some(tab) = self.detail.as_ref().map(|d| d.tab) {
          self.dispatch(SelectionEvent::Clear(tab));
        }
      }

      KeyCode::Char('a') => {
        if let Some(detail) = &mut self.detail
          && matches!(detail.tab, Level::City | Level::Source)
        {
          detail.show_all = !detail.show_all;
          detail.cursor = 0;
        }
      }

      _ => {}
    }
    true
  }

  fn handle_form_key(&mut self, key: KeyEvent) {
    let Some(form) = &mut self.form else {
      self.screen = Screen::CampaignList;
      return;
    };
    match form.handle_key(key) {
      FormOutcome::Continue => {}
      FormOutcome::Cancel => {
        self.form = None;
        self.screen = Screen::CampaignList;
        self.status_msg.clear();
      }
      FormOutcome::Submit => self.submit_form(),
    }
  }

  // ── Transitions ───────────────────────────────────────────────────────────

  /// Transition to `CampaignDetail` for the campaign at `index`.
  fn open_detail(&mut self, index: usize) {
    let Some(campaign) = self.campaigns.get(index) else { return };
    let summary = self
      .card_stats
      .get(&campaign.id)
      .copied()
      .unwrap_or_else(|| stats_for(self.stats.as_mut(), campaign));
    let monthly = self.stats.monthly(campaign);
    tracing::debug!(id = %campaign.id, "opening campaign");

    self.detail = Some(Detail {
      index,
      selection: Selection::initial(campaign),
      tab: Level::Year,
      cursor: 0,
      show_all: false,
      summary,
      monthly,
    });
    self.screen = Screen::CampaignDetail;
  }

  fn switch_tab(&mut self, delta: isize) {
    const TABS: [Level; 4] = [Level::Year, Level::City, Level::Source, Level::Tag];
    if let Some(detail) = &mut self.detail {
      let pos = TABS.iter().position(|t| *t == detail.tab).unwrap_or(0) as isize;
      detail.tab = TABS[(pos + delta).rem_euclid(TABS.len() as isize) as usize];
      detail.cursor = 0;
      detail.show_all = false;
    }
  }

  /// Select the row under the cursor and move to the next tab down.
  fn select_cursor_row(&mut self) {
    let Some(detail) = &self.detail else { return };
    let Some(row) = self.detail_rows().into_iter().nth(detail.cursor) else {
      return;
    };
    for event in row.path {
      self.dispatch(event);
    }
    if let Some(detail) = &mut self.detail {
      if let Some(child) = detail.tab.child() {
        detail.tab = child;
        detail.cursor = 0;
      }
      detail.show_all = false;
    }
  }

  /// Run `event` through the cascade for the open campaign.
  fn dispatch(&mut self, event: SelectionEvent) {
    let Some(detail) = &mut self.detail else { return };
    let Some(campaign) = self.campaigns.get(detail.index) else { return };
    detail.selection = detail.selection.apply(campaign, event);
    detail.cursor = 0;
  }

  fn submit_form(&mut self) {
    let Some(form) = &self.form else { return };
    if let Some(problem) = form.invalid_date() {
      self.status_msg = format!("Error: {problem}");
      return;
    }
    match form.draft.build(Utc::now(), &self.created_by) {
      Ok(campaign) => {
        match serde_json::to_string(&campaign) {
          Ok(json) => tracing::info!(campaign = %json, "new campaign"),
          Err(e) => tracing::warn!(error = %e, "could not serialise new campaign"),
        }
        self.status_msg = format!("Campaign \"{}\" created", campaign.name);
        let stats = stats_for(self.stats.as_mut(), &campaign);
        self.card_stats.insert(campaign.id.clone(), stats);
        self.campaigns.push(campaign);
        self.form = None;
        self.screen = Screen::CampaignList;
        self.filter.clear();
        self.list_cursor = self.campaigns.len() - 1;
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
      }
    }
  }
}

// ─── Cross-cut rows ───────────────────────────────────────────────────────────

fn all_city_rows(campaign: &Campaign) -> Vec<Row> {
  campaign
    .years
    .iter()
    .flat_map(|y| y.cities.iter().map(move |c| (y, c)))
    .map(|(y, c)| Row {
      id:     c.id.clone(),
      label:  c.name.clone(),
      detail: y.year.to_string(),
      path:   vec![
        SelectionEvent::SelectYear(y.id.clone()),
        SelectionEvent::SelectCity(c.id.clone()),
      ],
    })
    .collect()
}

fn all_source_rows(campaign: &Campaign) -> Vec<Row> {
  campaign
    .years
    .iter()
    .flat_map(|y| y.cities.iter().map(move |c| (y, c)))
    .flat_map(|(y, c)| c.sources.iter().map(move |s| (y, c, s)))
    .map(|(y, c, s)| Row {
      id:     s.id.clone(),
      label:  s.name.clone(),
      detail: format!("{} · {}", c.name, y.year),
      path:   vec![
        SelectionEvent::SelectYear(y.id.clone()),
        SelectionEvent::SelectCity(c.id.clone()),
        SelectionEvent::SelectSource(s.id.clone()),
      ],
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use billboard_core::{dataset::sample_campaigns, stats::ZeroStats};

  use super::*;

  fn app() -> App {
    App::new(sample_campaigns().unwrap(), Box::new(ZeroStats), "Tester".into())
  }

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  fn press(app: &mut App, codes: &[KeyCode]) {
    for code in codes {
      assert!(app.handle_key(key(*code)));
    }
  }

  fn selection(app: &App) -> &Selection { &app.detail.as_ref().unwrap().selection }

  #[test]
  fn quit_from_list() {
    let mut app = app();
    assert!(!app.handle_key(key(KeyCode::Char('q'))));
    assert!(!app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
  }

  #[test]
  fn card_stats_prefer_campaign_figures() {
    let app = app();
    assert_eq!(app.card_stats["1"].impressions, 98_750);
  }

  #[test]
  fn filter_narrows_and_opens_single_match() {
    let mut app = app();
    press(&mut app, &[KeyCode::Char('/')]);
    for c in "verano".chars() {
      press(&mut app, &[KeyCode::Char(c)]);
    }
    assert_eq!(app.filtered_indices(), [2]);

    press(&mut app, &[KeyCode::Enter]);
    assert_eq!(app.screen, Screen::CampaignDetail);
    assert_eq!(app.detail_campaign().unwrap().name, "Campaña de Verano");
  }

  #[test]
  fn drill_down_moves_through_tabs() {
    let mut app = app();
    press(&mut app, &[KeyCode::Enter]);
    assert_eq!(selection(&app).year.as_deref(), Some("y2024"));

    // Years tab: pick 2025.
    press(&mut app, &[KeyCode::Char('j'), KeyCode::Enter]);
    assert_eq!(selection(&app).year.as_deref(), Some("y2025"));
    assert_eq!(app.detail.as_ref().unwrap().tab, Level::City);

    let labels: Vec<_> = app.detail_rows().into_iter().map(|r| r.label).collect();
    assert_eq!(labels, ["Columbus", "Indianapolis"]);

    // Cities tab: Columbus, then its third source.
    press(&mut app, &[KeyCode::Enter, KeyCode::Char('j'), KeyCode::Char('j'), KeyCode::Enter]);
    let s = selection(&app);
    assert_eq!(s.city.as_deref(), Some("col2025"));
    assert_eq!(s.source.as_deref(), Some("carwrap-col-2025"));
    assert_eq!(app.detail.as_ref().unwrap().tab, Level::Tag);
    assert_eq!(app.detail_rows()[0].detail, "outdoor");
  }

  #[test]
  fn switching_year_clears_lower_levels() {
    let mut app = app();
    press(&mut app, &[KeyCode::Enter, KeyCode::Tab, KeyCode::Enter]);
    assert_eq!(selection(&app).city.as_deref(), Some("la2024"));

    press(&mut app, &[KeyCode::BackTab, KeyCode::BackTab, KeyCode::Char('j'), KeyCode::Enter]);
    let s = selection(&app);
    assert_eq!(s.year.as_deref(), Some("y2025"));
    assert_eq!(s.city, None);
  }

  #[test]
  fn backspace_clears_current_level() {
    let mut app = app();
    press(&mut app, &[KeyCode::Enter, KeyCode::Tab, KeyCode::Enter]);
    press(&mut app, &[KeyCode::BackTab, KeyCode::Backspace]);
    assert_eq!(selection(&app).city, None);
    assert_eq!(selection(&app).year.as_deref(), Some("y2024"));
  }

  #[test]
  fn all_sources_jump_across_years() {
    let mut app = app();
    press(&mut app, &[KeyCode::Enter, KeyCode::Tab, KeyCode::Tab, KeyCode::Char('a')]);
    let rows = app.detail_rows();
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[6].id, "google-col-2025");

    for _ in 0..6 {
      press(&mut app, &[KeyCode::Char('j')]);
    }
    press(&mut app, &[KeyCode::Enter]);
    let s = selection(&app);
    assert_eq!(s.year.as_deref(), Some("y2025"));
    assert_eq!(s.city.as_deref(), Some("col2025"));
    assert_eq!(s.source.as_deref(), Some("google-col-2025"));
  }

  #[test]
  fn invalid_form_keeps_form_open() {
    let mut app = app();
    press(&mut app, &[KeyCode::Char('n')]);
    assert_eq!(app.screen, Screen::NewCampaign);

    app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
    assert_eq!(app.screen, Screen::NewCampaign);
    assert_eq!(app.status_msg, "Error: campaign name is required");
    assert_eq!(app.campaigns.len(), 3);
  }

  #[test]
  fn valid_form_appends_campaign() {
    let mut app = app();
    press(&mut app, &[KeyCode::Char('n')]);
    {
      let form = app.form.as_mut().unwrap();
      form.draft.name = "Promo".into();
      form.draft.never_ends = true;
      let id = form.draft.locations[0].id;
      form.draft.set_city(id, "Miami");
      form.draft.toggle_platform(id, "Facebook");
    }

    app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
    assert_eq!(app.screen, Screen::CampaignList);
    assert_eq!(app.campaigns.len(), 4);
    assert_eq!(app.cursor_campaign().unwrap().name, "Promo");
    assert_eq!(app.cursor_campaign().unwrap().created_by.as_deref(), Some("Tester"));
    assert_eq!(app.status_msg, "Campaign \"Promo\" created");
  }

  #[test]
  fn bad_date_text_is_named_on_submit() {
    let mut app = app();
    press(&mut app, &[KeyCode::Char('n')]);
    {
      let form = app.form.as_mut().unwrap();
      form.draft.name = "Promo".into();
      form.starts_text = "2025-02-30".into();
    }

    app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
    assert_eq!(app.screen, Screen::NewCampaign);
    assert_eq!(
      app.status_msg,
      "Error: start date \"2025-02-30\" is not a YYYY-MM-DD date"
    );
  }

  #[test]
  fn never_ending_form_ignores_stale_end_date() {
    let mut app = app();
    press(&mut app, &[KeyCode::Char('n')]);
    {
      let form = app.form.as_mut().unwrap();
      form.draft.name = "Promo".into();
      form.starts_text = "2025-04-01".into();
      form.draft.starts_on = chrono::NaiveDate::from_ymd_opt(2025, 4, 1);
      form.ends_text = "2025-03-01".into();
      form.draft.ends_on = chrono::NaiveDate::from_ymd_opt(2025, 3, 1);
      form.draft.never_ends = true;
      let id = form.draft.locations[0].id;
      form.draft.set_city(id, "Miami");
      form.draft.toggle_platform(id, "Facebook");
    }

    app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
    assert_eq!(app.screen, Screen::CampaignList);
    assert_eq!(app.cursor_campaign().unwrap().end_date, None);
  }

  #[test]
  fn escape_cancels_form() {
    let mut app = app();
    press(&mut app, &[KeyCode::Char('n'), KeyCode::Esc]);
    assert_eq!(app.screen, Screen::CampaignList);
    assert!(app.form.is_none());
  }
}
