//! Campaign detail: header, statistics, monthly chart and the level tabs.

use billboard_core::{
  campaign::{Campaign, Level},
  cascade::view,
  display::platform_glyph,
  stats::Totals,
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{BarChart, Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
};

use super::{grouped, status_badge};
use crate::app::{App, Detail};

const TABS: [(Level, &str); 4] = [
  (Level::Year, "Years"),
  (Level::City, "Cities"),
  (Level::Source, "Sources"),
  (Level::Tag, "Tags"),
];

// ─── Public entry ─────────────────────────────────────────────────────────────

/// Render the detail screen into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let (Some(detail), Some(campaign)) = (&app.detail, app.detail_campaign()) else {
    f.render_widget(
      Paragraph::new("No campaign open.").style(Style::default().fg(Color::DarkGray)),
      area,
    );
    return;
  };

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(4),  // header
      Constraint::Length(3),  // stat cards
      Constraint::Length(10), // chart
      Constraint::Min(0),     // tabs
    ])
    .split(area);

  draw_header(f, rows[0], campaign);
  draw_cards(f, rows[1], campaign, detail);
  draw_chart(f, rows[2], detail);
  draw_levels(f, rows[3], app, detail, campaign);
}

// ─── Sections ─────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, campaign: &Campaign) {
  let mut lines = vec![
    Line::from(status_badge(&campaign.status)),
    Line::from(Span::styled(
      campaign.name.clone(),
      Style::default().add_modifier(Modifier::BOLD),
    )),
  ];
  if let Some(description) = &campaign.description {
    lines.push(Line::from(Span::styled(
      description.clone(),
      Style::default().fg(Color::DarkGray),
    )));
  }
  f.render_widget(Paragraph::new(lines), area);
}

fn draw_cards(f: &mut Frame, area: Rect, campaign: &Campaign, detail: &Detail) {
  let values = cards(campaign, detail);

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints(values.iter().map(|_| Constraint::Ratio(1, values.len() as u32)))
    .split(area);

  for ((title, value), col) in values.into_iter().zip(cols.iter()) {
    let block = Block::default()
      .title(format!(" {title} "))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(
      Paragraph::new(value)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(block),
      *col,
    );
  }
}

/// Title and value of each stat card.
///
/// A campaign that carries its own figures shows those, matching its list
/// card. Otherwise the cards total the monthly series under the chart.
fn cards(campaign: &Campaign, detail: &Detail) -> [(&'static str, String); 6] {
  let s = &detail.summary;
  if campaign.stats.is_some() {
    return [
      ("Impressions", grouped(s.impressions)),
      ("Clicks", grouped(s.clicks)),
      ("CTR", format!("{:.2}%", s.ctr)),
      ("Conversions", grouped(s.conversions)),
      ("Conv. rate", format!("{:.2}%", s.conversion_rate)),
      ("Spend", format!("${:.2}", s.spend)),
    ];
  }
  let totals = Totals::from_monthly(&detail.monthly);
  [
    ("Impressions", grouped(totals.impressions)),
    ("Clicks", grouped(totals.clicks)),
    ("CTR", format!("{:.2}%", totals.ctr())),
    ("Conversions", grouped(totals.conversions)),
    ("Conv. rate", format!("{:.2}%", totals.conversion_rate())),
    ("Spend", format!("${:.2}", s.spend)),
  ]
}

fn draw_chart(f: &mut Frame, area: Rect, detail: &Detail) {
  let data: Vec<(&str, u64)> = detail
    .monthly
    .iter()
    .map(|point| (point.month, point.impressions))
    .collect();

  let chart = BarChart::default()
    .block(
      Block::default()
        .title(" Impressions by month ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray)),
    )
    .data(data.as_slice())
    .bar_width(4)
    .bar_gap(1)
    .bar_style(Style::default().fg(Color::Cyan))
    .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
  f.render_widget(chart, area);
}

fn draw_levels(f: &mut Frame, area: Rect, app: &App, detail: &Detail, campaign: &Campaign) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // tabs
      Constraint::Length(1), // breadcrumb
      Constraint::Min(0),    // rows
    ])
    .split(area);

  let selected = TABS.iter().position(|(level, _)| *level == detail.tab).unwrap_or(0);
  let tabs = Tabs::new(TABS.iter().map(|(_, title)| Line::from(*title)))
    .select(selected)
    .style(Style::default().fg(Color::DarkGray))
    .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
  f.render_widget(tabs, rows[0]);

  f.render_widget(Paragraph::new(breadcrumb(detail, campaign)), rows[1]);

  let title = if detail.show_all {
    " All (whole campaign) "
  } else {
    " Filtered "
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let current = detail.selection.get(detail.tab);
  let entries = app.detail_rows();
  if entries.is_empty() {
    let hint = if detail.tab == Level::Year {
      "This campaign has no years."
    } else {
      "Select a parent level first."
    };
    f.render_widget(
      Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)).block(block),
      rows[2],
    );
    return;
  }

  let items: Vec<ListItem> = entries
    .iter()
    .map(|row| {
      let marker = if Some(row.id.as_str()) == current { "● " } else { "  " };
      let icon = if detail.tab == Level::Source {
        format!("{} ", platform_glyph(&row.label))
      } else {
        String::new()
      };
      ListItem::new(Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Green)),
        Span::raw(icon),
        Span::raw(format!("{:<20}", row.label)),
        Span::styled(row.detail.clone(), Style::default().fg(Color::DarkGray)),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(detail.cursor.min(entries.len() - 1)));
  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(Style::default().bg(Color::Blue).fg(Color::White)),
    rows[2],
    &mut state,
  );
}

/// "2024 › Los Angeles › Facebook" for the current selection.
fn breadcrumb(detail: &Detail, campaign: &Campaign) -> Line<'static> {
  let v = view(campaign, &detail.selection);
  let parts: Vec<String> = [
    v.year.map(|y| y.year.to_string()),
    v.city.map(|c| c.name.clone()),
    v.source.map(|s| s.name.clone()),
    v.tag.map(|t| format!("{} ({})", t.name, t.kind)),
  ]
  .into_iter()
  .flatten()
  .collect();

  let text = if parts.is_empty() {
    "nothing selected".to_string()
  } else {
    parts.join(" › ")
  };
  Line::from(Span::styled(format!(" {text}"), Style::default().fg(Color::Yellow)))
}

#[cfg(test)]
mod tests {
  use billboard_core::{
    cascade::Selection,
    dataset::sample_campaigns,
    stats::{RandomStats, StatsSource, stats_for},
  };

  use super::*;

  fn detail_for(campaign: &Campaign) -> Detail {
    let mut stats = RandomStats::seeded(7);
    Detail {
      index:     0,
      selection: Selection::initial(campaign),
      tab:       Level::Year,
      cursor:    0,
      show_all:  false,
      summary:   stats_for(&mut stats, campaign),
      monthly:   stats.monthly(campaign),
    }
  }

  #[test]
  fn own_figures_match_the_list_card() {
    let campaign = sample_campaigns().unwrap().remove(0);
    let values = cards(&campaign, &detail_for(&campaign));
    assert_eq!(values[0], ("Impressions", "98,750".to_string()));
  }

  #[test]
  fn without_own_figures_cards_total_the_series() {
    let mut campaign = sample_campaigns().unwrap().remove(0);
    campaign.stats = None;
    let detail = detail_for(&campaign);
    let totals = Totals::from_monthly(&detail.monthly);
    let values = cards(&campaign, &detail);
    assert_eq!(values[1].1, grouped(totals.clicks));
  }
}
