//! Campaign list pane and the preview card beside it.

use billboard_core::{
  campaign::Campaign,
  display::platform_glyph,
  hierarchy::{location_names, source_names},
};
use chrono::Utc;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::{grouped, status_badge, time_ago};
use crate::app::App;

/// Render the list (left) and preview card (right) into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  draw_list(f, cols[0], app);
  match app.cursor_campaign() {
    Some(campaign) => draw_card(f, cols[1], app, campaign),
    None => draw_empty_card(f, cols[1]),
  }
}

fn draw_list(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_indices();
  let total = app.campaigns.len();

  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" Campaigns ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Campaigns ({total}) ")
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = filtered
    .iter()
    .filter_map(|&i| app.campaigns.get(i))
    .map(|campaign| {
      let counts = format!(
        "  {}L {}S",
        location_names(campaign).len(),
        source_names(campaign).len()
      );
      ListItem::new(Line::from(vec![
        status_badge(&campaign.status),
        Span::raw(" "),
        Span::raw(campaign.name.clone()),
        Span::styled(counts, Style::default().fg(Color::DarkGray)),
      ]))
    })
    .collect();

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Filter bar at the bottom of the inner area.
  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  let mut state = ListState::default();
  state.select((!filtered.is_empty()).then_some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("▸ "),
    inner_area,
    &mut state,
  );
}

fn draw_card(f: &mut Frame, area: Rect, app: &App, campaign: &Campaign) {
  let block = Block::default()
    .title(format!(" {} ", campaign.name))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
  let dim = Style::default().fg(Color::DarkGray);

  let mut lines = vec![
    Line::from(vec![
      status_badge(&campaign.status),
      Span::styled(format!("  created {}", time_ago(campaign.created, Utc::now())), dim),
    ]),
    Line::from(""),
  ];

  if let Some(description) = &campaign.description {
    lines.push(Line::from(description.clone()));
    lines.push(Line::from(""));
  }

  let field = |name: &str, value: String| {
    Line::from(vec![Span::styled(format!("{name:<14}"), label), Span::raw(value)])
  };

  lines.push(field("created", campaign.created.format("%d %b %Y").to_string()));
  lines.push(field(
    "publishes",
    campaign
      .publish_date
      .map(|d| d.format("%d %b %Y").to_string())
      .unwrap_or_else(|| "not published".into()),
  ));
  if let Some(end) = campaign.end_date {
    lines.push(field("ends", end.format("%d %b %Y").to_string()));
  }
  if let Some(author) = &campaign.created_by {
    lines.push(field("created by", author.clone()));
  }
  lines.push(field("locations", location_names(campaign).join(", ")));

  let sources: Vec<String> = source_names(campaign)
    .into_iter()
    .map(|name| format!("{} {name}", platform_glyph(name)))
    .collect();
  lines.push(field("sources", sources.join("  ")));

  if let Some(stats) = app.card_stats.get(&campaign.id) {
    lines.push(Line::from(""));
    lines.push(field("impressions", grouped(stats.impressions)));
    lines.push(field("clicks", grouped(stats.clicks)));
    lines.push(field("conversions", grouped(stats.conversions)));
    lines.push(field("ctr", format!("{:.2}%", stats.ctr)));
    lines.push(field("conv. rate", format!("{:.2}%", stats.conversion_rate)));
    lines.push(field("spend", format!("${:.2}", stats.spend)));
    lines.push(field("leads", grouped(stats.leads_registered)));
  }

  if let Some(legal) = &campaign.legal_line {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(legal.clone(), dim)));
  }

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn draw_empty_card(f: &mut Frame, area: Rect) {
  let block = Block::default()
    .title(" Campaign ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new("No campaign matches.").style(Style::default().fg(Color::DarkGray)),
    inner,
  );
}
