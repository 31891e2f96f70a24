//! TUI rendering. Orchestrates all panes.

pub mod campaign_detail;
pub mod campaign_list;
pub mod new_campaign;

use billboard_core::display::Tone;
use chrono::{DateTime, Local, Utc};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::Paragraph,
};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::CampaignList => campaign_list::draw(f, rows[1], app),
    Screen::CampaignDetail => campaign_detail::draw(f, rows[1], app),
    Screen::NewCampaign => {
      campaign_list::draw(f, rows[1], app);
      new_campaign::draw(f, rows[1], app);
    }
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    format!(" billboard  {} campaigns", app.campaigns.len()),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  // Simple left-right header: pad the middle.
  let pad = area
    .width
    .saturating_sub(left.width() as u16)
    .saturating_sub(right.width() as u16);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::DarkGray)),
    area,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match &app.screen {
    Screen::CampaignList if app.filter_active => {
      ("SEARCH", "Type to filter  Esc cancel  Enter select")
    }
    Screen::CampaignList => ("LIST", "↑↓/jk navigate  / search  Enter open  n new  q quit"),
    Screen::CampaignDetail => (
      "DETAIL",
      "Tab/S-Tab level  ↑↓/jk move  Enter select  ⌫ clear  a all  Esc back",
    ),
    Screen::NewCampaign => (
      "NEW",
      "Tab/↑↓ field  ←→ choose  Space toggle  ^N add  ^D remove  ^S save  Esc cancel",
    ),
  };

  let (status, status_style) = if app.status_msg.is_empty() {
    (hints.to_string(), Style::default().fg(Color::DarkGray))
  } else if app.status_msg.starts_with("Error") {
    (app.status_msg.clone(), Style::default().fg(Color::Red))
  } else {
    (app.status_msg.clone(), Style::default().fg(Color::Green))
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), status_style);

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span]))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Shared helpers ───────────────────────────────────────────────────────────

/// Terminal colour for a status tone.
pub fn tone_color(tone: Tone) -> Color {
  match tone {
    Tone::Positive => Color::Green,
    Tone::Muted => Color::Gray,
    Tone::Info => Color::Blue,
    Tone::Accent => Color::Magenta,
    Tone::Neutral => Color::White,
  }
}

/// A badge span for a campaign status.
pub fn status_badge(status: &billboard_core::campaign::CampaignStatus) -> Span<'static> {
  Span::styled(
    format!(" {} ", status.label()),
    Style::default()
      .fg(Color::Black)
      .bg(tone_color(status.tone()))
      .add_modifier(Modifier::BOLD),
  )
}

/// Coarse "x ago" description of `then` relative to `now`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
  let elapsed = now.signed_duration_since(then);
  let days = elapsed.num_days();
  match days {
    d if d < 0 => "in the future".into(),
    0 => "today".into(),
    1 => "yesterday".into(),
    2..=29 => format!("{days} days ago"),
    30..=364 => format!("{} months ago", days / 30),
    _ => format!("{} years ago", days / 365),
  }
}

/// Thousands-separated integer.
pub fn grouped(n: u64) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(c);
  }
  out
}
