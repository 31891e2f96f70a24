//! New-campaign form, drawn as a popup over the list.

use billboard_core::draft::AVAILABLE_PLATFORMS;
use ratatui::{
  Frame,
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
  app::App,
  form::{Field, NewCampaignForm},
};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(form) = &app.form else { return };

  let popup = centered(area, 72, 24);
  f.render_widget(Clear, popup);

  let block = Block::default()
    .title(" New campaign ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(popup);
  f.render_widget(block, popup);

  f.render_widget(Paragraph::new(form_lines(form)), inner);
}

fn form_lines(form: &NewCampaignForm) -> Vec<Line<'static>> {
  let focused = form.focused();
  let draft = &form.draft;

  let mut lines = vec![
    text_line("Name", &draft.name, focused == Field::Name),
    text_line("Description", &draft.description, focused == Field::Description),
    text_line("Legal line", &draft.legal_line, focused == Field::LegalLine),
    date_line("Starts on", &form.starts_text, draft.starts_on.is_some(), focused == Field::StartsOn),
    date_line("Ends on", &form.ends_text, draft.ends_on.is_some(), focused == Field::EndsOn),
    Line::from(vec![
      label("Never ends", focused == Field::NeverEnds),
      Span::raw(if draft.never_ends { "[x]" } else { "[ ]" }),
    ]),
    Line::from(""),
  ];

  for (index, loc) in draft.locations.iter().enumerate() {
    let city = if loc.city.is_empty() { "‹ choose ›" } else { loc.city.as_str() };
    lines.push(Line::from(vec![
      label(&format!("Location {}", index + 1), focused == Field::City(index)),
      Span::raw(format!("◂ {city} ▸")),
    ]));

    let on_platforms = focused == Field::Platforms(index);
    let mut spans = vec![label("  platforms", on_platforms)];
    for (i, platform) in AVAILABLE_PLATFORMS.iter().enumerate() {
      let chosen = loc.platforms.iter().any(|p| p.as_str() == *platform);
      let mut style = if chosen {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::DarkGray)
      };
      if on_platforms && i == form.platform_cursor {
        style = style.add_modifier(Modifier::REVERSED);
      }
      spans.push(Span::styled(format!("{platform} "), style));
    }
    // Long platform rows wrap onto continuation lines.
    for chunk in spans.chunks(5) {
      lines.push(Line::from(chunk.to_vec()));
    }
  }

  lines
}

fn label(name: &str, focused: bool) -> Span<'static> {
  let style = if focused {
    Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::Cyan)
  };
  Span::styled(format!("{name:<14}"), style)
}

fn text_line(name: &str, value: &str, focused: bool) -> Line<'static> {
  let cursor = if focused { "_" } else { "" };
  Line::from(vec![label(name, focused), Span::raw(format!("{value}{cursor}"))])
}

fn date_line(name: &str, value: &str, parsed: bool, focused: bool) -> Line<'static> {
  let mut line = text_line(name, value, focused);
  let hint = match (value.is_empty(), parsed) {
    (true, _) => Span::styled("  YYYY-MM-DD", Style::default().fg(Color::DarkGray)),
    (false, true) => Span::styled("  ✓", Style::default().fg(Color::Green)),
    (false, false) => Span::styled("  invalid date", Style::default().fg(Color::Red)),
  };
  line.spans.push(hint);
  line
}

/// A `width` × `height` rectangle centred in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let [row] = Layout::vertical([Constraint::Length(height)])
    .flex(Flex::Center)
    .areas(area);
  let [col] = Layout::horizontal([Constraint::Length(width)])
    .flex(Flex::Center)
    .areas(row);
  col
}
