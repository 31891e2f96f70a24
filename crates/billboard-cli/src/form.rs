//! Keyboard state for the "new campaign" form.
//!
//! The form owns a [`CampaignDraft`] and only adds what the terminal needs on
//! top of it: which field has focus, the raw text of the date fields, and the
//! platform cursor.

use billboard_core::draft::{AVAILABLE_CITIES, AVAILABLE_PLATFORMS, CampaignDraft};
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A focusable form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Name,
  Description,
  LegalLine,
  StartsOn,
  EndsOn,
  NeverEnds,
  /// City picker of the location at this index.
  City(usize),
  /// Platform toggles of the location at this index.
  Platforms(usize),
}

/// What the caller should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
  Continue,
  Cancel,
  Submit,
}

#[derive(Debug, Clone)]
pub struct NewCampaignForm {
  pub draft:           CampaignDraft,
  pub starts_text:     String,
  pub ends_text:       String,
  /// Index into [`NewCampaignForm::fields`].
  pub focus:           usize,
  /// Highlighted entry of [`AVAILABLE_PLATFORMS`] on a platforms field.
  pub platform_cursor: usize,
}

impl Default for NewCampaignForm {
  fn default() -> Self { Self::new() }
}

impl NewCampaignForm {
  pub fn new() -> Self {
    Self {
      draft:           CampaignDraft::new(),
      starts_text:     String::new(),
      ends_text:       String::new(),
      focus:           0,
      platform_cursor: 0,
    }
  }

  /// Focus order: the fixed fields, then city and platforms per location.
  pub fn fields(&self) -> Vec<Field> {
    let mut fields = vec![
      Field::Name,
      Field::Description,
      Field::LegalLine,
      Field::StartsOn,
      Field::EndsOn,
      Field::NeverEnds,
    ];
    for index in 0..self.draft.locations.len() {
      fields.push(Field::City(index));
      fields.push(Field::Platforms(index));
    }
    fields
  }

  pub fn focused(&self) -> Field {
    let fields = self.fields();
    fields[self.focus.min(fields.len() - 1)]
  }

  /// A date field holding text that is not a `YYYY-MM-DD` date. The end
  /// date is skipped when the campaign never ends.
  pub fn invalid_date(&self) -> Option<String> {
    let mut typed = vec![("start", &self.starts_text)];
    if !self.draft.never_ends {
      typed.push(("end", &self.ends_text));
    }
    typed
      .into_iter()
      .find(|(_, text)| !text.trim().is_empty() && parse_date(text).is_none())
      .map(|(which, text)| format!("{which} date \"{}\" is not a YYYY-MM-DD date", text.trim()))
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
      KeyCode::Esc => return FormOutcome::Cancel,
      KeyCode::Char('s') if ctrl => return FormOutcome::Submit,
      KeyCode::Char('n') if ctrl => {
        self.draft.add_location();
        self.focus_field(Field::City(self.draft.locations.len() - 1));
      }
      KeyCode::Char('d') if ctrl => self.remove_focused_location(),
      KeyCode::Tab | KeyCode::Down => self.move_focus(1),
      KeyCode::BackTab | KeyCode::Up => self.move_focus(-1),
      _ => self.edit_focused(key.code),
    }
    FormOutcome::Continue
  }

  fn move_focus(&mut self, delta: isize) {
    let len = self.fields().len() as isize;
    self.focus = (self.focus as isize + delta).rem_euclid(len) as usize;
    self.platform_cursor = 0;
  }

  fn focus_field(&mut self, field: Field) {
    if let Some(pos) = self.fields().iter().position(|f| *f == field) {
      self.focus = pos;
    }
  }

  fn remove_focused_location(&mut self) {
    let (Field::City(index) | Field::Platforms(index)) = self.focused() else {
      return;
    };
    let id = self.draft.locations[index].id;
    self.draft.remove_location(id);
    let last = self.fields().len() - 1;
    self.focus = self.focus.min(last);
  }

  fn edit_focused(&mut self, code: KeyCode) {
    match self.focused() {
      Field::Name => edit_text(&mut self.draft.name, code),
      Field::Description => edit_text(&mut self.draft.description, code),
      Field::LegalLine => edit_text(&mut self.draft.legal_line, code),
      Field::StartsOn => {
        edit_text(&mut self.starts_text, code);
        self.draft.starts_on = parse_date(&self.starts_text);
      }
      Field::EndsOn => {
        edit_text(&mut self.ends_text, code);
        self.draft.ends_on = parse_date(&self.ends_text);
      }
      Field::NeverEnds => {
        if matches!(code, KeyCode::Char(' ') | KeyCode::Enter) {
          self.draft.never_ends = !self.draft.never_ends;
        }
      }
      Field::City(index) => match code {
        KeyCode::Right | KeyCode::Char('l') => self.cycle_city(index, 1),
        KeyCode::Left | KeyCode::Char('h') => self.cycle_city(index, -1),
        _ => {}
      },
      Field::Platforms(index) => match code {
        KeyCode::Right | KeyCode::Char('l') => {
          self.platform_cursor = (self.platform_cursor + 1) % AVAILABLE_PLATFORMS.len();
        }
        KeyCode::Left | KeyCode::Char('h') => {
          self.platform_cursor = self
            .platform_cursor
            .checked_sub(1)
            .unwrap_or(AVAILABLE_PLATFORMS.len() - 1);
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
          let id = self.draft.locations[index].id;
          self
            .draft
            .toggle_platform(id, AVAILABLE_PLATFORMS[self.platform_cursor]);
        }
        _ => {}
      },
    }
  }

  /// Step through [`AVAILABLE_CITIES`]; an empty city starts at either end.
  fn cycle_city(&mut self, index: usize, delta: isize) {
    let loc = &self.draft.locations[index];
    let len = AVAILABLE_CITIES.len() as isize;
    let next = match AVAILABLE_CITIES.iter().position(|c| *c == loc.city) {
      Some(pos) => (pos as isize + delta).rem_euclid(len),
      None if delta > 0 => 0,
      None => len - 1,
    };
    let id = loc.id;
    self.draft.set_city(id, AVAILABLE_CITIES[next as usize]);
  }
}

fn edit_text(buffer: &mut String, code: KeyCode) {
  match code {
    KeyCode::Char(c) => buffer.push(c),
    KeyCode::Backspace => {
      buffer.pop();
    }
    _ => {}
  }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  fn ctrl(c: char) -> KeyEvent { KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL) }

  fn type_str(form: &mut NewCampaignForm, text: &str) {
    for c in text.chars() {
      form.handle_key(key(KeyCode::Char(c)));
    }
  }

  #[test]
  fn typing_fills_the_focused_field() {
    let mut form = NewCampaignForm::new();
    type_str(&mut form, "Promo");
    form.handle_key(key(KeyCode::Backspace));
    assert_eq!(form.draft.name, "Prom");
  }

  #[test]
  fn focus_wraps_around() {
    let mut form = NewCampaignForm::new();
    form.handle_key(key(KeyCode::BackTab));
    assert_eq!(form.focused(), Field::Platforms(0));
    form.handle_key(key(KeyCode::Tab));
    assert_eq!(form.focused(), Field::Name);
  }

  #[test]
  fn dates_parse_as_typed() {
    let mut form = NewCampaignForm::new();
    form.focus_field(Field::StartsOn);
    type_str(&mut form, "2025-04-0");
    assert_eq!(form.draft.starts_on, None);
    type_str(&mut form, "1");
    assert_eq!(form.draft.starts_on, NaiveDate::from_ymd_opt(2025, 4, 1));
  }

  #[test]
  fn unparseable_date_is_reported_by_field() {
    let mut form = NewCampaignForm::new();
    assert_eq!(form.invalid_date(), None);

    form.focus_field(Field::EndsOn);
    type_str(&mut form, "2025-02-30");
    assert_eq!(
      form.invalid_date().as_deref(),
      Some("end date \"2025-02-30\" is not a YYYY-MM-DD date")
    );

    form.draft.never_ends = true;
    assert_eq!(form.invalid_date(), None);
  }

  #[test]
  fn city_and_platform_pickers() {
    let mut form = NewCampaignForm::new();
    form.focus_field(Field::City(0));
    form.handle_key(key(KeyCode::Right));
    assert_eq!(form.draft.locations[0].city, AVAILABLE_CITIES[0]);
    form.handle_key(key(KeyCode::Left));
    assert_eq!(form.draft.locations[0].city, AVAILABLE_CITIES[AVAILABLE_CITIES.len() - 1]);

    form.handle_key(key(KeyCode::Tab));
    form.handle_key(key(KeyCode::Right));
    form.handle_key(key(KeyCode::Char(' ')));
    assert_eq!(form.draft.locations[0].platforms, [AVAILABLE_PLATFORMS[1]]);
  }

  #[test]
  fn locations_are_added_and_removed() {
    let mut form = NewCampaignForm::new();
    form.handle_key(ctrl('n'));
    assert_eq!(form.draft.locations.len(), 2);
    assert_eq!(form.focused(), Field::City(1));

    form.handle_key(ctrl('d'));
    assert_eq!(form.draft.locations.len(), 1);

    // The last location stays.
    form.focus_field(Field::City(0));
    form.handle_key(ctrl('d'));
    assert_eq!(form.draft.locations.len(), 1);
  }

  #[test]
  fn escape_and_submit_outcomes() {
    let mut form = NewCampaignForm::new();
    assert_eq!(form.handle_key(ctrl('s')), FormOutcome::Submit);
    assert_eq!(form.handle_key(key(KeyCode::Esc)), FormOutcome::Cancel);
    assert_eq!(form.handle_key(key(KeyCode::Char('x'))), FormOutcome::Continue);
  }
}
