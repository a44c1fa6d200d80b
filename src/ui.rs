//! Terminal view - selection, add-city form and drawing
//!
//! The view keeps only presentation state. Everything about cities comes
//! from the `StoreState` snapshot it is handed.

use chrono::Utc;
use ratatui::{prelude::*, widgets::*};

use crate::messages::ui_events::{InputMode, UiEvent};
use crate::messages::Operation;
use crate::models::{City, CityInfo};
use crate::store::{Phase, StoreState};

/// What the main loop should do after an event
#[derive(Debug, PartialEq)]
pub enum ViewOutcome {
    Nothing,
    Request(Operation),
    Quit,
}

/// Fields of the add-city form, in tab order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Country,
    Lat,
    Lng,
    Notes,
}

impl FormField {
    const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Country,
        FormField::Lat,
        FormField::Lng,
        FormField::Notes,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> FormField {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> FormField {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "City",
            FormField::Country => "Country",
            FormField::Lat => "Latitude",
            FormField::Lng => "Longitude",
            FormField::Notes => "Notes",
        }
    }
}

/// Add-city form contents
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CityForm {
    values: [String; 5],
    pub active: FormField,
}

impl CityForm {
    pub fn value(&self, field: FormField) -> &str {
        &self.values[field.index()]
    }

    pub fn push(&mut self, c: char) {
        self.values[self.active.index()].push(c);
    }

    pub fn backspace(&mut self) {
        self.values[self.active.index()].pop();
    }

    /// Build the create payload, dated now
    pub fn to_city_info(&self) -> Result<CityInfo, String> {
        let name = self.value(FormField::Name).trim();
        if name.is_empty() {
            return Err("City name is required".to_string());
        }

        let mut info = CityInfo::new(name).with_date(Utc::now());

        let country = self.value(FormField::Country).trim();
        if !country.is_empty() {
            info = info.with_country(country);
        }

        let lat = self.value(FormField::Lat).trim();
        let lng = self.value(FormField::Lng).trim();
        if !lat.is_empty() || !lng.is_empty() {
            let lat: f64 = lat.parse().map_err(|_| format!("Invalid latitude '{}'", lat))?;
            let lng: f64 = lng.parse().map_err(|_| format!("Invalid longitude '{}'", lng))?;
            info = info.with_position(lat, lng);
        }

        let notes = self.value(FormField::Notes).trim();
        if !notes.is_empty() {
            info = info.with_notes(notes);
        }

        Ok(info)
    }
}

/// Presentation state of the terminal UI
#[derive(Clone, Debug, Default)]
pub struct View {
    pub selected: usize,
    pub form: Option<CityForm>,
    pub show_help: bool,
    /// Local validation message, not a store error
    pub notice: Option<String>,
}

impl View {
    pub fn input_mode(&self) -> InputMode {
        if self.form.is_some() {
            InputMode::Editing
        } else {
            InputMode::Normal
        }
    }

    /// Keep the selection inside a list of `len` cities
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn selected_city<'a>(&self, state: &'a StoreState) -> Option<&'a City> {
        state.cities.get(self.selected)
    }

    pub fn handle(&mut self, event: UiEvent, state: &StoreState) -> ViewOutcome {
        match event {
            UiEvent::SelectPrev => {
                self.selected = self.selected.saturating_sub(1);
            }
            UiEvent::SelectNext => {
                if self.selected + 1 < state.cities.len() {
                    self.selected += 1;
                }
            }

            UiEvent::OpenSelected => {
                if let Some(city) = self.selected_city(state) {
                    return ViewOutcome::Request(Operation::LoadOne(city.id.clone()));
                }
            }
            UiEvent::Reload => return ViewOutcome::Request(Operation::LoadAll),
            UiEvent::DeleteSelected => {
                if let Some(city) = self.selected_city(state) {
                    return ViewOutcome::Request(Operation::Remove(city.id.clone()));
                }
            }

            UiEvent::OpenForm => {
                self.form = Some(CityForm::default());
                self.notice = None;
            }
            UiEvent::FormChar(c) => {
                if let Some(form) = &mut self.form {
                    form.push(c);
                }
            }
            UiEvent::FormBackspace => {
                if let Some(form) = &mut self.form {
                    form.backspace();
                }
            }
            UiEvent::FormNextField => {
                if let Some(form) = &mut self.form {
                    form.active = form.active.next();
                }
            }
            UiEvent::FormPrevField => {
                if let Some(form) = &mut self.form {
                    form.active = form.active.prev();
                }
            }
            UiEvent::SubmitForm => {
                if let Some(form) = &self.form {
                    match form.to_city_info() {
                        Ok(info) => {
                            self.form = None;
                            self.notice = None;
                            return ViewOutcome::Request(Operation::Create(info));
                        }
                        Err(message) => self.notice = Some(message),
                    }
                }
            }
            UiEvent::CancelForm => {
                self.form = None;
                self.notice = None;
            }

            UiEvent::ToggleHelp => self.show_help = !self.show_help,
            UiEvent::CloseHelp => self.show_help = false,

            UiEvent::Quit => return ViewOutcome::Quit,
        }

        ViewOutcome::Nothing
    }
}

// ============================================================================
// Drawing
// ============================================================================

pub fn draw(f: &mut Frame, view: &View, state: &StoreState, base_url: &str) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title(f, state, base_url, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    draw_city_list(f, view, state, body[0]);
    draw_current_city(f, state, body[1]);
    draw_status_bar(f, view, state, chunks[2]);

    if let Some(form) = &view.form {
        draw_form_popup(f, form, view.notice.as_deref(), area);
    }

    if view.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title(f: &mut Frame, state: &StoreState, base_url: &str, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" Cities ", Style::default().fg(Color::Black).bg(Color::Green).bold()),
        Span::raw(" "),
        Span::styled(base_url.to_string(), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("  {} visited", state.cities.len()),
            Style::default().fg(Color::Gray),
        ),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_city_list(f: &mut Frame, view: &View, state: &StoreState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Visited ");

    if state.cities.is_empty() {
        let hint = match state.phase() {
            Phase::Idle | Phase::Loading => "Loading cities...",
            _ => "No cities yet. Press 'a' to add one.",
        };
        let paragraph = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = state
        .cities
        .iter()
        .map(|city| {
            let emoji = city.info.emoji().unwrap_or(" ");
            let date = city
                .info
                .date()
                .map(|d| d.format("(%b %-d, %Y)").to_string())
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", emoji)),
                Span::styled(city.display_name(), Style::default().bold()),
                Span::styled(format!(" {}", date), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(view.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_current_city(f: &mut Frame, state: &StoreState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Current city ");

    let Some(city) = &state.current_city else {
        let paragraph = Paragraph::new("Press Enter on a city to open it.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let f_label = |s: &'static str| Span::styled(s, Style::default().fg(Color::Cyan));
    let mut lines = vec![Line::from(vec![
        f_label("City name  "),
        Span::styled(
            format!("{} {}", city.info.emoji().unwrap_or(""), city.display_name()),
            Style::default().bold(),
        ),
    ])];

    if let Some(country) = city.info.country() {
        lines.push(Line::from(vec![f_label("Country    "), Span::raw(country.to_string())]));
    }
    if let Some(date) = city.info.date() {
        lines.push(Line::from(vec![
            f_label("Visited on "),
            Span::raw(date.format("%A, %B %-d, %Y").to_string()),
        ]));
    }
    if let Some(pos) = city.info.position() {
        lines.push(Line::from(vec![
            f_label("Position   "),
            Span::raw(format!("{:.4}, {:.4}", pos.lat, pos.lng)),
        ]));
    }
    if let Some(notes) = city.info.notes() {
        lines.push(Line::raw(""));
        lines.push(Line::from(f_label("Your notes")));
        lines.push(Line::raw(notes.to_string()));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!("id {}", city.id),
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_status_bar(f: &mut Frame, view: &View, state: &StoreState, area: Rect) {
    let (text, style) = if state.is_loading {
        (" Loading... ".to_string(), Style::default().fg(Color::Yellow))
    } else if let Some(error) = &state.error {
        (format!(" {} ", error), Style::default().fg(Color::Red))
    } else if view.input_mode() == InputMode::Editing {
        (
            " Tab:next field | Enter:save | Esc:cancel ".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            " ↑/↓:select | Enter:open | a:add | d:delete | r:reload | ?:help | q:quit ".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    };

    f.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_form_popup(f: &mut Frame, form: &CityForm, notice: Option<&str>, area: Rect) {
    let popup_area = centered_rect(60, 50, area);

    let mut lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|&field| {
            let focused = field == form.active;
            let label_style = if focused {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::Cyan)
            };
            let cursor = if focused { "_" } else { "" };
            Line::from(vec![
                Span::styled(format!("{:<10} ", field.label()), label_style),
                Span::raw(format!("{}{}", form.value(field), cursor)),
            ])
        })
        .collect();

    if let Some(notice) = notice {
        lines.push(Line::raw(""));
        lines.push(Line::styled(notice.to_string(), Style::default().fg(Color::Red)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Add city (Enter to save, Esc to cancel) ")
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, popup_area);
    f.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 CITIES - Keyboard Shortcuts

 LIST
   ↑ / ↓  (k / j)     Move selection
   Enter              Open selected city
   r                  Reload all cities
   d / Del            Delete selected city

 ADD CITY
   a                  Open the form
   Tab / Shift+Tab    Next / previous field
   Enter              Save
   Esc                Cancel

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
