//! UI events - messages from the terminal to the view

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // List navigation
    SelectPrev,
    SelectNext,

    // Store operations
    OpenSelected,
    Reload,
    DeleteSelected,

    // Add-city form
    OpenForm,
    FormChar(char),
    FormBackspace,
    FormNextField,
    FormPrevField,
    SubmitForm,
    CancelForm,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// The add-city form has focus
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, input_mode: InputMode, show_help: bool) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
            KeyCode::Enter => Some(UiEvent::OpenSelected),
            KeyCode::Char('r') => Some(UiEvent::Reload),
            KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::DeleteSelected),
            KeyCode::Char('a') => Some(UiEvent::OpenForm),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::CancelForm),
            KeyCode::Enter => Some(UiEvent::SubmitForm),
            KeyCode::Tab | KeyCode::Down => Some(UiEvent::FormNextField),
            KeyCode::BackTab | KeyCode::Up => Some(UiEvent::FormPrevField),
            KeyCode::Backspace => Some(UiEvent::FormBackspace),
            KeyCode::Char(c) => Some(UiEvent::FormChar(c)),
            _ => None,
        },
    }
}
