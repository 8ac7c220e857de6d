//! Event polling and key dispatch.

use super::app::ListApp;
use super::theme::toggle_theme;
use crate::export::ExportFormat;
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

/// Application event
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Poll timeout
    Tick,
    Resize(u16, u16),
}

/// Event handler
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler polling every `tick_rate` milliseconds.
    pub const fn new(tick_rate: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event, std::io::Error> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(Event::Key(key)),
                CrosstermEvent::Mouse(mouse) => Ok(Event::Mouse(mouse)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(250)
    }
}

/// Handle key events and update app state
pub fn handle_key_event(app: &mut ListApp, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    // The highlight prompt captures all input while open
    if app.input.is_some() {
        match key.code {
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Enter => app.submit_input(),
            KeyCode::Backspace => app.pop_input(),
            KeyCode::Char(c) => app.push_input(c),
            _ => {}
        }
        return;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?' | 'q')) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),

        KeyCode::Char('p') => app.toggle_price_mode(),
        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Char('c') => app.toggle_chart(),
        KeyCode::Char('%') => app.toggle_chart_percentage(),
        KeyCode::Char('m' | ' ') => app.toggle_selected_mark(),
        KeyCode::Char('e') => app.toggle_all_histories(),
        KeyCode::Enter => app.toggle_selected_history(),
        KeyCode::Char('/') => app.start_highlight_input(),

        KeyCode::Char('J') => app.export(ExportFormat::Json),
        KeyCode::Char('C') => app.export(ExportFormat::Csv),
        KeyCode::Char('y') => app.show_share_string(),

        KeyCode::Char('t') => {
            let name = toggle_theme();
            app.status.set(format!("Theme: {name}"));
        }
        _ => {}
    }
}

/// Scroll the selection with the mouse wheel.
pub fn handle_mouse_event(app: &mut ListApp, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.select_next(),
        MouseEventKind::ScrollUp => app.select_prev(),
        _ => {}
    }
}
