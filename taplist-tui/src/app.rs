//! Application state and event loop

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use taplist_client::{BreweryBrowser, PAGE_SIZES};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::ui;

/// Which pane owns plain keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Table,
}

/// Next page size in the cycle the listing offers
fn next_page_size(current: u32) -> u32 {
    let position = PAGE_SIZES.iter().position(|&size| size == current);
    match position {
        Some(index) => PAGE_SIZES[(index + 1) % PAGE_SIZES.len()],
        None => PAGE_SIZES[0],
    }
}

pub struct App {
    browser: BreweryBrowser,
    input: Input,
    focus: Focus,
    quit: bool,
}

impl App {
    pub fn new(browser: BreweryBrowser) -> Self {
        Self {
            browser,
            input: Input::default(),
            focus: Focus::Search,
            quit: false,
        }
    }

    /// Drive the terminal until the user quits.
    ///
    /// Redraws on every input event and on every fetch state publication.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut events = EventStream::new();
        while !self.quit {
            let snapshot = self.browser.snapshot();
            terminal.draw(|frame| ui::draw(frame, &snapshot, &self.input, self.focus))?;

            tokio::select! {
                event = events.next() => {
                    let Some(event) = event.transpose()? else { break };
                    self.handle_event(event);
                }
                _ = self.browser.changed() => {}
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }
        if key.code == KeyCode::Tab {
            self.focus = match self.focus {
                Focus::Search => Focus::Table,
                Focus::Table => Focus::Search,
            };
            return;
        }
        match self.focus {
            Focus::Search => self.handle_search_key(key),
            Focus::Table => self.handle_table_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.focus = Focus::Table,
            _ => {
                let before = self.input.value().to_string();
                self.input.handle_event(&Event::Key(key));
                if self.input.value() != before {
                    self.browser.set_search(self.input.value());
                }
            }
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Left => {
                let page = self.browser.query().page;
                self.browser.set_page(page.saturating_sub(1));
            }
            KeyCode::Right => {
                let snapshot = self.browser.snapshot();
                if snapshot.page < snapshot.page_count {
                    self.browser.set_page(snapshot.page + 1);
                }
            }
            KeyCode::Char('s') => {
                let next = next_page_size(self.browser.query().per_page);
                self.browser.set_per_page(next);
            }
            KeyCode::Char('n') => self.browser.sort_by("name"),
            KeyCode::Char('c') => self.browser.sort_by("city"),
            KeyCode::Char('y') => self.browser.sort_by("country"),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_page_size_cycles() {
        assert_eq!(next_page_size(5), 10);
        assert_eq!(next_page_size(10), 20);
        assert_eq!(next_page_size(20), 50);
        assert_eq!(next_page_size(50), 5);
    }

    #[test]
    fn test_next_page_size_recovers_from_unknown_value() {
        assert_eq!(next_page_size(7), 5);
    }
}
