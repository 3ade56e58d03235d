// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod list;
mod row;

pub use list::{FilterList, ListEvent, ListStep, Viewport, VisibleRow};
pub use row::{
    DESCRIPTION_MAX_CHARS, ROW_HEIGHT, ROW_LINES, ROW_SPACING, TITLE_WIDTH, privacy_glyph,
    render_row, title_column, truncate_description,
};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ghselect_app::{ActionKind, Chooser, DisplayItem, Repository};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Margin};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use std::io;

use row::{COLOR_BG, COLOR_DIM, COLOR_PRIMARY, COLOR_SECONDARY};

pub const REPOSITORY_TITLE: &str = " GH SELECT ";

const MARGIN_X: u16 = 2;
const MARGIN_Y: u16 = 1;
// title, filter line, spacer, footer
const CHROME_ROWS: u16 = 4;

const NO_MATCHES: &str = "  No matches";
const BROWSE_HINTS: &str = "↑/k up  ↓/j down  / filter  enter select  q quit";
const IDLE_FILTER_HINT: &str = "Press / to filter";
const FILTER_HINTS: &str = "↑/↓ move  enter select  esc clear filter";

pub fn action_title(repository: &Repository) -> String {
    format!(" Actions for {} ", repository.name_with_owner)
}

/// Space left for list rows once margins and chrome are taken from a
/// terminal of the given size.
pub fn list_viewport(width: u16, height: u16) -> Viewport {
    Viewport::new(
        width.saturating_sub(MARGIN_X * 2),
        height.saturating_sub(MARGIN_Y * 2 + CHROME_ROWS),
    )
}

/// Maps a terminal key to a list event. Browse mode treats letters as
/// commands; filter mode treats them as query text.
pub fn key_to_event(filtering: bool, has_query: bool, key: KeyEvent) -> Option<ListEvent> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(ListEvent::Cancel),
            KeyCode::Char('u') if filtering => Some(ListEvent::ClearQuery),
            KeyCode::Char('p') => Some(ListEvent::Up),
            KeyCode::Char('n') => Some(ListEvent::Down),
            _ => None,
        };
    }

    if filtering {
        return match key.code {
            KeyCode::Char(ch) => Some(ListEvent::Insert(ch)),
            KeyCode::Backspace => Some(ListEvent::Backspace),
            KeyCode::Up => Some(ListEvent::Up),
            KeyCode::Down => Some(ListEvent::Down),
            KeyCode::PageUp => Some(ListEvent::PageUp),
            KeyCode::PageDown => Some(ListEvent::PageDown),
            KeyCode::Enter => Some(ListEvent::Confirm),
            KeyCode::Esc => Some(ListEvent::ResetFilter),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(ListEvent::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(ListEvent::Up),
        KeyCode::Char('g') | KeyCode::Home => Some(ListEvent::Home),
        KeyCode::Char('G') | KeyCode::End => Some(ListEvent::End),
        KeyCode::PageUp => Some(ListEvent::PageUp),
        KeyCode::PageDown => Some(ListEvent::PageDown),
        KeyCode::Char('/') => Some(ListEvent::FocusFilter),
        KeyCode::Enter => Some(ListEvent::Confirm),
        KeyCode::Char('q') => Some(ListEvent::Cancel),
        KeyCode::Esc if has_query => Some(ListEvent::ResetFilter),
        KeyCode::Esc => Some(ListEvent::Cancel),
        _ => None,
    }
}

fn filter_line_text<T: DisplayItem>(list: &FilterList<T>) -> String {
    if list.is_filtering() {
        format!("Filter: {}_", list.query())
    } else if !list.query().is_empty() {
        format!("Filter: {}", list.query())
    } else {
        IDLE_FILTER_HINT.to_owned()
    }
}

fn footer_text<T: DisplayItem>(list: &FilterList<T>) -> String {
    let position = list.cursor().map_or(0, |cursor| cursor + 1);
    let counter = if list.filtered_len() == list.items().len() {
        format!("{position}/{}", list.filtered_len())
    } else {
        format!(
            "{position}/{} (of {})",
            list.filtered_len(),
            list.items().len()
        )
    };
    let hints = if list.is_filtering() {
        FILTER_HINTS
    } else {
        BROWSE_HINTS
    };
    format!("{counter}  {hints}")
}

pub fn render_picker<T: DisplayItem>(frame: &mut Frame<'_>, title: &str, list: &FilterList<T>) {
    let area = frame.area().inner(Margin::new(MARGIN_X, MARGIN_Y));
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let title_style = Style::default()
        .fg(COLOR_BG)
        .bg(COLOR_SECONDARY)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(title.to_owned(), title_style))),
        layout[0],
    );
    frame.render_widget(
        Paragraph::new(filter_line_text(list)).style(Style::default().fg(COLOR_PRIMARY)),
        layout[1],
    );

    let rows_area = layout[3];
    let mut lines = Vec::new();
    if list.filtered_len() == 0 {
        lines.push(Line::from(Span::styled(
            NO_MATCHES,
            Style::default().fg(COLOR_DIM),
        )));
    } else {
        for row in list.visible_rows() {
            lines.extend(render_row(row.item, row.highlighted, rows_area.width));
            lines.extend((0..ROW_SPACING).map(|_| Line::default()));
        }
    }
    frame.render_widget(Paragraph::new(lines), rows_area);

    frame.render_widget(
        Paragraph::new(footer_text(list)).style(Style::default().fg(COLOR_DIM)),
        layout[4],
    );
}

/// Runs the draw/read loop until the list is confirmed or cancelled.
/// Events come from `next_event`, so any backend and any event source
/// can drive it.
pub fn drive_picker<B, T, F>(
    terminal: &mut Terminal<B>,
    title: &str,
    list: &mut FilterList<T>,
    mut next_event: F,
) -> Result<ListStep>
where
    B: Backend,
    T: DisplayItem,
    F: FnMut() -> Result<Event>,
{
    let size = terminal.size().context("read terminal size")?;
    list.apply(ListEvent::Resize(list_viewport(size.width, size.height)));

    loop {
        terminal
            .draw(|frame| render_picker(frame, title, list))
            .context("draw frame")?;

        let event = match next_event()? {
            Event::Key(key) => key_to_event(list.is_filtering(), !list.query().is_empty(), key),
            Event::Resize(width, height) => Some(ListEvent::Resize(list_viewport(width, height))),
            _ => None,
        };
        if let Some(event) = event {
            match list.apply(event) {
                ListStep::Continue => {}
                step => return Ok(step),
            }
        }
    }
}

/// Shows `items` full screen and returns the confirmed one. The terminal
/// is restored on every exit path.
pub fn run_picker<T: DisplayItem>(title: &str, items: Vec<T>) -> Result<Option<T>> {
    enable_raw_mode().context("enable raw mode")?;
    if let Err(error) = execute!(io::stdout(), terminal::EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(error).context("enter alternate screen");
    }

    let picked = picker_session(title, items);
    let restored = restore_terminal();
    let picked = picked?;
    restored?;
    Ok(picked)
}

fn picker_session<T: DisplayItem>(title: &str, items: Vec<T>) -> Result<Option<T>> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.hide_cursor().context("hide cursor")?;

    let mut list = FilterList::new(items, Viewport::default());
    let step = drive_picker(&mut terminal, title, &mut list, || {
        event::read().context("read event")
    })?;

    Ok(match step {
        ListStep::Confirmed(Some(index)) => list.into_item(index),
        ListStep::Confirmed(None) | ListStep::Cancelled | ListStep::Continue => None,
    })
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(
        io::stdout(),
        terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )
    .context("leave alternate screen")?;
    Ok(())
}

/// Chooser backed by the real terminal: one full-screen picker per phase.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalChooser;

impl Chooser for TerminalChooser {
    fn choose_repository(&mut self, repositories: &[Repository]) -> Result<Option<Repository>> {
        run_picker(REPOSITORY_TITLE, repositories.to_vec())
    }

    fn choose_action(&mut self, repository: &Repository) -> Result<Option<ActionKind>> {
        run_picker(&action_title(repository), ActionKind::ALL.to_vec())
    }
}
