// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ghselect_app::{ActionKind, Chooser, Repository, SelectionOutcome, run_selection};
use ghselect_testkit::scenario_repositories;
use ghselect_tui::{FilterList, ListStep, REPOSITORY_TITLE, Viewport, action_title, drive_picker};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::collections::VecDeque;

/// Chooser that drives the real picker loop against an in-memory terminal
/// with a fixed list of key presses.
struct ScriptedChooser {
    terminal: Terminal<TestBackend>,
    keys: VecDeque<KeyEvent>,
    titles: Vec<String>,
}

impl ScriptedChooser {
    fn new(keys: &[KeyCode]) -> Result<Self> {
        Ok(Self {
            terminal: Terminal::new(TestBackend::new(90, 24))?,
            keys: keys
                .iter()
                .map(|code| KeyEvent::new(*code, KeyModifiers::NONE))
                .collect(),
            titles: Vec::new(),
        })
    }

    fn pick<T: ghselect_app::DisplayItem>(
        &mut self,
        title: &str,
        items: Vec<T>,
    ) -> Result<Option<T>> {
        self.titles.push(title.to_owned());
        let mut list = FilterList::new(items, Viewport::default());
        let keys = &mut self.keys;
        let step = drive_picker(&mut self.terminal, title, &mut list, || {
            keys.pop_front().map(Event::Key).context("key script exhausted")
        })?;
        Ok(match step {
            ListStep::Confirmed(Some(index)) => list.into_item(index),
            _ => None,
        })
    }
}

impl Chooser for ScriptedChooser {
    fn choose_repository(&mut self, repositories: &[Repository]) -> Result<Option<Repository>> {
        self.pick(REPOSITORY_TITLE, repositories.to_vec())
    }

    fn choose_action(&mut self, repository: &Repository) -> Result<Option<ActionKind>> {
        let title = action_title(repository);
        self.pick(&title, ActionKind::ALL.to_vec())
    }
}

#[test]
fn filter_then_confirm_selects_clone_for_web() -> Result<()> {
    let mut chooser = ScriptedChooser::new(&[
        KeyCode::Char('/'),
        KeyCode::Char('w'),
        KeyCode::Char('e'),
        KeyCode::Char('b'),
        KeyCode::Enter,
        KeyCode::Enter,
    ])?;

    let outcome = run_selection(&scenario_repositories(), &mut chooser)?;
    assert_eq!(
        outcome,
        SelectionOutcome::Chosen {
            repository: Repository::new("acme/web", "frontend app").private(),
            action: Some(ActionKind::Clone),
        }
    );
    assert_eq!(
        chooser.titles,
        vec![" GH SELECT ".to_owned(), " Actions for acme/web ".to_owned()]
    );
    assert!(chooser.keys.is_empty());
    Ok(())
}

#[test]
fn quitting_repository_list_selects_nothing() -> Result<()> {
    let mut chooser = ScriptedChooser::new(&[KeyCode::Char('q')])?;
    let outcome = run_selection(&scenario_repositories(), &mut chooser)?;
    assert_eq!(outcome, SelectionOutcome::NoRepository);
    assert_eq!(chooser.titles.len(), 1);
    Ok(())
}

#[test]
fn cancelling_action_list_keeps_repository() -> Result<()> {
    let mut chooser = ScriptedChooser::new(&[KeyCode::Down, KeyCode::Enter, KeyCode::Esc])?;
    let outcome = run_selection(&scenario_repositories(), &mut chooser)?;
    assert_eq!(
        outcome,
        SelectionOutcome::Chosen {
            repository: Repository::new("acme/web", "frontend app").private(),
            action: None,
        }
    );
    Ok(())
}

#[test]
fn navigating_action_list_picks_print() -> Result<()> {
    let mut chooser = ScriptedChooser::new(&[KeyCode::Enter, KeyCode::Char('G'), KeyCode::Enter])?;
    let outcome = run_selection(&scenario_repositories(), &mut chooser)?;
    assert_eq!(
        outcome,
        SelectionOutcome::Chosen {
            repository: Repository::new("acme/api", ""),
            action: Some(ActionKind::Print),
        }
    );
    Ok(())
}

#[test]
fn confirming_empty_filter_result_selects_nothing() -> Result<()> {
    let mut chooser = ScriptedChooser::new(&[
        KeyCode::Char('/'),
        KeyCode::Char('z'),
        KeyCode::Char('z'),
        KeyCode::Enter,
    ])?;
    let outcome = run_selection(&scenario_repositories(), &mut chooser)?;
    assert_eq!(outcome, SelectionOutcome::NoRepository);
    Ok(())
}
