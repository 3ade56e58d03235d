// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;

use crate::{ActionKind, Repository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    NoRepository,
    Chosen {
        repository: Repository,
        action: Option<ActionKind>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionStage {
    AwaitingRepository,
    AwaitingAction(Repository),
    Done(SelectionOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    AwaitingRepository,
    AwaitingAction,
    Done,
}

impl SelectionStage {
    pub const fn kind(&self) -> StageKind {
        match self {
            Self::AwaitingRepository => StageKind::AwaitingRepository,
            Self::AwaitingAction(_) => StageKind::AwaitingAction,
            Self::Done(_) => StageKind::Done,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowCommand {
    ConfirmRepository(Repository),
    CancelRepository,
    ConfirmAction(ActionKind),
    CancelAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    StageChanged(StageKind),
    Ignored(FlowCommand),
}

/// Two-phase selection: repository first, then an action for it. `Done`
/// is terminal; commands that do not fit the current stage are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionFlow {
    stage: SelectionStage,
}

impl Default for SelectionFlow {
    fn default() -> Self {
        Self {
            stage: SelectionStage::AwaitingRepository,
        }
    }
}

impl SelectionFlow {
    pub fn stage(&self) -> &SelectionStage {
        &self.stage
    }

    pub fn is_done(&self) -> bool {
        matches!(self.stage, SelectionStage::Done(_))
    }

    pub fn outcome(&self) -> Option<&SelectionOutcome> {
        match &self.stage {
            SelectionStage::Done(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn dispatch(&mut self, command: FlowCommand) -> Vec<FlowEvent> {
        let next = match (&self.stage, command) {
            (SelectionStage::AwaitingRepository, FlowCommand::ConfirmRepository(repository)) => {
                SelectionStage::AwaitingAction(repository)
            }
            (SelectionStage::AwaitingRepository, FlowCommand::CancelRepository) => {
                SelectionStage::Done(SelectionOutcome::NoRepository)
            }
            (SelectionStage::AwaitingAction(repository), FlowCommand::ConfirmAction(action)) => {
                SelectionStage::Done(SelectionOutcome::Chosen {
                    repository: repository.clone(),
                    action: Some(action),
                })
            }
            (SelectionStage::AwaitingAction(repository), FlowCommand::CancelAction) => {
                SelectionStage::Done(SelectionOutcome::Chosen {
                    repository: repository.clone(),
                    action: None,
                })
            }
            (_, command) => return vec![FlowEvent::Ignored(command)],
        };

        self.stage = next;
        vec![FlowEvent::StageChanged(self.stage.kind())]
    }
}

/// Interactive side of the flow. Each call runs one picker phase and
/// returns `None` when the user cancels it.
pub trait Chooser {
    fn choose_repository(&mut self, repositories: &[Repository]) -> Result<Option<Repository>>;
    fn choose_action(&mut self, repository: &Repository) -> Result<Option<ActionKind>>;
}

pub fn run_selection<C: Chooser>(
    repositories: &[Repository],
    chooser: &mut C,
) -> Result<SelectionOutcome> {
    let mut flow = SelectionFlow::default();
    loop {
        let command = match flow.stage() {
            SelectionStage::AwaitingRepository => match chooser.choose_repository(repositories)? {
                Some(repository) => FlowCommand::ConfirmRepository(repository),
                None => FlowCommand::CancelRepository,
            },
            SelectionStage::AwaitingAction(repository) => {
                match chooser.choose_action(repository)? {
                    Some(action) => FlowCommand::ConfirmAction(action),
                    None => FlowCommand::CancelAction,
                }
            }
            SelectionStage::Done(outcome) => return Ok(outcome.clone()),
        };
        flow.dispatch(command);
    }
}
