// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Filter, Todo, TodoId};

/// User actions raised by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ToggleAll { completed: bool },
    NewTodo(String),
    ItemRemove { id: TodoId },
    RemoveCompleted,
    ItemToggle { id: TodoId, completed: bool },
    ItemEdit { id: TodoId },
    ItemEditDone { id: TodoId, title: String },
    ItemEditCancel { id: TodoId },
}

impl UiEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ToggleAll { .. } => "toggleAll",
            Self::NewTodo(_) => "newTodo",
            Self::ItemRemove { .. } => "itemRemove",
            Self::RemoveCompleted => "removeCompleted",
            Self::ItemToggle { .. } => "itemToggle",
            Self::ItemEdit { .. } => "itemEdit",
            Self::ItemEditDone { .. } => "itemEditDone",
            Self::ItemEditCancel { .. } => "itemEditCancel",
        }
    }
}

/// Instructions sent to a view. The controller never reads view state back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    ShowEntries(Vec<Todo>),
    ContentBlockVisibility { visible: bool },
    ToggleAll { checked: bool },
    SetFilter(Filter),
    ClearCompletedButton { completed: usize, visible: bool },
    ClearNewTodo,
    RemoveItem(TodoId),
    UpdateElementCount(usize),
    ElementComplete { id: TodoId, completed: bool },
    EditItem { id: TodoId, title: String },
    EditItemDone { id: TodoId, title: String },
    ReportError(String),
}

impl RenderCommand {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ShowEntries(_) => "showEntries",
            Self::ContentBlockVisibility { .. } => "contentBlockVisibility",
            Self::ToggleAll { .. } => "toggleAll",
            Self::SetFilter(_) => "setFilter",
            Self::ClearCompletedButton { .. } => "clearCompletedButton",
            Self::ClearNewTodo => "clearNewTodo",
            Self::RemoveItem(_) => "removeItem",
            Self::UpdateElementCount(_) => "updateElementCount",
            Self::ElementComplete { .. } => "elementComplete",
            Self::EditItem { .. } => "editItem",
            Self::EditItemDone { .. } => "editItemDone",
            Self::ReportError(_) => "reportError",
        }
    }
}
