// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::{
    Filter, RenderCommand, Todo, TodoCounts, TodoId, TodoPatch, TodoQuery, UiEvent,
    normalize_title,
};

/// Storage the controller reads from and writes to. Each call completes
/// before the controller issues the next one.
pub trait TodoModel {
    fn read(&mut self, query: TodoQuery) -> Result<Vec<Todo>>;
    fn count(&mut self) -> Result<TodoCounts>;
    fn create(&mut self, title: &str) -> Result<TodoId>;
    fn update(&mut self, id: TodoId, patch: &TodoPatch) -> Result<()>;
    fn remove(&mut self, id: TodoId) -> Result<()>;
}

pub trait TodoView {
    fn render(&mut self, command: RenderCommand);
}

/// Routes UI events to the model and projects the model back onto the view.
///
/// The model is the source of truth: every mutation is followed by a fresh
/// read instead of patching the view in place. The only state kept here is
/// the filter from the last route and the entries last sent to the view.
pub struct Controller<M, V> {
    model: M,
    view: V,
    filter: Filter,
    entries: Vec<Todo>,
}

impl<M: TodoModel, V: TodoView> Controller<M, V> {
    pub fn new(model: M, view: V) -> Self {
        Self {
            model,
            view,
            filter: Filter::All,
            entries: Vec::new(),
        }
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn entries(&self) -> &[Todo] {
        &self.entries
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_parts(self) -> (M, V) {
        (self.model, self.view)
    }

    pub fn set_view(&mut self, route: &str) {
        let filter = Filter::from_route(route);
        debug!(route, filter = filter.as_str(), "set view");
        self.filter = filter;

        let outcome = self.refresh().map(|()| {
            self.view.render(RenderCommand::SetFilter(filter));
        });
        if let Err(error) = outcome {
            self.report(&format!("show {} todos", filter.label()), &error);
        }
    }

    pub fn handle(&mut self, event: UiEvent) {
        debug!(event = event.name(), "ui event");
        let action = describe(&event);

        let outcome = match event {
            UiEvent::ToggleAll { completed } => self.toggle_all(completed),
            UiEvent::NewTodo(title) => self.add_item(&title),
            UiEvent::ItemRemove { id } => self.remove_item(id),
            UiEvent::RemoveCompleted => self.remove_completed(),
            UiEvent::ItemToggle { id, completed } => self.toggle_item(id, completed),
            UiEvent::ItemEdit { id } => {
                self.edit_item(id);
                Ok(())
            }
            UiEvent::ItemEditDone { id, title } => self.save_item(id, &title),
            UiEvent::ItemEditCancel { id } => {
                self.cancel_edit(id);
                Ok(())
            }
        };

        if let Err(error) = outcome {
            self.report(&action, &error);
        }
    }

    fn toggle_all(&mut self, completed: bool) -> Result<()> {
        let todos = self.model.read(TodoQuery::All).context("read all todos")?;
        let patch = TodoPatch::completed(completed);
        for todo in &todos {
            self.model
                .update(todo.id, &patch)
                .with_context(|| format!("update todo {}", todo.id))?;
        }
        self.refresh()
    }

    fn add_item(&mut self, raw_title: &str) -> Result<()> {
        let Some(title) = normalize_title(raw_title) else {
            debug!("ignoring blank new todo");
            return Ok(());
        };

        self.model.create(&title).context("create todo")?;
        self.refresh()?;
        self.view.render(RenderCommand::ClearNewTodo);
        Ok(())
    }

    fn remove_item(&mut self, id: TodoId) -> Result<()> {
        self.model.remove(id)?;
        self.entries.retain(|todo| todo.id != id);
        self.view.render(RenderCommand::RemoveItem(id));
        self.update_count()
    }

    fn remove_completed(&mut self) -> Result<()> {
        let completed = self
            .model
            .read(TodoQuery::Completed(true))
            .context("read completed todos")?;
        for todo in completed {
            self.model
                .remove(todo.id)
                .with_context(|| format!("remove todo {}", todo.id))?;
            self.entries.retain(|entry| entry.id != todo.id);
            self.view.render(RenderCommand::RemoveItem(todo.id));
        }
        self.update_count()
    }

    fn toggle_item(&mut self, id: TodoId, completed: bool) -> Result<()> {
        self.model.update(id, &TodoPatch::completed(completed))?;
        if let Some(entry) = self.entries.iter_mut().find(|todo| todo.id == id) {
            entry.completed = completed;
        }
        self.view
            .render(RenderCommand::ElementComplete { id, completed });
        self.update_count()?;

        // A toggled item may have left the active or completed slice.
        if self.filter != Filter::All {
            self.show_entries()?;
        }
        Ok(())
    }

    fn edit_item(&mut self, id: TodoId) {
        match self.displayed_title(id) {
            Some(title) => self.view.render(RenderCommand::EditItem { id, title }),
            None => warn!(id = id.get(), "edit requested for todo that is not displayed"),
        }
    }

    fn save_item(&mut self, id: TodoId, raw_title: &str) -> Result<()> {
        let Some(title) = normalize_title(raw_title) else {
            return self.remove_item(id);
        };

        self.model.update(id, &TodoPatch::title(title.clone()))?;
        if let Some(entry) = self.entries.iter_mut().find(|todo| todo.id == id) {
            entry.title.clone_from(&title);
        }
        self.view.render(RenderCommand::EditItemDone { id, title });
        Ok(())
    }

    fn cancel_edit(&mut self, id: TodoId) {
        match self.displayed_title(id) {
            Some(title) => self
                .view
                .render(RenderCommand::EditItemDone { id, title }),
            None => warn!(id = id.get(), "edit cancelled for todo that is not displayed"),
        }
    }

    fn refresh(&mut self) -> Result<()> {
        self.show_entries()?;
        self.update_count()
    }

    fn show_entries(&mut self) -> Result<()> {
        let todos = self
            .model
            .read(self.filter.query())
            .with_context(|| format!("read {} todos", self.filter.label().to_lowercase()))?;
        self.entries.clone_from(&todos);
        self.view.render(RenderCommand::ShowEntries(todos));
        Ok(())
    }

    fn update_count(&mut self) -> Result<()> {
        let counts = self.model.count().context("count todos")?;
        self.view
            .render(RenderCommand::UpdateElementCount(counts.active));
        self.view.render(RenderCommand::ClearCompletedButton {
            completed: counts.completed,
            visible: counts.completed > 0,
        });
        self.view.render(RenderCommand::ContentBlockVisibility {
            visible: counts.has_items(),
        });
        self.view.render(RenderCommand::ToggleAll {
            checked: counts.all_completed(),
        });
        Ok(())
    }

    fn displayed_title(&self, id: TodoId) -> Option<String> {
        self.entries
            .iter()
            .find(|todo| todo.id == id)
            .map(|todo| todo.title.clone())
    }

    fn report(&mut self, action: &str, error: &anyhow::Error) {
        warn!(action, error = %format!("{error:#}"), "todo action failed");
        self.view
            .render(RenderCommand::ReportError(format!("{action} failed: {error:#}")));
    }
}

fn describe(event: &UiEvent) -> String {
    match event {
        UiEvent::ToggleAll { completed: true } => "mark all todos completed".to_owned(),
        UiEvent::ToggleAll { completed: false } => "mark all todos active".to_owned(),
        UiEvent::NewTodo(_) => "add todo".to_owned(),
        UiEvent::ItemRemove { id } => format!("remove todo {id}"),
        UiEvent::RemoveCompleted => "clear completed todos".to_owned(),
        UiEvent::ItemToggle { id, .. } => format!("toggle todo {id}"),
        UiEvent::ItemEdit { id } => format!("edit todo {id}"),
        UiEvent::ItemEditDone { id, .. } => format!("save todo {id}"),
        UiEvent::ItemEditCancel { id } => format!("cancel edit of todo {id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{Controller, TodoModel, TodoView};
    use crate::{Filter, RenderCommand, Todo, TodoCounts, TodoId, TodoPatch, TodoQuery, UiEvent};
    use anyhow::{Result, anyhow, bail};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum ModelCall {
        Read(TodoQuery),
        Count,
        Create(String),
        Update(TodoId, TodoPatch),
        Remove(TodoId),
    }

    #[derive(Debug, Default)]
    struct FakeModel {
        todos: Vec<Todo>,
        next_id: i64,
        calls: Vec<ModelCall>,
        fail_remove: bool,
    }

    impl FakeModel {
        fn with_todos(todos: Vec<Todo>) -> Self {
            let next_id = todos.iter().map(|todo| todo.id.get()).max().unwrap_or(0) + 1;
            Self {
                todos,
                next_id,
                ..Self::default()
            }
        }

        fn updates(&self) -> Vec<(TodoId, TodoPatch)> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    ModelCall::Update(id, patch) => Some((*id, patch.clone())),
                    _ => None,
                })
                .collect()
        }

        fn removals(&self) -> Vec<TodoId> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    ModelCall::Remove(id) => Some(*id),
                    _ => None,
                })
                .collect()
        }
    }

    impl TodoModel for FakeModel {
        fn read(&mut self, query: TodoQuery) -> Result<Vec<Todo>> {
            self.calls.push(ModelCall::Read(query));
            Ok(self
                .todos
                .iter()
                .filter(|todo| todo.matches(query))
                .cloned()
                .collect())
        }

        fn count(&mut self) -> Result<TodoCounts> {
            self.calls.push(ModelCall::Count);
            Ok(TodoCounts::tally(&self.todos))
        }

        fn create(&mut self, title: &str) -> Result<TodoId> {
            self.calls.push(ModelCall::Create(title.to_owned()));
            let id = TodoId::new(self.next_id);
            self.next_id += 1;
            self.todos.push(Todo {
                id,
                title: title.to_owned(),
                completed: false,
            });
            Ok(id)
        }

        fn update(&mut self, id: TodoId, patch: &TodoPatch) -> Result<()> {
            self.calls.push(ModelCall::Update(id, patch.clone()));
            let todo = self
                .todos
                .iter_mut()
                .find(|todo| todo.id == id)
                .ok_or_else(|| anyhow!("todo {id} not found"))?;
            if let Some(title) = &patch.title {
                todo.title.clone_from(title);
            }
            if let Some(completed) = patch.completed {
                todo.completed = completed;
            }
            Ok(())
        }

        fn remove(&mut self, id: TodoId) -> Result<()> {
            self.calls.push(ModelCall::Remove(id));
            if self.fail_remove {
                bail!("database is locked");
            }
            self.todos.retain(|todo| todo.id != id);
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct RecordingView {
        commands: Vec<RenderCommand>,
    }

    impl TodoView for RecordingView {
        fn render(&mut self, command: RenderCommand) {
            self.commands.push(command);
        }
    }

    impl RecordingView {
        fn rendered(&self, command: &RenderCommand) -> bool {
            self.commands.contains(command)
        }

        fn last_entries(&self) -> Option<&[Todo]> {
            self.commands.iter().rev().find_map(|command| match command {
                RenderCommand::ShowEntries(todos) => Some(todos.as_slice()),
                _ => None,
            })
        }
    }

    type TestController = Controller<FakeModel, RecordingView>;

    fn todo(id: i64, title: &str, completed: bool) -> Todo {
        Todo {
            id: TodoId::new(id),
            title: title.to_owned(),
            completed,
        }
    }

    fn controller_with(todos: Vec<Todo>) -> TestController {
        Controller::new(FakeModel::with_todos(todos), RecordingView::default())
    }

    fn started_with(todos: Vec<Todo>) -> TestController {
        let mut controller = controller_with(todos);
        controller.set_view("");
        controller.view_mut().commands.clear();
        controller.model_mut().calls.clear();
        controller
    }

    #[test]
    fn shows_entries_on_start_up() {
        let item = todo(1, "my todo", false);
        let mut controller = controller_with(vec![item.clone()]);

        controller.set_view("");

        assert!(
            controller
                .view()
                .rendered(&RenderCommand::ShowEntries(vec![item]))
        );
    }

    #[test]
    fn all_route_shows_every_entry() {
        let items = vec![todo(1, "open", false), todo(2, "done", true)];
        let mut controller = controller_with(items.clone());

        controller.set_view("#/");

        assert_eq!(controller.filter(), Filter::All);
        assert_eq!(controller.model().calls[0], ModelCall::Read(TodoQuery::All));
        assert!(
            controller
                .view()
                .rendered(&RenderCommand::ShowEntries(items))
        );
    }

    #[test]
    fn active_route_reads_incomplete_todos() {
        let active = todo(1, "my active todo", false);
        let mut controller = controller_with(vec![active.clone(), todo(2, "done", true)]);

        controller.set_view("#/active");

        assert_eq!(
            controller.model().calls[0],
            ModelCall::Read(TodoQuery::Completed(false))
        );
        assert!(
            controller
                .view()
                .rendered(&RenderCommand::ShowEntries(vec![active]))
        );
    }

    #[test]
    fn completed_route_reads_completed_todos() {
        let completed = todo(1, "my completed todo", true);
        let mut controller = controller_with(vec![completed.clone(), todo(2, "open", false)]);

        controller.set_view("#/completed");

        assert_eq!(
            controller.model().calls[0],
            ModelCall::Read(TodoQuery::Completed(true))
        );
        assert!(
            controller
                .view()
                .rendered(&RenderCommand::ShowEntries(vec![completed]))
        );
    }

    #[test]
    fn show_entries_matches_filter_for_every_route() {
        let lists = [
            vec![],
            vec![todo(1, "a", false)],
            vec![todo(1, "a", true)],
            vec![todo(1, "a", false), todo(2, "b", true), todo(3, "c", false)],
        ];

        for list in lists {
            for filter in Filter::ALL {
                let mut controller = controller_with(list.clone());
                controller.set_view(filter.route());

                let expected: Vec<Todo> = list
                    .iter()
                    .filter(|item| item.matches(filter.query()))
                    .cloned()
                    .collect();
                assert_eq!(
                    controller.view().last_entries(),
                    Some(expected.as_slice()),
                    "filter {filter:?}"
                );
                assert_eq!(controller.entries(), expected.as_slice());
            }
        }
    }

    #[test]
    fn content_block_visibility_tracks_list() {
        let mut shown = controller_with(vec![todo(1, "my todo", true)]);
        shown.set_view("");
        assert!(
            shown
                .view()
                .rendered(&RenderCommand::ContentBlockVisibility { visible: true })
        );

        let mut hidden = controller_with(Vec::new());
        hidden.set_view("");
        assert!(
            hidden
                .view()
                .rendered(&RenderCommand::ContentBlockVisibility { visible: false })
        );
    }

    #[test]
    fn content_block_stays_visible_when_filter_is_empty() {
        let mut controller = controller_with(vec![todo(1, "done", true)]);
        controller.set_view("#/active");

        assert!(
            controller
                .view()
                .rendered(&RenderCommand::ShowEntries(Vec::new()))
        );
        assert!(
            controller
                .view()
                .rendered(&RenderCommand::ContentBlockVisibility { visible: true })
        );
    }

    #[test]
    fn toggle_all_checkbox_requires_every_item_completed() {
        let mut all_done = controller_with(vec![todo(1, "a", true), todo(2, "b", true)]);
        all_done.set_view("");
        assert!(
            all_done
                .view()
                .rendered(&RenderCommand::ToggleAll { checked: true })
        );

        let mut mixed = controller_with(vec![todo(1, "a", true), todo(2, "b", false)]);
        mixed.set_view("");
        assert!(
            mixed
                .view()
                .rendered(&RenderCommand::ToggleAll { checked: false })
        );

        let mut empty = controller_with(Vec::new());
        empty.set_view("");
        assert!(
            empty
                .view()
                .rendered(&RenderCommand::ToggleAll { checked: false })
        );
    }

    #[test]
    fn clear_completed_button_reflects_completed_count() {
        let mut controller = controller_with(vec![todo(42, "my todo", true)]);

        controller.set_view("");

        assert!(
            controller
                .view()
                .rendered(&RenderCommand::ClearCompletedButton {
                    completed: 1,
                    visible: true,
                })
        );
    }

    #[test]
    fn clear_completed_button_hidden_without_completed_items() {
        let mut controller = controller_with(vec![todo(1, "open", false)]);

        controller.set_view("");

        assert!(
            controller
                .view()
                .rendered(&RenderCommand::ClearCompletedButton {
                    completed: 0,
                    visible: false,
                })
        );
    }

    #[test]
    fn highlights_filter_for_route() {
        let mut controller = controller_with(vec![todo(1, "my todo", false)]);

        controller.set_view("");
        assert!(
            controller
                .view()
                .rendered(&RenderCommand::SetFilter(Filter::All))
        );
        assert_eq!(Filter::All.as_str(), "");

        controller.set_view("#/active");
        assert!(
            controller
                .view()
                .rendered(&RenderCommand::SetFilter(Filter::Active))
        );
    }

    #[test]
    fn set_view_renders_in_order() {
        let mut controller = controller_with(vec![todo(1, "a", false), todo(2, "b", true)]);

        controller.set_view("#/completed");

        let names: Vec<&str> = controller
            .view()
            .commands
            .iter()
            .map(RenderCommand::name)
            .collect();
        assert_eq!(
            names,
            vec![
                "showEntries",
                "updateElementCount",
                "clearCompletedButton",
                "contentBlockVisibility",
                "toggleAll",
                "setFilter",
            ]
        );
    }

    #[test]
    fn toggle_all_updates_every_todo() {
        let mut controller = started_with(vec![todo(2, "my todo", false), todo(3, "my todo3", false)]);

        controller.handle(UiEvent::ToggleAll { completed: true });

        assert_eq!(
            controller.model().updates(),
            vec![
                (TodoId::new(2), TodoPatch::completed(true)),
                (TodoId::new(3), TodoPatch::completed(true)),
            ]
        );
    }

    #[test]
    fn toggle_all_refreshes_entries() {
        let mut controller = started_with(vec![todo(2, "my todo", false), todo(3, "my todo3", false)]);

        controller.handle(UiEvent::ToggleAll { completed: true });

        assert!(
            controller
                .view()
                .rendered(&RenderCommand::ShowEntries(vec![
                    todo(2, "my todo", true),
                    todo(3, "my todo3", true),
                ]))
        );
        assert!(
            controller
                .view()
                .rendered(&RenderCommand::ToggleAll { checked: true })
        );
    }

    #[test]
    fn new_todo_is_created_in_model() {
        let mut controller = started_with(Vec::new());

        controller.handle(UiEvent::NewTodo("a new todo".to_owned()));

        assert!(
            controller
                .model()
                .calls
                .contains(&ModelCall::Create("a new todo".to_owned()))
        );
    }

    #[test]
    fn new_todo_is_shown_and_input_cleared() {
        let mut controller = started_with(Vec::new());

        controller.handle(UiEvent::NewTodo("  a new todo ".to_owned()));

        assert!(
            controller
                .model()
                .calls
                .contains(&ModelCall::Read(TodoQuery::All))
        );
        assert_eq!(
            controller.view().last_entries(),
            Some([todo(1, "a new todo", false)].as_slice())
        );
        assert_eq!(
            controller.view().commands.last(),
            Some(&RenderCommand::ClearNewTodo)
        );
    }

    #[test]
    fn blank_new_todo_is_ignored() {
        let mut controller = started_with(Vec::new());

        controller.handle(UiEvent::NewTodo(String::new()));
        controller.handle(UiEvent::NewTodo("   ".to_owned()));

        assert!(controller.model().calls.is_empty());
        assert!(controller.view().commands.is_empty());
    }

    #[test]
    fn item_remove_updates_model_and_view() {
        let mut controller = started_with(vec![todo(42, "my todo", true)]);

        controller.handle(UiEvent::ItemRemove {
            id: TodoId::new(42),
        });

        assert_eq!(controller.model().removals(), vec![TodoId::new(42)]);
        assert!(
            controller
                .view()
                .rendered(&RenderCommand::RemoveItem(TodoId::new(42)))
        );
        assert!(
            controller
                .view()
                .rendered(&RenderCommand::UpdateElementCount(0))
        );
        assert!(controller.entries().is_empty());
    }

    #[test]
    fn remove_completed_removes_each_completed_item() {
        let mut controller = started_with(vec![
            todo(42, "my todo", true),
            todo(43, "still open", false),
            todo(44, "also done", true),
        ]);

        controller.handle(UiEvent::RemoveCompleted);

        assert_eq!(
            controller.model().calls[0],
            ModelCall::Read(TodoQuery::Completed(true))
        );
        assert_eq!(
            controller.model().removals(),
            vec![TodoId::new(42), TodoId::new(44)]
        );
        assert!(
            controller
                .view()
                .rendered(&RenderCommand::RemoveItem(TodoId::new(42)))
        );
        assert!(
            controller
                .view()
                .rendered(&RenderCommand::RemoveItem(TodoId::new(44)))
        );
        assert!(
            controller
                .view()
                .rendered(&RenderCommand::ClearCompletedButton {
                    completed: 0,
                    visible: false,
                })
        );
    }

    #[test]
    fn item_toggle_updates_model_and_view() {
        let mut controller = started_with(vec![todo(21, "my todo", false)]);

        controller.handle(UiEvent::ItemToggle {
            id: TodoId::new(21),
            completed: true,
        });

        assert_eq!(
            controller.model().updates(),
            vec![(TodoId::new(21), TodoPatch::completed(true))]
        );
        assert!(
            controller
                .view()
                .rendered(&RenderCommand::ElementComplete {
                    id: TodoId::new(21),
                    completed: true,
                })
        );
    }

    #[test]
    fn item_toggle_in_filtered_view_refreshes_entries() {
        let mut controller = controller_with(vec![todo(42, "my todo", true)]);
        controller.set_view("#/completed");
        controller.view_mut().commands.clear();

        controller.handle(UiEvent::ItemToggle {
            id: TodoId::new(42),
            completed: false,
        });

        assert!(
            controller
                .view()
                .rendered(&RenderCommand::ElementComplete {
                    id: TodoId::new(42),
                    completed: false,
                })
        );
        assert_eq!(controller.view().last_entries(), Some(&[] as &[Todo]));
    }

    #[test]
    fn item_edit_enters_edit_mode() {
        let mut controller = started_with(vec![todo(21, "my todo", false)]);

        controller.handle(UiEvent::ItemEdit {
            id: TodoId::new(21),
        });

        assert_eq!(
            controller.view().commands,
            vec![RenderCommand::EditItem {
                id: TodoId::new(21),
                title: "my todo".to_owned(),
            }]
        );
        assert!(controller.model().calls.is_empty());
    }

    #[test]
    fn item_edit_for_unknown_id_renders_nothing() {
        let mut controller = started_with(vec![todo(21, "my todo", false)]);

        controller.handle(UiEvent::ItemEdit {
            id: TodoId::new(99),
        });

        assert!(controller.view().commands.is_empty());
    }

    #[test]
    fn item_edit_done_persists_and_leaves_edit_mode() {
        let mut controller = started_with(vec![todo(21, "my todo", false)]);

        controller.handle(UiEvent::ItemEditDone {
            id: TodoId::new(21),
            title: "new title".to_owned(),
        });

        assert_eq!(
            controller.model().updates(),
            vec![(TodoId::new(21), TodoPatch::title("new title"))]
        );
        assert!(
            controller
                .view()
                .rendered(&RenderCommand::EditItemDone {
                    id: TodoId::new(21),
                    title: "new title".to_owned(),
                })
        );
    }

    #[test]
    fn edited_title_is_used_for_next_edit() {
        let mut controller = started_with(vec![todo(21, "my todo", false)]);

        controller.handle(UiEvent::ItemEditDone {
            id: TodoId::new(21),
            title: " renamed ".to_owned(),
        });
        controller.handle(UiEvent::ItemEdit {
            id: TodoId::new(21),
        });

        assert_eq!(
            controller.view().commands.last(),
            Some(&RenderCommand::EditItem {
                id: TodoId::new(21),
                title: "renamed".to_owned(),
            })
        );
    }

    #[test]
    fn item_edit_done_with_empty_title_removes_item() {
        let mut controller = started_with(vec![todo(21, "my todo", false)]);

        controller.handle(UiEvent::ItemEditDone {
            id: TodoId::new(21),
            title: "  ".to_owned(),
        });

        assert_eq!(controller.model().removals(), vec![TodoId::new(21)]);
        assert!(controller.model().updates().is_empty());
        assert!(
            controller
                .view()
                .rendered(&RenderCommand::RemoveItem(TodoId::new(21)))
        );
    }

    #[test]
    fn item_edit_cancel_restores_title_without_persisting() {
        let mut controller = started_with(vec![todo(21, "my todo", false)]);

        controller.handle(UiEvent::ItemEditCancel {
            id: TodoId::new(21),
        });

        assert_eq!(
            controller.view().commands,
            vec![RenderCommand::EditItemDone {
                id: TodoId::new(21),
                title: "my todo".to_owned(),
            }]
        );
        assert!(controller.model().updates().is_empty());
    }

    #[test]
    fn model_failure_is_reported_and_stops_handler() {
        let mut controller = started_with(vec![todo(42, "my todo", true)]);
        controller.model_mut().fail_remove = true;

        controller.handle(UiEvent::ItemRemove {
            id: TodoId::new(42),
        });

        let commands = &controller.view().commands;
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            RenderCommand::ReportError(message) => {
                assert!(message.contains("remove todo 42 failed"), "{message}");
                assert!(message.contains("database is locked"), "{message}");
            }
            other => panic!("expected error report, got {other:?}"),
        }
        assert!(!controller.model().calls.contains(&ModelCall::Count));
        assert_eq!(controller.entries().len(), 1);
    }

    #[test]
    fn update_of_missing_todo_is_reported() {
        let mut controller = started_with(Vec::new());

        controller.handle(UiEvent::ItemToggle {
            id: TodoId::new(7),
            completed: true,
        });

        assert!(matches!(
            controller.view().commands.as_slice(),
            [RenderCommand::ReportError(message)] if message.contains("todo 7 not found")
        ));
    }
}
