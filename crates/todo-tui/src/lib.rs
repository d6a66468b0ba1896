// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use std::io;
use std::time::Duration;
use todo_app::{Controller, Filter, RenderCommand, Todo, TodoId, TodoModel, TodoView, UiEvent};
use tracing::info;

const INPUT_PLACEHOLDER: &str = "What needs to be done?";
const CURSOR_MARK: &str = "▏";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Input,
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EditState {
    id: TodoId,
    buffer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    entries: Vec<Todo>,
    content_visible: bool,
    toggle_all_checked: bool,
    filter: Filter,
    completed_count: usize,
    clear_completed_visible: bool,
    active_count: usize,
    new_todo: String,
    editing: Option<EditState>,
    cursor: usize,
    focus: Focus,
    status: Option<String>,
}

/// What a key press asks the run loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Route(&'static str),
    Dispatch(UiEvent),
}

/// Terminal projection of the todo list. Only render commands change what
/// is shown; key handling edits local buffers and turns the rest into
/// [`KeyAction`]s.
#[derive(Debug, Default)]
pub struct TuiView {
    data: ViewData,
}

impl TodoView for TuiView {
    fn render(&mut self, command: RenderCommand) {
        apply_render_command(&mut self.data, command);
    }
}

impl TuiView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<KeyAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            return Some(KeyAction::Quit);
        }

        self.data.status = None;

        if self.data.editing.is_some() {
            return self.handle_edit_key(key);
        }

        match self.data.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<KeyAction> {
        let editing = self.data.editing.as_mut()?;
        match key.code {
            KeyCode::Enter => Some(KeyAction::Dispatch(UiEvent::ItemEditDone {
                id: editing.id,
                title: editing.buffer.clone(),
            })),
            KeyCode::Esc => Some(KeyAction::Dispatch(UiEvent::ItemEditCancel {
                id: editing.id,
            })),
            KeyCode::Backspace => {
                editing.buffer.pop();
                None
            }
            KeyCode::Char(ch) if is_text_input(key) => {
                editing.buffer.push(ch);
                None
            }
            _ => None,
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<KeyAction> {
        match key.code {
            KeyCode::Enter => Some(KeyAction::Dispatch(UiEvent::NewTodo(
                self.data.new_todo.clone(),
            ))),
            KeyCode::Tab | KeyCode::Down | KeyCode::Esc => {
                self.data.focus = Focus::List;
                None
            }
            KeyCode::Backspace => {
                self.data.new_todo.pop();
                None
            }
            KeyCode::Char(ch) if is_text_input(key) => {
                self.data.new_todo.push(ch);
                None
            }
            _ => None,
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<KeyAction> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Quit),
            KeyCode::Tab | KeyCode::Char('i') => {
                self.data.focus = Focus::Input;
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_cursor(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_cursor(-1);
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.data.cursor = 0;
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.data.cursor = self.data.entries.len().saturating_sub(1);
                None
            }
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                let todo = self.selected()?;
                Some(KeyAction::Dispatch(UiEvent::ItemToggle {
                    id: todo.id,
                    completed: !todo.completed,
                }))
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                let todo = self.selected()?;
                Some(KeyAction::Dispatch(UiEvent::ItemEdit { id: todo.id }))
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let todo = self.selected()?;
                Some(KeyAction::Dispatch(UiEvent::ItemRemove { id: todo.id }))
            }
            KeyCode::Char('a') => Some(KeyAction::Dispatch(UiEvent::ToggleAll {
                completed: !self.data.toggle_all_checked,
            })),
            KeyCode::Char('c') => Some(KeyAction::Dispatch(UiEvent::RemoveCompleted)),
            KeyCode::Char('1') => Some(KeyAction::Route(Filter::All.route())),
            KeyCode::Char('2') => Some(KeyAction::Route(Filter::Active.route())),
            KeyCode::Char('3') => Some(KeyAction::Route(Filter::Completed.route())),
            KeyCode::Char('l') | KeyCode::Right => {
                Some(KeyAction::Route(rotate_filter(self.data.filter, 1).route()))
            }
            KeyCode::Char('h') | KeyCode::Left => {
                Some(KeyAction::Route(rotate_filter(self.data.filter, -1).route()))
            }
            _ => None,
        }
    }

    fn selected(&self) -> Option<&Todo> {
        self.data.entries.get(self.data.cursor)
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.data.entries.len();
        if len == 0 {
            self.data.cursor = 0;
            return;
        }
        let next = self.data.cursor.saturating_add_signed(delta);
        self.data.cursor = next.min(len - 1);
    }
}

pub fn run_app<M: TodoModel>(
    controller: &mut Controller<M, TuiView>,
    initial_route: &str,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    info!(route = initial_route, "starting todo view");

    controller.set_view(initial_route);

    let result = event_loop(&mut terminal, controller);

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    info!("todo view closed");
    result
}

fn event_loop<M: TodoModel>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut Controller<M, TuiView>,
) -> Result<()> {
    loop {
        terminal
            .draw(|frame| render(frame, &controller.view().data))
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(120)).context("poll event")? {
            continue;
        }
        let Event::Key(key) = event::read().context("read event")? else {
            continue;
        };
        if key.kind == KeyEventKind::Press && handle_key_event(controller, key) {
            return Ok(());
        }
    }
}

/// Applies one key press. Returns true when the app should exit.
fn handle_key_event<M: TodoModel>(controller: &mut Controller<M, TuiView>, key: KeyEvent) -> bool {
    let Some(action) = controller.view_mut().handle_key(key) else {
        return false;
    };

    match action {
        KeyAction::Quit => return true,
        KeyAction::Route(route) => controller.set_view(route),
        KeyAction::Dispatch(event) => controller.handle(event),
    }
    false
}

fn apply_render_command(data: &mut ViewData, command: RenderCommand) {
    match command {
        RenderCommand::ShowEntries(todos) => {
            data.entries = todos;
            let editing_shown = data
                .editing
                .as_ref()
                .is_none_or(|editing| data.entries.iter().any(|todo| todo.id == editing.id));
            if !editing_shown {
                data.editing = None;
            }
            clamp_cursor(data);
        }
        RenderCommand::ContentBlockVisibility { visible } => {
            data.content_visible = visible;
        }
        RenderCommand::ToggleAll { checked } => {
            data.toggle_all_checked = checked;
        }
        RenderCommand::SetFilter(filter) => {
            data.filter = filter;
        }
        RenderCommand::ClearCompletedButton { completed, visible } => {
            data.completed_count = completed;
            data.clear_completed_visible = visible;
        }
        RenderCommand::ClearNewTodo => {
            data.new_todo.clear();
        }
        RenderCommand::RemoveItem(id) => {
            data.entries.retain(|todo| todo.id != id);
            if data.editing.as_ref().is_some_and(|editing| editing.id == id) {
                data.editing = None;
            }
            clamp_cursor(data);
        }
        RenderCommand::UpdateElementCount(active) => {
            data.active_count = active;
        }
        RenderCommand::ElementComplete { id, completed } => {
            if let Some(todo) = data.entries.iter_mut().find(|todo| todo.id == id) {
                todo.completed = completed;
            }
        }
        RenderCommand::EditItem { id, title } => {
            if let Some(index) = data.entries.iter().position(|todo| todo.id == id) {
                data.cursor = index;
            }
            data.editing = Some(EditState { id, buffer: title });
        }
        RenderCommand::EditItemDone { id, title } => {
            if let Some(todo) = data.entries.iter_mut().find(|todo| todo.id == id) {
                todo.title = title;
            }
            if data.editing.as_ref().is_some_and(|editing| editing.id == id) {
                data.editing = None;
            }
        }
        RenderCommand::ReportError(message) => {
            data.status = Some(message);
        }
    }
}

fn clamp_cursor(data: &mut ViewData) {
    data.cursor = data.cursor.min(data.entries.len().saturating_sub(1));
}

fn rotate_filter(current: Filter, delta: isize) -> Filter {
    let filters = Filter::ALL;
    let index = filters
        .iter()
        .position(|filter| *filter == current)
        .unwrap_or(0) as isize;
    let len = filters.len() as isize;
    filters[(index + delta).rem_euclid(len) as usize]
}

fn is_text_input(key: KeyEvent) -> bool {
    !key.modifiers.contains(KeyModifiers::CONTROL) && !key.modifiers.contains(KeyModifiers::ALT)
}

fn render(frame: &mut ratatui::Frame<'_>, data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let input_focused = data.focus == Focus::Input && data.editing.is_none();
    let input = Paragraph::new(input_line(data, input_focused)).block(
        Block::default()
            .title("todos")
            .borders(Borders::ALL)
            .border_style(focus_style(input_focused)),
    );
    frame.render_widget(input, layout[0]);

    if data.content_visible {
        let list_focused = data.focus == Focus::List || data.editing.is_some();
        let items = data
            .entries
            .iter()
            .map(|todo| ListItem::new(entry_label(todo, data.editing.as_ref())))
            .collect::<Vec<_>>();
        let list = List::new(items)
            .block(
                Block::default()
                    .title(toggle_all_label(data.toggle_all_checked))
                    .borders(Borders::ALL)
                    .border_style(focus_style(list_focused)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("› ");
        let mut list_state = ListState::default();
        if list_focused && !data.entries.is_empty() {
            list_state.select(Some(data.cursor));
        }
        frame.render_stateful_widget(list, layout[1], &mut list_state);

        let footer = Paragraph::new(footer_line(data)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, layout[2]);
    } else {
        let empty = Paragraph::new("nothing to do yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, layout[1]);
    }

    let status = Paragraph::new(status_text(data)).style(match data.status {
        Some(_) => Style::default().fg(Color::Yellow),
        None => Style::default().fg(Color::DarkGray),
    });
    frame.render_widget(status, layout[3]);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn input_line(data: &ViewData, focused: bool) -> Line<'static> {
    if data.new_todo.is_empty() && !focused {
        return Line::from(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ));
    }
    let mut text = data.new_todo.clone();
    if focused {
        text.push_str(CURSOR_MARK);
    }
    Line::from(text)
}

fn footer_line(data: &ViewData) -> Line<'static> {
    let mut spans = vec![Span::raw(items_left_label(data.active_count)), Span::raw("   ")];
    for filter in Filter::ALL {
        let style = if filter == data.filter {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default()
        };
        spans.push(Span::styled(filter.label(), style));
        spans.push(Span::raw(" "));
    }
    if data.clear_completed_visible {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            clear_completed_label(data.completed_count),
            Style::default().fg(Color::Red),
        ));
    }
    Line::from(spans)
}

fn items_left_label(active: usize) -> String {
    let noun = if active == 1 { "item" } else { "items" };
    format!("{active} {noun} left")
}

fn clear_completed_label(completed: usize) -> String {
    format!("Clear completed ({completed})")
}

fn toggle_all_label(checked: bool) -> String {
    let mark = if checked { "[x]" } else { "[ ]" };
    format!("{mark} mark all as complete")
}

fn entry_label(todo: &Todo, editing: Option<&EditState>) -> String {
    if let Some(editing) = editing.filter(|editing| editing.id == todo.id) {
        return format!("✎ {}{CURSOR_MARK}", editing.buffer);
    }
    let mark = if todo.completed { "[x]" } else { "[ ]" };
    format!("{mark} {}", todo.title)
}

fn status_text(data: &ViewData) -> String {
    if let Some(status) = &data.status {
        return status.clone();
    }
    if data.editing.is_some() {
        return "enter save · esc cancel · empty title removes".to_owned();
    }
    match data.focus {
        Focus::Input => "enter add · tab list · ctrl+q quit".to_owned(),
        Focus::List => {
            "space toggle · e edit · d delete · a all · c clear · 1/2/3 filter · tab input · q quit"
                .to_owned()
        }
    }
}
