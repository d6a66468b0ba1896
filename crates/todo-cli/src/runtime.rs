// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use todo_app::{Todo, TodoCounts, TodoId, TodoModel, TodoPatch, TodoQuery};
use todo_db::Store;

/// Backs the controller with a SQLite store.
pub struct DbModel<'a> {
    store: &'a Store,
}

impl<'a> DbModel<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }
}

impl TodoModel for DbModel<'_> {
    fn read(&mut self, query: TodoQuery) -> Result<Vec<Todo>> {
        self.store.list_todos(query)
    }

    fn count(&mut self) -> Result<TodoCounts> {
        self.store.todo_counts()
    }

    fn create(&mut self, title: &str) -> Result<TodoId> {
        self.store.create_todo(title)
    }

    fn update(&mut self, id: TodoId, patch: &TodoPatch) -> Result<()> {
        self.store.update_todo(id, patch)
    }

    fn remove(&mut self, id: TodoId) -> Result<()> {
        self.store.delete_todo(id)
    }
}
