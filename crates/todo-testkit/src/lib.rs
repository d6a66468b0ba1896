// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::path::PathBuf;
use todo_app::{Todo, TodoId};

const VERBS: [&str; 12] = [
    "Buy", "Call", "Clean", "Email", "Fix", "Plan", "Read", "Renew", "Return", "Schedule", "Sort",
    "Water",
];

const OBJECTS: [&str; 16] = [
    "groceries",
    "the plants",
    "the dentist",
    "library books",
    "the garage",
    "tax documents",
    "the bike tire",
    "team offsite",
    "passport",
    "the landlord",
    "birthday gift",
    "car insurance",
    "inbox",
    "recycling",
    "photo backups",
    "the gutters",
];

const QUALIFIERS: [&str; 6] = [
    "",
    " today",
    " before Friday",
    " this weekend",
    " after lunch",
    " again",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// A todo before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeTodo {
    pub title: String,
    pub completed: bool,
}

impl FakeTodo {
    pub fn with_id(self, id: i64) -> Todo {
        Todo {
            id: TodoId::new(id),
            title: self.title,
            completed: self.completed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TodoFaker {
    rng: DeterministicRng,
}

impl TodoFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn title(&mut self) -> String {
        let verb = self.pick(&VERBS);
        let object = self.pick(&OBJECTS);
        let qualifier = self.pick(&QUALIFIERS);
        format!("{verb} {object}{qualifier}")
    }

    pub fn todo(&mut self) -> FakeTodo {
        FakeTodo {
            title: self.title(),
            completed: self.rng.bool(),
        }
    }

    pub fn todos(&mut self, count: usize) -> Vec<FakeTodo> {
        (0..count).map(|_| self.todo()).collect()
    }

    /// Todos with ids `1..=count`, as a store would hand them back.
    pub fn stored_todos(&mut self, count: usize) -> Vec<Todo> {
        self.todos(count)
            .into_iter()
            .zip(1_i64..)
            .map(|(todo, id)| todo.with_id(id))
            .collect()
    }

    fn pick<'a>(&mut self, values: &'a [&'a str]) -> &'a str {
        values[self.rng.int_n(values.len())]
    }
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("todomvc.db");
    Ok((dir, db_path))
}
