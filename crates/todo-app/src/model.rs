// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::TodoId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    pub fn matches(&self, query: TodoQuery) -> bool {
        match query {
            TodoQuery::All => true,
            TodoQuery::Completed(completed) => self.completed == completed,
        }
    }
}

/// Which slice of the list is on screen. Derived from the route, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Resolves a hash route such as `#/active`. Only the first segment after
    /// the hash is inspected; unknown segments fall back to `All`.
    pub fn from_route(route: &str) -> Self {
        let segment = route.split('/').nth(1).unwrap_or("");
        Self::parse(segment).unwrap_or(Self::All)
    }

    pub const fn route(self) -> &'static str {
        match self {
            Self::All => "#/",
            Self::Active => "#/active",
            Self::Completed => "#/completed",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    pub const fn query(self) -> TodoQuery {
        match self {
            Self::All => TodoQuery::All,
            Self::Active => TodoQuery::Completed(false),
            Self::Completed => TodoQuery::Completed(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoQuery {
    All,
    Completed(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TodoCounts {
    pub active: usize,
    pub completed: usize,
    pub total: usize,
}

impl TodoCounts {
    pub fn tally<'a>(todos: impl IntoIterator<Item = &'a Todo>) -> Self {
        let mut counts = Self::default();
        for todo in todos {
            counts.total += 1;
            if todo.completed {
                counts.completed += 1;
            } else {
                counts.active += 1;
            }
        }
        counts
    }

    pub const fn has_items(self) -> bool {
        self.total > 0
    }

    pub const fn all_completed(self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}
