// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use todo_app::{Todo, TodoCounts, TodoId, TodoPatch, TodoQuery, normalize_title};
use tracing::{debug, info};

pub const APP_NAME: &str = "todomvc";

const DEMO_TODOS: [(&str, bool); 6] = [
    ("Taste JavaScript", true),
    ("Buy a unicorn", false),
    ("Water the plants", false),
    ("Book dentist appointment", true),
    ("Renew library card", false),
    ("Write the quarterly report", false),
];

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[(
    "todos",
    &["id", "title", "completed", "created_at", "updated_at"],
)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequiredIndex {
    name: &'static str,
    create_sql: &'static str,
}

const REQUIRED_INDEXES: &[RequiredIndex] = &[RequiredIndex {
    name: "idx_todos_completed",
    create_sql: "CREATE INDEX IF NOT EXISTS idx_todos_completed ON todos (completed);",
}];

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable)?;
        let conn = Connection::open(path)
            .with_context(|| format!("open database at {}", path.display()))?;
        configure_connection(&conn)?;
        debug!(path = %path.display(), "opened todo database");
        Ok(Self { conn })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        configure_connection(&conn)?;
        debug!("opened in-memory todo database");
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bootstrap(&self) -> Result<()> {
        if has_user_tables(&self.conn)? {
            validate_schema(&self.conn)?;
        } else {
            self.conn
                .execute_batch(include_str!("sql/schema.sql"))
                .context("create schema")?;
            debug!("created todo schema");
        }

        ensure_required_indexes(&self.conn)?;
        Ok(())
    }

    pub fn list_todos(&self, query: TodoQuery) -> Result<Vec<Todo>> {
        let mut sql = String::from("SELECT id, title, completed FROM todos\n");
        if matches!(query, TodoQuery::Completed(_)) {
            sql.push_str("WHERE completed = ?\n");
        }
        sql.push_str("ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql).context("prepare todos query")?;
        let rows = match query {
            TodoQuery::All => stmt.query_map([], todo_from_row),
            TodoQuery::Completed(completed) => stmt.query_map(params![completed], todo_from_row),
        }
        .context("query todos")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect todos")
    }

    pub fn get_todo(&self, todo_id: TodoId) -> Result<Todo> {
        self.conn
            .query_row(
                "SELECT id, title, completed FROM todos WHERE id = ?",
                params![todo_id.get()],
                todo_from_row,
            )
            .optional()
            .with_context(|| format!("load todo {todo_id}"))?
            .ok_or_else(|| anyhow!("todo {todo_id} not found -- refresh the list and retry"))
    }

    pub fn create_todo(&self, title: &str) -> Result<TodoId> {
        let Some(title) = normalize_title(title) else {
            bail!("todo title is required -- enter a title and retry");
        };

        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO todos (title, completed, created_at, updated_at)
                VALUES (?, 0, ?, ?)
                ",
                params![title, now, now],
            )
            .context("insert todo")?;

        Ok(TodoId::new(self.conn.last_insert_rowid()))
    }

    pub fn update_todo(&self, todo_id: TodoId, patch: &TodoPatch) -> Result<()> {
        patch.validate()?;

        let title = patch.title.as_deref().and_then(normalize_title);
        let now = now_rfc3339()?;
        let rows_affected = self
            .conn
            .execute(
                "
                UPDATE todos
                SET
                  title = COALESCE(?, title),
                  completed = COALESCE(?, completed),
                  updated_at = ?
                WHERE id = ?
                ",
                params![title, patch.completed, now, todo_id.get()],
            )
            .with_context(|| format!("update todo {todo_id}"))?;
        if rows_affected == 0 {
            bail!("todo {todo_id} not found -- refresh the list and retry");
        }
        Ok(())
    }

    pub fn delete_todo(&self, todo_id: TodoId) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?", params![todo_id.get()])
            .with_context(|| format!("delete todo {todo_id}"))?;
        if rows_affected == 0 {
            bail!("todo {todo_id} not found or already deleted");
        }
        Ok(())
    }

    pub fn delete_all_todos(&self) -> Result<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM todos", [])
            .context("delete all todos")?;
        info!(removed, "cleared todo list");
        Ok(removed)
    }

    pub fn todo_counts(&self) -> Result<TodoCounts> {
        let (total, completed): (i64, i64) = self
            .conn
            .query_row(
                "SELECT COUNT(*), COALESCE(SUM(completed), 0) FROM todos",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .context("count todos")?;

        let total = usize::try_from(total).unwrap_or(0);
        let completed = usize::try_from(completed).unwrap_or(0);
        Ok(TodoCounts {
            active: total.saturating_sub(completed),
            completed,
            total,
        })
    }

    /// Fills an empty list with sample todos. Returns how many were inserted.
    pub fn seed_demo_data(&self) -> Result<usize> {
        if self.todo_counts()?.has_items() {
            return Ok(0);
        }

        for (title, completed) in DEMO_TODOS {
            let todo_id = self
                .create_todo(title)
                .with_context(|| format!("insert demo todo {title:?}"))?;
            if completed {
                self.update_todo(todo_id, &TodoPatch::completed(true))?;
            }
        }
        info!(count = DEMO_TODOS.len(), "seeded demo todos");
        Ok(DEMO_TODOS.len())
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os("TODOMVC_DB_PATH") {
        return Ok(PathBuf::from(override_path));
    }

    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set TODOMVC_DB_PATH to a writable database path")
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir.join("todomvc.db"))
}

pub fn validate_db_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("database path must not be empty");
    }
    if path == ":memory:" {
        return Ok(());
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "database path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("database path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    if path.contains('?') {
        bail!(
            "database path {path:?} contains '?'; remove query parameters and use a plain file path"
        );
    }

    Ok(())
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: TodoId::new(row.get(0)?),
        title: row.get(1)?,
        completed: row.get(2)?,
    })
}

fn has_user_tables(conn: &Connection) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "
            SELECT COUNT(*)
            FROM sqlite_master
            WHERE type = 'table'
              AND name NOT LIKE 'sqlite_%'
            ",
            [],
            |row| row.get(0),
        )
        .context("count user tables")?;
    Ok(count > 0)
}

fn validate_schema(conn: &Connection) -> Result<()> {
    for (table, required_columns) in REQUIRED_SCHEMA {
        if !table_exists(conn, table)? {
            bail!(
                "database is missing required table `{table}`; point [storage].db_path at a todomvc database"
            );
        }

        let columns = table_columns(conn, table)?;
        let missing: Vec<&str> = required_columns
            .iter()
            .copied()
            .filter(|column| !columns.contains(*column))
            .collect();

        if !missing.is_empty() {
            bail!(
                "table `{table}` is missing required columns: {}; run migration before launching",
                missing.join(", ")
            );
        }
    }

    Ok(())
}

fn ensure_required_indexes(conn: &Connection) -> Result<()> {
    for index in REQUIRED_INDEXES {
        conn.execute_batch(index.create_sql)
            .with_context(|| format!("ensure required index `{}`", index.name))?;
    }

    let existing_indexes = index_names(conn)?;
    let missing = REQUIRED_INDEXES
        .iter()
        .filter(|index| !existing_indexes.contains(index.name))
        .map(|index| index.name)
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        bail!(
            "database is missing required indexes: {}; run migration before launching",
            missing.join(", ")
        );
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let exists = conn
        .query_row(
            "
            SELECT EXISTS(
              SELECT 1
              FROM sqlite_master
              WHERE type = 'table' AND name = ?
            )
            ",
            params![table],
            |row| row.get::<_, i64>(0),
        )
        .with_context(|| format!("check table existence for {table}"))?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .with_context(|| format!("inspect columns for {table}"))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .with_context(|| format!("query column info for {table}"))?;

    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .with_context(|| format!("collect columns for {table}"))
}

fn index_names(conn: &Connection) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(
            "
            SELECT name
            FROM sqlite_master
            WHERE type = 'index'
              AND name NOT LIKE 'sqlite_%'
            ORDER BY name ASC
            ",
        )
        .context("prepare index names query")?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .context("query index names")?;
    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .context("collect index names")
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .context("configure sqlite pragmas")
}

fn now_rfc3339() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("format current timestamp")
}
