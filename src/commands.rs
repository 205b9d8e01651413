use std::io::Write;

use crate::error::{Result, TodoError};
use crate::render::{render_table, render_tasks};
use crate::repository::TaskRepository;
use crate::storage::DocumentStore;

/// Printed when the program runs without a command.
pub const GREETING: &str = "Hi! Add your first task with `todo add <name> <description>`.";

/// Printed by `list` when the store holds no tasks.
pub const EMPTY_LIST_MESSAGE: &str = "Nothing to see here.";

pub fn cmd_greet(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{GREETING}")?;
    Ok(())
}

/// Adds a new task.
///
/// A blank name is rejected; a blank description is stored as no
/// description.
pub fn cmd_add<S: DocumentStore>(
    repo: &TaskRepository<S>,
    name: &str,
    description: Option<String>,
    out: &mut impl Write,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(TodoError::Usage("task name must not be empty".to_string()));
    }
    let description = description.filter(|d| !d.trim().is_empty());
    let task = repo.create(name, description)?;
    writeln!(out, "Task '{}' added.", task.name)?;
    Ok(())
}

/// Lists every task, or the empty-state message when there are none.
///
/// `color` should only be set when `out` is a terminal.
pub fn cmd_list<S: DocumentStore>(
    repo: &TaskRepository<S>,
    long: bool,
    color: bool,
    out: &mut impl Write,
) -> Result<()> {
    let tasks = match repo.list_all() {
        Ok(tasks) => tasks,
        Err(TodoError::EmptyResult) => {
            writeln!(out, "{EMPTY_LIST_MESSAGE}")?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if long {
        render_table(&tasks, color, out)?;
    } else {
        render_tasks(&tasks, color, out)?;
    }
    Ok(())
}

/// Marks the first task with the given name as complete.
pub fn cmd_complete<S: DocumentStore>(
    repo: &TaskRepository<S>,
    name: &str,
    out: &mut impl Write,
) -> Result<()> {
    let task = repo.complete_by_name(name)?;
    writeln!(out, "Task '{}' marked as complete.", task.name)?;
    Ok(())
}

/// Removes the first task with the given name.
pub fn cmd_delete<S: DocumentStore>(
    repo: &TaskRepository<S>,
    name: &str,
    out: &mut impl Write,
) -> Result<()> {
    repo.delete_by_name(name)?;
    writeln!(out, "Task '{}' deleted.", name)?;
    Ok(())
}
