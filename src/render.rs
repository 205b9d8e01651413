use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use crossterm::style::Stylize;

use crate::models::Task;

/// Prints one `<ordinal>: <name>` line per task, ordinals starting at 1.
///
/// With `color`, completed tasks are green and pending ones yellow.
pub fn render_tasks(tasks: &[Task], color: bool, out: &mut impl Write) -> io::Result<()> {
    for (i, t) in tasks.iter().enumerate() {
        let line = format!("{}: {}", i + 1, t.name);
        if !color {
            writeln!(out, "{}", line)?;
        } else if t.completed {
            writeln!(out, "{}", line.green())?;
        } else {
            writeln!(out, "{}", line.yellow())?;
        }
    }
    Ok(())
}

/// Prints tasks as a table with description, creation time and status.
pub fn render_table(tasks: &[Task], color: bool, out: &mut impl Write) -> io::Result<()> {
    let mut table = Table::new();
    if !color {
        table.force_no_tty();
    }
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
            Cell::new("Created").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for (i, t) in tasks.iter().enumerate() {
        let status = if t.completed { "Done" } else { "Pending" };
        let status_color = if t.completed { Color::Green } else { Color::Yellow };

        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&t.name),
            Cell::new(t.description.as_deref().unwrap_or("-")),
            Cell::new(t.created_at.format("%Y-%m-%d %H:%M")),
            Cell::new(status).fg(status_color),
        ]);
    }

    writeln!(out, "{table}")
}
