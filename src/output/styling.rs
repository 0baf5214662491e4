use comfy_table::{Cell, Color as TableColor};
use console::style;

/// Styling helpers for terminal output
pub fn bright_yellow(text: impl std::fmt::Display) -> console::StyledObject<String> {
    style(text.to_string()).bright().yellow()
}

pub fn bright_green(text: impl std::fmt::Display) -> console::StyledObject<String> {
    style(text.to_string()).bright().green()
}

pub fn dim(text: impl std::fmt::Display) -> console::StyledObject<String> {
    style(text.to_string()).dim()
}

pub fn magenta_bold(text: impl std::fmt::Display) -> console::StyledObject<String> {
    style(text.to_string()).magenta().bold()
}

/// Colors a status token; unknown tokens are printed as-is.
pub fn status_cell(status: &str) -> Cell {
    let cell = Cell::new(status);
    match status {
        "SUCCESS" => cell.fg(TableColor::Green),
        "FAILED" | "NOT_EXECUTED" => cell.fg(TableColor::Red),
        "UNSTABLE" | "PAUSED_PENDING_INPUT" => cell.fg(TableColor::Yellow),
        "IN_PROGRESS" => cell.fg(TableColor::Cyan),
        "ABORTED" => cell.fg(TableColor::DarkGrey),
        _ => cell,
    }
}
