//! Output formatting for command results

pub mod console;
pub mod formatter;
pub mod json;

use console::ConsoleFormatter;
use formatter::OutputFormatter;
use json::JsonFormatter;
use multifill_domain::OutputFormat;

/// Formatter for the chosen output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Enable or disable colored console output for the whole process
pub fn set_color(enabled: bool) {
    colored::control::set_override(enabled);
}
