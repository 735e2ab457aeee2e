use std::io::{self, IsTerminal};

use owo_colors::OwoColorize;

pub mod config;
pub mod local;
pub mod map;
pub mod recordings;
pub mod robot;
pub mod sort;
pub mod submit;

/// Bold label on a terminal, plain text when piped.
pub(crate) fn label(text: &str) -> String {
    if io::stdout().is_terminal() {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}
