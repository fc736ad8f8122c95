use colored::Colorize;
use std::fmt;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
    Section,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().cyan().to_string(),
        MessageKind::Info => text,
        MessageKind::Success => format!("[ok] {text}").green().to_string(),
        MessageKind::Error => format!("[x] {text}").red().bold().to_string(),
    }
}

pub fn print_section(title: impl fmt::Display) {
    println!("{}", apply_style(MessageKind::Section, title));
}

pub fn print_info(message: impl fmt::Display) {
    println!("{}", apply_style(MessageKind::Info, message));
}

pub fn print_success(message: impl fmt::Display) {
    println!("{}", apply_style(MessageKind::Success, message));
}

pub fn print_error(message: impl fmt::Display) {
    eprintln!("{}", apply_style(MessageKind::Error, message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_keep_message_text() {
        colored::control::set_override(false);
        assert_eq!(apply_style(MessageKind::Section, " Março "), "=== Março ===");
        assert_eq!(apply_style(MessageKind::Success, "done"), "[ok] done");
        assert_eq!(apply_style(MessageKind::Info, "plain"), "plain");
    }
}
