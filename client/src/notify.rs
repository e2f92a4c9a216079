//! User-facing notices and confirmation prompts

use std::io::{BufRead, Write};

use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// A one-line message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Where notices go
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Prints notices to the terminal
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => println!("{} {}", "✔".green().bold(), notice.message),
            NoticeLevel::Info => println!("{} {}", "ℹ".blue().bold(), notice.message),
            NoticeLevel::Error => eprintln!("{} {}", "✖".red().bold(), notice.message.red()),
        }
    }
}

/// Asks the user before destructive actions
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Reads a y/N answer from stdin
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if std::io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

/// Fixed answer, for `--yes` and scripted use
#[derive(Debug, Clone, Copy)]
pub struct AssumeAnswer(pub bool);

impl Confirm for AssumeAnswer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
