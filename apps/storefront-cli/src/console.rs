//! Terminal front end for notices and confirmation prompts.

use std::io::{self, Write};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use storefront_core::ports::{Confirmation, Confirmer, Notice, NoticeLevel, Notifier};

/// Line reader over stdin, shared by every prompt of the process.
pub struct Terminal {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// Print `prompt` and wait for one line. `None` at end of input.
    pub async fn prompt(&self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;
        self.lines.lock().await.next_line().await
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints notices on stdout, one line each.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        println!("{}", format_notice(&notice));
    }
}

fn format_notice(notice: &Notice) -> String {
    let marker = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    format!("[{marker}] {}: {}", notice.title, notice.text)
}

/// Asks on the terminal. `assume_yes` answers every prompt without reading input.
pub struct TerminalConfirmer {
    terminal: Arc<Terminal>,
    assume_yes: bool,
}

impl TerminalConfirmer {
    pub fn new(terminal: Arc<Terminal>, assume_yes: bool) -> Self {
        Self {
            terminal,
            assume_yes,
        }
    }
}

#[async_trait]
impl Confirmer for TerminalConfirmer {
    async fn confirm(&self, request: &Confirmation) -> bool {
        if self.assume_yes {
            return true;
        }

        println!("{}", request.title);
        println!("{}", request.text);
        let prompt = format!(
            "[y] {} / [N] {} > ",
            request.confirm_label, request.cancel_label
        );
        match self.terminal.prompt(&prompt).await {
            Ok(Some(answer)) => is_yes(&answer),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
