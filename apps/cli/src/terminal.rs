//! Interactive prompts on the terminal.
//!
//! Secrets are read with echo disabled through raw mode. Piped input is
//! read line by line instead.

use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::warn;

/// Raw mode for the lifetime of the guard
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to restore the terminal: {}", e);
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    Done,
    Cancelled,
}

/// Apply one key press to the secret being typed
fn apply_key(input: &mut String, key: KeyEvent) -> KeyOutcome {
    if key.kind != KeyEventKind::Press {
        return KeyOutcome::Continue;
    }

    match key.code {
        KeyCode::Enter => KeyOutcome::Done,
        KeyCode::Esc => KeyOutcome::Cancelled,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyOutcome::Cancelled
        }
        KeyCode::Backspace => {
            input.pop();
            KeyOutcome::Continue
        }
        KeyCode::Char(c) => {
            input.push(c);
            KeyOutcome::Continue
        }
        _ => KeyOutcome::Continue,
    }
}

/// Prompt for a secret without echoing it
pub fn read_password(label: &str) -> io::Result<String> {
    if !io::stdin().is_terminal() {
        return read_line();
    }

    let mut stderr = io::stderr();
    write!(stderr, "{}: ", label)?;
    stderr.flush()?;

    let mut input = String::new();
    let outcome = {
        let _raw = RawMode::enable()?;
        loop {
            if let Event::Key(key) = event::read()? {
                match apply_key(&mut input, key) {
                    KeyOutcome::Continue => {}
                    outcome => break outcome,
                }
            }
        }
    };
    writeln!(stderr)?;

    match outcome {
        KeyOutcome::Cancelled => Err(io::Error::new(
            io::ErrorKind::Interrupted,
            "Input cancelled",
        )),
        _ => Ok(input),
    }
}

/// Ask a yes/no question; anything but yes is a no
pub fn confirm(question: &str) -> io::Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{} [y/N] ", question)?;
    stderr.flush()?;

    Ok(is_yes(&read_line()?))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn read_line() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
