//! Terminal-backed notification surface.

use log::warn;
use std::io::{BufRead, Write};
use taskpad_core::{Message, Notifier};

const YES_ANSWERS: &[&str] = &["y", "yes", "ya"];

/// Prints notifications and reads yes/no answers from a line reader.
pub struct TerminalNotifier<R, W, E> {
    input: R,
    out: W,
    err: E,
    assume_yes: bool,
}

impl<R: BufRead, W: Write, E: Write> TerminalNotifier<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Self {
            input,
            out,
            err,
            assume_yes: false,
        }
    }

    /// Answers every confirmation with yes without prompting.
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn into_writers(self) -> (W, E) {
        (self.out, self.err)
    }

    fn read_answer(&mut self) -> bool {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => false,
            Ok(_) => is_yes(&line),
            Err(err) => {
                warn!("event=confirm_read module=cli status=error error={err}");
                false
            }
        }
    }
}

impl<R: BufRead, W: Write, E: Write> Notifier for TerminalNotifier<R, W, E> {
    fn notify_success(&mut self, message: &Message) {
        if let Err(err) = writeln!(self.out, "{} {}", message.title, message.text) {
            warn!("event=notify module=cli status=error kind=success error={err}");
        }
    }

    fn notify_error(&mut self, message: &Message) {
        if let Err(err) = writeln!(self.err, "{} {}", message.title, message.text) {
            warn!("event=notify module=cli status=error kind=error error={err}");
        }
    }

    fn confirm(&mut self, message: &Message) -> bool {
        if self.assume_yes {
            return true;
        }
        let prompt = write!(self.out, "{} {} [y/N]: ", message.title, message.text)
            .and_then(|()| self.out.flush());
        if let Err(err) = prompt {
            warn!("event=confirm_prompt module=cli status=error error={err}");
            return false;
        }
        self.read_answer()
    }
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim().to_ascii_lowercase();
    YES_ANSWERS.contains(&answer.as_str())
}
