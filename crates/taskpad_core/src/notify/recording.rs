//! Headless notifier that records traffic and answers from a script.

use super::{Message, Notifier};
use std::collections::VecDeque;

/// One recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(Message),
    Error(Message),
    /// Confirmation prompt together with the answer that was given.
    Confirm { message: Message, answer: bool },
}

/// Notifier for headless sessions and tests.
///
/// Confirmations pop scripted answers first, then fall back to
/// `default_answer`.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    log: Vec<Notification>,
    answers: VecDeque<bool>,
    default_answer: bool,
}

impl RecordingNotifier {
    /// Declines every confirmation unless answers are scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every unscripted confirmation with `answer`.
    pub fn answering(answer: bool) -> Self {
        Self {
            default_answer: answer,
            ..Self::default()
        }
    }

    /// Queues the answer for the next confirmation.
    pub fn push_answer(&mut self, answer: bool) {
        self.answers.push_back(answer);
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.log
    }

    pub fn last(&self) -> Option<&Notification> {
        self.log.last()
    }

    pub fn successes(&self) -> usize {
        self.count(|item| matches!(item, Notification::Success(_)))
    }

    pub fn errors(&self) -> usize {
        self.count(|item| matches!(item, Notification::Error(_)))
    }

    pub fn confirmations(&self) -> usize {
        self.count(|item| matches!(item, Notification::Confirm { .. }))
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }

    fn count(&self, predicate: impl Fn(&Notification) -> bool) -> usize {
        self.log.iter().filter(|item| predicate(item)).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_success(&mut self, message: &Message) {
        self.log.push(Notification::Success(message.clone()));
    }

    fn notify_error(&mut self, message: &Message) {
        self.log.push(Notification::Error(message.clone()));
    }

    fn confirm(&mut self, message: &Message) -> bool {
        let answer = self.answers.pop_front().unwrap_or(self.default_answer);
        self.log.push(Notification::Confirm {
            message: message.clone(),
            answer,
        });
        answer
    }
}
