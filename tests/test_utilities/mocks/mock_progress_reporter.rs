use std::sync::{Arc, Mutex};
use vexi::prelude::*;

/// One call made on the reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reported {
    Message(String),
    Progress(usize, usize),
    Error(String),
    Completion(String),
}

/// Mock ProgressReporter that records every call in order
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    pub reported: Arc<Mutex<Vec<Reported>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reported(&self) -> Vec<Reported> {
        self.reported.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.reported()
            .into_iter()
            .filter_map(|r| match r {
                Reported::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn completions(&self) -> Vec<String> {
        self.reported()
            .into_iter()
            .filter_map(|r| match r {
                Reported::Completion(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Last (current, total) pair passed to `report_progress`
    pub fn last_progress(&self) -> Option<(usize, usize)> {
        self.reported().into_iter().rev().find_map(|r| match r {
            Reported::Progress(current, total) => Some((current, total)),
            _ => None,
        })
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.reported
            .lock()
            .unwrap()
            .push(Reported::Message(message.to_string()));
    }

    fn report_progress(&self, current: usize, total: usize, _message: Option<&str>) {
        self.reported
            .lock()
            .unwrap()
            .push(Reported::Progress(current, total));
    }

    fn report_error(&self, message: &str) {
        self.reported
            .lock()
            .unwrap()
            .push(Reported::Error(message.to_string()));
    }

    fn report_completion(&self, message: &str) {
        self.reported
            .lock()
            .unwrap()
            .push(Reported::Completion(message.to_string()));
    }
}
