use std::time::Instant;

use crate::models::QueryResponse;
use crate::submission::{Notification, SubmissionFlow, SubmissionState};

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Application state for the TUI.
///
/// Holds the query input buffer, the panel focus, the visible
/// notifications and the submission flow that owns the displayed result.
pub struct App {
    /// Submission state machine and last displayed result
    flow: SubmissionFlow,
    /// Query input buffer
    input: String,
    /// Currently focused panel
    focus: Focus,
    /// Notifications still on screen, oldest first
    notifications: Vec<Notification>,
    /// Scroll offset for the result panel
    result_scroll: u16,
    /// Event loop ticks, drives the spinner
    ticks: usize,
}

/// Panel focus state for keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Query input is focused (typing edits the query, Enter submits)
    QueryInput,
    /// Result panel is focused (j/k scrolling, q quits)
    Results,
}

impl App {
    /// Creates an App around `flow` with an empty input and focus on the input.
    pub fn new(flow: SubmissionFlow) -> Self {
        Self {
            flow,
            input: String::new(),
            focus: Focus::QueryInput,
            notifications: Vec::new(),
            result_scroll: 0,
            ticks: 0,
        }
    }

    /// Returns the query input buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the current focus state.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Returns the submission state.
    pub fn state(&self) -> &SubmissionState {
        self.flow.state()
    }

    /// Returns true while a query is in flight; the input is disabled meanwhile.
    pub fn is_pending(&self) -> bool {
        self.flow.is_pending()
    }

    /// Returns the result currently on screen, if any.
    pub fn displayed(&self) -> Option<&QueryResponse> {
        self.flow.displayed()
    }

    /// Returns the notifications currently visible.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Returns the spinner glyph for the current tick.
    pub fn spinner(&self) -> char {
        SPINNER_FRAMES[self.ticks % SPINNER_FRAMES.len()]
    }

    /// Switches focus to the other panel.
    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            Focus::QueryInput => Focus::Results,
            Focus::Results => Focus::QueryInput,
        };
    }

    /// Switches focus in reverse order. With two panels this matches `next_focus`.
    pub fn prev_focus(&mut self) {
        self.next_focus();
    }

    /// Returns focus to the query input (Esc key behavior).
    pub fn reset_focus(&mut self) {
        self.focus = Focus::QueryInput;
    }

    /// Adds a character to the input buffer. Ignored while a query is in flight.
    pub fn push_input_char(&mut self, c: char) {
        if !self.is_pending() {
            self.input.push(c);
        }
    }

    /// Removes the last character from the input buffer. Ignored while a query is in flight.
    pub fn pop_input_char(&mut self) {
        if !self.is_pending() {
            self.input.pop();
        }
    }

    /// Submits the current input.
    ///
    /// Empty input produces a validation notification and no request. While a
    /// query is in flight the call is ignored. The input text is kept so it can
    /// be edited and resubmitted.
    pub fn submit(&mut self) {
        // Failures are reported through notifications
        let _ = self.flow.on_submit(&self.input);
        self.collect_notifications();
    }

    /// Advances one event loop tick.
    ///
    /// Applies a resolved query, picks up new notifications and drops the
    /// ones that expired at `now`.
    pub fn tick(&mut self, now: Instant) {
        self.ticks = self.ticks.wrapping_add(1);
        if self.flow.poll() && matches!(self.flow.state(), SubmissionState::Succeeded(_)) {
            self.result_scroll = 0;
        }
        self.collect_notifications();
        self.notifications.retain(|n| !n.is_expired_at(now));
    }

    fn collect_notifications(&mut self) {
        self.notifications.extend(self.flow.drain_notifications());
    }

    /// Returns the current result panel scroll offset.
    pub fn result_scroll(&self) -> u16 {
        self.result_scroll
    }

    /// Scrolls the result panel down by the specified amount.
    pub fn scroll_down(&mut self, amount: u16) {
        self.result_scroll = self.result_scroll.saturating_add(amount);
    }

    /// Scrolls the result panel up by the specified amount.
    pub fn scroll_up(&mut self, amount: u16) {
        self.result_scroll = self.result_scroll.saturating_sub(amount);
    }

    /// Resets the result panel scroll to the top.
    pub fn scroll_to_top(&mut self) {
        self.result_scroll = 0;
    }
}
