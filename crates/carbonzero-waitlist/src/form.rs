//! Waitlist form state: input, button and feedback line.

use std::sync::mpsc::{self, TryRecvError};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::{
    LocalStore, RemoteCollector, SignupRecord, SubmitError, is_valid_email, looks_like_email,
};

/// Button label while the form accepts submissions.
pub const BUTTON_IDLE: &str = "Join the Waitlist";
const BUTTON_THANKS: &str = "Thank you!";
const BUTTON_SUBMITTING: &str = "Submitting...";

const MSG_INVALID: &str = "Please enter a valid email address.";
const MSG_LOCAL_OK: &str = "We'll be in touch soon with exclusive updates!";
const MSG_REMOTE_OK: &str = "You're added to the waitlist!";
const MSG_REMOTE_FAILED: &str = "Something went wrong. Try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub tone: Tone,
}

impl Feedback {
    fn new(text: &str, tone: Tone) -> Self {
        Self {
            text: text.to_string(),
            tone,
        }
    }
}

/// Where accepted signups go.
#[derive(Debug, Clone)]
pub enum Handler {
    Local(LocalStore),
    Remote(RemoteCollector),
}

/// What a submit attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Button disabled or input unusable; nothing changed.
    Ignored,
    /// Input failed validation and an error message is shown.
    Rejected,
    /// Signup stored locally.
    Saved,
    /// Signup handed to the remote worker.
    Sent,
}

#[derive(Debug)]
pub struct WaitlistForm {
    handler: Handler,
    reset_delay: Duration,
    input: String,
    feedback: Option<Feedback>,
    button_label: &'static str,
    button_disabled: bool,
    pending: Option<mpsc::Receiver<Result<(), SubmitError>>>,
    reset_at: Option<Instant>,
}

impl WaitlistForm {
    pub fn new(handler: Handler, reset_delay: Duration) -> Self {
        Self {
            handler,
            reset_delay,
            input: String::new(),
            feedback: None,
            button_label: BUTTON_IDLE,
            button_disabled: false,
            pending: None,
            reset_at: None,
        }
    }

    pub fn local(store: LocalStore, reset_delay: Duration) -> Self {
        Self::new(Handler::Local(store), reset_delay)
    }

    pub fn remote(collector: RemoteCollector, reset_delay: Duration) -> Self {
        Self::new(Handler::Remote(collector), reset_delay)
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_char(&mut self, c: char) {
        if !c.is_control() {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn button_label(&self) -> &str {
        self.button_label
    }

    pub fn button_disabled(&self) -> bool {
        self.button_disabled
    }

    /// A remote submission is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the scheduled reset, if any.
    pub fn reset_at(&self) -> Option<Instant> {
        self.reset_at
    }

    pub fn submit(&mut self, now: Instant) -> SubmitOutcome {
        if self.button_disabled {
            return SubmitOutcome::Ignored;
        }
        match &self.handler {
            Handler::Local(store) => {
                if !is_valid_email(&self.input) {
                    self.feedback = Some(Feedback::new(MSG_INVALID, Tone::Error));
                    return SubmitOutcome::Rejected;
                }

                self.button_disabled = true;
                self.button_label = BUTTON_THANKS;
                self.feedback = Some(Feedback::new(MSG_LOCAL_OK, Tone::Success));
                if let Err(e) = store.remember_signup(&SignupRecord::now(self.input.as_str())) {
                    warn!("could not save waitlist signup: {e}");
                }
                self.reset_at = Some(now + self.reset_delay);
                SubmitOutcome::Saved
            }
            Handler::Remote(collector) => {
                if !looks_like_email(&self.input) {
                    return SubmitOutcome::Ignored;
                }

                self.button_disabled = true;
                self.button_label = BUTTON_SUBMITTING;
                self.pending = Some(collector.submit(self.input.trim()));
                SubmitOutcome::Sent
            }
        }
    }

    /// Collect a finished remote submission and apply a due reset.
    pub fn poll(&mut self, now: Instant) {
        if let Some(rx) = &self.pending {
            let result = match rx.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => Some(Err(SubmitError::WorkerGone)),
            };
            if let Some(result) = result {
                self.pending = None;
                match result {
                    Ok(()) => {
                        self.feedback = Some(Feedback::new(MSG_REMOTE_OK, Tone::Success));
                        self.input.clear();
                    }
                    Err(e) => {
                        debug!("remote submission finished with error: {e}");
                        self.feedback = Some(Feedback::new(MSG_REMOTE_FAILED, Tone::Error));
                    }
                }
                self.reset_at = Some(now + self.reset_delay);
            }
        }

        if self.reset_at.is_some_and(|at| now >= at) {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.reset_at = None;
        self.button_disabled = false;
        self.button_label = BUTTON_IDLE;
        match self.handler {
            Handler::Local(_) => self.input.clear(),
            Handler::Remote(_) => self.feedback = None,
        }
    }
}
