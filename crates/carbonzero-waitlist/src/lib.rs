//! Waitlist signup for carbonzero.
//!
//! Two handlers share one form: a local one that validates strictly and
//! remembers the signup on disk, and a remote one that posts the address to a
//! form endpoint from a worker thread. Either way the form shows feedback and
//! resets itself after a fixed delay.

mod error;
mod form;
mod remote;
mod store;
mod validate;

pub use error::{StoreError, SubmitError};
pub use form::{
    BUTTON_IDLE, Feedback, Handler, SubmitOutcome, Tone, WaitlistForm,
};
pub use remote::{RemoteCollector, Transport, UreqTransport};
pub use store::{LocalStore, SignupRecord, WAITLIST_KEY};
pub use validate::{is_valid_email, looks_like_email};
