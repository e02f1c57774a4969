//! Remote waitlist submission.

use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::SubmitError;

/// Sends a form-encoded POST and reports the HTTP status.
pub trait Transport: Send + Sync {
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<u16, SubmitError>;
}

/// [`Transport`] backed by a ureq agent.
///
/// HTTP error statuses are not treated as failures: any response means the
/// request reached the endpoint.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<u16, SubmitError> {
        let response = self
            .agent
            .post(url)
            .send_form(fields.iter().copied())
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        Ok(response.status().as_u16())
    }
}

/// Posts signups to a form endpoint, one worker thread per submission.
#[derive(Clone)]
pub struct RemoteCollector {
    endpoint: String,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for RemoteCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteCollector")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl RemoteCollector {
    pub fn new(endpoint: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }

    /// Collector using a real HTTP client with the given request timeout.
    pub fn over_http(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self::new(endpoint, Arc::new(UreqTransport::new(timeout)))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit `email` in the background. The receiver yields exactly one result.
    pub fn submit(&self, email: &str) -> mpsc::Receiver<Result<(), SubmitError>> {
        let (tx, rx) = mpsc::channel();
        let endpoint = self.endpoint.clone();
        let transport = self.transport.clone();
        let email = email.to_string();

        thread::spawn(move || {
            debug!(%endpoint, "posting waitlist signup");
            let result = transport
                .post_form(&endpoint, &[("email", email.as_str())])
                .map(|status| info!(status, "waitlist signup posted"))
                .inspect_err(|e| warn!("waitlist signup failed: {e}"));
            // The form may have gone away; nothing to report to then.
            let _ = tx.send(result);
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Capture {
        calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl Transport for Capture {
        fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<u16, SubmitError> {
            let fields = fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            self.calls.lock().unwrap().push((url.to_string(), fields));
            Ok(500)
        }
    }

    struct Offline;

    impl Transport for Offline {
        fn post_form(&self, _url: &str, _fields: &[(&str, &str)]) -> Result<u16, SubmitError> {
            Err(SubmitError::Transport("connection refused".into()))
        }
    }

    #[test]
    fn test_submit_posts_email_field() {
        let capture = Arc::new(Capture::default());
        let collector = RemoteCollector::new("https://example.com/hook", capture.clone());

        let result = collector
            .submit("a@b.co")
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        // Any HTTP status counts as delivered.
        assert_eq!(result, Ok(()));

        let calls = capture.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://example.com/hook");
        assert_eq!(calls[0].1, vec![("email".to_string(), "a@b.co".to_string())]);
    }

    #[test]
    fn test_transport_failure_is_reported() {
        let collector = RemoteCollector::new("https://example.com/hook", Arc::new(Offline));
        let result = collector
            .submit("a@b.co")
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert!(matches!(result, Err(SubmitError::Transport(_))));
    }
}
