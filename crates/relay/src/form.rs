use std::time::{Duration, Instant};

use tracing::warn;

use crate::client::{RelayError, Transport};
use crate::message::ContactMessage;

/// User-visible submission state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Sending,
    Success,
    Error(String),
}

/// The contact form state machine.
///
/// Validation failures surface inline and never reach the transport; a
/// successful send clears every field and shows a confirmation that
/// dismisses itself after the configured interval. There are no retries;
/// a failed submission is resubmitted manually.
#[derive(Debug)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Overrides the reply-to address; defaults to the submitter's email.
    pub reply_to: Option<String>,
    status: FormStatus,
    dismiss_after: Duration,
    success_at: Option<Instant>,
}

impl ContactForm {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            subject: String::new(),
            message: String::new(),
            reply_to: None,
            status: FormStatus::Idle,
            dismiss_after,
            success_at: None,
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Validates and, only when every field passes, hands the message to the
    /// transport. Unless overridden, the submitter's own address doubles as
    /// the reply-to.
    pub fn submit(&mut self, transport: &impl Transport, now: Instant) -> &FormStatus {
        let message = ContactMessage {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
        };
        if let Err(invalid) = message.validate() {
            self.status = FormStatus::Error(invalid.to_string());
            return &self.status;
        }

        self.status = FormStatus::Sending;
        let reply_to = self
            .reply_to
            .clone()
            .unwrap_or_else(|| message.email.clone());
        match transport.send(&message, &reply_to) {
            Ok(()) => {
                self.name.clear();
                self.email.clear();
                self.subject.clear();
                self.message.clear();
                self.status = FormStatus::Success;
                self.success_at = Some(now);
            }
            Err(err) => {
                warn!(%err, "contact submission failed");
                self.status = FormStatus::Error(user_facing(&err));
            }
        }
        &self.status
    }

    /// Reverts a lingering success confirmation to idle once the dismiss
    /// interval has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self.status != FormStatus::Success {
            return;
        }
        let Some(shown_at) = self.success_at else {
            return;
        };
        if now.duration_since(shown_at) >= self.dismiss_after {
            self.status = FormStatus::Idle;
            self.success_at = None;
        }
    }
}

/// A setup problem reads differently from a transport one.
fn user_facing(err: &RelayError) -> String {
    match err {
        RelayError::Config(field) => format!("Email service is not configured ({field} missing)"),
        RelayError::Endpoint(_) => "Email service is not configured (bad endpoint)".to_string(),
        RelayError::Http(_) | RelayError::Status { .. } => {
            "Failed to send message. Please try again.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    /// Recording fake standing in for the HTTP client.
    struct FakeTransport {
        calls: Cell<usize>,
        last_reply_to: RefCell<Option<String>>,
        outcome: Option<fn() -> RelayError>,
    }

    impl FakeTransport {
        fn ok() -> Self {
            Self {
                calls: Cell::new(0),
                last_reply_to: RefCell::new(None),
                outcome: None,
            }
        }

        fn failing(outcome: fn() -> RelayError) -> Self {
            Self {
                outcome: Some(outcome),
                ..Self::ok()
            }
        }
    }

    impl Transport for FakeTransport {
        fn send(&self, _message: &ContactMessage, reply_to: &str) -> Result<(), RelayError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_reply_to.borrow_mut() = Some(reply_to.to_string());
            match self.outcome {
                None => Ok(()),
                Some(make) => Err(make()),
            }
        }
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new(Duration::from_secs(5));
        form.name = "Ada Lovelace".to_string();
        form.email = "ada@example.com".to_string();
        form.subject = "Hello".to_string();
        form.message = "I enjoyed your work.".to_string();
        form
    }

    #[test]
    fn empty_name_blocks_the_network_call() {
        let transport = FakeTransport::ok();
        let mut form = filled_form();
        form.name.clear();
        let status = form.submit(&transport, Instant::now());
        assert_eq!(
            *status,
            FormStatus::Error("Please enter your name".to_string())
        );
        assert_eq!(transport.calls.get(), 0);
    }

    #[test]
    fn malformed_email_blocks_the_network_call() {
        let transport = FakeTransport::ok();
        let mut form = filled_form();
        form.email = "not-an-email".to_string();
        let status = form.submit(&transport, Instant::now());
        assert_eq!(
            *status,
            FormStatus::Error("Please enter a valid email address".to_string())
        );
        assert_eq!(transport.calls.get(), 0);
    }

    #[test]
    fn success_clears_fields_and_dismisses_after_five_seconds() {
        let transport = FakeTransport::ok();
        let mut form = filled_form();
        let now = Instant::now();
        assert_eq!(*form.submit(&transport, now), FormStatus::Success);
        assert_eq!(transport.calls.get(), 1);
        assert!(form.name.is_empty());
        assert!(form.email.is_empty());
        assert!(form.subject.is_empty());
        assert!(form.message.is_empty());

        form.tick(now + Duration::from_millis(4999));
        assert_eq!(*form.status(), FormStatus::Success);
        form.tick(now + Duration::from_millis(5000));
        assert_eq!(*form.status(), FormStatus::Idle);
    }

    #[test]
    fn missing_configuration_reads_differently_from_network_failures() {
        let mut form = filled_form();
        let config_failure = FakeTransport::failing(|| RelayError::Config("service id"));
        let status = form.submit(&config_failure, Instant::now());
        assert_eq!(
            *status,
            FormStatus::Error("Email service is not configured (service id missing)".to_string())
        );

        let mut form = filled_form();
        let status_failure = FakeTransport::failing(|| RelayError::Status {
            status: 403,
            body: "forbidden".to_string(),
        });
        let status = form.submit(&status_failure, Instant::now());
        assert_eq!(
            *status,
            FormStatus::Error("Failed to send message. Please try again.".to_string())
        );
    }

    #[test]
    fn reply_to_defaults_to_the_submitter() {
        let transport = FakeTransport::ok();
        let mut form = filled_form();
        form.submit(&transport, Instant::now());
        assert_eq!(
            transport.last_reply_to.borrow().as_deref(),
            Some("ada@example.com")
        );

        let transport = FakeTransport::ok();
        let mut form = filled_form();
        form.reply_to = Some("inbox@moreau.dev".to_string());
        form.submit(&transport, Instant::now());
        assert_eq!(
            transport.last_reply_to.borrow().as_deref(),
            Some("inbox@moreau.dev")
        );
    }

    #[test]
    fn failed_submission_keeps_the_fields_for_resubmission() {
        let transport = FakeTransport::failing(|| RelayError::Status {
            status: 500,
            body: String::new(),
        });
        let mut form = filled_form();
        form.submit(&transport, Instant::now());
        assert_eq!(form.name, "Ada Lovelace");
        assert_eq!(form.email, "ada@example.com");
    }
}
