//! Contact submission through a third-party transactional-email relay.
//!
//! Three pieces: [`ContactMessage`] validation with the exact inline
//! messages the form shows, the [`RelayClient`] that posts the JSON
//! envelope to the relay endpoint, and the [`ContactForm`] state machine
//! gluing them together behind the [`Transport`] seam.

mod client;
mod form;
mod message;

pub use client::{RelayClient, RelayConfig, RelayError, Transport};
pub use form::{ContactForm, FormStatus};
pub use message::{ContactMessage, ValidationError};
