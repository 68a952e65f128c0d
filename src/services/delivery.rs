//! Itinerary delivery service.
//!
//! Sending is a pluggable collaborator so a real mail transport can replace
//! the simulated one without touching the store or the app state.

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;

use crate::error::{Error, Result};
use crate::itinerary::ItineraryDocument;

/// Who the itinerary goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// Sender's display name, shown in the greeting.
    pub name: String,
    /// Destination email address.
    pub address: String,
}

impl Recipient {
    /// Validate dialog input. Both fields are required after trimming.
    pub fn new(name: &str, address: &str) -> Result<Self> {
        lazy_static::lazy_static! {
            static ref ADDRESS_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
                .unwrap_or_else(|_| unreachable!("address pattern is a valid regex"));
        }

        let name = name.trim();
        let address = address.trim();
        if name.is_empty() || address.is_empty() {
            return Err(Error::Delivery("Please fill in all fields".to_string()));
        }
        if !ADDRESS_RE.is_match(address) {
            return Err(Error::Delivery(format!("'{address}' is not a valid email address")));
        }

        Ok(Self {
            name: name.to_string(),
            address: address.to_string(),
        })
    }
}

/// Trait for itinerary delivery.
///
/// Implementations must not touch the itinerary; a failed send leaves the
/// week exactly as it was.
#[async_trait]
pub trait ItinerarySender: Send + Sync {
    /// Deliver `document` to `recipient`.
    async fn send(&self, document: &ItineraryDocument, recipient: &Recipient) -> Result<()>;

    /// Get the transport name (for display purposes).
    fn transport_name(&self) -> &'static str;
}

/// Stand-in sender: waits, logs, and reports success.
#[derive(Debug, Clone)]
pub struct SimulatedSender {
    delay: Duration,
}

impl SimulatedSender {
    /// Create a sender that takes `delay` to "deliver".
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ItinerarySender for SimulatedSender {
    async fn send(&self, document: &ItineraryDocument, recipient: &Recipient) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(
            "Simulated send of {} activities from {} to {} ({} bytes of HTML)",
            document.entry_count(),
            recipient.name,
            recipient.address,
            document.to_html().len()
        );
        Ok(())
    }

    fn transport_name(&self) -> &'static str {
        "simulated"
    }
}
