use anyhow::{Context, Result};
use async_nats::Client;
use async_trait::async_trait;
use tracing::{info, warn};

use super::messages::SessionEvent;
use crate::session::EventSink;

/// Connect to the NATS server backing both channels.
pub async fn connect(url: &str) -> Result<Client> {
    info!("Connecting to NATS at {}", url);

    let client = async_nats::connect(url)
        .await
        .context("Failed to connect to NATS")?;

    info!("Connected to NATS successfully");
    Ok(client)
}

/// Publishes session events on the one-way event subject.
///
/// Emission is fire-and-forget: a failed publish is logged and dropped,
/// never surfaced to the pipeline.
pub struct EventPublisher {
    client: Client,
    subject: String,
}

impl EventPublisher {
    pub fn new(client: Client, subject: String) -> Self {
        Self { client, subject }
    }

    pub async fn publish(&self, event: &SessionEvent) {
        let payload = match serde_json::to_vec(event) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%error, "Failed to encode session event");
                return;
            }
        };

        if let Err(error) = self
            .client
            .publish(self.subject.clone(), payload.into())
            .await
        {
            warn!(%error, subject = %self.subject, "Failed to publish session event");
        }
    }
}

#[async_trait]
impl EventSink for EventPublisher {
    async fn emit(&self, event: SessionEvent) {
        self.publish(&event).await;
    }
}
