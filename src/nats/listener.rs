use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_nats::{Client, Subject};
use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::client::EventPublisher;
use super::messages::{Command, Reply};
use crate::session::{EventSink, SessionRequest, SessionRunner};

/// Single-slot control surface over the command subject.
///
/// Commands are served one at a time. A `start` blocks the loop for the
/// whole session, so a second session can never be accepted while one
/// runs; after the session (or a `stop`) the shutdown token is cancelled
/// and the listener stops.
pub struct CommandListener {
    client: Client,
    command_subject: String,
    runner: Arc<SessionRunner>,
    events: Arc<EventPublisher>,
}

impl CommandListener {
    pub fn new(
        client: Client,
        command_subject: String,
        runner: Arc<SessionRunner>,
        events: Arc<EventPublisher>,
    ) -> Self {
        Self {
            client,
            command_subject,
            runner,
            events,
        }
    }

    pub async fn run(&self, shutdown: CancellationToken) -> Result<()> {
        let mut subscriber = self
            .client
            .subscribe(self.command_subject.clone())
            .await
            .context("Failed to subscribe to command subject")?;

        info!(subject = %self.command_subject, "Command listener started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                message = subscriber.next() => {
                    let Some(message) = message else {
                        warn!("Command subscription closed");
                        break;
                    };

                    match serde_json::from_slice::<Command>(&message.payload) {
                        Ok(Command::Ping) => {
                            self.reply(message.reply, &Reply::Pong).await;
                        }
                        Ok(Command::Stop) => {
                            info!("Received stop command");
                            self.reply(message.reply, &Reply::Accepted).await;
                            shutdown.cancel();
                            break;
                        }
                        Ok(Command::Start {
                            files,
                            vault,
                            subdirectory,
                            format,
                        }) => {
                            info!(files = files.len(), "Received start command");
                            self.reply(message.reply, &Reply::Accepted).await;

                            let request = SessionRequest {
                                files,
                                vault: PathBuf::from(vault),
                                subdirectory,
                                format,
                            };
                            let sink: Arc<dyn EventSink> = self.events.clone();
                            if let Err(session_error) = self
                                .runner
                                .run(request, sink, shutdown.child_token())
                                .await
                            {
                                error!(%session_error, "Session ended with error");
                            }

                            shutdown.cancel();
                            break;
                        }
                        Err(parse_error) => {
                            warn!(%parse_error, "Unrecognized command");
                            self.reply(
                                message.reply,
                                &Reply::Error {
                                    message: "unknown command".to_string(),
                                },
                            )
                            .await;
                        }
                    }
                }
            }
        }

        if let Err(unsubscribe_error) = subscriber.unsubscribe().await {
            warn!(%unsubscribe_error, "Failed to unsubscribe cleanly");
        }
        info!("Command listener stopped");
        Ok(())
    }

    async fn reply(&self, reply_to: Option<Subject>, reply: &Reply) {
        let Some(subject) = reply_to else {
            warn!("Command carried no reply subject");
            return;
        };

        match serde_json::to_vec(reply) {
            Ok(payload) => {
                if let Err(publish_error) = self.client.publish(subject, payload.into()).await {
                    warn!(%publish_error, "Failed to send command reply");
                }
            }
            Err(encode_error) => warn!(%encode_error, "Failed to encode command reply"),
        }
    }
}
