use serde::{Deserialize, Serialize};

/// One audio file in a start request, attributed to its speaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFile {
    pub path: String,
    pub character: String,
}

/// Request received on the command subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Process one recorded session and publish the resulting note.
    Start {
        files: Vec<InputFile>,
        vault: String,
        subdirectory: String,
        format: String,
    },
    /// Liveness probe.
    Ping,
    /// Stop listening. Does not interrupt a session already in progress.
    Stop,
}

/// Reply sent back on the command channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    Accepted,
    Pong,
    Error { message: String },
}

/// One-way notification published on the event subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Progress {
        stage: String,
        percentage: u8,
        message: String,
    },
    /// Terminal success; `message` carries the output note path.
    Finish { message: String },
    /// Terminal failure; `message` is human-readable.
    Error { message: String },
}
