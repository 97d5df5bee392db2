pub mod client;
pub mod listener;
pub mod messages;

pub use client::{connect, EventPublisher};
pub use listener::CommandListener;
pub use messages::{Command, InputFile, Reply, SessionEvent};
