use std::time::Duration;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::ContactFormInput;

/// A validated submission, as handed to a [`MessageSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitted_at: u64,
}

impl ContactMessage {
    pub fn new(input: ContactFormInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            message: input.message,
            submitted_at: OffsetDateTime::now_utc().unix_timestamp().max(0) as u64,
        }
    }
}

#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn deliver(&self, message: &ContactMessage) -> anyhow::Result<()>;
}

/// Accepts every message after a fixed delay. Nothing leaves the process.
#[derive(Clone, Debug)]
pub struct SimulatedSink {
    latency: Duration,
}

impl SimulatedSink {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedSink {
    fn default() -> Self {
        Self::new(Duration::from_millis(600))
    }
}

#[async_trait]
impl MessageSink for SimulatedSink {
    async fn deliver(&self, message: &ContactMessage) -> anyhow::Result<()> {
        tokio::time::sleep(self.latency).await;

        tracing::info!(
            sender = %message.name,
            email = %message.email,
            chars = message.message.chars().count(),
            submitted_at = message.submitted_at,
            "contact message accepted (simulated delivery)"
        );

        Ok(())
    }
}
