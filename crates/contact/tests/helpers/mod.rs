use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use folio_contact::{ContactFormController, ContactMessage, Field, MessageSink};
use tokio::sync::Semaphore;

#[derive(Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<ContactMessage>>,
}

impl RecordingSink {
    pub fn delivered(&self) -> Vec<ContactMessage> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn deliver(&self, message: &ContactMessage) -> anyhow::Result<()> {
        self.delivered.lock().unwrap().push(message.clone());

        Ok(())
    }
}

/// Holds every delivery until [`GateSink::open`] is called.
pub struct GateSink {
    gate: Semaphore,
    pub inner: RecordingSink,
}

impl GateSink {
    pub fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
            inner: RecordingSink::default(),
        }
    }

    pub fn open(&self) {
        self.gate.add_permits(1);
    }
}

#[async_trait]
impl MessageSink for GateSink {
    async fn deliver(&self, message: &ContactMessage) -> anyhow::Result<()> {
        self.gate.acquire().await?.forget();
        self.inner.deliver(message).await
    }
}

pub struct FailingSink;

#[async_trait]
impl MessageSink for FailingSink {
    async fn deliver(&self, _message: &ContactMessage) -> anyhow::Result<()> {
        anyhow::bail!("mail relay unreachable")
    }
}

#[allow(dead_code)]
pub fn fill(controller: &ContactFormController, name: &str, email: &str, message: &str) {
    controller.update_field(Field::Name, name);
    controller.update_field(Field::Email, email);
    controller.update_field(Field::Message, message);
}

#[allow(dead_code)]
pub fn fill_valid(controller: &ContactFormController) {
    fill(
        controller,
        "Jo",
        "jo@example.com",
        "Hello there, this is long enough.",
    );
}

#[allow(dead_code)]
pub fn recording() -> (Arc<RecordingSink>, ContactFormController) {
    let sink = Arc::new(RecordingSink::default());
    let controller = ContactFormController::new(sink.clone());

    (sink, controller)
}
