use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use tokio::time::Instant;

use crate::{ContactFormController, ContactSnapshot, MessageSink};

#[derive(Clone, Debug)]
pub struct SessionLimits {
    pub revert_after: Duration,
    pub idle_ttl: Duration,
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            revert_after: crate::DEFAULT_REVERT_AFTER,
            idle_ttl: Duration::from_secs(30 * 60),
            max_sessions: 10_000,
        }
    }
}

struct Entry {
    controller: Arc<ContactFormController>,
    last_seen: Instant,
}

/// One contact form per visitor session.
///
/// Evicting an entry drops its controller, which cancels any pending revert.
pub struct ContactSessions {
    sink: Arc<dyn MessageSink>,
    limits: SessionLimits,
    entries: Mutex<HashMap<String, Entry>>,
}

impl ContactSessions {
    pub fn new(sink: Arc<dyn MessageSink>, limits: SessionLimits) -> Self {
        Self {
            sink,
            limits,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn limits(&self) -> &SessionLimits {
        &self.limits
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(|err| err.into_inner())
    }

    pub fn get(&self, id: &str) -> Option<Arc<ContactFormController>> {
        let mut entries = self.entries();
        let entry = entries.get_mut(id)?;
        entry.last_seen = Instant::now();

        Some(entry.controller.clone())
    }

    /// Current form of a session, or an empty idle form when it has none.
    pub fn snapshot(&self, id: Option<&str>) -> ContactSnapshot {
        id.and_then(|id| self.get(id))
            .map(|controller| controller.snapshot())
            .unwrap_or_default()
    }

    pub fn get_or_create(&self, id: &str) -> Arc<ContactFormController> {
        let mut entries = self.entries();
        let now = Instant::now();

        if let Some(entry) = entries.get_mut(id) {
            entry.last_seen = now;
            return entry.controller.clone();
        }

        if entries.len() >= self.limits.max_sessions {
            let oldest = entries
                .iter()
                .filter(|(_, entry)| !entry.controller.state().is_submitting())
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| id.to_owned());

            if let Some(oldest) = oldest {
                entries.remove(&oldest);
                tracing::debug!(session = %oldest, "contact session evicted, registry full");
            }
        }

        let controller = Arc::new(ContactFormController::with_revert_after(
            self.sink.clone(),
            self.limits.revert_after,
        ));

        entries.insert(
            id.to_owned(),
            Entry {
                controller: controller.clone(),
                last_seen: now,
            },
        );

        controller
    }

    pub fn remove(&self, id: &str) -> bool {
        self.entries().remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Drops sessions unused for longer than the idle TTL. Returns how many went.
    pub fn sweep(&self) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        let ttl = self.limits.idle_ttl;

        entries.retain(|_, entry| {
            entry.last_seen.elapsed() < ttl || entry.controller.state().is_submitting()
        });

        before - entries.len()
    }
}
