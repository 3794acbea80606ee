use std::{
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::Duration,
};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, sleep_until},
};

use crate::{
    ContactFormInput, ContactMessage, Field, FieldErrors, MessageSink, SubmissionState,
    SubmitError,
};

pub const DEFAULT_REVERT_AFTER: Duration = Duration::from_secs(5);

/// What the view needs to draw the form.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct ContactSnapshot {
    pub state: SubmissionState,
    pub input: ContactFormInput,
    pub errors: FieldErrors,
}

impl ContactSnapshot {
    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    pub fn is_submitted(&self) -> bool {
        self.state.is_submitted()
    }
}

struct Form {
    input: ContactFormInput,
    errors: FieldErrors,
    generation: u64,
    revert: Option<JoinHandle<()>>,
}

struct Shared {
    form: Mutex<Form>,
    state: watch::Sender<SubmissionState>,
}

impl Shared {
    fn form(&self) -> MutexGuard<'_, Form> {
        self.form.lock().unwrap_or_else(|err| err.into_inner())
    }

    fn state(&self) -> SubmissionState {
        *self.state.borrow()
    }

    fn revert(&self, generation: u64) {
        let mut form = self.form();

        if form.generation != generation || !self.state().is_submitted() {
            return;
        }

        form.revert = None;
        self.state.send_replace(SubmissionState::Idle);

        tracing::debug!(generation, "contact form reverted to idle");
    }
}

/// Field values, validation and submission lifecycle of one contact form.
///
/// A successful [`submit`](Self::submit) leaves the form `Submitted` and schedules
/// a return to `Idle` after the revert delay. [`reset`](Self::reset) and dropping the
/// controller both cancel that pending revert.
pub struct ContactFormController {
    shared: Arc<Shared>,
    sink: Arc<dyn MessageSink>,
    revert_after: Duration,
}

impl ContactFormController {
    pub fn new(sink: Arc<dyn MessageSink>) -> Self {
        Self::with_revert_after(sink, DEFAULT_REVERT_AFTER)
    }

    pub fn with_revert_after(sink: Arc<dyn MessageSink>, revert_after: Duration) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);

        Self {
            shared: Arc::new(Shared {
                form: Mutex::new(Form {
                    input: ContactFormInput::default(),
                    errors: FieldErrors::default(),
                    generation: 0,
                    revert: None,
                }),
                state,
            }),
            sink,
            revert_after,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.shared.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.shared.state.subscribe()
    }

    pub fn revert_after(&self) -> Duration {
        self.revert_after
    }

    pub fn snapshot(&self) -> ContactSnapshot {
        let form = self.shared.form();

        ContactSnapshot {
            state: self.shared.state(),
            input: form.input.clone(),
            errors: form.errors.clone(),
        }
    }

    /// Sets a field and clears its previous error. An in-flight submission keeps
    /// the values it was started with.
    pub fn update_field(&self, field: Field, value: impl Into<String>) {
        let mut form = self.shared.form();
        form.input.set(field, value.into());
        form.errors.clear(field);
    }

    pub async fn submit(&self) -> Result<ContactMessage, SubmitError> {
        self.start_submit(None).await
    }

    /// Replaces all three fields and submits, as one step. A busy form is left
    /// untouched, values included.
    pub async fn submit_with(
        &self,
        input: ContactFormInput,
    ) -> Result<ContactMessage, SubmitError> {
        self.start_submit(Some(input)).await
    }

    async fn start_submit(
        &self,
        input: Option<ContactFormInput>,
    ) -> Result<ContactMessage, SubmitError> {
        let (message, generation) = {
            let mut form = self.shared.form();
            let state = self.shared.state();

            if !state.is_idle() {
                return Err(SubmitError::Busy(state));
            }

            if let Some(input) = input {
                form.input = input;
            }

            let input = match form.input.check() {
                Ok(input) => input,
                Err(errors) => {
                    form.errors = errors.clone();
                    return Err(SubmitError::Invalid(errors));
                }
            };

            form.errors = FieldErrors::default();
            form.generation += 1;
            self.shared.state.send_replace(SubmissionState::Submitting);

            (ContactMessage::new(input), form.generation)
        };

        // Back to Idle if this future is dropped while the sink is awaited.
        let in_flight = InFlight {
            shared: &self.shared,
            generation,
            settled: false,
        };

        let delivered = self.sink.deliver(&message).await;
        let mut form = in_flight.settle();

        if let Err(err) = delivered {
            self.shared.state.send_replace(SubmissionState::Idle);

            return Err(SubmitError::Delivery(err));
        }

        form.input = ContactFormInput::default();
        self.shared.state.send_replace(SubmissionState::Submitted);

        let deadline = Instant::now() + self.revert_after;
        let shared = Arc::downgrade(&self.shared);
        form.revert = Some(tokio::spawn(revert_at(shared, deadline, generation)));

        Ok(message)
    }

    /// Back to an empty `Idle` form. Returns `false` when there was nothing to reset.
    pub fn reset(&self) -> bool {
        let mut form = self.shared.form();

        if !self.shared.state().is_submitted() {
            return false;
        }

        if let Some(revert) = form.revert.take() {
            revert.abort();
        }

        self.shared.state.send_replace(SubmissionState::Idle);

        true
    }
}

impl Drop for ContactFormController {
    fn drop(&mut self) {
        if let Some(revert) = self.shared.form().revert.take() {
            revert.abort();
        }
    }
}

struct InFlight<'a> {
    shared: &'a Shared,
    generation: u64,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn settle(mut self) -> MutexGuard<'a, Form> {
        let shared = self.shared;
        self.settled = true;

        shared.form()
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        let form = self.shared.form();

        if form.generation == self.generation && self.shared.state().is_submitting() {
            self.shared.state.send_replace(SubmissionState::Idle);

            tracing::debug!(
                generation = self.generation,
                "contact submission cancelled, back to idle"
            );
        }
    }
}

async fn revert_at(shared: Weak<Shared>, deadline: Instant, generation: u64) {
    sleep_until(deadline).await;

    if let Some(shared) = shared.upgrade() {
        shared.revert(generation);
    }
}
