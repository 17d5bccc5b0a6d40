use super::lock;
use crate::clients::TomApi;
use crate::domain::{Configuration, ObservationRequest, SubmissionOutcome, SubmissionState};
use crate::errors::{ClientError, SubmissionError};
use crate::view::FormView;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

pub const LOADING_LABEL: &str = "Submitting...";
pub const SUCCESS_MESSAGE: &str =
    "Observation requested! You will receive an email when it has been completed.";
pub const GENERIC_SUBMISSION_ERROR: &str =
    "Could not connect to the observation service. Please try again later.";

/// Source of the observation window start
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Drives one observation request at a time through the form.
///
/// A `submit` issued while another is still in flight is ignored: it
/// returns [`SubmissionOutcome::Ignored`] and leaves the form untouched.
pub struct SubmissionController<A, V, C = SystemClock> {
    config: Arc<Configuration>,
    api: Arc<A>,
    view: Mutex<V>,
    clock: C,
    state: Mutex<SubmissionState>,
}

impl<A: TomApi, V: FormView> SubmissionController<A, V, SystemClock> {
    pub fn new(config: Arc<Configuration>, api: Arc<A>, view: V) -> Self {
        Self::with_clock(config, api, view, SystemClock)
    }
}

impl<A: TomApi, V: FormView, C: Clock> SubmissionController<A, V, C> {
    pub fn with_clock(config: Arc<Configuration>, api: Arc<A>, view: V, clock: C) -> Self {
        Self {
            config,
            api,
            view: Mutex::new(view),
            clock,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    /// State left by the most recent submission
    pub fn state(&self) -> SubmissionState {
        lock(&self.state).clone()
    }

    pub fn with_view<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        let view = lock(&self.view);
        f(&*view)
    }

    pub async fn submit(&self, email: &str) -> SubmissionOutcome {
        {
            let mut state = lock(&self.state);
            if *state == SubmissionState::Submitting {
                warn!("observation request already in flight, ignoring submit");
                return SubmissionOutcome::Ignored;
            }
            *state = SubmissionState::Submitting;
        }

        let original_label = {
            let mut view = lock(&self.view);
            view.hide_notifications();
            view.set_inputs_enabled(false);
            let label = view.submit_label();
            view.set_submit_label(LOADING_LABEL);
            label
        };
        let mut pending = Pending {
            view: &self.view,
            state: &self.state,
            original_label,
            finished: false,
        };

        let request = ObservationRequest::new(&self.config, email, self.clock.now());
        info!(
            target_id = request.target,
            facility = %request.facility,
            start = %request.overrides.start,
            "submitting observation request"
        );

        let result = self
            .api
            .submit_observation(&self.config.submission_url(), &request)
            .await;

        let (next, outcome) = match result {
            Ok(()) => {
                info!(target_id = request.target, "observation request accepted");
                (SubmissionState::Succeeded, SubmissionOutcome::Succeeded)
            }
            Err(e) => {
                warn!("observation request failed: {}", e);
                let reason = classify_submission_error(&e).message;
                (
                    SubmissionState::Failed(reason.clone()),
                    SubmissionOutcome::Failed(reason),
                )
            }
        };

        {
            let mut view = lock(&self.view);
            match &outcome {
                SubmissionOutcome::Succeeded => {
                    view.clear_email();
                    view.show_success(SUCCESS_MESSAGE);
                }
                SubmissionOutcome::Failed(reason) => view.show_error(reason),
                SubmissionOutcome::Ignored => {}
            }
            view.set_inputs_enabled(true);
            view.set_submit_label(&pending.original_label);
        }

        *lock(&self.state) = next;
        pending.finished = true;
        outcome
    }
}

/// Puts the form back to Idle if a submission future is dropped before it
/// reaches a terminal state, e.g. when wrapped in a timeout.
struct Pending<'a, V: FormView> {
    view: &'a Mutex<V>,
    state: &'a Mutex<SubmissionState>,
    original_label: String,
    finished: bool,
}

impl<V: FormView> Drop for Pending<'_, V> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        warn!("observation request abandoned before completion");
        {
            let mut view = lock(self.view);
            view.set_inputs_enabled(true);
            view.set_submit_label(&self.original_label);
        }
        *lock(self.state) = SubmissionState::Idle;
    }
}

/// Turn a failed submission into the message shown to the user.
///
/// Client errors carrying a `{field: [messages]}` body are validation
/// feedback and are surfaced verbatim, in the order the backend sent them.
/// Everything else gets the generic message.
pub fn classify_submission_error(err: &ClientError) -> SubmissionError {
    let message = match err {
        ClientError::Status { status, body } if status.is_client_error() => {
            validation_messages(body)
        }
        _ => None,
    };
    SubmissionError {
        message: message.unwrap_or_else(|| GENERIC_SUBMISSION_ERROR.to_string()),
    }
}

fn validation_messages(body: &str) -> Option<String> {
    let fields: Map<String, Value> = serde_json::from_str(body).ok()?;
    let mut messages = Vec::new();
    for value in fields.values() {
        match value {
            Value::String(s) => messages.push(s.as_str()),
            Value::Array(items) => {
                for item in items {
                    messages.push(item.as_str()?);
                }
            }
            _ => return None,
        }
    }
    if messages.is_empty() {
        return None;
    }
    Some(messages.join("\n"))
}
