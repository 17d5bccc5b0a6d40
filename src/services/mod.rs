/// Widget logic: status rendering and observation submission
mod status;
mod submission;

pub use status::{build_plan, build_plan_in, StatusViewModel, NO_INFORMATION_PLACEHOLDER};
pub use submission::{
    classify_submission_error, Clock, SubmissionController, SystemClock,
    GENERIC_SUBMISSION_ERROR, LOADING_LABEL, SUCCESS_MESSAGE,
};

use std::sync::{Mutex, MutexGuard};

/// Lock a view or state cell. A panic while holding one of these cannot leave
/// the data half-written, so poisoning is ignored.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
