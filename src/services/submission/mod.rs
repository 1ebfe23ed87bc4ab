pub mod webhook;

use async_trait::async_trait;

use crate::models::{CompleteAppointment, SubmissionOutcome};

/// Hands a finished appointment to the external booking system. One attempt,
/// no retries; every failure is folded into the returned outcome.
#[async_trait]
pub trait SubmissionAdapter: Send + Sync {
    async fn submit(&self, appointment: &CompleteAppointment) -> SubmissionOutcome;
}
