use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AppointmentRecord;

/// Where the booking dialogue currently stands.
///
/// `Initial` is free-form Q&A; every other step names the field collected
/// by the next user turn.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStep {
    #[default]
    Initial,
    CollectingPatientName,
    CollectingPatientAge,
    CollectingDoctorName,
    CollectingDepartment,
    CollectingDatetime,
    CollectingSymptoms,
}

impl ConversationStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationStep::Initial => "initial",
            ConversationStep::CollectingPatientName => "collecting_patient_name",
            ConversationStep::CollectingPatientAge => "collecting_patient_age",
            ConversationStep::CollectingDoctorName => "collecting_doctor_name",
            ConversationStep::CollectingDepartment => "collecting_department",
            ConversationStep::CollectingDatetime => "collecting_datetime",
            ConversationStep::CollectingSymptoms => "collecting_symptoms",
        }
    }

    pub fn is_booking(&self) -> bool {
        *self != ConversationStep::Initial
    }
}

/// Dialogue state for one browser session. Lives only in memory.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub id: Uuid,
    pub step: ConversationStep,
    pub record: AppointmentRecord,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            step: ConversationStep::Initial,
            record: AppointmentRecord::default(),
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
