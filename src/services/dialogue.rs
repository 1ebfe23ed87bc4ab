//! The booking dialogue as a pure transition function.
//!
//! Nothing here sleeps, renders or talks to the network. The chat runner
//! feeds user text in, presents the replies that come out and, when a
//! transition hands back a completed appointment, performs the submission
//! and presents [`outcome_replies`] for whatever the booking system said.

use crate::config::ClinicProfile;
use crate::models::{AppointmentRecord, CompleteAppointment, ConversationStep, SubmissionOutcome, TransportFailureKind};
use crate::services::departments::{department_list, resolve_department};
use crate::services::intent::{classify_topic, is_booking_request, Topic};

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub step: ConversationStep,
    pub record: AppointmentRecord,
    pub replies: Vec<String>,
    pub submission: Option<CompleteAppointment>,
}

impl Transition {
    fn stay(step: ConversationStep, record: &AppointmentRecord, replies: Vec<String>) -> Self {
        Self {
            step,
            record: record.clone(),
            replies,
            submission: None,
        }
    }

    fn to(step: ConversationStep, record: AppointmentRecord, replies: Vec<String>) -> Self {
        Self {
            step,
            record,
            replies,
            submission: None,
        }
    }
}

pub fn greeting(clinic: &ClinicProfile) -> String {
    format!(
        "Hello! I'm your virtual assistant at {}. How can I help you today? You can ask me about booking an appointment, hospital services, or general information.",
        clinic.name
    )
}

pub const SUBMITTING: &str =
    "Thank you for providing all the information! Let me submit your appointment request...";

pub const ANYTHING_ELSE: &str = "Is there anything else I can help you with today?";

/// Advance the dialogue by one user turn.
pub fn advance(
    step: ConversationStep,
    record: &AppointmentRecord,
    input: &str,
    clinic: &ClinicProfile,
) -> Transition {
    let text = input.trim();
    if text.is_empty() {
        return Transition::stay(step, record, Vec::new());
    }

    match step {
        ConversationStep::Initial => answer_initial(record, text, clinic),

        ConversationStep::CollectingPatientName => {
            let mut record = record.clone();
            record.patient_name = Some(text.to_string());
            Transition::to(
                ConversationStep::CollectingPatientAge,
                record,
                vec![format!("Thank you, {text}! May I have your age please?")],
            )
        }

        ConversationStep::CollectingPatientAge => {
            let mut record = record.clone();
            record.patient_age = Some(text.to_string());
            Transition::to(
                ConversationStep::CollectingDoctorName,
                record,
                vec!["Thank you! Which doctor would you like to schedule your appointment with? Please provide the doctor's name.".to_string()],
            )
        }

        ConversationStep::CollectingDoctorName => {
            let mut record = record.clone();
            record.doctor_name = Some(text.to_string());
            Transition::to(
                ConversationStep::CollectingDepartment,
                record,
                vec![
                    format!("Great! Which department is Dr. {text} in?"),
                    format!("Available departments: {}", department_list()),
                ],
            )
        }

        ConversationStep::CollectingDepartment => match resolve_department(text) {
            Some(dept) => {
                let mut record = record.clone();
                record.department = Some(dept);
                Transition::to(
                    ConversationStep::CollectingDatetime,
                    record,
                    vec![format!(
                        "Excellent! I've noted {dept} for your appointment. What would be your preferred date and time? Please provide both (e.g., \"12/25/2024 at 2:30 PM\" or \"December 25, 2024 at 10:00 AM\")."
                    )],
                )
            }
            None => Transition::stay(
                step,
                record,
                vec![format!(
                    "I didn't quite catch that department. Please choose from: {}",
                    department_list()
                )],
            ),
        },

        ConversationStep::CollectingDatetime => {
            let mut record = record.clone();
            record.preferred_date_time = Some(text.to_string());
            Transition::to(
                ConversationStep::CollectingSymptoms,
                record,
                vec!["Almost done! Could you briefly describe the reason for your visit or any symptoms you'd like to discuss with the doctor?".to_string()],
            )
        }

        ConversationStep::CollectingSymptoms => {
            let mut finished = record.clone();
            finished.symptoms = Some(text.to_string());

            match finished.complete() {
                Some(appointment) => Transition {
                    step: ConversationStep::Initial,
                    record: AppointmentRecord::default(),
                    replies: Vec::new(),
                    submission: Some(appointment),
                },
                None => {
                    tracing::warn!("symptoms received for an incomplete appointment record");
                    Transition::to(
                        ConversationStep::Initial,
                        AppointmentRecord::default(),
                        vec![format!(
                            "I'm sorry, some of your details went missing. Please start the booking again or call our reception at {}.",
                            clinic.reception_phone
                        )],
                    )
                }
            }
        }
    }
}

fn answer_initial(record: &AppointmentRecord, text: &str, clinic: &ClinicProfile) -> Transition {
    // Booking intent outranks every FAQ topic.
    if is_booking_request(text) {
        return Transition::to(
            ConversationStep::CollectingPatientName,
            AppointmentRecord::default(),
            vec![
                "I'd be happy to help you book an appointment! Let me collect some information from you.".to_string(),
                "First, may I have your full name please?".to_string(),
            ],
        );
    }

    let reply = match classify_topic(text) {
        Some(Topic::Hours) => clinic.hours.clone(),
        Some(Topic::Location) => clinic.address.clone(),
        Some(Topic::Services) => format!(
            "We offer comprehensive medical services including: {}. Would you like to book an appointment with any specific department?",
            department_list()
        ),
        None => "I can help you with booking appointments, information about our services, hospital hours, and directions. What would you like to know?".to_string(),
    };

    Transition::stay(ConversationStep::Initial, record, vec![reply])
}

/// Messages relayed to the patient for a submission outcome, closing prompt
/// included.
pub fn outcome_replies(outcome: &SubmissionOutcome, clinic: &ClinicProfile) -> Vec<String> {
    let phone = &clinic.reception_phone;
    let mut replies = Vec::new();

    match outcome {
        SubmissionOutcome::Success {
            message,
            appointment_id,
            additional_info,
        } => {
            replies.push(message.clone().unwrap_or_else(|| {
                "Perfect! Your appointment request has been successfully submitted. Our staff will contact you within 2-4 hours to confirm your appointment details.".to_string()
            }));
            if let Some(id) = appointment_id {
                replies.push(format!(
                    "Your appointment reference number is: {id}. Please keep this for your records."
                ));
            }
            if let Some(info) = additional_info {
                replies.push(info.clone());
            }
        }
        SubmissionOutcome::ApplicationFailure { message } => {
            replies.push(format!(
                "I apologize, but {message} Please try again later or call our reception at {phone} for immediate assistance."
            ));
        }
        SubmissionOutcome::TransportFailure {
            kind: TransportFailureKind::Unreachable,
        } => {
            replies.push(format!(
                "I'm sorry, but I'm having trouble connecting to our booking system right now. Please call our reception at {phone} to book your appointment directly."
            ));
        }
        SubmissionOutcome::TransportFailure { .. } => {
            replies.push(format!(
                "I apologize, but there was an issue processing your appointment request. Please try again later or call our reception at {phone} for immediate assistance."
            ));
        }
    }

    replies.push(ANYTHING_ELSE.to_string());
    replies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Department;

    fn clinic() -> ClinicProfile {
        ClinicProfile::default()
    }

    fn run(inputs: &[&str]) -> (ConversationStep, AppointmentRecord, Vec<Transition>) {
        let mut step = ConversationStep::Initial;
        let mut record = AppointmentRecord::default();
        let mut transitions = Vec::new();
        for input in inputs {
            let t = advance(step, &record, input, &clinic());
            step = t.step;
            record = t.record.clone();
            transitions.push(t);
        }
        (step, record, transitions)
    }

    #[test]
    fn test_booking_intent_starts_flow_with_two_messages() {
        let t = advance(ConversationStep::Initial, &AppointmentRecord::default(), "book appointment", &clinic());
        assert_eq!(t.step, ConversationStep::CollectingPatientName);
        assert_eq!(t.replies.len(), 2);
        assert!(t.replies[1].contains("full name"));
        assert!(t.submission.is_none());
    }

    #[test]
    fn test_faq_answers_stay_initial() {
        let c = clinic();
        let hours = advance(ConversationStep::Initial, &AppointmentRecord::default(), "what are your hours", &c);
        assert_eq!(hours.step, ConversationStep::Initial);
        assert_eq!(hours.replies, vec![c.hours.clone()]);

        let location = advance(ConversationStep::Initial, &AppointmentRecord::default(), "address?", &c);
        assert_eq!(location.replies, vec![c.address.clone()]);

        let services = advance(ConversationStep::Initial, &AppointmentRecord::default(), "which services", &c);
        assert!(services.replies[0].contains("General Medicine"));

        let help = advance(ConversationStep::Initial, &AppointmentRecord::default(), "hello", &c);
        assert_eq!(help.replies.len(), 1);
        assert!(help.replies[0].starts_with("I can help you with booking appointments"));
    }

    #[test]
    fn test_booking_beats_topic() {
        // "time" is an hours keyword, "book" wins anyway
        let t = advance(ConversationStep::Initial, &AppointmentRecord::default(), "book a time", &clinic());
        assert_eq!(t.step, ConversationStep::CollectingPatientName);
    }

    #[test]
    fn test_free_text_steps_store_verbatim() {
        let cases = [
            (ConversationStep::CollectingPatientName, ConversationStep::CollectingPatientAge),
            (ConversationStep::CollectingPatientAge, ConversationStep::CollectingDoctorName),
            (ConversationStep::CollectingDoctorName, ConversationStep::CollectingDepartment),
            (ConversationStep::CollectingDatetime, ConversationStep::CollectingSymptoms),
        ];
        for (from, to) in cases {
            let t = advance(from, &AppointmentRecord::default(), "  thirty-four  ", &clinic());
            assert_eq!(t.step, to);
            let set: Vec<_> = [
                t.record.patient_name.as_deref(),
                t.record.patient_age.as_deref(),
                t.record.doctor_name.as_deref(),
                t.record.preferred_date_time.as_deref(),
                t.record.symptoms.as_deref(),
            ]
            .into_iter()
            .flatten()
            .collect();
            assert_eq!(set, vec!["thirty-four"], "from {}", from.as_str());
            assert!(t.record.department.is_none());
        }
    }

    #[test]
    fn test_age_prompt_names_patient() {
        let t = advance(ConversationStep::CollectingPatientName, &AppointmentRecord::default(), "Jane Doe", &clinic());
        assert_eq!(t.replies, vec!["Thank you, Jane Doe! May I have your age please?".to_string()]);
    }

    #[test]
    fn test_doctor_step_lists_departments() {
        let t = advance(ConversationStep::CollectingDoctorName, &AppointmentRecord::default(), "Smith", &clinic());
        assert_eq!(t.replies.len(), 2);
        assert_eq!(t.replies[0], "Great! Which department is Dr. Smith in?");
        assert!(t.replies[1].starts_with("Available departments: Cardiology"));
    }

    #[test]
    fn test_unresolved_department_holds_step() {
        let record = AppointmentRecord {
            doctor_name: Some("Smith".to_string()),
            ..Default::default()
        };
        let mut step = ConversationStep::CollectingDepartment;
        let mut current = record.clone();
        for _ in 0..3 {
            let t = advance(step, &current, "dentistry", &clinic());
            assert_eq!(t.step, ConversationStep::CollectingDepartment);
            assert_eq!(t.record, record);
            assert!(t.replies[0].starts_with("I didn't quite catch that department"));
            step = t.step;
            current = t.record;
        }
    }

    #[test]
    fn test_resolved_department_advances() {
        let t = advance(ConversationStep::CollectingDepartment, &AppointmentRecord::default(), "Neuro", &clinic());
        assert_eq!(t.step, ConversationStep::CollectingDatetime);
        assert_eq!(t.record.department, Some(Department::Neurology));
        assert!(t.replies[0].contains("I've noted Neurology"));
    }

    #[test]
    fn test_empty_input_is_noop() {
        let t = advance(ConversationStep::CollectingPatientAge, &AppointmentRecord::default(), "   ", &clinic());
        assert_eq!(t.step, ConversationStep::CollectingPatientAge);
        assert!(t.replies.is_empty());
        assert!(t.record.is_empty());
    }

    #[test]
    fn test_happy_path_yields_one_submission() {
        let (step, record, transitions) = run(&[
            "book appointment",
            "Jane Doe",
            "34",
            "Smith",
            "cardiology",
            "12/25/2024 at 2:30 PM",
            "headache",
        ]);

        let steps: Vec<_> = transitions.iter().map(|t| t.step).collect();
        assert_eq!(
            steps,
            vec![
                ConversationStep::CollectingPatientName,
                ConversationStep::CollectingPatientAge,
                ConversationStep::CollectingDoctorName,
                ConversationStep::CollectingDepartment,
                ConversationStep::CollectingDatetime,
                ConversationStep::CollectingSymptoms,
                ConversationStep::Initial,
            ]
        );
        assert_eq!(step, ConversationStep::Initial);
        assert!(record.is_empty());

        let submissions: Vec<_> = transitions.iter().filter_map(|t| t.submission.clone()).collect();
        assert_eq!(submissions.len(), 1);
        let appt = &submissions[0];
        assert_eq!(appt.patient_name, "Jane Doe");
        assert_eq!(appt.patient_age, "34");
        assert_eq!(appt.doctor_name, "Smith");
        assert_eq!(appt.department, Department::Cardiology);
        assert_eq!(appt.preferred_date_time, "12/25/2024 at 2:30 PM");
        assert_eq!(appt.symptoms, "headache");
        assert!(transitions[6].replies.is_empty());
    }

    #[test]
    fn test_new_cycle_starts_empty() {
        let stale = AppointmentRecord {
            patient_name: Some("Old".to_string()),
            ..Default::default()
        };
        let t = advance(ConversationStep::Initial, &stale, "I need a doctor", &clinic());
        assert!(t.record.is_empty());
    }

    #[test]
    fn test_incomplete_record_at_symptoms_does_not_submit() {
        let t = advance(ConversationStep::CollectingSymptoms, &AppointmentRecord::default(), "cough", &clinic());
        assert_eq!(t.step, ConversationStep::Initial);
        assert!(t.submission.is_none());
        assert!(t.replies[0].contains("(555) 123-4567"));
    }

    #[test]
    fn test_success_outcome_replies() {
        let outcome = SubmissionOutcome::Success {
            message: None,
            appointment_id: Some("APT-1".to_string()),
            additional_info: Some("Arrive 15 minutes early.".to_string()),
        };
        let replies = outcome_replies(&outcome, &clinic());
        assert_eq!(replies.len(), 4);
        assert!(replies[0].starts_with("Perfect!"));
        assert!(replies[1].contains("APT-1"));
        assert_eq!(replies[2], "Arrive 15 minutes early.");
        assert_eq!(replies[3], ANYTHING_ELSE);
    }

    #[test]
    fn test_success_with_custom_message_only() {
        let outcome = SubmissionOutcome::Success {
            message: Some("See you soon".to_string()),
            appointment_id: None,
            additional_info: None,
        };
        assert_eq!(
            outcome_replies(&outcome, &clinic()),
            vec!["See you soon".to_string(), ANYTHING_ELSE.to_string()]
        );
    }

    #[test]
    fn test_application_failure_replies() {
        let outcome = SubmissionOutcome::ApplicationFailure {
            message: "slot full".to_string(),
        };
        let replies = outcome_replies(&outcome, &clinic());
        assert!(replies[0].contains("slot full"));
        assert!(replies[0].contains("(555) 123-4567"));
        assert_eq!(replies.last().map(String::as_str), Some(ANYTHING_ELSE));
    }

    #[test]
    fn test_transport_failure_replies_hide_details() {
        for kind in [
            TransportFailureKind::Unreachable,
            TransportFailureKind::BadStatus,
            TransportFailureKind::MalformedBody,
        ] {
            let replies = outcome_replies(&SubmissionOutcome::TransportFailure { kind }, &clinic());
            assert_eq!(replies.len(), 2);
            assert!(replies[0].contains("(555) 123-4567"));
            assert_eq!(replies[1], ANYTHING_ELSE);
        }
    }
}
