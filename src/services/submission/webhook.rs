use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::StatusCode;
use serde::Serialize;

use super::SubmissionAdapter;
use crate::models::{CompleteAppointment, SubmissionOutcome, TransportFailureKind, WebhookResponse};

/// Wire body posted to the automation webhook.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPayload<'a> {
    #[serde(flatten)]
    pub appointment: &'a CompleteAppointment,
    pub timestamp: String,
}

impl<'a> AppointmentPayload<'a> {
    pub fn new(appointment: &'a CompleteAppointment, at: DateTime<Utc>) -> Self {
        Self {
            appointment,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

pub struct WebhookSubmitter {
    url: String,
    client: reqwest::Client,
}

impl WebhookSubmitter {
    pub fn new(url: String, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build webhook HTTP client")?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl SubmissionAdapter for WebhookSubmitter {
    async fn submit(&self, appointment: &CompleteAppointment) -> SubmissionOutcome {
        let payload = AppointmentPayload::new(appointment, Utc::now());

        let resp = match self.client.post(&self.url).json(&payload).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(error = %e, url = %self.url, "failed to reach booking webhook");
                return SubmissionOutcome::TransportFailure {
                    kind: TransportFailureKind::Unreachable,
                };
            }
        };

        let status = resp.status();
        match resp.text().await {
            Ok(body) => interpret_response(status, &body),
            Err(e) => {
                tracing::error!(error = %e, %status, "failed to read booking webhook response");
                SubmissionOutcome::TransportFailure {
                    kind: TransportFailureKind::MalformedBody,
                }
            }
        }
    }
}

pub fn interpret_response(status: StatusCode, body: &str) -> SubmissionOutcome {
    if !status.is_success() {
        tracing::error!(%status, body, "booking webhook returned error status");
        return SubmissionOutcome::TransportFailure {
            kind: TransportFailureKind::BadStatus,
        };
    }

    match serde_json::from_str::<WebhookResponse>(body) {
        Ok(parsed) => {
            let outcome = SubmissionOutcome::from(parsed);
            if let SubmissionOutcome::ApplicationFailure { message } = &outcome {
                tracing::warn!(message = %message, "booking webhook rejected appointment");
            }
            outcome
        }
        Err(e) => {
            tracing::error!(error = %e, body, "failed to parse booking webhook response");
            SubmissionOutcome::TransportFailure {
                kind: TransportFailureKind::MalformedBody,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Department;
    use chrono::TimeZone;

    fn appointment() -> CompleteAppointment {
        CompleteAppointment {
            patient_name: "Jane Doe".to_string(),
            patient_age: "34".to_string(),
            doctor_name: "Smith".to_string(),
            department: Department::GeneralMedicine,
            preferred_date_time: "12/25/2024 at 2:30 PM".to_string(),
            symptoms: "headache".to_string(),
        }
    }

    #[test]
    fn test_payload_shape() {
        let appt = appointment();
        let at = Utc.with_ymd_and_hms(2024, 12, 1, 9, 30, 0).unwrap();
        let json = serde_json::to_value(AppointmentPayload::new(&appt, at)).unwrap();
        assert_eq!(json["patientName"], "Jane Doe");
        assert_eq!(json["patientAge"], "34");
        assert_eq!(json["doctorName"], "Smith");
        assert_eq!(json["department"], "General Medicine");
        assert_eq!(json["preferredDateTime"], "12/25/2024 at 2:30 PM");
        assert_eq!(json["symptoms"], "headache");
        assert_eq!(json["timestamp"], "2024-12-01T09:30:00.000Z");
        assert_eq!(json.as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_non_2xx_is_transport_failure() {
        let outcome = interpret_response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"success":true}"#);
        assert_eq!(
            outcome,
            SubmissionOutcome::TransportFailure {
                kind: TransportFailureKind::BadStatus
            }
        );
    }

    #[test]
    fn test_malformed_body_is_transport_failure() {
        let outcome = interpret_response(StatusCode::OK, "<html>ok</html>");
        assert_eq!(
            outcome,
            SubmissionOutcome::TransportFailure {
                kind: TransportFailureKind::MalformedBody
            }
        );
    }

    #[test]
    fn test_application_failure() {
        let outcome = interpret_response(StatusCode::OK, r#"{"success":false,"message":"slot full"}"#);
        assert_eq!(
            outcome,
            SubmissionOutcome::ApplicationFailure {
                message: "slot full".to_string()
            }
        );
    }

    #[test]
    fn test_success() {
        let outcome = interpret_response(StatusCode::CREATED, r#"{"success":true,"appointmentId":"A1"}"#);
        assert_eq!(
            outcome,
            SubmissionOutcome::Success {
                message: None,
                appointment_id: Some("A1".to_string()),
                additional_info: None,
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        // Port 9 on loopback refuses connections.
        let submitter = WebhookSubmitter::new(
            "http://127.0.0.1:9/webhook".to_string(),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        let outcome = submitter.submit(&appointment()).await;
        assert_eq!(
            outcome,
            SubmissionOutcome::TransportFailure {
                kind: TransportFailureKind::Unreachable
            }
        );
    }
}
