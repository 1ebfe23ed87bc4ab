use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailureKind {
    /// The request never got an answer (DNS, connect, timeout).
    Unreachable,
    /// Non-2xx status.
    BadStatus,
    /// 2xx but the body was not the expected JSON.
    MalformedBody,
}

/// What the booking system reported for one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success {
        message: Option<String>,
        appointment_id: Option<String>,
        additional_info: Option<String>,
    },
    ApplicationFailure {
        message: String,
    },
    TransportFailure {
        kind: TransportFailureKind,
    },
}

/// Body the booking webhook answers with on 2xx.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub appointment_id: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

const DEFAULT_FAILURE_MESSAGE: &str = "There was an issue processing your appointment request.";

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl From<WebhookResponse> for SubmissionOutcome {
    fn from(resp: WebhookResponse) -> Self {
        if resp.success {
            SubmissionOutcome::Success {
                message: non_empty(resp.message),
                appointment_id: non_empty(resp.appointment_id),
                additional_info: non_empty(resp.additional_info),
            }
        } else {
            SubmissionOutcome::ApplicationFailure {
                message: non_empty(resp.message)
                    .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
            }
        }
    }
}
