pub mod appointment;
pub mod conversation;
pub mod event;
pub mod message;
pub mod outcome;

pub use appointment::{AppointmentRecord, CompleteAppointment, Department};
pub use conversation::{ChatSession, ConversationStep};
pub use event::ChatEvent;
pub use message::{Message, Sender, Transcript};
pub use outcome::{SubmissionOutcome, TransportFailureKind, WebhookResponse};
