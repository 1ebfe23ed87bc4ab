pub mod chat;
pub mod departments;
pub mod dialogue;
pub mod intent;
pub mod submission;
pub mod typing;
