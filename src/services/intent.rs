/// Words that mark a message as a booking request. Plain substring match:
/// "I don't want an appointment" still counts as a booking request.
const BOOKING_KEYWORDS: &[&str] = &[
    "book",
    "appointment",
    "schedule",
    "visit",
    "doctor",
    "consultation",
    "checkup",
    "exam",
    "treatment",
    "see",
    "meet",
    "available",
];

/// FAQ categories answered at the `initial` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Hours,
    Location,
    Services,
}

// Checked in order; the first rule with a hit wins.
const TOPIC_RULES: &[(Topic, &[&str])] = &[
    (Topic::Hours, &["hours", "time"]),
    (Topic::Location, &["location", "address"]),
    (Topic::Services, &["department", "service"]),
];

pub fn is_booking_request(text: &str) -> bool {
    let lower = text.to_lowercase();
    BOOKING_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

pub fn classify_topic(text: &str) -> Option<Topic> {
    let lower = text.to_lowercase();
    TOPIC_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(topic, _)| *topic)
}
