// API record types
// Request/response payloads for the portal resources

use serde::{Deserialize, Serialize};

/// Calendar event posted to a portal
///
/// `portal` is whatever the client supplied; it is stored verbatim and is
/// not derived from the route.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Event {
    pub title: String,
    /// Free-form date string, no format enforced
    pub date: String,
    pub description: String,
    pub portal: String,
}

/// Student score report
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Report {
    pub student: String,
    pub subject: String,
    /// Integer only; no range constraint
    pub score: i64,
    pub comment: String,
    pub portal: String,
}

/// Portal notification; stores are seeded with two fixed entries at startup
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u32,
    pub message: String,
}

/// Incoming chat message
#[derive(Debug, Deserialize, Clone)]
pub struct ChatMessage {
    pub user: String,
    pub message: String,
}

/// Stored chat exchange: the incoming message plus the echoed response
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ChatExchange {
    pub user: String,
    pub message: String,
    pub response: String,
}

/// Announcement on the teacher/parent/admin portals
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub subject: String,
    pub message: String,
    pub sender: String,
}

/// Direct message between portal users; `recipient` is a stored label,
/// there is no delivery semantics
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PortalMessage {
    pub sender: String,
    pub recipient: String,
    pub message: String,
}
