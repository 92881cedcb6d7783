//! Waitlist models

/// A validated signup; never stored
#[derive(Debug, Clone, PartialEq)]
pub struct WaitlistEntry {
    pub email: String,
    pub twitter: String,
}
