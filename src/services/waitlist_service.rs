use tracing::info;

use crate::models::proxy::required;
use crate::models::{WaitlistEntry, WaitlistPayload, WaitlistResult};
use crate::utils::ServiceError;

pub const JOINED_MESSAGE: &str = "Successfully added to waitlist!";

/// Where accepted signups go. Nothing is stored.
pub trait WaitlistSink: Send + Sync {
    fn record(&self, entry: &WaitlistEntry) -> Result<(), String>;
}

/// Writes each signup to the log
pub struct LogSink;

impl WaitlistSink for LogSink {
    fn record(&self, entry: &WaitlistEntry) -> Result<(), String> {
        info!("New waitlist signup: {} (@{})", entry.email, entry.twitter);
        Ok(())
    }
}

pub fn join(sink: &dyn WaitlistSink, payload: WaitlistPayload) -> Result<WaitlistResult, ServiceError> {
    let missing = ServiceError::InvalidInput("Email and Twitter username are required");

    let (email, twitter) = match (required(payload.email), required(payload.twitter)) {
        (Some(email), Some(twitter)) => (email, twitter),
        _ => return Err(missing),
    };

    sink.record(&WaitlistEntry { email, twitter })
        .map_err(|details| ServiceError::Internal { context: "Failed to join waitlist", details })?;

    Ok(WaitlistResult {
        success: true,
        message: JOINED_MESSAGE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemorySink(Mutex<Vec<WaitlistEntry>>);

    impl WaitlistSink for MemorySink {
        fn record(&self, entry: &WaitlistEntry) -> Result<(), String> {
            self.0.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }

    fn payload(email: Option<&str>, twitter: Option<&str>) -> WaitlistPayload {
        WaitlistPayload {
            email: email.map(String::from),
            twitter: twitter.map(String::from),
        }
    }

    #[test]
    fn test_missing_twitter_rejected() {
        let sink = MemorySink::default();
        let err = join(&sink, payload(Some("a@b.co"), None)).unwrap_err();
        assert_eq!(err.to_string(), "Email and Twitter username are required");
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_both_fields_accepted() {
        let sink = MemorySink::default();
        let result = join(&sink, payload(Some("a@b.co"), Some("valyn"))).unwrap();
        assert!(result.success);
        assert_eq!(result.message, JOINED_MESSAGE);
        assert_eq!(sink.0.lock().unwrap()[0].twitter, "valyn");
    }

    #[test]
    fn test_duplicates_not_deduplicated() {
        let sink = MemorySink::default();
        join(&sink, payload(Some("a@b.co"), Some("valyn"))).unwrap();
        join(&sink, payload(Some("a@b.co"), Some("valyn"))).unwrap();
        assert_eq!(sink.0.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_sink_failure_is_internal() {
        struct Broken;
        impl WaitlistSink for Broken {
            fn record(&self, _: &WaitlistEntry) -> Result<(), String> {
                Err("stdout closed".to_string())
            }
        }

        let err = join(&Broken, payload(Some("a@b.co"), Some("valyn"))).unwrap_err();
        assert!(matches!(err, ServiceError::Internal { context: "Failed to join waitlist", .. }));
    }
}
