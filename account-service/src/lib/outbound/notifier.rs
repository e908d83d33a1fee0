use async_trait::async_trait;

use crate::account::errors::NotifierError;
use crate::account::ports::Notifier;
use crate::config::EmailConfig;

/// Notifier adapter that records outbound mail in the log stream.
///
/// Actual SMTP delivery lives outside this service; this adapter keeps the
/// contract observable in environments without a mail relay.
pub struct LogNotifier {
    from_name: String,
    from_address: String,
}

impl LogNotifier {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            from_name: config.from_name.clone(),
            from_address: config.from_address.clone(),
        }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifierError> {
        tracing::info!(
            from = %format!("{} <{}>", self.from_name, self.from_address),
            to = %to,
            subject = %subject,
            body_len = body.len(),
            "Outbound notification"
        );
        Ok(())
    }
}
