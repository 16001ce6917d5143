pub mod twilio;

use async_trait::async_trait;

#[async_trait]
pub trait MessagingProvider: Send + Sync {
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()>;
}

/// Development provider: writes the message to the log instead of sending
/// it. With the fixed test OTP code this is all a local setup needs.
pub struct LogSmsProvider;

#[async_trait]
impl MessagingProvider for LogSmsProvider {
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()> {
        tracing::info!(to = %to, body = %body, "sms (log provider)");
        Ok(())
    }
}
