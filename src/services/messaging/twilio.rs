use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use super::MessagingProvider;

const API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Sends OTP codes over SMS through the Twilio REST API.
pub struct TwilioSmsProvider {
    account_sid: String,
    auth_token: String,
    from_number: String,
    client: reqwest::Client,
}

impl TwilioSmsProvider {
    pub fn new(account_sid: String, auth_token: String, from_number: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            account_sid,
            auth_token,
            from_number,
            client,
        }
    }
}

#[async_trait]
impl MessagingProvider for TwilioSmsProvider {
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()> {
        let url = format!("{API_BASE}/Accounts/{}/Messages.json", self.account_sid);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", &self.from_number), ("Body", body)])
            .send()
            .await
            .context("failed to reach Twilio")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("Twilio rejected message ({status}): {detail}");
        }

        tracing::debug!(to = %to, "sms sent via Twilio");
        Ok(())
    }
}
