//! Telephony provider: interactive call markup and call placement.
//!
//! Call markup is TwiML. The builder always escapes embedded text, and the
//! interactive variant attaches a single-digit response menu routed back to
//! the response webhook for a specific delivery log.

use log::info;
use serde::Deserialize;

const TWILIO_BASE_URL: &str = "https://api.twilio.com";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Seconds the gather menu waits for a digit before the no-response branch.
const GATHER_TIMEOUT_SECS: u32 = 5;

/// Voice used when no synthesized audio is available and the telephony layer
/// must speak the script itself.
const FALLBACK_VOICE: &str = "Polly.Joanna";

#[derive(Debug, thiserror::Error)]
pub enum TelephonyError {
    #[error("call placement failed: {0}")]
    Http(String),
    #[error("telephony provider returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Credentials for the telephony provider, read once at startup. Absent
/// configuration means every dispatch takes the simulation path.
#[derive(Debug, Clone)]
pub struct TelephonyConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

impl TelephonyConfig {
    /// Build from environment variables; `None` unless all three are set.
    pub fn from_env() -> Option<Self> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID").ok()?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN").ok()?;
        let from_number = std::env::var("TWILIO_PHONE_NUMBER").ok()?;
        Some(Self {
            account_sid,
            auth_token,
            from_number,
        })
    }
}

#[derive(Deserialize)]
struct CallCreatedResponse {
    sid: String,
}

/// Client that places outbound calls.
#[derive(Clone)]
pub struct TelephonyClient {
    client: reqwest::Client,
    base_url: String,
    config: TelephonyConfig,
}

impl TelephonyClient {
    pub fn new(config: TelephonyConfig) -> Self {
        Self::with_base_url(TWILIO_BASE_URL, config)
    }

    pub fn with_base_url(base_url: &str, config: TelephonyConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("reqwest client construction cannot fail with static config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
        }
    }

    /// Place a call speaking the given markup. Returns the provider-assigned
    /// call reference.
    pub async fn place_call(
        &self,
        markup: &str,
        to: &str,
        status_callback: &str,
    ) -> Result<String, TelephonyError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.base_url, self.config.account_sid
        );

        let params = [
            ("Twiml", markup),
            ("To", to),
            ("From", self.config.from_number.as_str()),
            ("StatusCallback", status_callback),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| TelephonyError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TelephonyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let created: CallCreatedResponse = response
            .json()
            .await
            .map_err(|e| TelephonyError::Http(e.to_string()))?;

        info!("placed call {} to {}", created.sid, to);
        Ok(created.sid)
    }
}

/// Escape text for embedding in call markup.
fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Build the interactive warning call markup.
///
/// Plays synthesized audio when available, otherwise speaks the script.
/// `respond_url` receives the single-digit menu result (1 = symptomatic,
/// 2 = fine); after [`GATHER_TIMEOUT_SECS`] without input the call closes
/// with a no-response line.
pub fn build_call_markup(script: &str, audio_url: Option<&str>, respond_url: &str) -> String {
    let spoken = match audio_url {
        Some(url) => format!("<Play>{}</Play>", xml_escape(url)),
        None => format!(
            "<Say voice=\"{FALLBACK_VOICE}\" language=\"en-US\">{}</Say>",
            xml_escape(script)
        ),
    };

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <Response>{spoken}\
         <Gather numDigits=\"1\" action=\"{}\" method=\"POST\" timeout=\"{GATHER_TIMEOUT_SECS}\">\
         <Say>If you have fever, press 1. If you are fine, press 2.</Say>\
         </Gather>\
         <Say>We didn't receive any response. Goodbye.</Say>\
         <Hangup/></Response>",
        xml_escape(respond_url)
    )
}

/// Build a closing markup document that just speaks one message and hangs up.
/// Used for webhook replies (record not found, thanks, referral, invalid
/// digit).
pub fn build_spoken_reply(message: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <Response><Say>{}</Say><Hangup/></Response>",
        xml_escape(message)
    )
}
