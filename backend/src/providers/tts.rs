//! Speech synthesis provider.
//!
//! Best-effort by contract: a successful call yields a hosted audio locator,
//! anything else yields `None`. The dispatcher treats audio as an optional
//! enhancement and the call markup falls back to the telephony layer's own
//! voice when no audio is available.

use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

const YARNGPT_URL: &str = "https://yarngpt.ai/api/v1/tts";
const DEFAULT_VOICE: &str = "Idera";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

/// Client for the hosted text-to-speech service.
///
/// Synthesized MP3s are written under the data directory's `audio/` folder,
/// which the server exposes as static files; the returned locator is
/// `{public_base_url}/audio/{uuid}.mp3`.
#[derive(Clone)]
pub struct SpeechSynthesizer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    audio_dir: PathBuf,
    public_base_url: String,
}

impl SpeechSynthesizer {
    pub fn new(api_key: String, audio_dir: PathBuf, public_base_url: String) -> Self {
        Self::with_base_url(YARNGPT_URL, api_key, audio_dir, public_base_url)
    }

    pub fn with_base_url(
        base_url: &str,
        api_key: String,
        audio_dir: PathBuf,
        public_base_url: String,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("reqwest client construction cannot fail with static config");
        Self {
            client,
            base_url: base_url.to_string(),
            api_key,
            audio_dir,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Synthesize `text` and return a public locator for the audio, or `None`
    /// when anything along the way fails.
    pub async fn synthesize(&self, text: &str) -> Option<String> {
        match self.try_synthesize(text).await {
            Ok(url) => {
                info!("synthesized warning audio at {url}");
                Some(url)
            }
            Err(e) => {
                warn!("speech synthesis unavailable, delivering text only: {e}");
                None
            }
        }
    }

    async fn try_synthesize(&self, text: &str) -> anyhow::Result<String> {
        let body = TtsRequest {
            text,
            voice: DEFAULT_VOICE,
            response_format: "mp3",
        };

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("speech provider returned status {status}");
        }
        let audio = response.bytes().await?;

        tokio::fs::create_dir_all(&self.audio_dir).await?;
        let filename = format!("{}.mp3", Uuid::new_v4());
        tokio::fs::write(self.audio_dir.join(&filename), &audio).await?;

        Ok(format!("{}/audio/{}", self.public_base_url, filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn unreachable_provider_degrades_to_none() {
        let dir = tempdir().unwrap();
        let synth = SpeechSynthesizer::with_base_url(
            "http://127.0.0.1:1",
            "key".to_string(),
            dir.path().to_path_buf(),
            "http://localhost:8000".to_string(),
        );
        assert_eq!(synth.synthesize("hello").await, None);
    }
}
