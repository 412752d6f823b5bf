//! Outbound collaborator clients.
//!
//! Every provider here is allowed to fail; each one defines its own recovery
//! (retry-then-zero, fallback text, no audio, simulation) so an upstream
//! outage never fails a whole request.

pub mod generation;
pub mod telephony;
pub mod tts;
pub mod weather;

pub use generation::{GenerationClient, GenerationError, GeminiClient, MockGenerationClient};
pub use telephony::{TelephonyClient, TelephonyConfig, TelephonyError};
pub use tts::SpeechSynthesizer;
pub use weather::{MockRainSwitch, WeatherGauge, MOCK_RAINFALL_MM};
