use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain model for a registered user.
///
/// The phone number is the uniqueness key at registration time. Everything
/// except `personality` is immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub phone: String,
    /// Local Government Area used as the unit of risk assessment
    pub lga: String,
    pub personality: Personality,
    pub registered_at: DateTime<Utc>,
}

impl User {
    /// Generate a unique ID for a user
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}

/// Voice/tone selector for generated warning messages.
///
/// Closed set: unknown keys parse to the default rather than failing, so a
/// stale or mistyped value stored on a user can never break composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    CaringNeighbor,
    CommunityNurse,
    MarketAunty,
    YouthMentor,
}

impl Default for Personality {
    fn default() -> Self {
        Personality::CaringNeighbor
    }
}

impl Personality {
    /// Parse a stored key, falling back to the default variant on anything
    /// unrecognized.
    pub fn parse(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "caring_neighbor" => Personality::CaringNeighbor,
            "community_nurse" => Personality::CommunityNurse,
            "market_aunty" => Personality::MarketAunty,
            "youth_mentor" => Personality::YouthMentor,
            _ => Personality::default(),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Personality::CaringNeighbor => "caring_neighbor",
            Personality::CommunityNurse => "community_nurse",
            Personality::MarketAunty => "market_aunty",
            Personality::YouthMentor => "youth_mentor",
        }
    }

    /// Short voice/tone guidance embedded in the generation prompt.
    pub fn style_description(&self) -> &'static str {
        match self {
            Personality::CaringNeighbor => {
                "a warm, caring neighbor who mixes simple English with Nigerian Pidgin \
                 and checks in on people like family"
            }
            Personality::CommunityNurse => {
                "a calm, practical community nurse who gives clear step-by-step advice \
                 in plain English"
            }
            Personality::MarketAunty => {
                "a lively market aunty who speaks vivid Nigerian Pidgin with warmth \
                 and gentle humor"
            }
            Personality::YouthMentor => {
                "an upbeat youth mentor who keeps things short, modern and encouraging"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_keys() {
        assert_eq!(Personality::parse("community_nurse"), Personality::CommunityNurse);
        assert_eq!(Personality::parse("  Market_Aunty "), Personality::MarketAunty);
        assert_eq!(Personality::parse("youth_mentor"), Personality::YouthMentor);
    }

    #[test]
    fn unknown_key_falls_back_to_default() {
        assert_eq!(Personality::parse("robot_overlord"), Personality::CaringNeighbor);
        assert_eq!(Personality::parse(""), Personality::CaringNeighbor);
    }

    #[test]
    fn key_round_trips_through_parse() {
        for p in [
            Personality::CaringNeighbor,
            Personality::CommunityNurse,
            Personality::MarketAunty,
            Personality::YouthMentor,
        ] {
            assert_eq!(Personality::parse(p.key()), p);
        }
    }
}
