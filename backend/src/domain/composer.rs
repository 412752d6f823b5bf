//! Warning message composition.
//!
//! Builds the generation prompt from the user's personality, location and
//! current risk factors, and guarantees that *some* message always comes
//! back: when the generation provider is unconfigured or fails, a fixed
//! deterministic fallback naming the location is used instead.

use log::warn;

use crate::domain::models::Personality;
use crate::providers::GenerationClient;

/// Build the generation prompt for one warning call.
pub fn build_prompt(
    user_name: &str,
    lga: &str,
    factors: &[String],
    personality: Personality,
) -> String {
    let risks = if factors.is_empty() {
        "no specific outbreak, general seasonal caution".to_string()
    } else {
        factors.join("; ")
    };

    format!(
        "You are 'Sabi Health', {style}.\n\
         User name: {user_name}\n\
         Location (LGA): {lga}\n\
         Current risks: {risks}\n\
         \n\
         Write a short spoken health warning for this user.\n\
         - Keep it between 60 and 80 words.\n\
         - Give at least two concrete preventive actions tied to the risks above \
         (for Lassa fever: rats and covered food; for rain or malaria: nets and \
         standing water; for cholera: boiled water and washed hands).\n\
         - End with one question checking whether anyone in the user's house is \
         feeling sick.\n\
         - Vary your phrasing between calls; never repeat a canned script.",
        style = personality.style_description(),
    )
}

/// Deterministic fallback used whenever generation is unavailable.
///
/// Must name the location and urge safety; composing twice with the same
/// inputs yields byte-identical output.
pub fn fallback_message(user_name: &str, lga: &str) -> String {
    format!(
        "Hello {user_name}, this is Sabi Health. There is a health risk around {lga} \
         right now. Please cover your food well, drink only clean or boiled water, \
         and sleep under a treated mosquito net. If anybody in your house has fever, \
         go to the nearest health center quickly. Is anyone in your house feeling sick?"
    )
}

/// Strip whitespace and quotation characters so the text can be embedded in
/// call markup without terminating an attribute early.
pub fn sanitize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, '"' | '\u{201C}' | '\u{201D}' | '\u{2018}' | '\u{2019}' | '`'))
        .collect()
}

/// Compose the warning message for a user.
///
/// `client` is `None` when no generation provider is configured; that and
/// every provider error take the fallback path.
pub async fn compose(
    client: Option<&dyn GenerationClient>,
    user_name: &str,
    lga: &str,
    factors: &[String],
    personality: Personality,
) -> String {
    let Some(client) = client else {
        return fallback_message(user_name, lga);
    };

    let prompt = build_prompt(user_name, lga, factors, personality);
    match client.generate(&prompt).await {
        Ok(text) if !text.trim().is_empty() => sanitize(&text),
        Ok(_) => {
            warn!("generation returned empty text, using fallback message");
            fallback_message(user_name, lga)
        }
        Err(e) => {
            warn!("generation failed, using fallback message: {e}");
            fallback_message(user_name, lga)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockGenerationClient;

    #[test]
    fn prompt_embeds_user_location_personality_and_risks() {
        let factors = vec!["Active Lassa fever outbreak in your area".to_string()];
        let prompt = build_prompt("Amina", "Kano", &factors, Personality::MarketAunty);
        assert!(prompt.contains("Amina"));
        assert!(prompt.contains("Kano"));
        assert!(prompt.contains("Lassa fever"));
        assert!(prompt.contains("market aunty"));
        assert!(prompt.contains("60 and 80 words"));
        assert!(prompt.contains("two concrete preventive actions"));
        assert!(prompt.contains("question"));
    }

    #[tokio::test]
    async fn unconfigured_provider_uses_deterministic_fallback() {
        let first = compose(None, "Amina", "Ikeja", &[], Personality::default()).await;
        let second = compose(None, "Amina", "Ikeja", &[], Personality::default()).await;
        assert_eq!(first, second);
        assert!(first.contains("Ikeja"));
    }

    #[tokio::test]
    async fn provider_failure_uses_fallback() {
        let client = MockGenerationClient::failing();
        let message = compose(Some(&client), "Amina", "Kano", &[], Personality::default()).await;
        assert_eq!(message, fallback_message("Amina", "Kano"));
    }

    #[tokio::test]
    async fn provider_empty_reply_uses_fallback() {
        let client = MockGenerationClient::replying("   ");
        let message = compose(Some(&client), "Amina", "Kano", &[], Personality::default()).await;
        assert_eq!(message, fallback_message("Amina", "Kano"));
    }

    #[tokio::test]
    async fn generated_text_is_sanitized() {
        let client = MockGenerationClient::replying("  \u{201C}Oga, cover your food!\u{201D}  ");
        let message = compose(Some(&client), "Amina", "Kano", &[], Personality::default()).await;
        assert_eq!(message, "Oga, cover your food!");
    }

    #[test]
    fn sanitize_strips_straight_and_curly_quotes() {
        assert_eq!(sanitize(" \"hello\" "), "hello");
        assert_eq!(sanitize("\u{2018}na so\u{2019}"), "na so");
        assert_eq!(sanitize("no quotes"), "no quotes");
    }
}
