//! Cultural health tips. Static reference data served to the app's tips feed.

use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tip {
    pub category: &'static str,
    pub title: &'static str,
    pub content: &'static str,
    pub icon: &'static str,
}

static TIPS: &[Tip] = &[
    Tip {
        category: "Health",
        title: "Rest No Be Laziness",
        content: "Body no be generator. If you tire, rest small and sleep well at night. \
                  Hustle sweet, but if your health spoil, who go enjoy the money?",
        icon: "moon",
    },
    Tip {
        category: "Food Safety",
        title: "Cover Your Food",
        content: "Fly no dey knock before e land. Always cover your food. One small \
                  contamination fit cause big wahala for belle.",
        icon: "shield",
    },
    Tip {
        category: "Hydration",
        title: "Drink Water Before Thirst",
        content: "No wait until your throat dry like harmattan. Drink water steady during \
                  the day. Your kidney go thank you quietly.",
        icon: "glass-water",
    },
    Tip {
        category: "Hygiene",
        title: "Sun-Dry Your Bedding",
        content: "Once in a while, carry mattress or pillow go sun small. Sunlight dey kill \
                  some germs and remove smell.",
        icon: "sun",
    },
    Tip {
        category: "Environment",
        title: "Clear Standing Water",
        content: "Mosquito dey breed inside any small water wey stand still. Empty buckets, \
                  clear your gutters, and turn old containers upside down after rain.",
        icon: "droplets",
    },
    Tip {
        category: "Mental Health",
        title: "Talk Am Out",
        content: "If something dey worry you, no lock am inside like old cupboard. Find \
                  person wey you trust talk am. Mind wey calm fit think better.",
        icon: "message-circle",
    },
    Tip {
        category: "Nutrition",
        title: "Eat Local Fruits",
        content: "Pawpaw, orange, pineapple - no underrate them. Local fruits get plenty \
                  vitamins and dey cheaper than imported snacks.",
        icon: "apple",
    },
    Tip {
        category: "Community",
        title: "Check On Your Neighbour",
        content: "Community na strength. Sometimes greet your neighbour, check if dem dey \
                  okay. Strong village spirit dey protect everybody.",
        icon: "users",
    },
];

/// One tip at random.
pub fn random_tip() -> &'static Tip {
    TIPS.choose(&mut rand::thread_rng())
        .expect("tips table is never empty")
}

/// All tips in a category, matched case-insensitively.
pub fn tips_by_category(category: &str) -> Vec<&'static Tip> {
    TIPS.iter()
        .filter(|t| t.category.eq_ignore_ascii_case(category.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_tip_comes_from_the_table() {
        let tip = random_tip();
        assert!(TIPS.iter().any(|t| t.title == tip.title));
    }

    #[test]
    fn category_filter_is_case_insensitive() {
        let tips = tips_by_category("food safety");
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].title, "Cover Your Food");
    }

    #[test]
    fn unknown_category_is_empty() {
        assert!(tips_by_category("astrology").is_empty());
    }
}
