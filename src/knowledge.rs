//! Explanation engine
//!
//! Static treatment/prevention knowledge base keyed by (label, language),
//! each entry carrying a low-humidity and a high-humidity narrative.
//! `explain` is a pure function of its three inputs.

use crate::classifier::ClassLabel;
use clap::ValueEnum;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Humidity above this percentage selects the high-risk narrative.
pub const HIGH_HUMIDITY_THRESHOLD: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Swahili,
}

/// One knowledge-base entry: disease intro line plus the two
/// humidity-branch narratives, stored verbatim.
pub struct KnowledgeEntry {
    pub intro: &'static str,
    pub high_humidity: &'static str,
    pub low_humidity: &'static str,
}

lazy_static! {
    /// Immutable process-wide table, built once, never mutated.
    static ref KNOWLEDGE_BASE: HashMap<(ClassLabel, Language), KnowledgeEntry> = {
        use ClassLabel::*;
        use Language::*;

        let mut table = HashMap::new();

        table.insert((EarlyBlight, English), KnowledgeEntry {
            intro: "\n🦠 Disease: Early Blight (Alternaria solani)\n",
            high_humidity: "🚨 High humidity detected! Favors early blight spread.\n\
                            🛠️ Apply chlorothalonil fungicide. Avoid wetting leaves.\n",
            low_humidity: "⚠️ Treat early blight, but weather risk is moderate.\n\
                           🧼 Maintain dry leaves and good spacing.\n",
        });
        table.insert((EarlyBlight, Swahili), KnowledgeEntry {
            intro: "\n🦠 Ugonjwa: Early Blight (Alternaria solani)\n",
            high_humidity: "🚨 Unyevu mwingi! Hatari ya kuenea kwa ugonjwa huu ni kubwa.\n\
                            🛠️ Tumia dawa ya kuvu kama chlorothalonil. Epuka kunyunyiza majani.\n",
            low_humidity: "⚠️ Tibu ugonjwa, lakini hali ya hewa si hatari sana.\n\
                           🧼 Hakikisha majani ni makavu na mimea iko na nafasi.\n",
        });

        table.insert((LateBlight, English), KnowledgeEntry {
            intro: "\n🦠 Disease: Late Blight (Phytophthora infestans)\n",
            high_humidity: "🚨 ALERT: Ideal conditions for late blight outbreak.\n\
                            🛠️ Apply copper-based fungicide. Ensure airflow.\n",
            low_humidity: "⚠️ Weather is stable, but treatment is still necessary.\n\
                           🌬️ Maintain airflow and reduce moisture.\n",
        });
        table.insert((LateBlight, Swahili), KnowledgeEntry {
            intro: "\n🦠 Ugonjwa: Late Blight (Phytophthora infestans)\n",
            high_humidity: "🚨 Unyevu mwingi sana! Hatari ya kuenea kwa late blight.\n\
                            🛠️ Tumia dawa za copper. Hakikisha upenyo wa hewa upo.\n",
            low_humidity: "⚠️ Tibu ugonjwa. Hali ya hewa ni ya wastani.\n\
                           🌬️ Weka nafasi ya hewa na epuka unyevu mwingi.\n",
        });

        table.insert((Healthy, English), KnowledgeEntry {
            intro: "\n✅ Plant Status: Healthy\n",
            high_humidity: "⚠️ But humidity is high — fungal risk is elevated.\n\
                            🛡️ Preventive tip: Spray light fungicide & monitor.\n",
            low_humidity: "🌞 All conditions favorable. Keep up hygiene & spacing.\n",
        });
        table.insert((Healthy, Swahili), KnowledgeEntry {
            intro: "\n✅ Mimea ina afya!\n",
            high_humidity: "⚠️ Lakini unyevu ni mwingi. Hatari ya ugonjwa wa kuvu ipo.\n\
                            🛡️ Tumia dawa za kinga na fuatilia hali ya mimea.\n",
            low_humidity: "🌞 Hali ya hewa ni nzuri. Endelea na usafi na nafasi.\n",
        });

        table
    };
}

/// Compose the diagnosis explanation: class header, disease intro, then
/// the humidity-branch narrative. Humidity 80 is the low branch, 81 the
/// high branch. A failed weather fetch defaults humidity to 0 upstream,
/// which always lands here as the low branch.
pub fn explain(label: ClassLabel, humidity_pct: u8, language: Language) -> String {
    let entry = &KNOWLEDGE_BASE[&(label, language)];
    let narrative = if humidity_pct > HIGH_HUMIDITY_THRESHOLD {
        entry.high_humidity
    } else {
        entry.low_humidity
    };

    format!(
        "\n🧪 Predicted Class: {}\n{}{}",
        label.display_name(),
        entry.intro,
        narrative
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_pair() {
        for label in ClassLabel::ALL {
            for language in [Language::English, Language::Swahili] {
                assert!(
                    KNOWLEDGE_BASE.contains_key(&(label, language)),
                    "missing entry for {:?}/{:?}",
                    label,
                    language
                );
            }
        }
    }

    #[test]
    fn test_explain_is_deterministic() {
        for label in ClassLabel::ALL {
            for language in [Language::English, Language::Swahili] {
                for humidity in [0, 50, 95] {
                    let a = explain(label, humidity, language);
                    let b = explain(label, humidity, language);
                    assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_humidity_boundary_is_strict() {
        for label in ClassLabel::ALL {
            for language in [Language::English, Language::Swahili] {
                // 0 and 80 share the low branch, 81 and 100 the high branch
                assert_eq!(
                    explain(label, 0, language),
                    explain(label, 80, language)
                );
                assert_eq!(
                    explain(label, 81, language),
                    explain(label, 100, language)
                );
                assert_ne!(
                    explain(label, 80, language),
                    explain(label, 81, language)
                );
            }
        }
    }

    #[test]
    fn test_header_names_predicted_class() {
        let text = explain(ClassLabel::EarlyBlight, 50, Language::English);
        assert!(text.starts_with("\n🧪 Predicted Class: Tomato Early blight\n"));
    }

    #[test]
    fn test_late_blight_high_humidity_swahili() {
        let text = explain(ClassLabel::LateBlight, 95, Language::Swahili);
        assert!(text.contains("Late Blight (Phytophthora infestans)"));
        assert!(text.contains("🛠️ Tumia dawa za copper. Hakikisha upenyo wa hewa upo.\n"));
    }

    #[test]
    fn test_healthy_low_humidity_english_has_no_warning() {
        let text = explain(ClassLabel::Healthy, 30, Language::English);
        assert!(text.contains("🌞 All conditions favorable. Keep up hygiene & spacing.\n"));
        assert!(!text.contains("⚠️"));
        assert!(!text.contains("🚨"));
    }
}
