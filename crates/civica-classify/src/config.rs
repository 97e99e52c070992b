//! Classifier configuration

use serde::Deserialize;

/// Configuration for the priority heuristic
///
/// All matching is substring-based on lowercased text, so keywords
/// should be given in lowercase.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Keywords in title or description that force high priority
    /// (safety hazards, total service outage, injury risk)
    pub urgency_keywords: Vec<String>,

    /// Categories that are high priority regardless of wording
    pub high_categories: Vec<String>,

    /// Categories that are low priority absent any urgency keyword
    pub low_categories: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            urgency_keywords: [
                "burst",
                "flood",
                "leak",
                "fire",
                "collapse",
                "sewage",
                "overflow",
                "electric shock",
                "gas leak",
                "injur",
                "accident",
                "outage",
                "no water",
                "no power",
                "emergency",
                "danger",
                "hazard",
                "urgent",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            // Sanitation failures are a standing health hazard
            high_categories: vec!["sanitation".to_string()],
            low_categories: vec!["other".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_tables() {
        let config = ClassifierConfig::default();
        assert!(config.urgency_keywords.contains(&"burst".to_string()));
        assert!(config.high_categories.contains(&"sanitation".to_string()));
        assert!(config.low_categories.contains(&"other".to_string()));
    }

    #[test]
    fn test_keywords_are_lowercase() {
        let config = ClassifierConfig::default();
        for kw in &config.urgency_keywords {
            assert_eq!(kw, &kw.to_lowercase());
        }
    }
}
