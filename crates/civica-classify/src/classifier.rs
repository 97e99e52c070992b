//! Priority classification logic

use crate::ClassifierConfig;
use civica_domain::Priority;

/// Deterministic priority heuristic over complaint text and category
///
/// The rule order is part of the contract:
/// 1. Any urgency keyword in title or description wins: `High`
/// 2. Category in the high table: `High`
/// 3. Category in the low table: `Low`
/// 4. Otherwise `Medium`
pub struct PriorityClassifier {
    config: ClassifierConfig,
}

impl PriorityClassifier {
    /// Create a classifier with the given configuration
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Create a classifier with the default rule tables
    pub fn default_config() -> Self {
        Self::new(ClassifierConfig::default())
    }

    /// Classify a complaint's text fields into a priority
    ///
    /// Pure and total: any well-formed input yields exactly one
    /// priority, never an error.
    pub fn classify(&self, title: &str, description: &str, category: &str) -> Priority {
        let title = title.to_lowercase();
        let description = description.to_lowercase();
        let category = category.to_lowercase();

        let urgent = self
            .config
            .urgency_keywords
            .iter()
            .any(|kw| title.contains(kw.as_str()) || description.contains(kw.as_str()));
        if urgent {
            return Priority::High;
        }

        if self.config.high_categories.iter().any(|c| *c == category) {
            return Priority::High;
        }

        if self.config.low_categories.iter().any(|c| *c == category) {
            return Priority::Low;
        }

        Priority::Medium
    }
}

impl Default for PriorityClassifier {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_keyword_in_description() {
        let classifier = PriorityClassifier::default_config();
        let priority = classifier.classify(
            "Water Leakage",
            "Pipeline burst flooding street",
            "water",
        );
        assert_eq!(priority, Priority::High);
    }

    #[test]
    fn test_urgency_keyword_in_title() {
        let classifier = PriorityClassifier::default_config();
        let priority = classifier.classify(
            "URGENT: no power in Block A",
            "The whole block lost electricity yesterday evening.",
            "electricity",
        );
        assert_eq!(priority, Priority::High);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let classifier = PriorityClassifier::default_config();
        let priority = classifier.classify("FIRE near the market", "", "other");
        assert_eq!(priority, Priority::High);
    }

    #[test]
    fn test_high_category_without_keyword() {
        let classifier = PriorityClassifier::default_config();
        let priority = classifier.classify(
            "Bins not emptied",
            "Communal bins have not been emptied this week.",
            "sanitation",
        );
        assert_eq!(priority, Priority::High);
    }

    #[test]
    fn test_low_category() {
        let classifier = PriorityClassifier::default_config();
        let priority = classifier.classify(
            "Faded wall paint",
            "The community hall wall paint is peeling.",
            "other",
        );
        assert_eq!(priority, Priority::Low);
    }

    #[test]
    fn test_default_is_medium() {
        let classifier = PriorityClassifier::default_config();
        let priority = classifier.classify(
            "Street light not working",
            "The street light at the entrance of Block A has been off for a week.",
            "electricity",
        );
        assert_eq!(priority, Priority::Medium);
    }

    #[test]
    fn test_keyword_beats_low_category() {
        let classifier = PriorityClassifier::default_config();
        let priority = classifier.classify(
            "Wall about to collapse",
            "A boundary wall is leaning and may collapse onto the footpath.",
            "other",
        );
        assert_eq!(priority, Priority::High);
    }

    #[test]
    fn test_custom_config() {
        let config = ClassifierConfig {
            urgency_keywords: vec!["rats".to_string()],
            high_categories: vec![],
            low_categories: vec!["water".to_string()],
        };
        let classifier = PriorityClassifier::new(config);

        assert_eq!(
            classifier.classify("Rats in the store room", "", "housing"),
            Priority::High
        );
        assert_eq!(
            classifier.classify("Tap dripping", "slow drip", "water"),
            Priority::Low
        );
        assert_eq!(
            classifier.classify("Bins", "not emptied", "sanitation"),
            Priority::Medium
        );
    }
}
