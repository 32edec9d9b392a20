// src/parser/classify.rs

//! Line classification.
//!
//! Decides for a single line of menu text whether it opens a new day,
//! is boilerplate that belongs in the footer, or is a dish.

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::{SpecialFeature, Weekday};
use crate::parser::html::normalize_whitespace;

/// What a line following a day heading contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Known boilerplate, normalized
    Footer(String),
    /// A dish, normalized
    Dish(String),
    /// Empty or single-character noise
    Blank,
}

/// Find the weekday a line is a heading for.
///
/// Matches the day label case-insensitively anywhere in the line, but not
/// its plural ("måndagar"), which only shows up in promotional text.
pub fn detect_day(line: &str) -> Option<Weekday> {
    let lower = line.to_lowercase();
    Weekday::ALL.into_iter().find(|day| {
        let label = day.swedish().to_lowercase();
        lower.contains(&label) && !lower.contains(&format!("{label}ar"))
    })
}

/// Special features whose trigger phrase occurs in the raw line.
pub fn special_features(line: &str) -> impl Iterator<Item = SpecialFeature> + '_ {
    SpecialFeature::ALL
        .into_iter()
        .filter(move |feature| line.contains(feature.trigger()))
}

/// Classifier for content lines, holding the compiled boilerplate patterns.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    footer_patterns: Vec<Regex>,
}

impl LineClassifier {
    /// Compile boilerplate patterns for case-insensitive whole-line matching.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let footer_patterns = patterns
            .iter()
            .map(|pattern| {
                Regex::new(&format!("(?i)^(?:{pattern})$"))
                    .map_err(|e| AppError::pattern(pattern, e))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { footer_patterns })
    }

    /// Classify a line that is not a day heading.
    pub fn classify(&self, line: &str) -> LineKind {
        let text = normalize_whitespace(line);
        if text.chars().count() <= 1 {
            return LineKind::Blank;
        }
        match self.footer_patterns.iter().find(|re| re.is_match(&text)) {
            Some(re) => {
                log::debug!("Footer phrase {:?} matched by {}", text, re.as_str());
                LineKind::Footer(text)
            }
            None => LineKind::Dish(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParserConfig;

    fn classifier() -> LineClassifier {
        LineClassifier::new(&ParserConfig::default().footer_patterns).unwrap()
    }

    #[test]
    fn test_detect_day_case_insensitive() {
        assert_eq!(detect_day("MÅNDAG 13/2"), Some(Weekday::Monday));
        assert_eq!(detect_day("  fredag"), Some(Weekday::Friday));
        assert_eq!(detect_day("Lördag & Söndag"), Some(Weekday::Saturday));
        assert_eq!(detect_day("Pasta carbonara"), None);
    }

    #[test]
    fn test_detect_day_ignores_plural() {
        assert_eq!(detect_day("Alla måndagar bjuder vi på kaffe"), None);
        assert_eq!(detect_day("Tisdagar: Sweet Tuesday"), None);
    }

    #[test]
    fn test_special_features_independent() {
        let found: Vec<_> = special_features("Sweet Tuesday och Burger Friday").collect();
        assert_eq!(
            found,
            vec![SpecialFeature::SweetTuesday, SpecialFeature::BurgerFriday]
        );
        assert_eq!(special_features("sweet tuesday").count(), 0);
    }

    #[test]
    fn test_classify_footer_phrases() {
        let c = classifier();
        assert_eq!(
            c.classify("  Lunch 125 kr med Eaterykortet "),
            LineKind::Footer("Lunch 125 kr med Eaterykortet".to_string())
        );
        assert_eq!(
            c.classify("Kaffe ingår"),
            LineKind::Footer("Kaffe ingår".to_string())
        );
        assert!(matches!(c.classify("Öppet kl. 11-14"), LineKind::Footer(_)));
        assert!(matches!(c.classify("VÄLKOMMEN!"), LineKind::Footer(_)));
        assert!(matches!(c.classify("L = Laktos"), LineKind::Footer(_)));
    }

    #[test]
    fn test_classify_suffix_pattern_is_anchored() {
        // "L = Laktos" only matches at the end of the line
        assert!(matches!(
            classifier().classify("L = Laktos, G = Gluten och mer"),
            LineKind::Dish(_)
        ));
    }

    #[test]
    fn test_classify_dish_and_blank() {
        let c = classifier();
        assert_eq!(
            c.classify("Kycklinggryta   med ris"),
            LineKind::Dish("Kycklinggryta med ris".to_string())
        );
        assert_eq!(c.classify("   "), LineKind::Blank);
        assert_eq!(c.classify("-"), LineKind::Blank);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = LineClassifier::new(&["(oops".to_string()]).unwrap_err();
        assert!(matches!(err, AppError::Pattern { .. }));
    }
}
