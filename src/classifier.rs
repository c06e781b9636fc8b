//! Keyword-overlap classification of free-text violation reports.
//!
//! Each catalog record is scored by the number of its keyword tokens that
//! occur as substrings of the lowercased description. The description itself
//! is never tokenized.

use serde::Serialize;
use tracing::debug;

use crate::database::models::ViolationRecord;
use crate::database::Database;
use crate::error::EcoBotError;

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationMatch {
    pub violation: ViolationRecord,
    pub score: usize,
    pub matched_keywords: Vec<String>,
}

/// Keyword tokens of `record` found in `description_lower`.
fn matched_keywords(record: &ViolationRecord, description_lower: &str) -> Vec<String> {
    record
        .keywords
        .iter()
        .filter(|keyword| description_lower.contains(&keyword.to_lowercase()))
        .cloned()
        .collect()
}

/// Best-scoring record, or `None` when nothing scores above zero. Ties go to
/// the record that appears first.
pub fn best_match(description: &str, records: &[ViolationRecord]) -> Option<ClassificationMatch> {
    let description_lower = description.to_lowercase();
    let mut best: Option<ClassificationMatch> = None;

    for record in records {
        let matched = matched_keywords(record, &description_lower);
        let score = matched.len();
        let best_score = best.as_ref().map_or(0, |m| m.score);

        if score > best_score {
            best = Some(ClassificationMatch {
                violation: record.clone(),
                score,
                matched_keywords: matched,
            });
        }
    }

    best
}

/// Classifies against the catalog as currently stored.
#[derive(Clone)]
pub struct ViolationClassifier {
    database: Database,
}

impl ViolationClassifier {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub async fn classify(&self, description: &str) -> Result<Option<ClassificationMatch>, EcoBotError> {
        let records = self.database.list_violations().await?;
        let result = best_match(description, &records);

        match &result {
            Some(m) => debug!(
                "Classified as '{}' (score {}, keywords {:?})",
                m.violation.violation_type, m.score, m.matched_keywords
            ),
            None => debug!("No catalog keywords matched among {} records", records.len()),
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, violation_type: &str, keywords: &[&str]) -> ViolationRecord {
        ViolationRecord {
            id,
            violation_type: violation_type.to_string(),
            description: String::new(),
            law_article: String::new(),
            punishment: String::new(),
            authority: String::new(),
            appeal_tips: String::new(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn catalog() -> Vec<ViolationRecord> {
        vec![
            record(1, "waste", &["мусор", "свалка", "отходы"]),
            record(2, "water", &["река", "вода", "загрязнение"]),
            record(3, "felling", &["вырубка", "деревья", "лес"]),
        ]
    }

    #[test]
    fn picks_record_with_all_keywords() {
        let m = best_match("Вырубка: спилили деревья, лес редеет", &catalog()).unwrap();
        assert_eq!(m.violation.id, 3);
        assert_eq!(m.score, 3);
        assert_eq!(m.matched_keywords, vec!["вырубка", "деревья", "лес"]);
    }

    #[test]
    fn matching_is_case_insensitive_for_cyrillic() {
        let m = best_match("МУСОР У ПОДЪЕЗДА", &catalog()).unwrap();
        assert_eq!(m.violation.violation_type, "waste");
        assert_eq!(m.score, 1);
    }

    #[test]
    fn keywords_match_as_substrings() {
        let m = best_match("речная вода стала мутной", &catalog()).unwrap();
        assert_eq!(m.violation.id, 2);

        let m = best_match("свалкаотходы", &catalog()).unwrap();
        assert_eq!(m.violation.id, 1);
        assert_eq!(m.score, 2);
    }

    #[test]
    fn ties_go_to_the_first_record() {
        let m = best_match("мусор и вода", &catalog()).unwrap();
        assert_eq!(m.score, 1);
        assert_eq!(m.violation.id, 1);
    }

    #[test]
    fn inflected_forms_do_not_match() {
        // no stemming: "реке" is not "река"
        let m = best_match("мусор в реке", &catalog()).unwrap();
        assert_eq!(m.violation.id, 1);
        assert_eq!(m.score, 1);
    }

    #[test]
    fn higher_score_beats_earlier_record() {
        let m = best_match("мусор, вода и загрязнение", &catalog()).unwrap();
        assert_eq!(m.violation.id, 2);
        assert_eq!(m.score, 2);
    }

    #[test]
    fn no_match_when_every_score_is_zero() {
        assert!(best_match("громкая музыка ночью", &catalog()).is_none());
        assert!(best_match("", &catalog()).is_none());
        assert!(best_match("мусор", &[]).is_none());
    }

    #[test]
    fn catalog_keywords_are_case_folded_too() {
        let records = vec![record(7, "mixed", &["Свалка"])];
        assert_eq!(best_match("большая свалка", &records).unwrap().violation.id, 7);
    }
}
