use serde::{Deserialize, Deserializer, Serialize};

/// A row of the `violations` catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRecord {
    pub id: i64,
    pub violation_type: String,
    pub description: String,
    pub law_article: String,
    pub punishment: String,
    pub authority: String,
    pub appeal_tips: String,
    pub keywords: Vec<String>,
}

/// A catalog entry before it is assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewViolation {
    pub violation_type: String,
    pub description: String,
    pub law_article: String,
    pub punishment: String,
    pub authority: String,
    pub appeal_tips: String,
    #[serde(deserialize_with = "deserialize_keywords")]
    pub keywords: Vec<String>,
}

impl NewViolation {
    /// Keywords in their stored form: one space between tokens.
    pub fn keywords_at_rest(&self) -> String {
        join_keywords(&self.keywords)
    }
}

pub fn join_keywords(keywords: &[String]) -> String {
    keywords.join(" ")
}

pub fn split_keywords(stored: &str) -> Vec<String> {
    stored.split_whitespace().map(str::to_string).collect()
}

/// Accepts either `"мусор свалка"` or `["мусор", "свалка"]`.
fn deserialize_keywords<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Keywords {
        Delimited(String),
        List(Vec<String>),
    }

    Ok(match Keywords::deserialize(deserializer)? {
        Keywords::Delimited(s) => split_keywords(&s),
        Keywords::List(items) => items.iter().flat_map(|item| split_keywords(item)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_keywords_split_on_any_whitespace() {
        assert_eq!(
            split_keywords("  река  вода\tзагрязнение "),
            vec!["река", "вода", "загрязнение"]
        );
        assert!(split_keywords("").is_empty());
    }

    #[test]
    fn keywords_deserialize_from_string_or_list() {
        let from_string: NewViolation = serde_json::from_value(serde_json::json!({
            "violation_type": "a",
            "description": "b",
            "law_article": "c",
            "punishment": "d",
            "authority": "e",
            "appeal_tips": "f",
            "keywords": "мусор свалка"
        }))
        .unwrap();
        assert_eq!(from_string.keywords, vec!["мусор", "свалка"]);

        let from_list: NewViolation = serde_json::from_value(serde_json::json!({
            "violation_type": "a",
            "description": "b",
            "law_article": "c",
            "punishment": "d",
            "authority": "e",
            "appeal_tips": "f",
            "keywords": ["мусор", "свалка отходы"]
        }))
        .unwrap();
        assert_eq!(from_list.keywords, vec!["мусор", "свалка", "отходы"]);
        assert_eq!(from_list.keywords_at_rest(), "мусор свалка отходы");
    }
}
