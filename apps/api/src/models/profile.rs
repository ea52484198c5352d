use serde::{Deserialize, Deserializer, Serialize};

/// The business under analysis. Immutable for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub brand_name: String,
    pub industry: String,
    pub url: String,
    /// User order preserved, duplicates allowed.
    #[serde(default, deserialize_with = "deserialize_keywords")]
    pub keywords: Vec<String>,
}

/// Keywords arrive either as a JSON list or as one comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KeywordInput {
    List(Vec<String>),
    Csv(String),
}

/// Splits a comma-separated keyword string, trimming each entry and dropping blanks.
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn deserialize_keywords<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match KeywordInput::deserialize(deserializer)? {
        KeywordInput::List(list) => list
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect(),
        KeywordInput::Csv(raw) => split_keywords(&raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keywords_trims_and_keeps_order() {
        assert_eq!(
            split_keywords(" seo , growth,seo ,, "),
            vec!["seo", "growth", "seo"]
        );
    }

    #[test]
    fn test_profile_accepts_keyword_list() {
        let profile: BusinessProfile = serde_json::from_value(serde_json::json!({
            "brand_name": "Acme",
            "industry": "Coffee",
            "url": "https://acme.example",
            "keywords": ["beans", " roast "]
        }))
        .unwrap();
        assert_eq!(profile.keywords, vec!["beans", "roast"]);
    }

    #[test]
    fn test_profile_accepts_comma_separated_keywords() {
        let profile: BusinessProfile = serde_json::from_value(serde_json::json!({
            "brand_name": "Acme",
            "industry": "Coffee",
            "url": "https://acme.example",
            "keywords": "beans, roast"
        }))
        .unwrap();
        assert_eq!(profile.keywords, vec!["beans", "roast"]);
    }

    #[test]
    fn test_profile_keywords_default_to_empty() {
        let profile: BusinessProfile = serde_json::from_value(serde_json::json!({
            "brand_name": "Acme",
            "industry": "Coffee",
            "url": "https://acme.example"
        }))
        .unwrap();
        assert!(profile.keywords.is_empty());
    }
}
