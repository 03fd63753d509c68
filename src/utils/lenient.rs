//! Deserializers for form payloads where the SPA may send numbers as strings
//! (and vice versa) or a list as newline-separated text.

use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Int(i64),
    Float(f64),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Int(i) => i.to_string(),
            TextOrNumber::Float(f) => f.to_string(),
        }
    }

    fn into_count<E: de::Error>(self) -> Result<Option<i64>, E> {
        match self {
            TextOrNumber::Int(i) => Ok(Some(i)),
            TextOrNumber::Float(f) => Ok(Some(f.trunc() as i64)),
            TextOrNumber::Text(s) if s.trim().is_empty() => Ok(None),
            TextOrNumber::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| E::custom(format!("invalid number: {}", s))),
        }
    }
}

pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(TextOrNumber::deserialize(deserializer)?.into_text())
}

pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(TextOrNumber::into_text))
}

pub fn count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    TextOrNumber::deserialize(deserializer)?
        .into_count()
        .map(Option::unwrap_or_default)
}

pub fn optional_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<TextOrNumber>::deserialize(deserializer)? {
        Some(value) => value.into_count(),
        None => Ok(None),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LinesOrText {
    Lines(Vec<String>),
    Text(String),
}

impl LinesOrText {
    fn into_lines(self) -> Vec<String> {
        match self {
            LinesOrText::Lines(lines) => lines,
            LinesOrText::Text(text) if text.is_empty() => Vec::new(),
            LinesOrText::Text(text) => text.split('\n').map(str::to_string).collect(),
        }
    }
}

pub fn lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LinesOrText>::deserialize(deserializer)?
        .map(LinesOrText::into_lines)
        .unwrap_or_default())
}

/// An empty text value counts as absent; an empty list is still a value.
pub fn optional_lines<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LinesOrText>::deserialize(deserializer)? {
        Some(LinesOrText::Text(text)) if text.is_empty() => None,
        Some(value) => Some(value.into_lines()),
        None => None,
    })
}

/// Joins list fields the way they are persisted.
pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}

/// Splits persisted text back into a list, dropping blank lines.
pub fn split_lines(text: Option<&str>) -> Vec<String> {
    text.map(|t| {
        t.split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// `Some` only for a non-empty string.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Form {
        #[serde(deserialize_with = "text")]
        job_id: String,
        #[serde(default, deserialize_with = "optional_count")]
        seats: Option<i64>,
        #[serde(default, deserialize_with = "lines")]
        requirements: Vec<String>,
        #[serde(default, deserialize_with = "optional_lines")]
        benefits: Option<Vec<String>>,
    }

    #[test]
    fn accepts_numbers_and_text_interchangeably() {
        let form: Form = serde_json::from_value(json!({
            "job_id": 12,
            "seats": "3",
            "requirements": "Rust\nSQL",
            "benefits": []
        }))
        .unwrap();
        assert_eq!(form.job_id, "12");
        assert_eq!(form.seats, Some(3));
        assert_eq!(form.requirements, vec!["Rust", "SQL"]);
        assert_eq!(form.benefits, Some(vec![]));
    }

    #[test]
    fn empty_values_are_absent() {
        let form: Form = serde_json::from_value(json!({
            "job_id": "4",
            "seats": "",
            "benefits": ""
        }))
        .unwrap();
        assert_eq!(form.seats, None);
        assert!(form.requirements.is_empty());
        assert_eq!(form.benefits, None);
    }

    #[test]
    fn rejects_non_numeric_counts() {
        let parsed = serde_json::from_value::<Form>(json!({ "job_id": "4", "seats": "many" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn split_drops_blank_lines() {
        assert_eq!(split_lines(Some("a\n\n  \nb")), vec!["a", "b"]);
        assert!(split_lines(None).is_empty());
        assert_eq!(join_lines(&["a".into(), "b".into()]), "a\nb");
    }
}
