//! Reference fields hold another record's id. The backend returns them as a
//! lookup object (`{"Id": 5, "Name": "..."}`) but a bare integer or numeric
//! string is accepted too; they are always written back as a bare integer.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReference {
    Int(i64),
    Float(f64),
    Text(String),
    Lookup {
        #[serde(rename = "Id", default)]
        id: Option<i64>,
    },
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawReference>::deserialize(deserializer)? {
        Some(RawReference::Int(id)) => Some(id),
        Some(RawReference::Float(f)) if f.fract() == 0.0 => Some(f as i64),
        Some(RawReference::Float(_)) => None,
        Some(RawReference::Text(s)) => s.trim().parse().ok(),
        Some(RawReference::Lookup { id }) => id,
        None => None,
    })
}

/// Application-facing form of a reference: the id as a string, or empty.
pub fn to_text(reference: Option<i64>) -> String {
    reference.map(|id| id.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "super::deserialize")]
        job_id_c: Option<i64>,
    }

    fn read(value: serde_json::Value) -> Option<i64> {
        serde_json::from_value::<Row>(value).unwrap().job_id_c
    }

    #[test]
    fn normalizes_every_reference_shape() {
        assert_eq!(read(json!({ "job_id_c": { "Id": 5, "Name": "Dev" } })), Some(5));
        assert_eq!(read(json!({ "job_id_c": 5 })), Some(5));
        assert_eq!(read(json!({ "job_id_c": "5" })), Some(5));
        assert_eq!(read(json!({ "job_id_c": { "Name": "orphan" } })), None);
        assert_eq!(read(json!({ "job_id_c": null })), None);
        assert_eq!(read(json!({})), None);
    }

    #[test]
    fn text_form_is_empty_when_absent() {
        assert_eq!(super::to_text(Some(12)), "12");
        assert_eq!(super::to_text(None), "");
    }
}
