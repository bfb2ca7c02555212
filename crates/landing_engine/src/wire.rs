use serde::{Deserialize, Deserializer, Serialize};

/// JSON body of the generate call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateBody {
    pub theme: String,
    pub geo: String,
    pub domain: String,
}

/// Success body of the generate call. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedLanding {
    pub domain: String,
    #[serde(deserialize_with = "string_or_number")]
    pub landing_id: String,
    pub preview_url: String,
}

/// Markup of a stored landing page. Only built when `html_content` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingDocument {
    pub html_content: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RetrieveBody {
    #[serde(default)]
    pub html_content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// The deployed service hands out database serials; older builds used strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Int(value) => value.to_string(),
        Id::Uint(value) => value.to_string(),
    })
}
