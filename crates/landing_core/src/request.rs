use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Theme,
    Geo,
    Domain,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Theme, Field::Geo, Field::Domain];

    pub fn label(self) -> &'static str {
        match self {
            Field::Theme => "theme",
            Field::Geo => "geo",
            Field::Domain => "domain",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("required fields are empty: {}", join_fields(.missing))]
pub struct ValidationError {
    pub missing: Vec<Field>,
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Current values of the three input boxes, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFields {
    pub theme: String,
    pub geo: String,
    pub domain: String,
}

impl FormFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Theme => &self.theme,
            Field::Geo => &self.geo,
            Field::Domain => &self.domain,
        }
    }

    pub(crate) fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Theme => self.theme = value,
            Field::Geo => self.geo = value,
            Field::Domain => self.domain = value,
        }
    }

    pub fn to_request(&self) -> Result<GenerationRequest, ValidationError> {
        validate(&self.theme, &self.geo, &self.domain)
    }
}

/// A validated generation request. Only `validate` constructs one, so every
/// field is guaranteed non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    theme: String,
    geo: String,
    domain: String,
}

impl GenerationRequest {
    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn geo(&self) -> &str {
        &self.geo
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

/// Whitespace-only values count as empty; the request carries trimmed values.
pub fn validate(theme: &str, geo: &str, domain: &str) -> Result<GenerationRequest, ValidationError> {
    let values = [theme.trim(), geo.trim(), domain.trim()];
    let missing: Vec<Field> = Field::ALL
        .iter()
        .zip(values.iter())
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| *field)
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError { missing });
    }
    let [theme, geo, domain] = values;
    Ok(GenerationRequest {
        theme: theme.to_owned(),
        geo: geo.to_owned(),
        domain: domain.to_owned(),
    })
}

/// Descriptor of a generated landing page, as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub domain: String,
    pub landing_id: String,
    pub preview_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewArtifact {
    pub html_content: String,
}
