use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Form body of `POST /`. Field names are fixed by the page contract,
/// including the Django-style token field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrewForm {
    pub csrfmiddlewaretoken: String,
    pub method: String,
    pub coffee_type: String,
}

/// Form body of `POST /ajax/`. `method` carries the clicked control's
/// element id verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionForm {
    pub csrfmiddlewaretoken: String,
    pub method: String,
}

pub const METHOD_MAKE_COFFEE: &str = "make_coffee";

/// Wire shape of a brew response. At most one key is meaningful; the two
/// observed deployments disagree on whether success carries `image` or
/// `html`, so the decoder accepts either but never both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrewResponseWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problems: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

/// Decoded, validated brew result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrewOutcome {
    Problem(String),
    Image(String),
    Html(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("brew response carries none of problems/image/html")]
    Empty,
    #[error("brew response carries more than one of problems/image/html")]
    Ambiguous,
}

impl BrewResponseWire {
    pub fn problem(text: impl Into<String>) -> Self {
        Self {
            problems: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self {
            image: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn decode(self) -> Result<BrewOutcome, DecodeError> {
        let populated = [
            self.problems.is_some(),
            self.image.is_some(),
            self.html.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count();
        match populated {
            0 => Err(DecodeError::Empty),
            1 => Ok(if let Some(text) = self.problems {
                BrewOutcome::Problem(text)
            } else if let Some(url) = self.image {
                BrewOutcome::Image(url)
            } else {
                BrewOutcome::Html(self.html.unwrap_or_default())
            }),
            _ => Err(DecodeError::Ambiguous),
        }
    }
}

/// Success body of `POST /ajax/`, e.g. `{"action": "Water successfully refiled"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionResponse {
    pub action: String,
}
