use serde::{Deserialize, Serialize};

use crate::error::TakeError;

/// A validated (sport, location) pair.
///
/// Both fields are trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTakeRequest")]
pub struct TakeRequest {
    sport: String,
    location: String,
}

impl TakeRequest {
    /// Validates and trims the pair.
    ///
    /// # Errors
    /// [`TakeError::MissingInput`] if either field is blank.
    pub fn new(sport: impl AsRef<str>, location: impl AsRef<str>) -> Result<Self, TakeError> {
        let sport = sport.as_ref().trim();
        let location = location.as_ref().trim();
        if sport.is_empty() || location.is_empty() {
            return Err(TakeError::MissingInput);
        }
        Ok(Self {
            sport: sport.to_string(),
            location: location.to_string(),
        })
    }

    pub fn sport(&self) -> &str {
        &self.sport
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

#[derive(Deserialize)]
struct RawTakeRequest {
    #[serde(default)]
    sport: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

impl TryFrom<RawTakeRequest> for TakeRequest {
    type Error = TakeError;

    fn try_from(raw: RawTakeRequest) -> Result<Self, Self::Error> {
        TakeRequest::new(
            raw.sport.unwrap_or_default(),
            raw.location.unwrap_or_default(),
        )
    }
}

/// The single normalized take produced for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub quote: String,
}
