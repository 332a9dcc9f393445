use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Kind of browsable content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentType {
    /// Single feature
    Movie,
    /// Episodic show
    Series,
}

impl ContentType {
    pub fn all() -> &'static [ContentType] {
        &[ContentType::Movie, ContentType::Series]
    }

    pub fn api_name(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::Series => "Series",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

impl FromStr for ContentType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" | "movies" | "film" => Ok(ContentType::Movie),
            "series" | "show" | "tv" => Ok(ContentType::Series),
            other => Err(ModelError::InvalidMedia(format!(
                "unknown content type `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_remote_spellings() {
        assert_eq!("Movie".parse::<ContentType>(), Ok(ContentType::Movie));
        assert_eq!(" series ".parse::<ContentType>(), Ok(ContentType::Series));
        assert_eq!("TV".parse::<ContentType>(), Ok(ContentType::Series));
        assert!("podcast".parse::<ContentType>().is_err());
    }
}
