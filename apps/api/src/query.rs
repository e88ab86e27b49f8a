//! Query-string helpers shared by the list endpoints.

use serde::de::{self, DeserializeOwned, IntoDeserializer, Unexpected};
use serde::{Deserialize, Deserializer};

/// A picker value: `all` (or blank), or one exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick<T> {
    All,
    Only(T),
}

impl<T> Default for Pick<T> {
    fn default() -> Self {
        Pick::All
    }
}

impl<T: PartialEq> Pick<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Pick::All => true,
            Pick::Only(wanted) => wanted == value,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Pick<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() || raw == "all" {
            return Ok(Pick::All);
        }
        T::deserialize(<String as IntoDeserializer<'de, D::Error>>::into_deserializer(raw))
            .map(Pick::Only)
    }
}

/// A yes/no query flag where blank (or `all`) means unset.
pub fn optional_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") | Some("all") => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(other) => Err(de::Error::invalid_value(
            Unexpected::Str(other),
            &"true or false",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApplicationStatus, ResourceCategory};

    #[derive(Debug, Deserialize)]
    struct Flags {
        #[serde(default, deserialize_with = "optional_flag")]
        remote: Option<bool>,
    }

    #[test]
    fn test_all_and_blank_admit_everything() {
        let all: Pick<ApplicationStatus> = serde_json::from_str(r#""all""#).unwrap();
        let blank: Pick<ApplicationStatus> = serde_json::from_str(r#""""#).unwrap();
        assert_eq!(all, Pick::All);
        assert_eq!(blank, Pick::All);
        assert!(all.admits(&ApplicationStatus::Withdrawn));
    }

    #[test]
    fn test_variant_names_are_exact() {
        let pick: Pick<ResourceCategory> = serde_json::from_str(r#""Data Science""#).unwrap();
        assert_eq!(pick, Pick::Only(ResourceCategory::DataScience));
        assert!(!pick.admits(&ResourceCategory::Career));
        assert!(serde_json::from_str::<Pick<ApplicationStatus>>(r#""offer""#).is_err());
    }

    #[test]
    fn test_optional_flag() {
        let parse = |raw: &str| serde_json::from_str::<Flags>(raw).map(|f| f.remote);
        assert_eq!(parse(r#"{}"#).unwrap(), None);
        assert_eq!(parse(r#"{"remote":""}"#).unwrap(), None);
        assert_eq!(parse(r#"{"remote":"true"}"#).unwrap(), Some(true));
        assert_eq!(parse(r#"{"remote":"false"}"#).unwrap(), Some(false));
        assert!(parse(r#"{"remote":"yes"}"#).is_err());
    }
}
