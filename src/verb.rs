use std::fmt;
use std::str::FromStr;

use reqwest::Method;

use crate::error::Error;

/// The HTTP verbs the Extrabat API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub fn as_method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Patch => Method::PATCH,
            Verb::Delete => Method::DELETE,
        }
    }
}

impl FromStr for Verb {
    type Err = Error;

    /// Matches case-insensitively, so `"get"`, `"GET"` and `"Get"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Verb::Get),
            "post" => Ok(Verb::Post),
            "put" => Ok(Verb::Put),
            "patch" => Ok(Verb::Patch),
            "delete" => Ok(Verb::Delete),
            _ => Err(Error::InvalidArgument(format!("Invalid HTTP verb: {s}"))),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_method().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("get".parse::<Verb>().unwrap(), Verb::Get);
        assert_eq!("POST".parse::<Verb>().unwrap(), Verb::Post);
        assert_eq!("pUt".parse::<Verb>().unwrap(), Verb::Put);
        assert_eq!("Patch".parse::<Verb>().unwrap(), Verb::Patch);
        assert_eq!("DELETE".parse::<Verb>().unwrap(), Verb::Delete);
    }

    #[test]
    fn test_parse_rejects_unknown_verbs() {
        for verb in ["head", "OPTIONS", "fetch", "", " get"] {
            let err = verb.parse::<Verb>().unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "{verb:?} should be rejected");
        }
    }

    #[test]
    fn test_display_uses_method_name() {
        assert_eq!(Verb::Patch.to_string(), "PATCH");
        assert_eq!(Verb::Get.as_method(), Method::GET);
    }
}
