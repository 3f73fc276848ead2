//! ICD diagnostic code value type.
//!
//! A code is a main code optionally specialised by an extension code. The
//! textual form joins the two with `&`, e.g. `2C25.0&XH7SY3`.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{OncomatchError, Result};

const EXTENSION_SEPARATOR: char = '&';

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IcdCode {
    pub main_code: String,
    #[serde(default)]
    pub extension_code: Option<String>,
}

impl IcdCode {
    pub fn new(main_code: impl Into<String>) -> Self {
        Self {
            main_code: main_code.into(),
            extension_code: None,
        }
    }

    pub fn with_extension(main_code: impl Into<String>, extension_code: impl Into<String>) -> Self {
        Self {
            main_code: main_code.into(),
            extension_code: Some(extension_code.into()),
        }
    }

    /// Parse `MAIN` or `MAIN&EXTENSION`.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let (main, extension) = match raw.split_once(EXTENSION_SEPARATOR) {
            Some((main, extension)) => (main.trim(), Some(extension.trim())),
            None => (raw, None),
        };

        if !code_regex().is_match(main) {
            return Err(OncomatchError::InvalidIcdCode(raw.to_string()));
        }
        if let Some(ext) = extension {
            if !code_regex().is_match(ext) {
                return Err(OncomatchError::InvalidIcdCode(raw.to_string()));
            }
        }

        Ok(Self {
            main_code: main.to_string(),
            extension_code: extension.map(str::to_string),
        })
    }
}

impl FromStr for IcdCode {
    type Err = OncomatchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for IcdCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extension_code {
            Some(ext) => write!(f, "{}{}{}", self.main_code, EXTENSION_SEPARATOR, ext),
            None => write!(f, "{}", self.main_code),
        }
    }
}

fn code_regex() -> &'static Regex {
    use std::sync::OnceLock;
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9A-Z]{1,6}(?:\.[0-9A-Z]{1,4})?$").unwrap())
}
