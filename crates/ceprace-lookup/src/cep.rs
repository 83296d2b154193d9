use std::fmt;

use crate::error::LookupError;

const CEP_LEN: usize = 8;

/// A normalized CEP: hyphens stripped, exactly eight bytes long
///
/// Character classes are not checked; `"abcdefgh"` is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cep(String);

impl Cep {
    /// Normalize and validate a user-supplied postal code
    pub fn parse(raw: &str) -> crate::Result<Self> {
        if raw.is_empty() {
            return Err(LookupError::InvalidInput("cep is required".to_string()));
        }

        let normalized = strip_hyphens(raw);

        if normalized.len() != CEP_LEN {
            return Err(LookupError::InvalidInput(format!(
                "cep must have {CEP_LEN} characters without hyphens, got {} in '{raw}'",
                normalized.len()
            )));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Remove every literal `-` from a postal code
pub(crate) fn strip_hyphens(raw: &str) -> String {
    raw.replace('-', "")
}
