//! Criterion text with confidential rendering

use std::fmt;

/// An immutable text criterion.
///
/// The confidential flag only affects how the value is rendered in logs
/// and diagnostics; matching always uses the raw value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SecretString {
    value: String,
    confidential: bool,
}

const MASK: &str = "****";

impl SecretString {
    /// A plain, printable criterion.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            confidential: false,
        }
    }

    /// A criterion that is masked in all log output.
    pub fn confidential(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            confidential: true,
        }
    }

    /// The raw criterion text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// True if the value is masked in log output.
    pub fn is_confidential(&self) -> bool {
        self.confidential
    }

    /// True if the criterion text is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.confidential {
            f.write_str(MASK)
        } else {
            f.write_str(&self.value)
        }
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString({})", self)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
