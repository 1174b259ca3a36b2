//! Password held in memory for the open document
//!
//! The buffer is wiped on drop, and formatting never shows the contents.

use std::fmt;
use std::ops::Deref;

use zeroize::Zeroizing;

/// Password text, zeroized on drop and redacted when formatted
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(Zeroizing<String>);

impl SecureString {
    pub fn new(s: impl Into<String>) -> Self {
        Self(Zeroizing::new(s.into()))
    }
}

impl Deref for SecureString {
    type Target = str;

    fn deref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for SecureString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecureString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString(<{} bytes>)", self.0.len())
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("********")
    }
}
