//! Qualified name references
//!
//! Declarations refer to each other by prefixed name strings
//! (`tns:UserType`, `xsd:string`). References are never resolved; the
//! only processing is adding the target-namespace prefix to bare names at
//! serialization time.

use std::fmt;

/// Prefix bound to the document's target namespace
pub const TNS_PREFIX: &str = "tns";

/// A prefixed or bare reference to a named declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName(String);

impl QualifiedName {
    /// Wrap a reference string as given
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The reference exactly as it was given
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix part, if any
    pub fn prefix(&self) -> Option<&str> {
        split_qname(&self.0).0
    }

    /// Local part
    pub fn local_name(&self) -> &str {
        split_qname(&self.0).1
    }

    /// True for WSDL 2.0 tokens such as `#any` or `#none`
    pub fn is_token(&self) -> bool {
        self.0.starts_with('#')
    }

    /// Render with `default_prefix` when the name has no prefix.
    ///
    /// Empty names and `#` tokens are returned unchanged.
    pub fn qualified_with(&self, default_prefix: &str) -> String {
        if self.0.is_empty() || self.is_token() || self.prefix().is_some() {
            self.0.clone()
        } else {
            format!("{}:{}", default_prefix, self.0)
        }
    }

    /// Render with the `tns:` prefix when the name has no prefix
    pub fn qualified(&self) -> String {
        self.qualified_with(TNS_PREFIX)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for QualifiedName {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Split a QName into prefix and local name
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) if !prefix.is_empty() => (Some(prefix), local),
        _ => (None, qname),
    }
}

/// Check if a string is a plausible NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
}
