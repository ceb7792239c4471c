//! MTOM policy (`wsoma:OptimizedMimeSerialization`)

use crate::namespaces::WSOMA_NS;
use crate::policy::Assertion;

/// `wsoma:OptimizedMimeSerialization`, optionally marked `wsp:Optional`
pub fn optimized_mime_serialization(optional: bool) -> Assertion {
    Assertion::new("wsoma", WSOMA_NS, "OptimizedMimeSerialization").optional(optional)
}

/// MTOM requirement of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MtomPolicy {
    /// No MTOM assertion
    #[default]
    Disabled,
    /// MTOM accepted but not required
    Optional,
    /// MTOM required
    Required,
}

impl MtomPolicy {
    /// The assertion for this setting, if any
    pub fn to_assertion(self) -> Option<Assertion> {
        match self {
            Self::Disabled => None,
            Self::Optional => Some(optimized_mime_serialization(true)),
            Self::Required => Some(optimized_mime_serialization(false)),
        }
    }
}
