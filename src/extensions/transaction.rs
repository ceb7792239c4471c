//! WS-AtomicTransaction and WS-BusinessActivity assertions

use crate::namespaces::{WSAT_NS, WSBA_NS};
use crate::policy::Assertion;

/// `wsat:ATAssertion`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AtomicTransaction {
    optional: bool,
}

impl AtomicTransaction {
    /// A required atomic transaction
    pub fn required() -> Self {
        Self { optional: false }
    }

    /// A transaction the client may flow (`wsp:Optional="true"`)
    pub fn optional() -> Self {
        Self { optional: true }
    }

    /// The `wsat:ATAssertion`
    pub fn to_assertion(&self) -> Assertion {
        Assertion::new("wsat", WSAT_NS, "ATAssertion").optional(self.optional)
    }
}

/// `wsba:BAAtomicOutcomeAssertion`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BusinessActivity {
    optional: bool,
}

impl BusinessActivity {
    /// Required atomic-outcome coordination
    pub fn required() -> Self {
        Self { optional: false }
    }

    /// Optional atomic-outcome coordination
    pub fn optional() -> Self {
        Self { optional: true }
    }

    /// The `wsba:BAAtomicOutcomeAssertion`
    pub fn to_assertion(&self) -> Assertion {
        Assertion::new("wsba", WSBA_NS, "BAAtomicOutcomeAssertion").optional(self.optional)
    }
}
