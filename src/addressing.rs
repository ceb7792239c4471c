//! WS-Addressing metadata for bindings
//!
//! Actions are registered per operation name. A fault action can only be
//! added after the operation's input action exists.

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Action URIs of one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationActions {
    input: String,
    output: Option<String>,
    faults: IndexMap<String, String>,
}

impl OperationActions {
    /// Input action
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Output action
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Fault actions by fault name
    pub fn faults(&self) -> &IndexMap<String, String> {
        &self.faults
    }

    /// Action of one fault
    pub fn fault(&self, name: &str) -> Option<&str> {
        self.faults.get(name).map(|s| s.as_str())
    }
}

/// WS-Addressing configuration of a binding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressingActions {
    operations: IndexMap<String, OperationActions>,
    using_addressing: Option<bool>,
}

impl AddressingActions {
    /// Create an empty action map
    pub fn new() -> Self {
        Self::default()
    }

    /// Register input/output actions; fault actions already registered for
    /// the operation are kept
    pub fn set_action(
        &mut self,
        operation: impl Into<String>,
        input: impl Into<String>,
        output: Option<String>,
    ) {
        let input = input.into();
        match self.operations.entry(operation.into()) {
            indexmap::map::Entry::Occupied(mut entry) => {
                let actions = entry.get_mut();
                actions.input = input;
                actions.output = output;
            }
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(OperationActions {
                    input,
                    output,
                    faults: IndexMap::new(),
                });
            }
        }
    }

    /// Register a fault action; fails when `operation` has no action yet
    pub fn set_fault_action(
        &mut self,
        operation: &str,
        fault: impl Into<String>,
        action: impl Into<String>,
    ) -> Result<()> {
        let actions = self.operations.get_mut(operation).ok_or_else(|| {
            Error::invalid_operation(format!(
                "No action defined for operation '{}'. Call action() first.",
                operation
            ))
        })?;
        actions.faults.insert(fault.into(), action.into());
        Ok(())
    }

    /// Actions of one operation
    pub fn get(&self, operation: &str) -> Option<&OperationActions> {
        self.operations.get(operation)
    }

    /// All operations with actions
    pub fn operations(&self) -> &IndexMap<String, OperationActions> {
        &self.operations
    }

    /// Mark the binding with `wsaw:UsingAddressing`
    pub fn set_using_addressing(&mut self, required: bool) {
        self.using_addressing = Some(required);
    }

    /// `wsdl:required` of the `UsingAddressing` marker, if set
    pub fn using_addressing(&self) -> Option<bool> {
        self.using_addressing
    }

    /// True when nothing is configured
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty() && self.using_addressing.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_action_requires_action() {
        let mut actions = AddressingActions::new();
        let err = actions
            .set_fault_action("GetUser", "NotFound", "urn:fault")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOperation(_)));
        assert_eq!(
            err.message(),
            "No action defined for operation 'GetUser'. Call action() first."
        );
    }

    #[test]
    fn test_fault_actions_survive_action_update() {
        let mut actions = AddressingActions::new();
        actions.set_action("GetUser", "urn:in", Some("urn:out".to_string()));
        actions
            .set_fault_action("GetUser", "NotFound", "urn:fault")
            .unwrap();
        actions.set_action("GetUser", "urn:in2", None);

        let op = actions.get("GetUser").unwrap();
        assert_eq!(op.input(), "urn:in2");
        assert_eq!(op.output(), None);
        assert_eq!(op.fault("NotFound"), Some("urn:fault"));
    }

    #[test]
    fn test_using_addressing_flag() {
        let mut actions = AddressingActions::new();
        assert!(actions.is_empty());
        actions.set_using_addressing(false);
        assert_eq!(actions.using_addressing(), Some(false));
        assert!(!actions.is_empty());
    }
}
