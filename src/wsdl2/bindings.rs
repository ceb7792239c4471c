//! WSDL 2.0 `wsdl:binding` with SOAP (`wsoap:`) or HTTP (`whttp:`) type

use indexmap::IndexMap;

use crate::addressing::{AddressingActions, OperationActions};
use crate::error::Result;
use crate::names::QualifiedName;
use crate::namespaces::SOAP12_HTTP_PROTOCOL;
use crate::policy::{PolicyAttachable, PolicyAttachments};
use crate::schema::Documentation;

use super::Wsdl2;

/// Binding type and its type-level properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingKind {
    /// `type="http://www.w3.org/ns/wsdl/soap"`
    Soap {
        /// `wsoap:version`
        version: Option<String>,
        /// `wsoap:protocol`
        protocol: Option<String>,
    },
    /// `type="http://www.w3.org/ns/wsdl/http"`
    Http {
        /// `whttp:methodDefault`
        method_default: Option<String>,
    },
}

/// Binding of an interface fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingFault {
    reference: QualifiedName,
    code: Option<String>,
}

impl BindingFault {
    /// Referenced interface fault
    pub fn reference(&self) -> &QualifiedName {
        &self.reference
    }

    /// `wsoap:code`
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

/// Binding of an interface operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingOperation {
    reference: QualifiedName,
    documentation: Option<Documentation>,
    soap_action: Option<String>,
    http_method: Option<String>,
    http_location: Option<String>,
    policies: PolicyAttachments,
}

impl BindingOperation {
    /// Referenced interface operation
    pub fn reference(&self) -> &QualifiedName {
        &self.reference
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    /// `wsoap:action`
    pub fn soap_action(&self) -> Option<&str> {
        self.soap_action.as_deref()
    }

    /// `whttp:method`
    pub fn http_method(&self) -> Option<&str> {
        self.http_method.as_deref()
    }

    /// `whttp:location`
    pub fn http_location(&self) -> Option<&str> {
        self.http_location.as_deref()
    }

    /// Policy attachments
    pub fn attachments(&self) -> &PolicyAttachments {
        &self.policies
    }
}

/// `wsdl:binding`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    name: String,
    interface: QualifiedName,
    documentation: Option<Documentation>,
    kind: Option<BindingKind>,
    faults: Vec<BindingFault>,
    operations: IndexMap<String, BindingOperation>,
    actions: AddressingActions,
    policies: PolicyAttachments,
}

impl Binding {
    /// Binding name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bound interface
    pub fn interface(&self) -> &QualifiedName {
        &self.interface
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    /// Binding type, if chosen
    pub fn kind(&self) -> Option<&BindingKind> {
        self.kind.as_ref()
    }

    /// Fault bindings
    pub fn faults(&self) -> &[BindingFault] {
        &self.faults
    }

    /// Operation bindings keyed by the referenced operation
    pub fn operations(&self) -> &IndexMap<String, BindingOperation> {
        &self.operations
    }

    /// WS-Addressing actions
    pub fn actions(&self) -> &AddressingActions {
        &self.actions
    }

    /// Actions registered for a bound operation, by reference or local name
    pub fn operation_actions(&self, operation: &BindingOperation) -> Option<&OperationActions> {
        let reference = operation.reference();
        self.actions
            .get(reference.as_str())
            .or_else(|| self.actions.get(reference.local_name()))
    }

    /// Policy attachments
    pub fn attachments(&self) -> &PolicyAttachments {
        &self.policies
    }
}

/// Builder for a binding
#[derive(Debug)]
pub struct BindingBuilder {
    parent: Wsdl2,
    binding: Binding,
}

impl BindingBuilder {
    pub(crate) fn new(parent: Wsdl2, name: String, interface: QualifiedName) -> Self {
        Self {
            parent,
            binding: Binding {
                name,
                interface,
                documentation: None,
                kind: None,
                faults: Vec::new(),
                operations: IndexMap::new(),
                actions: AddressingActions::new(),
                policies: PolicyAttachments::default(),
            },
        }
    }

    /// SOAP 1.2 over HTTP
    pub fn soap_binding(mut self) -> Self {
        self.binding.kind = Some(BindingKind::Soap {
            version: Some("1.2".to_string()),
            protocol: Some(SOAP12_HTTP_PROTOCOL.to_string()),
        });
        self
    }

    /// SOAP binding with an explicit version and protocol URI
    pub fn soap_binding_with(
        mut self,
        version: impl Into<String>,
        protocol: impl Into<String>,
    ) -> Self {
        self.binding.kind = Some(BindingKind::Soap {
            version: Some(version.into()),
            protocol: Some(protocol.into()),
        });
        self
    }

    /// HTTP binding, optionally with `whttp:methodDefault`
    pub fn http_binding(mut self, method_default: Option<&str>) -> Self {
        self.binding.kind = Some(BindingKind::Http {
            method_default: method_default.map(String::from),
        });
        self
    }

    /// Bind an interface fault, optionally with `wsoap:code`
    pub fn fault(mut self, reference: impl Into<QualifiedName>, code: Option<&str>) -> Self {
        self.binding.faults.push(BindingFault {
            reference: reference.into(),
            code: code.map(String::from),
        });
        self
    }

    /// Start an operation binding for the referenced interface operation
    pub fn operation(self, reference: impl Into<QualifiedName>) -> BindingOperationBuilder {
        BindingOperationBuilder {
            parent: self,
            operation: BindingOperation {
                reference: reference.into(),
                documentation: None,
                soap_action: None,
                http_method: None,
                http_location: None,
                policies: PolicyAttachments::default(),
            },
        }
    }

    /// Register WS-Addressing actions for `operation`
    pub fn action(
        mut self,
        operation: impl Into<String>,
        input: impl Into<String>,
        output: Option<&str>,
    ) -> Self {
        self.binding
            .actions
            .set_action(operation, input, output.map(String::from));
        self
    }

    /// Register a fault action; `action()` must have been called for
    /// `operation` first
    pub fn fault_action(
        mut self,
        operation: &str,
        fault: impl Into<String>,
        action: impl Into<String>,
    ) -> Result<Self> {
        self.binding
            .actions
            .set_fault_action(operation, fault, action)?;
        Ok(self)
    }

    /// Emit `wsaw:UsingAddressing`
    pub fn using_addressing(mut self, required: bool) -> Self {
        self.binding.actions.set_using_addressing(required);
        self
    }

    /// Registered WS-Addressing actions
    pub fn actions(&self) -> &AddressingActions {
        &self.binding.actions
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.binding.documentation = Some(documentation.into());
        self
    }

    /// Register the binding and return to the document
    pub fn end(self) -> Wsdl2 {
        let mut parent = self.parent;
        parent.insert_binding(self.binding);
        parent
    }
}

impl PolicyAttachable for BindingBuilder {
    fn attachments(&self) -> &PolicyAttachments {
        &self.binding.policies
    }

    fn attachments_mut(&mut self) -> &mut PolicyAttachments {
        &mut self.binding.policies
    }
}

/// Builder for an operation binding
#[derive(Debug)]
pub struct BindingOperationBuilder {
    parent: BindingBuilder,
    operation: BindingOperation,
}

impl BindingOperationBuilder {
    /// Set `wsoap:action`
    pub fn soap_action(mut self, action: impl Into<String>) -> Self {
        self.operation.soap_action = Some(action.into());
        self
    }

    /// Set `whttp:method`
    pub fn http_method(mut self, method: impl Into<String>) -> Self {
        self.operation.http_method = Some(method.into());
        self
    }

    /// Set `whttp:location`
    pub fn http_location(mut self, location: impl Into<String>) -> Self {
        self.operation.http_location = Some(location.into());
        self
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.operation.documentation = Some(documentation.into());
        self
    }

    /// Add the operation binding and return to the binding
    pub fn end(self) -> BindingBuilder {
        let mut parent = self.parent;
        let key = self.operation.reference.as_str().to_string();
        parent.binding.operations.insert(key, self.operation);
        parent
    }
}

impl PolicyAttachable for BindingOperationBuilder {
    fn attachments(&self) -> &PolicyAttachments {
        &self.operation.policies
    }

    fn attachments_mut(&mut self) -> &mut PolicyAttachments {
        &mut self.operation.policies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soap_binding_defaults() {
        let wsdl = Wsdl2::create("Svc", "urn:svc")
            .binding("SoapBinding", "tns:UserInterface")
            .soap_binding()
            .fault("tns:NotFound", Some("soap:Sender"))
            .operation("tns:getUser")
            .soap_action("urn:getUser")
            .end()
            .end();
        let binding = &wsdl.bindings()["SoapBinding"];
        match binding.kind() {
            Some(BindingKind::Soap { version, protocol }) => {
                assert_eq!(version.as_deref(), Some("1.2"));
                assert_eq!(protocol.as_deref(), Some(SOAP12_HTTP_PROTOCOL));
            }
            other => panic!("unexpected kind: {:?}", other),
        }
        assert_eq!(binding.faults()[0].code(), Some("soap:Sender"));
        assert_eq!(
            binding.operations()["tns:getUser"].soap_action(),
            Some("urn:getUser")
        );
    }

    #[test]
    fn test_fault_action_needs_operation_action() {
        let err = Wsdl2::create("Svc", "urn:svc")
            .binding("B", "tns:I")
            .fault_action("getUser", "notFound", "urn:fault")
            .unwrap_err();
        assert_eq!(
            err.message(),
            "No action defined for operation 'getUser'. Call action() first."
        );
    }

    #[test]
    fn test_actions_found_by_local_name() {
        let wsdl = Wsdl2::create("Svc", "urn:svc")
            .binding("B", "tns:I")
            .action("getUser", "urn:in", Some("urn:out"))
            .fault_action("getUser", "notFound", "urn:fault")
            .unwrap()
            .operation("tns:getUser")
            .end()
            .end();
        let binding = &wsdl.bindings()["B"];
        let operation = &binding.operations()["tns:getUser"];
        let actions = binding.operation_actions(operation).unwrap();
        assert_eq!(actions.input(), "urn:in");
        assert_eq!(actions.fault("notFound"), Some("urn:fault"));
    }

    #[test]
    fn test_http_binding_kind_last_write_wins() {
        let wsdl = Wsdl2::create("Svc", "urn:svc")
            .binding("B", "tns:I")
            .soap_binding()
            .http_binding(Some("GET"))
            .end();
        assert_eq!(
            wsdl.bindings()["B"].kind(),
            Some(&BindingKind::Http {
                method_default: Some("GET".to_string())
            })
        );
    }
}
