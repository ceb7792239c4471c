//! `wsdl:interface`

use indexmap::IndexMap;

use crate::names::QualifiedName;
use crate::schema::Documentation;

use super::Wsdl2;

/// In-out message exchange pattern
pub const MEP_IN_OUT: &str = "http://www.w3.org/ns/wsdl/in-out";
/// In-only message exchange pattern
pub const MEP_IN_ONLY: &str = "http://www.w3.org/ns/wsdl/in-only";
/// Robust in-only message exchange pattern
pub const MEP_ROBUST_IN_ONLY: &str = "http://www.w3.org/ns/wsdl/robust-in-only";

/// IRI operation style
pub const STYLE_IRI: &str = "http://www.w3.org/ns/wsdl/style/iri";
/// Multipart operation style
pub const STYLE_MULTIPART: &str = "http://www.w3.org/ns/wsdl/style/multipart";
/// RPC operation style
pub const STYLE_RPC: &str = "http://www.w3.org/ns/wsdl/style/rpc";

/// Interface-level fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceFault {
    name: String,
    element: QualifiedName,
}

impl InterfaceFault {
    /// Fault name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fault element
    pub fn element(&self) -> &QualifiedName {
        &self.element
    }
}

/// Input or output of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    element: QualifiedName,
    message_label: Option<String>,
}

impl MessageRef {
    /// Element reference or `#any`/`#none`/`#other`
    pub fn element(&self) -> &QualifiedName {
        &self.element
    }

    /// `messageLabel`
    pub fn message_label(&self) -> Option<&str> {
        self.message_label.as_deref()
    }
}

/// `infault` / `outfault` reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultRef {
    fault: QualifiedName,
    message_label: Option<String>,
}

impl FaultRef {
    /// Referenced interface fault
    pub fn fault(&self) -> &QualifiedName {
        &self.fault
    }

    /// `messageLabel`
    pub fn message_label(&self) -> Option<&str> {
        self.message_label.as_deref()
    }
}

/// Interface operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceOperation {
    name: String,
    documentation: Option<Documentation>,
    pattern: String,
    style: Option<String>,
    safe: Option<bool>,
    input: Option<MessageRef>,
    output: Option<MessageRef>,
    infaults: Vec<FaultRef>,
    outfaults: Vec<FaultRef>,
}

impl InterfaceOperation {
    /// Operation name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    /// Message exchange pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// `style`
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// `wsdlx:safe`
    pub fn safe(&self) -> Option<bool> {
        self.safe
    }

    /// Input
    pub fn input(&self) -> Option<&MessageRef> {
        self.input.as_ref()
    }

    /// Output
    pub fn output(&self) -> Option<&MessageRef> {
        self.output.as_ref()
    }

    /// In-fault references
    pub fn infaults(&self) -> &[FaultRef] {
        &self.infaults
    }

    /// Out-fault references
    pub fn outfaults(&self) -> &[FaultRef] {
        &self.outfaults
    }
}

/// `wsdl:interface`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    name: String,
    documentation: Option<Documentation>,
    extends: Vec<QualifiedName>,
    style_default: Option<String>,
    faults: Vec<InterfaceFault>,
    operations: IndexMap<String, InterfaceOperation>,
}

impl Interface {
    /// Interface name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    /// Extended interfaces
    pub fn extends(&self) -> &[QualifiedName] {
        &self.extends
    }

    /// `styleDefault`
    pub fn style_default(&self) -> Option<&str> {
        self.style_default.as_deref()
    }

    /// Faults
    pub fn faults(&self) -> &[InterfaceFault] {
        &self.faults
    }

    /// Operations by name
    pub fn operations(&self) -> &IndexMap<String, InterfaceOperation> {
        &self.operations
    }
}

/// Builder for an interface
#[derive(Debug)]
pub struct InterfaceBuilder {
    parent: Wsdl2,
    interface: Interface,
}

impl InterfaceBuilder {
    pub(crate) fn new(parent: Wsdl2, name: String) -> Self {
        Self {
            parent,
            interface: Interface {
                name,
                documentation: None,
                extends: Vec::new(),
                style_default: None,
                faults: Vec::new(),
                operations: IndexMap::new(),
            },
        }
    }

    /// Extend another interface
    pub fn extends(mut self, interface: impl Into<QualifiedName>) -> Self {
        self.interface.extends.push(interface.into());
        self
    }

    /// Set `styleDefault`
    pub fn style_default(mut self, style: impl Into<String>) -> Self {
        self.interface.style_default = Some(style.into());
        self
    }

    /// Declare an interface fault
    pub fn fault(mut self, name: impl Into<String>, element: impl Into<QualifiedName>) -> Self {
        self.interface.faults.push(InterfaceFault {
            name: name.into(),
            element: element.into(),
        });
        self
    }

    /// Start an operation (in-out by default)
    pub fn operation(self, name: impl Into<String>) -> InterfaceOperationBuilder {
        InterfaceOperationBuilder {
            parent: self,
            operation: InterfaceOperation {
                name: name.into(),
                documentation: None,
                pattern: MEP_IN_OUT.to_string(),
                style: None,
                safe: None,
                input: None,
                output: None,
                infaults: Vec::new(),
                outfaults: Vec::new(),
            },
        }
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.interface.documentation = Some(documentation.into());
        self
    }

    /// Register the interface and return to the document
    pub fn end(self) -> Wsdl2 {
        let mut parent = self.parent;
        parent.insert_interface(self.interface);
        parent
    }
}

/// Builder for an interface operation
#[derive(Debug)]
pub struct InterfaceOperationBuilder {
    parent: InterfaceBuilder,
    operation: InterfaceOperation,
}

impl InterfaceOperationBuilder {
    /// Set the message exchange pattern
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.operation.pattern = pattern.into();
        self
    }

    /// Set `style`
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.operation.style = Some(style.into());
        self
    }

    /// Set `wsdlx:safe`
    pub fn safe(mut self, safe: bool) -> Self {
        self.operation.safe = Some(safe);
        self
    }

    /// Set the input element
    pub fn input(mut self, element: impl Into<QualifiedName>) -> Self {
        self.operation.input = Some(MessageRef {
            element: element.into(),
            message_label: None,
        });
        self
    }

    /// Set the input element with a `messageLabel`
    pub fn input_with_label(
        mut self,
        element: impl Into<QualifiedName>,
        label: impl Into<String>,
    ) -> Self {
        self.operation.input = Some(MessageRef {
            element: element.into(),
            message_label: Some(label.into()),
        });
        self
    }

    /// Set the output element
    pub fn output(mut self, element: impl Into<QualifiedName>) -> Self {
        self.operation.output = Some(MessageRef {
            element: element.into(),
            message_label: None,
        });
        self
    }

    /// Set the output element with a `messageLabel`
    pub fn output_with_label(
        mut self,
        element: impl Into<QualifiedName>,
        label: impl Into<String>,
    ) -> Self {
        self.operation.output = Some(MessageRef {
            element: element.into(),
            message_label: Some(label.into()),
        });
        self
    }

    /// Add an `infault` reference
    pub fn infault(mut self, fault: impl Into<QualifiedName>) -> Self {
        self.operation.infaults.push(FaultRef {
            fault: fault.into(),
            message_label: None,
        });
        self
    }

    /// Add an `outfault` reference
    pub fn outfault(mut self, fault: impl Into<QualifiedName>) -> Self {
        self.operation.outfaults.push(FaultRef {
            fault: fault.into(),
            message_label: None,
        });
        self
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.operation.documentation = Some(documentation.into());
        self
    }

    /// Add the operation to the interface and return to it
    pub fn end(self) -> InterfaceBuilder {
        let mut parent = self.parent;
        parent
            .interface
            .operations
            .insert(self.operation.name.clone(), self.operation);
        parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_defaults_to_in_out() {
        let wsdl = Wsdl2::create("Svc", "urn:svc")
            .interface("UserInterface")
            .operation("getUser")
            .input("tns:GetUser")
            .end()
            .end();
        let op = &wsdl.interfaces()["UserInterface"].operations()["getUser"];
        assert_eq!(op.pattern(), MEP_IN_OUT);
        assert_eq!(op.safe(), None);
        assert!(op.output().is_none());
    }

    #[test]
    fn test_interface_contents() {
        let wsdl = Wsdl2::create("Svc", "urn:svc")
            .interface("Admin")
            .extends("tns:Base")
            .style_default(STYLE_IRI)
            .fault("NotFound", "tns:NotFoundFault")
            .operation("notify")
            .pattern(MEP_IN_ONLY)
            .input_with_label("#any", "In")
            .outfault("tns:NotFound")
            .end()
            .end();
        let admin = &wsdl.interfaces()["Admin"];
        assert_eq!(admin.extends()[0].as_str(), "tns:Base");
        assert_eq!(admin.style_default(), Some(STYLE_IRI));
        let notify = &admin.operations()["notify"];
        assert_eq!(notify.input().and_then(|i| i.message_label()), Some("In"));
        assert_eq!(notify.outfaults().len(), 1);
    }
}
