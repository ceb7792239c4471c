//! `wsdl:portType` and abstract operations

use indexmap::IndexMap;

use crate::names::QualifiedName;
use crate::schema::Documentation;

use super::Wsdl;

/// Named fault of an abstract operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    name: String,
    message: QualifiedName,
}

impl Fault {
    /// Fault name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fault message reference
    pub fn message(&self) -> &QualifiedName {
        &self.message
    }
}

/// Abstract operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    name: String,
    documentation: Option<Documentation>,
    input: Option<QualifiedName>,
    output: Option<QualifiedName>,
    faults: Vec<Fault>,
    parameter_order: Option<Vec<String>>,
}

impl Operation {
    /// Operation name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    /// Input message
    pub fn input(&self) -> Option<&QualifiedName> {
        self.input.as_ref()
    }

    /// Output message
    pub fn output(&self) -> Option<&QualifiedName> {
        self.output.as_ref()
    }

    /// Faults in insertion order
    pub fn faults(&self) -> &[Fault] {
        &self.faults
    }

    /// `parameterOrder` part names
    pub fn parameter_order(&self) -> Option<&[String]> {
        self.parameter_order.as_deref()
    }

    /// True for an input-only operation
    pub fn is_one_way(&self) -> bool {
        self.input.is_some() && self.output.is_none()
    }
}

/// `wsdl:portType`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortType {
    name: String,
    documentation: Option<Documentation>,
    operations: IndexMap<String, Operation>,
}

impl PortType {
    /// Port type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    /// Operations by name
    pub fn operations(&self) -> &IndexMap<String, Operation> {
        &self.operations
    }
}

/// Builder for a port type
#[derive(Debug)]
pub struct PortTypeBuilder {
    parent: Wsdl,
    port_type: PortType,
}

impl PortTypeBuilder {
    pub(crate) fn new(parent: Wsdl, name: String) -> Self {
        Self {
            parent,
            port_type: PortType {
                name,
                documentation: None,
                operations: IndexMap::new(),
            },
        }
    }

    /// Start an operation
    pub fn operation(self, name: impl Into<String>) -> OperationBuilder {
        OperationBuilder {
            parent: self,
            operation: Operation {
                name: name.into(),
                documentation: None,
                input: None,
                output: None,
                faults: Vec::new(),
                parameter_order: None,
            },
        }
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.port_type.documentation = Some(documentation.into());
        self
    }

    /// Register the port type and return to the document
    pub fn end(self) -> Wsdl {
        let mut parent = self.parent;
        parent.insert_port_type(self.port_type);
        parent
    }
}

/// Builder for an abstract operation
#[derive(Debug)]
pub struct OperationBuilder {
    parent: PortTypeBuilder,
    operation: Operation,
}

impl OperationBuilder {
    /// Set the input message
    pub fn input(mut self, message: impl Into<QualifiedName>) -> Self {
        self.operation.input = Some(message.into());
        self
    }

    /// Set the output message
    pub fn output(mut self, message: impl Into<QualifiedName>) -> Self {
        self.operation.output = Some(message.into());
        self
    }

    /// Add a named fault
    pub fn fault(mut self, name: impl Into<String>, message: impl Into<QualifiedName>) -> Self {
        self.operation.faults.push(Fault {
            name: name.into(),
            message: message.into(),
        });
        self
    }

    /// Set `parameterOrder`
    pub fn parameter_order<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operation.parameter_order = Some(parts.into_iter().map(Into::into).collect());
        self
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.operation.documentation = Some(documentation.into());
        self
    }

    /// Add the operation to the port type and return to it
    pub fn end(self) -> PortTypeBuilder {
        let mut parent = self.parent;
        parent
            .port_type
            .operations
            .insert(self.operation.name.clone(), self.operation);
        parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_contents() {
        let wsdl = Wsdl::create("Svc", "urn:svc")
            .port_type("UserPortType")
            .documentation("User operations")
            .operation("GetUser")
            .input("tns:GetUserRequest")
            .output("tns:GetUserResponse")
            .fault("NotFound", "tns:NotFoundFault")
            .parameter_order(["userId"])
            .end()
            .operation("Notify")
            .input("tns:NotifyRequest")
            .end()
            .end();

        let port_type = &wsdl.port_types()["UserPortType"];
        let get_user = &port_type.operations()["GetUser"];
        assert_eq!(get_user.faults()[0].name(), "NotFound");
        assert_eq!(get_user.parameter_order(), Some(&["userId".to_string()][..]));
        assert!(!get_user.is_one_way());
        assert!(port_type.operations()["Notify"].is_one_way());
    }
}
