//! WSDL 1.1 documents
//!
//! [`Wsdl`] is the root builder. Every category (messages, port types,
//! bindings, services) is a name-keyed, insertion-ordered map; the embedded
//! schema is reached through [`SchemaHost`] and WS-Policy attachments through
//! [`PolicyAttachable`].

pub mod bindings;
pub mod generator;
pub mod messages;
pub mod port_types;
pub mod services;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::Result;
use crate::options::GeneratorOptions;
use crate::policy::{PolicyAttachable, PolicyAttachments};
use crate::schema::{Documentation, Schema, SchemaHost};
use crate::xml::XmlElement;

pub use bindings::{
    Binding, BindingBuilder, BindingFault, BindingMessage, BindingMessageBuilder,
    BindingOperation, BindingOperationBuilder, BindingProtocol, BodyUse, MessageExtension,
    MimePart, MimePartBuilder, MultipartBuilder, SoapBinding, SoapVersion,
};
pub use generator::WsdlGenerator;
pub use messages::{Message, MessageBuilder, Part, PartKind};
pub use port_types::{Fault, Operation, OperationBuilder, PortType, PortTypeBuilder};
pub use services::{Address, AddressKind, Port, Service, ServiceBuilder};

/// `wsdl:import`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsdlImport {
    /// Imported namespace
    pub namespace: String,
    /// Document location
    pub location: String,
}

/// A WSDL 1.1 `definitions` document
#[derive(Debug, Clone)]
pub struct Wsdl {
    name: String,
    target_namespace: String,
    documentation: Option<Documentation>,
    imports: Vec<WsdlImport>,
    schema: Schema,
    messages: IndexMap<String, Message>,
    port_types: IndexMap<String, PortType>,
    bindings: IndexMap<String, Binding>,
    services: IndexMap<String, Service>,
    policies: PolicyAttachments,
}

impl Wsdl {
    /// Start a document with a name and target namespace
    pub fn create(name: impl Into<String>, target_namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_namespace: target_namespace.into(),
            documentation: None,
            imports: Vec::new(),
            schema: Schema::new(),
            messages: IndexMap::new(),
            port_types: IndexMap::new(),
            bindings: IndexMap::new(),
            services: IndexMap::new(),
            policies: PolicyAttachments::default(),
        }
    }

    /// Set the document's `wsdl:documentation`
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Add a `wsdl:import`
    pub fn wsdl_import(mut self, namespace: impl Into<String>, location: impl Into<String>) -> Self {
        self.imports.push(WsdlImport {
            namespace: namespace.into(),
            location: location.into(),
        });
        self
    }

    /// Start a message
    pub fn message(self, name: impl Into<String>) -> MessageBuilder {
        MessageBuilder::new(self, name.into())
    }

    /// Start a port type
    pub fn port_type(self, name: impl Into<String>) -> PortTypeBuilder {
        PortTypeBuilder::new(self, name.into())
    }

    /// Start a binding of `port_type`
    pub fn binding(
        self,
        name: impl Into<String>,
        port_type: impl Into<crate::names::QualifiedName>,
    ) -> BindingBuilder {
        BindingBuilder::new(self, name.into(), port_type.into())
    }

    /// Start a service
    pub fn service(self, name: impl Into<String>) -> ServiceBuilder {
        ServiceBuilder::new(self, name.into())
    }

    /// Document name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target namespace
    pub fn target_namespace(&self) -> &str {
        &self.target_namespace
    }

    /// Document-level documentation
    pub fn doc(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    /// WSDL imports in insertion order
    pub fn imports(&self) -> &[WsdlImport] {
        &self.imports
    }

    /// Messages by name
    pub fn messages(&self) -> &IndexMap<String, Message> {
        &self.messages
    }

    /// Port types by name
    pub fn port_types(&self) -> &IndexMap<String, PortType> {
        &self.port_types
    }

    /// Bindings by name
    pub fn bindings(&self) -> &IndexMap<String, Binding> {
        &self.bindings
    }

    /// Services by name
    pub fn services(&self) -> &IndexMap<String, Service> {
        &self.services
    }

    /// Build the XML tree with default options
    pub fn to_xml(&self) -> XmlElement {
        WsdlGenerator::new().build_tree(self)
    }

    /// Generate the document text with default options
    pub fn generate(&self) -> Result<String> {
        WsdlGenerator::new().generate(self)
    }

    /// Generate the document text with custom options
    pub fn generate_with(&self, options: &GeneratorOptions) -> Result<String> {
        WsdlGenerator::with_options(options.clone()).generate(self)
    }

    pub(crate) fn insert_message(&mut self, message: Message) {
        if self
            .messages
            .insert(message.name().to_string(), message)
            .is_some()
        {
            debug!("replaced existing message");
        }
    }

    pub(crate) fn insert_port_type(&mut self, port_type: PortType) {
        if self
            .port_types
            .insert(port_type.name().to_string(), port_type)
            .is_some()
        {
            debug!("replaced existing portType");
        }
    }

    pub(crate) fn insert_binding(&mut self, binding: Binding) {
        if self
            .bindings
            .insert(binding.name().to_string(), binding)
            .is_some()
        {
            debug!("replaced existing binding");
        }
    }

    pub(crate) fn insert_service(&mut self, service: Service) {
        if self
            .services
            .insert(service.name().to_string(), service)
            .is_some()
        {
            debug!("replaced existing service");
        }
    }
}

impl SchemaHost for Wsdl {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn schema_mut(&mut self) -> &mut Schema {
        &mut self.schema
    }
}

impl PolicyAttachable for Wsdl {
    fn attachments(&self) -> &PolicyAttachments {
        &self.policies
    }

    fn attachments_mut(&mut self) -> &mut PolicyAttachments {
        &mut self.policies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_is_empty() {
        let wsdl = Wsdl::create("Empty", "urn:empty");
        assert_eq!(wsdl.name(), "Empty");
        assert_eq!(wsdl.target_namespace(), "urn:empty");
        assert!(wsdl.schema().is_empty());
        assert!(wsdl.messages().is_empty());
        assert!(wsdl.policies().is_empty());
    }

    #[test]
    fn test_categories_are_independent() {
        let wsdl = Wsdl::create("Svc", "urn:svc")
            .message("User")
            .end()
            .complex_type("User")
            .end()
            .port_type("User")
            .end();
        assert_eq!(wsdl.messages().len(), 1);
        assert_eq!(wsdl.complex_types().len(), 1);
        assert_eq!(wsdl.port_types().len(), 1);
    }

    #[test]
    fn test_duplicate_message_replaced_in_place() {
        let wsdl = Wsdl::create("Svc", "urn:svc")
            .message("A")
            .part("x", "xsd:string")
            .end()
            .message("B")
            .end()
            .message("A")
            .end();
        let names: Vec<&String> = wsdl.messages().keys().collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(wsdl.messages()["A"].parts().is_empty());
    }
}
