//! WSDL 2.0 documents
//!
//! [`Wsdl2`] mirrors [`crate::wsdl::Wsdl`] with the 2.0 component model:
//! interfaces instead of port types and messages, endpoints instead of
//! ports, and an `xs:`-prefixed schema.

pub mod bindings;
pub mod generator;
pub mod interfaces;
pub mod services;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::Result;
use crate::names::QualifiedName;
use crate::options::GeneratorOptions;
use crate::policy::{PolicyAttachable, PolicyAttachments};
use crate::schema::{Documentation, Schema, SchemaHost};
use crate::xml::XmlElement;

pub use bindings::{
    Binding, BindingBuilder, BindingFault, BindingKind, BindingOperation,
    BindingOperationBuilder,
};
pub use generator::Wsdl2Generator;
pub use interfaces::{
    FaultRef, Interface, InterfaceBuilder, InterfaceFault, InterfaceOperation,
    InterfaceOperationBuilder, MessageRef, MEP_IN_ONLY, MEP_IN_OUT, MEP_ROBUST_IN_ONLY,
    STYLE_IRI, STYLE_MULTIPART, STYLE_RPC,
};
pub use services::{Endpoint, Service, ServiceBuilder};

/// `wsdl:import`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wsdl2Import {
    /// Imported namespace
    pub namespace: String,
    /// Document location, if given
    pub location: Option<String>,
}

/// A WSDL 2.0 `description` document
#[derive(Debug, Clone)]
pub struct Wsdl2 {
    name: String,
    target_namespace: String,
    documentation: Option<Documentation>,
    imports: Vec<Wsdl2Import>,
    includes: Vec<String>,
    schema: Schema,
    interfaces: IndexMap<String, Interface>,
    bindings: IndexMap<String, Binding>,
    services: IndexMap<String, Service>,
    policies: PolicyAttachments,
}

impl Wsdl2 {
    /// Start a document with a name and target namespace
    pub fn create(name: impl Into<String>, target_namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_namespace: target_namespace.into(),
            documentation: None,
            imports: Vec::new(),
            includes: Vec::new(),
            schema: Schema::new(),
            interfaces: IndexMap::new(),
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
    pub fn import(mut self, namespace: impl Into<String>, location: Option<&str>) -> Self {
        self.imports.push(Wsdl2Import {
            namespace: namespace.into(),
            location: location.map(String::from),
        });
        self
    }

    /// Add a `wsdl:include`
    pub fn include(mut self, location: impl Into<String>) -> Self {
        self.includes.push(location.into());
        self
    }

    /// Start an interface
    pub fn interface(self, name: impl Into<String>) -> InterfaceBuilder {
        InterfaceBuilder::new(self, name.into())
    }

    /// Start a binding of `interface`
    pub fn binding(
        self,
        name: impl Into<String>,
        interface: impl Into<QualifiedName>,
    ) -> BindingBuilder {
        BindingBuilder::new(self, name.into(), interface.into())
    }

    /// Start a service implementing `interface`
    pub fn service(
        self,
        name: impl Into<String>,
        interface: impl Into<QualifiedName>,
    ) -> ServiceBuilder {
        ServiceBuilder::new(self, name.into(), interface.into())
    }

    /// Document name (not written to the output)
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

    /// Imports in insertion order
    pub fn imports(&self) -> &[Wsdl2Import] {
        &self.imports
    }

    /// Include locations in insertion order
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    /// Interfaces by name
    pub fn interfaces(&self) -> &IndexMap<String, Interface> {
        &self.interfaces
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
        Wsdl2Generator::new().build_tree(self)
    }

    /// Generate the document text with default options
    pub fn generate(&self) -> Result<String> {
        Wsdl2Generator::new().generate(self)
    }

    /// Generate the document text with custom options
    pub fn generate_with(&self, options: &GeneratorOptions) -> Result<String> {
        Wsdl2Generator::with_options(options.clone()).generate(self)
    }

    pub(crate) fn insert_interface(&mut self, interface: Interface) {
        if self
            .interfaces
            .insert(interface.name().to_string(), interface)
            .is_some()
        {
            debug!("replaced existing interface");
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

impl SchemaHost for Wsdl2 {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn schema_mut(&mut self) -> &mut Schema {
        &mut self.schema
    }
}

impl PolicyAttachable for Wsdl2 {
    fn attachments(&self) -> &PolicyAttachments {
        &self.policies
    }

    fn attachments_mut(&mut self) -> &mut PolicyAttachments {
        &mut self.policies
    }
}
