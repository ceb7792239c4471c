//! WSDL 2.0 services and endpoints

use crate::names::QualifiedName;
use crate::policy::{PolicyAttachable, PolicyAttachments};
use crate::schema::Documentation;

use super::Wsdl2;

/// `wsdl:endpoint`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    name: String,
    binding: QualifiedName,
    address: Option<String>,
    documentation: Option<Documentation>,
}

impl Endpoint {
    /// Endpoint name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binding reference
    pub fn binding(&self) -> &QualifiedName {
        &self.binding
    }

    /// `address`
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }
}

/// `wsdl:service`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    name: String,
    interface: QualifiedName,
    documentation: Option<Documentation>,
    endpoints: Vec<Endpoint>,
    policies: PolicyAttachments,
}

impl Service {
    /// Service name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Implemented interface
    pub fn interface(&self) -> &QualifiedName {
        &self.interface
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    /// Endpoints in insertion order
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Policy attachments
    pub fn attachments(&self) -> &PolicyAttachments {
        &self.policies
    }
}

/// Builder for a service
#[derive(Debug)]
pub struct ServiceBuilder {
    parent: Wsdl2,
    service: Service,
}

impl ServiceBuilder {
    pub(crate) fn new(parent: Wsdl2, name: String, interface: QualifiedName) -> Self {
        Self {
            parent,
            service: Service {
                name,
                interface,
                documentation: None,
                endpoints: Vec::new(),
                policies: PolicyAttachments::default(),
            },
        }
    }

    /// Add an endpoint
    pub fn endpoint(
        mut self,
        name: impl Into<String>,
        binding: impl Into<QualifiedName>,
        address: Option<&str>,
    ) -> Self {
        self.service.endpoints.push(Endpoint {
            name: name.into(),
            binding: binding.into(),
            address: address.map(String::from),
            documentation: None,
        });
        self
    }

    /// Document the most recently added endpoint
    pub fn endpoint_documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        if let Some(endpoint) = self.service.endpoints.last_mut() {
            endpoint.documentation = Some(documentation.into());
        }
        self
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.service.documentation = Some(documentation.into());
        self
    }

    /// Register the service and return to the document
    pub fn end(self) -> Wsdl2 {
        let mut parent = self.parent;
        parent.insert_service(self.service);
        parent
    }
}

impl PolicyAttachable for ServiceBuilder {
    fn attachments(&self) -> &PolicyAttachments {
        &self.service.policies
    }

    fn attachments_mut(&mut self) -> &mut PolicyAttachments {
        &mut self.service.policies
    }
}
