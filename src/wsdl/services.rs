//! `wsdl:service` and ports

use crate::names::QualifiedName;
use crate::policy::{PolicyAttachable, PolicyAttachments};
use crate::schema::Documentation;

use super::Wsdl;

/// Which `address` extension a port carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// `soap:address`
    Soap,
    /// `soap12:address`
    Soap12,
    /// `http:address`
    Http,
}

impl AddressKind {
    /// Namespace prefix of the address element
    pub fn prefix(&self) -> &'static str {
        match self {
            AddressKind::Soap => "soap",
            AddressKind::Soap12 => "soap12",
            AddressKind::Http => "http",
        }
    }
}

/// Port address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Address extension
    pub kind: AddressKind,
    /// `location`
    pub location: String,
}

/// `wsdl:port`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    name: String,
    binding: QualifiedName,
    address: Address,
    documentation: Option<Documentation>,
}

impl Port {
    /// Port name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binding reference
    pub fn binding(&self) -> &QualifiedName {
        &self.binding
    }

    /// Address
    pub fn address(&self) -> &Address {
        &self.address
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
    documentation: Option<Documentation>,
    ports: Vec<Port>,
    policies: PolicyAttachments,
}

impl Service {
    /// Service name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    /// Ports in insertion order
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Policy attachments
    pub fn attachments(&self) -> &PolicyAttachments {
        &self.policies
    }
}

/// Builder for a service
#[derive(Debug)]
pub struct ServiceBuilder {
    parent: Wsdl,
    service: Service,
}

impl ServiceBuilder {
    pub(crate) fn new(parent: Wsdl, name: String) -> Self {
        Self {
            parent,
            service: Service {
                name,
                documentation: None,
                ports: Vec::new(),
                policies: PolicyAttachments::default(),
            },
        }
    }

    fn push_port(
        mut self,
        name: impl Into<String>,
        binding: impl Into<QualifiedName>,
        kind: AddressKind,
        location: impl Into<String>,
    ) -> Self {
        self.service.ports.push(Port {
            name: name.into(),
            binding: binding.into(),
            address: Address {
                kind,
                location: location.into(),
            },
            documentation: None,
        });
        self
    }

    /// Add a port with a `soap:address`
    pub fn port(
        self,
        name: impl Into<String>,
        binding: impl Into<QualifiedName>,
        location: impl Into<String>,
    ) -> Self {
        self.push_port(name, binding, AddressKind::Soap, location)
    }

    /// Add a port with a `soap12:address`
    pub fn soap12_port(
        self,
        name: impl Into<String>,
        binding: impl Into<QualifiedName>,
        location: impl Into<String>,
    ) -> Self {
        self.push_port(name, binding, AddressKind::Soap12, location)
    }

    /// Add a port with an `http:address`
    pub fn http_port(
        self,
        name: impl Into<String>,
        binding: impl Into<QualifiedName>,
        location: impl Into<String>,
    ) -> Self {
        self.push_port(name, binding, AddressKind::Http, location)
    }

    /// Document the most recently added port
    pub fn port_documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        if let Some(port) = self.service.ports.last_mut() {
            port.documentation = Some(documentation.into());
        }
        self
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.service.documentation = Some(documentation.into());
        self
    }

    /// Register the service and return to the document
    pub fn end(self) -> Wsdl {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_kinds() {
        let wsdl = Wsdl::create("Svc", "urn:svc")
            .service("UserService")
            .port("SoapPort", "tns:SoapBinding", "http://h/soap")
            .soap12_port("Soap12Port", "tns:Soap12Binding", "http://h/soap12")
            .http_port("HttpPort", "tns:HttpBinding", "http://h/rest")
            .port_documentation("REST endpoint")
            .end();
        let ports = wsdl.services()["UserService"].ports();
        let kinds: Vec<AddressKind> = ports.iter().map(|p| p.address().kind).collect();
        assert_eq!(
            kinds,
            vec![AddressKind::Soap, AddressKind::Soap12, AddressKind::Http]
        );
        assert!(ports[0].documentation().is_none());
        assert_eq!(ports[2].documentation().map(|d| d.text()), Some("REST endpoint"));
    }

    #[test]
    fn test_service_policy_reference() {
        let wsdl = Wsdl::create("Svc", "urn:svc")
            .service("UserService")
            .policy_reference("#ServicePolicy", None, None)
            .end();
        let service = &wsdl.services()["UserService"];
        assert_eq!(service.attachments().references()[0].uri(), "#ServicePolicy");
    }
}
