//! JSON service manifests
//!
//! A manifest is a declarative description of a WSDL 1.1 service. It is
//! deserialized with serde and replayed through the public builder API, so
//! a manifest produces exactly the document the equivalent builder calls
//! would.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{Attribute, Element, SchemaHost};
use crate::wsdl::{BindingBuilder, ServiceBuilder, Wsdl};

/// Top-level manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceManifest {
    /// `definitions/@name`
    pub name: String,
    /// Target namespace
    pub target_namespace: String,
    /// Document-level documentation
    #[serde(default)]
    pub documentation: Option<String>,
    /// Restricted simple types
    #[serde(default)]
    pub simple_types: Vec<SimpleTypeDef>,
    /// Complex types with a sequence of elements
    #[serde(default)]
    pub complex_types: Vec<ComplexTypeDef>,
    /// Global elements
    #[serde(default)]
    pub elements: Vec<ElementDef>,
    /// Messages
    #[serde(default)]
    pub messages: Vec<MessageDef>,
    /// Port types
    #[serde(default)]
    pub port_types: Vec<PortTypeDef>,
    /// Bindings
    #[serde(default)]
    pub bindings: Vec<BindingDef>,
    /// Services
    #[serde(default)]
    pub services: Vec<ServiceDef>,
}

/// `xsd:simpleType` restriction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleTypeDef {
    /// Name
    pub name: String,
    /// Base type
    #[serde(default)]
    pub base: Option<String>,
    /// `enumeration` facets
    #[serde(default)]
    pub enumerations: Vec<String>,
    /// `pattern` facet
    #[serde(default)]
    pub pattern: Option<String>,
    /// `minLength` facet
    #[serde(default)]
    pub min_length: Option<u32>,
    /// `maxLength` facet
    #[serde(default)]
    pub max_length: Option<u32>,
    /// Documentation text
    #[serde(default)]
    pub documentation: Option<String>,
}

/// `xsd:complexType`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexTypeDef {
    /// Name
    pub name: String,
    /// Base type for `complexContent` extension
    #[serde(default)]
    pub extends: Option<String>,
    /// Sequence members
    #[serde(default)]
    pub elements: Vec<ElementDef>,
    /// Attributes
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
    /// Documentation text
    #[serde(default)]
    pub documentation: Option<String>,
}

/// Element declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDef {
    /// Name
    pub name: String,
    /// Type reference
    #[serde(rename = "type")]
    pub type_name: String,
    /// `minOccurs`
    #[serde(default)]
    pub min_occurs: Option<u32>,
    /// `-1` (or any negative value) for unbounded
    #[serde(default)]
    pub max_occurs: Option<i32>,
    /// `nillable`
    #[serde(default)]
    pub nillable: bool,
    /// Documentation text
    #[serde(default)]
    pub documentation: Option<String>,
}

impl ElementDef {
    fn to_element(&self) -> Element {
        let mut element = Element::new(self.name.as_str(), self.type_name.as_str())
            .with_nillable(self.nillable);
        if let Some(min) = self.min_occurs {
            element = element.with_min_occurs(min);
        }
        if let Some(max) = self.max_occurs {
            element = element.with_max_occurs(max);
        }
        if let Some(doc) = &self.documentation {
            element = element.with_documentation(doc.as_str());
        }
        element
    }
}

/// Attribute declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDef {
    /// Name
    pub name: String,
    /// Type reference
    #[serde(rename = "type")]
    pub type_name: String,
    /// Emit `use="required"`
    #[serde(default)]
    pub required: bool,
}

/// `wsdl:message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDef {
    /// Name
    pub name: String,
    /// Parts in order
    #[serde(default)]
    pub parts: Vec<PartDef>,
    /// Documentation text
    #[serde(default)]
    pub documentation: Option<String>,
}

/// Message part; exactly one of `type` / `element`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartDef {
    /// Name
    pub name: String,
    /// Type reference
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    /// Element reference
    #[serde(default)]
    pub element: Option<String>,
}

/// `wsdl:portType`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortTypeDef {
    /// Name
    pub name: String,
    /// Operations
    #[serde(default)]
    pub operations: Vec<OperationDef>,
    /// Documentation text
    #[serde(default)]
    pub documentation: Option<String>,
}

/// Port type operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDef {
    /// Name
    pub name: String,
    /// Input message
    #[serde(default)]
    pub input: Option<String>,
    /// Output message
    #[serde(default)]
    pub output: Option<String>,
    /// Faults
    #[serde(default)]
    pub faults: Vec<FaultDef>,
    /// Documentation text
    #[serde(default)]
    pub documentation: Option<String>,
}

/// Named fault and its message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultDef {
    /// Name
    pub name: String,
    /// Fault message
    pub message: String,
}

/// Binding protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolDef {
    /// SOAP 1.1
    #[default]
    Soap,
    /// SOAP 1.2
    Soap12,
    /// HTTP GET/POST
    Http,
}

/// `wsdl:binding`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingDef {
    /// Name
    pub name: String,
    /// Bound port type
    #[serde(rename = "type")]
    pub port_type: String,
    /// Binding protocol
    #[serde(default)]
    pub protocol: ProtocolDef,
    /// HTTP verb, required for `http`
    #[serde(default)]
    pub verb: Option<String>,
    /// SOAP style (`document` / `rpc`)
    #[serde(default)]
    pub style: Option<String>,
    /// `wsaw:UsingAddressing` with its `wsdl:required` value
    #[serde(default)]
    pub using_addressing: Option<bool>,
    /// Operations
    #[serde(default)]
    pub operations: Vec<BindingOperationDef>,
}

/// Binding operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingOperationDef {
    /// Name
    pub name: String,
    /// `soapAction`
    #[serde(default)]
    pub soap_action: Option<String>,
    /// `http:operation/@location`
    #[serde(default)]
    pub location: Option<String>,
    /// WS-Addressing input action
    #[serde(default)]
    pub action: Option<String>,
    /// WS-Addressing output action
    #[serde(default)]
    pub output_action: Option<String>,
    /// Faults
    #[serde(default)]
    pub faults: Vec<BindingFaultDef>,
    /// Suppress the output
    #[serde(default)]
    pub one_way: bool,
}

/// Binding fault with an optional WS-Addressing action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingFaultDef {
    /// Name
    pub name: String,
    /// WS-Addressing fault action
    #[serde(default)]
    pub action: Option<String>,
}

/// `wsdl:service`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDef {
    /// Name
    pub name: String,
    /// Ports
    #[serde(default)]
    pub ports: Vec<PortDef>,
    /// Documentation text
    #[serde(default)]
    pub documentation: Option<String>,
}

/// `wsdl:port`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortDef {
    /// Name
    pub name: String,
    /// Bound binding
    pub binding: String,
    /// Endpoint location
    pub address: String,
    /// Address flavour; defaults to SOAP 1.1
    #[serde(default)]
    pub protocol: ProtocolDef,
}

impl ServiceManifest {
    /// Parse a manifest from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let manifest: ServiceManifest = serde_json::from_str(text)?;
        debug!(
            name = %manifest.name,
            messages = manifest.messages.len(),
            bindings = manifest.bindings.len(),
            "loaded service manifest"
        );
        Ok(manifest)
    }

    /// Replay the manifest through the builder API
    pub fn to_wsdl(&self) -> Result<Wsdl> {
        if self.name.trim().is_empty() {
            return Err(Error::Manifest("manifest name must not be empty".into()));
        }

        let mut wsdl = Wsdl::create(self.name.as_str(), self.target_namespace.as_str());
        if let Some(doc) = &self.documentation {
            wsdl = wsdl.documentation(doc.as_str());
        }

        for entry in &self.simple_types {
            let mut builder = wsdl.simple_type(entry.name.as_str());
            if let Some(base) = &entry.base {
                builder = builder.base(base.as_str());
            }
            builder = builder.enumerations(entry.enumerations.iter());
            if let Some(pattern) = &entry.pattern {
                builder = builder.pattern(pattern.as_str());
            }
            if let Some(min) = entry.min_length {
                builder = builder.min_length(min);
            }
            if let Some(max) = entry.max_length {
                builder = builder.max_length(max);
            }
            if let Some(doc) = &entry.documentation {
                builder = builder.documentation(doc.as_str());
            }
            wsdl = builder.end();
        }

        for entry in &self.complex_types {
            let mut builder = wsdl.complex_type(entry.name.as_str());
            if let Some(base) = &entry.extends {
                builder = builder.extends(base.as_str());
            }
            if let Some(doc) = &entry.documentation {
                builder = builder.documentation(doc.as_str());
            }
            for element in &entry.elements {
                builder = builder.element_decl(element.to_element());
            }
            for attribute in &entry.attributes {
                let decl = if attribute.required {
                    Attribute::required(attribute.name.as_str(), attribute.type_name.as_str())
                } else {
                    Attribute::new(attribute.name.as_str(), attribute.type_name.as_str())
                };
                builder = builder.attribute_decl(decl);
            }
            wsdl = builder.end();
        }

        for entry in &self.elements {
            wsdl.schema_mut().insert_element(entry.to_element());
        }

        for entry in &self.messages {
            let mut builder = wsdl.message(entry.name.as_str());
            for part in &entry.parts {
                builder = match (&part.type_name, &part.element) {
                    (Some(type_name), None) => builder.part(part.name.as_str(), type_name.as_str()),
                    (None, Some(element)) => {
                        builder.element_part(part.name.as_str(), element.as_str())
                    }
                    _ => {
                        return Err(Error::Manifest(format!(
                            "part '{}' of message '{}' needs exactly one of type or element",
                            part.name, entry.name
                        )))
                    }
                };
            }
            if let Some(doc) = &entry.documentation {
                builder = builder.documentation(doc.as_str());
            }
            wsdl = builder.end();
        }

        for entry in &self.port_types {
            let mut builder = wsdl.port_type(entry.name.as_str());
            if let Some(doc) = &entry.documentation {
                builder = builder.documentation(doc.as_str());
            }
            for op in &entry.operations {
                let mut op_builder = builder.operation(op.name.as_str());
                if let Some(input) = &op.input {
                    op_builder = op_builder.input(input.as_str());
                }
                if let Some(output) = &op.output {
                    op_builder = op_builder.output(output.as_str());
                }
                for fault in &op.faults {
                    op_builder = op_builder.fault(fault.name.as_str(), fault.message.as_str());
                }
                if let Some(doc) = &op.documentation {
                    op_builder = op_builder.documentation(doc.as_str());
                }
                builder = op_builder.end();
            }
            wsdl = builder.end();
        }

        for entry in &self.bindings {
            let builder = wsdl.binding(entry.name.as_str(), entry.port_type.as_str());
            wsdl = apply_binding(builder, entry)?.end();
        }

        for entry in &self.services {
            let mut builder = wsdl.service(entry.name.as_str());
            if let Some(doc) = &entry.documentation {
                builder = builder.documentation(doc.as_str());
            }
            for port in &entry.ports {
                builder = add_port(builder, port);
            }
            wsdl = builder.end();
        }

        Ok(wsdl)
    }
}

fn apply_binding(mut builder: BindingBuilder, entry: &BindingDef) -> Result<BindingBuilder> {
    builder = match entry.protocol {
        ProtocolDef::Soap => builder.soap_binding(),
        ProtocolDef::Soap12 => builder.soap12_binding(),
        ProtocolDef::Http => {
            let verb = entry.verb.as_deref().ok_or_else(|| {
                Error::Manifest(format!("HTTP binding '{}' needs a verb", entry.name))
            })?;
            builder.http_binding(verb)
        }
    };
    if let Some(style) = &entry.style {
        builder = builder.style(style.as_str());
    }
    if let Some(required) = entry.using_addressing {
        builder = builder.using_addressing(required);
    }

    for op in &entry.operations {
        let mut op_builder = builder.operation(op.name.as_str());
        if let Some(action) = &op.soap_action {
            op_builder = op_builder.soap_action(action.as_str());
        }
        if let Some(location) = &op.location {
            op_builder = op_builder.http_operation(location.as_str());
        }
        for fault in &op.faults {
            op_builder = op_builder.fault(fault.name.as_str());
        }
        if op.one_way {
            op_builder = op_builder.one_way();
        }
        builder = op_builder.end();

        if let Some(action) = &op.action {
            builder = builder.action(op.name.as_str(), action.as_str(), op.output_action.as_deref());
        }
        for fault in &op.faults {
            if let Some(action) = &fault.action {
                builder = builder.fault_action(&op.name, fault.name.as_str(), action.as_str())?;
            }
        }
    }
    Ok(builder)
}

fn add_port(builder: ServiceBuilder, port: &PortDef) -> ServiceBuilder {
    let (name, binding, address) = (
        port.name.as_str(),
        port.binding.as_str(),
        port.address.as_str(),
    );
    match port.protocol {
        ProtocolDef::Soap => builder.port(name, binding, address),
        ProtocolDef::Soap12 => builder.soap12_port(name, binding, address),
        ProtocolDef::Http => builder.http_port(name, binding, address),
    }
}
