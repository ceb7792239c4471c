//! WSDL 1.1 generation
//!
//! One read-only pass over a [`Wsdl`] builds an [`XmlElement`] tree; the
//! tree is then serialized with the configured [`GeneratorOptions`].
//! Extension namespaces are declared on the root only when some emitted
//! node uses them.

use tracing::{debug, trace};

use crate::error::Result;
use crate::namespaces::{NamespaceDeclarations, HTTP_NS, MIME_NS, WSAM_NS, WSAW_NS, WSDL_NS, XSD_NS};
use crate::options::GeneratorOptions;
use crate::policy::{write_attachments, PolicyAttachable, PolicyAttachments};
use crate::schema::{Documentation, SchemaHost, SchemaWriter};
use crate::xml::{write_document, XmlElement};

use super::bindings::{
    Binding, BindingMessage, BindingOperation, BindingProtocol, BodyUse, MessageExtension,
    SoapVersion,
};
use super::messages::{Message, PartKind};
use super::port_types::{Operation, PortType};
use super::services::Service;
use super::Wsdl;

/// Generates WSDL 1.1 documents
#[derive(Debug, Clone, Default)]
pub struct WsdlGenerator {
    options: GeneratorOptions,
}

/// Per-run state: the namespace collector
struct Context<'a> {
    wsdl: &'a Wsdl,
    ns: NamespaceDeclarations,
}

impl WsdlGenerator {
    /// Generator with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator with custom options
    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// Options in use
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Build the `wsdl:definitions` tree
    pub fn build_tree(&self, wsdl: &Wsdl) -> XmlElement {
        debug!(
            name = wsdl.name(),
            messages = wsdl.messages().len(),
            port_types = wsdl.port_types().len(),
            bindings = wsdl.bindings().len(),
            services = wsdl.services().len(),
            "generating WSDL 1.1"
        );

        let mut ctx = Context {
            wsdl,
            ns: NamespaceDeclarations::new(),
        };
        ctx.ns.declare("wsdl", WSDL_NS);
        ctx.ns.declare("xsd", XSD_NS);
        ctx.ns.declare("tns", wsdl.target_namespace());

        let mut root = XmlElement::new("wsdl:definitions")
            .attr("name", wsdl.name())
            .attr("targetNamespace", wsdl.target_namespace());

        if let Some(documentation) = wsdl.doc() {
            root.push(documentation_element(documentation));
        }
        for import in wsdl.imports() {
            root.push(
                XmlElement::new("wsdl:import")
                    .attr("namespace", import.namespace.as_str())
                    .attr("location", import.location.as_str()),
            );
        }
        root.extend(write_attachments(wsdl.attachments(), &mut ctx.ns));

        if !wsdl.schema().is_empty() {
            let schema = SchemaWriter::xsd().write_schema(
                wsdl.schema(),
                wsdl.target_namespace(),
                &self.options,
            );
            root.push(XmlElement::new("wsdl:types").child(schema));
        }

        for message in wsdl.messages().values() {
            trace!(name = message.name(), "writing message");
            root.push(message_element(message));
        }
        for port_type in wsdl.port_types().values() {
            trace!(name = port_type.name(), "writing portType");
            root.push(port_type_element(port_type));
        }
        for binding in wsdl.bindings().values() {
            trace!(name = binding.name(), "writing binding");
            let node = ctx.binding_element(binding);
            root.push(node);
        }
        for service in wsdl.services().values() {
            trace!(name = service.name(), "writing service");
            let node = ctx.service_element(service);
            root.push(node);
        }

        ctx.ns.apply_to(&mut root);
        debug!(namespaces = ctx.ns.len(), "WSDL 1.1 tree built");
        root
    }

    /// Generate the document text
    pub fn generate(&self, wsdl: &Wsdl) -> Result<String> {
        let root = self.build_tree(wsdl);
        write_document(&root, &self.options)
    }
}

pub(crate) fn documentation_element(documentation: &Documentation) -> XmlElement {
    XmlElement::new("wsdl:documentation")
        .opt_attr("xml:lang", documentation.lang())
        .opt_attr("source", documentation.source())
        .text(documentation.text())
}

fn with_documentation(mut node: XmlElement, documentation: Option<&Documentation>) -> XmlElement {
    if let Some(documentation) = documentation {
        node.push(documentation_element(documentation));
    }
    node
}

fn message_element(message: &Message) -> XmlElement {
    let mut node = with_documentation(
        XmlElement::new("wsdl:message").attr("name", message.name()),
        message.documentation(),
    );
    for part in message.parts() {
        let (attr, reference) = match part.kind() {
            PartKind::Type(type_name) => ("type", type_name),
            PartKind::Element(element) => ("element", element),
        };
        node.push(
            XmlElement::new("wsdl:part")
                .attr("name", part.name())
                .attr(attr, reference.qualified()),
        );
    }
    node
}

fn port_type_element(port_type: &PortType) -> XmlElement {
    let mut node = with_documentation(
        XmlElement::new("wsdl:portType").attr("name", port_type.name()),
        port_type.documentation(),
    );
    for operation in port_type.operations().values() {
        let mut op = with_documentation(
            XmlElement::new("wsdl:operation")
                .attr("name", operation.name())
                .opt_attr("parameterOrder", operation.parameter_order().map(|p| p.join(" "))),
            operation.documentation(),
        );
        if let Some(input) = operation.input() {
            op.push(XmlElement::new("wsdl:input").attr("message", input.qualified()));
        }
        if let Some(output) = operation.output() {
            op.push(XmlElement::new("wsdl:output").attr("message", output.qualified()));
        }
        for fault in operation.faults() {
            op.push(
                XmlElement::new("wsdl:fault")
                    .attr("name", fault.name())
                    .attr("message", fault.message().qualified()),
            );
        }
        node.push(op);
    }
    node
}

impl<'a> Context<'a> {
    fn attachments(&mut self, node: &mut XmlElement, attachments: &PolicyAttachments) {
        node.extend(write_attachments(attachments, &mut self.ns));
    }

    fn soap(&mut self, version: SoapVersion) -> &'static str {
        self.ns.declare(version.prefix(), version.namespace());
        version.prefix()
    }

    fn binding_element(&mut self, binding: &Binding) -> XmlElement {
        let mut node = with_documentation(
            XmlElement::new("wsdl:binding")
                .attr("name", binding.name())
                .attr("type", binding.port_type().qualified()),
            binding.documentation(),
        );
        self.attachments(&mut node, binding.attachments());

        if let Some(required) = binding.actions().using_addressing() {
            self.ns.declare("wsaw", WSAW_NS);
            node.push(
                XmlElement::new("wsaw:UsingAddressing")
                    .attr("wsdl:required", required.to_string()),
            );
        }

        match binding.protocol() {
            Some(BindingProtocol::Soap(soap)) => {
                let prefix = self.soap(soap.version);
                node.push(
                    XmlElement::new(format!("{}:binding", prefix))
                        .attr("style", soap.style.as_str())
                        .attr("transport", soap.transport.as_str()),
                );
            }
            Some(BindingProtocol::Http { verb }) => {
                self.ns.declare("http", HTTP_NS);
                node.push(XmlElement::new("http:binding").attr("verb", verb.as_str()));
            }
            None => {}
        }

        for operation in binding.operations().values() {
            let op = self.binding_operation(binding, operation);
            node.push(op);
        }
        node
    }

    /// The port type operation a binding operation refers to, if declared
    fn port_type_operation(&self, binding: &Binding, operation: &str) -> Option<&'a Operation> {
        self.wsdl
            .port_types()
            .get(binding.port_type().local_name())
            .and_then(|pt| pt.operations().get(operation))
    }

    fn binding_operation(&mut self, binding: &Binding, operation: &BindingOperation) -> XmlElement {
        let soap_version = binding.soap_version();
        let actions = binding.actions().get(operation.name());

        let mut node = with_documentation(
            XmlElement::new("wsdl:operation").attr("name", operation.name()),
            operation.documentation(),
        );
        self.attachments(&mut node, operation.attachments());

        match soap_version {
            Some(version) => {
                let prefix = self.soap(version);
                let soap_action = operation
                    .soap_action()
                    .or_else(|| actions.map(|a| a.input()));
                node.push(
                    XmlElement::new(format!("{}:operation", prefix))
                        .opt_attr("soapAction", soap_action)
                        .opt_attr("style", operation.style()),
                );
            }
            None => {
                if let Some(location) = operation.http_location() {
                    self.ns.declare("http", HTTP_NS);
                    node.push(XmlElement::new("http:operation").attr("location", location));
                }
            }
        }

        // Undeclared operations get both messages
        let declared = self.port_type_operation(binding, operation.name());
        let has_input = declared.map_or(true, |op| op.input().is_some());
        let has_output =
            !operation.is_one_way() && declared.map_or(true, |op| op.output().is_some());

        if has_input {
            let mut input = self.binding_message("wsdl:input", operation.input(), soap_version);
            if let Some(action) = actions.map(|a| a.input()) {
                self.ns.declare("wsam", WSAM_NS);
                input.set_attribute("wsam:Action", action);
            }
            node.push(input);
        }

        if has_output {
            let mut output = self.binding_message("wsdl:output", operation.output(), soap_version);
            if let Some(action) = actions.and_then(|a| a.output()) {
                self.ns.declare("wsam", WSAM_NS);
                output.set_attribute("wsam:Action", action);
            }
            node.push(output);
        }

        for fault in operation.faults() {
            let mut fault_node = XmlElement::new("wsdl:fault").attr("name", fault.name());
            if let Some(action) = actions.and_then(|a| a.fault(fault.name())) {
                self.ns.declare("wsam", WSAM_NS);
                fault_node.set_attribute("wsam:Action", action);
            }
            if let Some(version) = soap_version {
                let prefix = self.soap(version);
                fault_node.push(
                    XmlElement::new(format!("{}:fault", prefix))
                        .attr("name", fault.name())
                        .attr("use", fault.use_().as_str()),
                );
            }
            node.push(fault_node);
        }
        node
    }

    fn binding_message(
        &mut self,
        name: &str,
        message: Option<&BindingMessage>,
        soap_version: Option<SoapVersion>,
    ) -> XmlElement {
        let mut node = XmlElement::new(name);
        match message {
            Some(message) => {
                for extension in message.extensions() {
                    let child = self.extension(extension, soap_version);
                    node.push(child);
                }
            }
            None => {
                if let Some(version) = soap_version {
                    let prefix = self.soap(version);
                    node.push(
                        XmlElement::new(format!("{}:body", prefix))
                            .attr("use", BodyUse::Literal.as_str()),
                    );
                }
            }
        }
        node
    }

    fn extension(
        &mut self,
        extension: &MessageExtension,
        soap_version: Option<SoapVersion>,
    ) -> XmlElement {
        let version = soap_version.unwrap_or(SoapVersion::Soap11);
        match extension {
            MessageExtension::SoapBody {
                use_,
                namespace,
                encoding_style,
                parts,
            } => {
                let prefix = self.soap(version);
                XmlElement::new(format!("{}:body", prefix))
                    .opt_attr("parts", parts.as_deref())
                    .attr("use", use_.as_str())
                    .opt_attr("namespace", namespace.as_deref())
                    .opt_attr("encodingStyle", encoding_style.as_deref())
            }
            MessageExtension::SoapHeader { message, part, use_ } => {
                let prefix = self.soap(version);
                XmlElement::new(format!("{}:header", prefix))
                    .attr("message", message.qualified())
                    .attr("part", part.as_str())
                    .attr("use", use_.as_str())
            }
            MessageExtension::UrlEncoded => {
                self.ns.declare("http", HTTP_NS);
                XmlElement::new("http:urlEncoded")
            }
            MessageExtension::UrlReplacement => {
                self.ns.declare("http", HTTP_NS);
                XmlElement::new("http:urlReplacement")
            }
            MessageExtension::MimeContent { part, content_type } => {
                self.ns.declare("mime", MIME_NS);
                XmlElement::new("mime:content")
                    .opt_attr("part", part.as_deref())
                    .attr("type", content_type.as_str())
            }
            MessageExtension::MimeXml { part } => {
                self.ns.declare("mime", MIME_NS);
                XmlElement::new("mime:mimeXml").opt_attr("part", part.as_deref())
            }
            MessageExtension::MultipartRelated(parts) => {
                self.ns.declare("mime", MIME_NS);
                let mut node = XmlElement::new("mime:multipartRelated");
                for part in parts {
                    let mut part_node = XmlElement::new("mime:part");
                    for inner in part.extensions() {
                        let child = self.extension(inner, soap_version);
                        part_node.push(child);
                    }
                    node.push(part_node);
                }
                node
            }
        }
    }

    fn service_element(&mut self, service: &Service) -> XmlElement {
        let mut node = with_documentation(
            XmlElement::new("wsdl:service").attr("name", service.name()),
            service.documentation(),
        );
        self.attachments(&mut node, service.attachments());

        for port in service.ports() {
            let address = port.address();
            self.ns.declare_known(address.kind.prefix());
            let port_node = with_documentation(
                XmlElement::new("wsdl:port")
                    .attr("name", port.name())
                    .attr("binding", port.binding().qualified()),
                port.documentation(),
            )
            .child(
                XmlElement::new(format!("{}:address", address.kind.prefix()))
                    .attr("location", address.location.as_str()),
            );
            node.push(port_node);
        }
        node
    }
}
