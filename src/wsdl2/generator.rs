//! WSDL 2.0 generation
//!
//! The root is `wsdl:description` with `wsdl` bound to the 2.0 namespace and
//! the embedded schema written with the `xs` prefix.

use tracing::{debug, trace};

use crate::addressing::OperationActions;
use crate::error::Result;
use crate::names::QualifiedName;
use crate::namespaces::{
    NamespaceDeclarations, WHTTP_NS, WSAM_NS, WSAW_NS, WSDL2_NS, WSDLX_NS, WSOAP_NS, XSD_NS,
};
use crate::options::GeneratorOptions;
use crate::policy::{write_attachments, PolicyAttachable};
use crate::schema::{Documentation, SchemaHost, SchemaWriter};
use crate::wsdl::generator::documentation_element;
use crate::xml::{write_document, XmlElement};

use super::bindings::{Binding, BindingKind};
use super::interfaces::{Interface, InterfaceOperation};
use super::services::Service;
use super::Wsdl2;

/// `type` IRI of a SOAP binding
pub const SOAP_BINDING_TYPE: &str = "http://www.w3.org/ns/wsdl/soap";
/// `type` IRI of an HTTP binding
pub const HTTP_BINDING_TYPE: &str = "http://www.w3.org/ns/wsdl/http";

/// Generates WSDL 2.0 documents
#[derive(Debug, Clone, Default)]
pub struct Wsdl2Generator {
    options: GeneratorOptions,
}

impl Wsdl2Generator {
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

    /// Build the `wsdl:description` tree
    pub fn build_tree(&self, wsdl: &Wsdl2) -> XmlElement {
        debug!(
            name = wsdl.name(),
            interfaces = wsdl.interfaces().len(),
            bindings = wsdl.bindings().len(),
            services = wsdl.services().len(),
            "generating WSDL 2.0"
        );

        let mut ns = NamespaceDeclarations::new();
        ns.declare("wsdl", WSDL2_NS);
        ns.declare("xs", XSD_NS);
        ns.declare("tns", wsdl.target_namespace());

        let mut root =
            XmlElement::new("wsdl:description").attr("targetNamespace", wsdl.target_namespace());

        if let Some(documentation) = wsdl.doc() {
            root.push(documentation_element(documentation));
        }
        for import in wsdl.imports() {
            root.push(
                XmlElement::new("wsdl:import")
                    .attr("namespace", import.namespace.as_str())
                    .opt_attr("location", import.location.as_deref()),
            );
        }
        for include in wsdl.includes() {
            root.push(XmlElement::new("wsdl:include").attr("location", include.as_str()));
        }
        root.extend(write_attachments(wsdl.attachments(), &mut ns));

        if !wsdl.schema().is_empty() {
            let schema = SchemaWriter::xs().write_schema(
                wsdl.schema(),
                wsdl.target_namespace(),
                &self.options,
            );
            root.push(XmlElement::new("wsdl:types").child(schema));
        }

        for interface in wsdl.interfaces().values() {
            trace!(name = interface.name(), "writing interface");
            root.push(interface_element(interface, &mut ns));
        }
        for binding in wsdl.bindings().values() {
            trace!(name = binding.name(), "writing binding");
            root.push(binding_element(binding, &mut ns));
        }
        for service in wsdl.services().values() {
            trace!(name = service.name(), "writing service");
            root.push(service_element(service, &mut ns));
        }

        ns.apply_to(&mut root);
        debug!(namespaces = ns.len(), "WSDL 2.0 tree built");
        root
    }

    /// Generate the document text
    pub fn generate(&self, wsdl: &Wsdl2) -> Result<String> {
        let root = self.build_tree(wsdl);
        write_document(&root, &self.options)
    }
}

fn with_documentation(mut node: XmlElement, documentation: Option<&Documentation>) -> XmlElement {
    if let Some(documentation) = documentation {
        node.push(documentation_element(documentation));
    }
    node
}

fn joined(names: &[QualifiedName]) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    Some(
        names
            .iter()
            .map(|n| n.qualified())
            .collect::<Vec<_>>()
            .join(" "),
    )
}

fn interface_element(interface: &Interface, ns: &mut NamespaceDeclarations) -> XmlElement {
    let mut node = with_documentation(
        XmlElement::new("wsdl:interface")
            .attr("name", interface.name())
            .opt_attr("extends", joined(interface.extends()))
            .opt_attr("styleDefault", interface.style_default()),
        interface.documentation(),
    );
    for fault in interface.faults() {
        node.push(
            XmlElement::new("wsdl:fault")
                .attr("name", fault.name())
                .attr("element", fault.element().qualified()),
        );
    }
    for operation in interface.operations().values() {
        node.push(interface_operation(operation, ns));
    }
    node
}

fn interface_operation(operation: &InterfaceOperation, ns: &mut NamespaceDeclarations) -> XmlElement {
    let mut node = XmlElement::new("wsdl:operation")
        .attr("name", operation.name())
        .attr("pattern", operation.pattern())
        .opt_attr("style", operation.style());
    if let Some(safe) = operation.safe() {
        ns.declare("wsdlx", WSDLX_NS);
        node.set_attribute("wsdlx:safe", safe.to_string());
    }
    let mut node = with_documentation(node, operation.documentation());

    if let Some(input) = operation.input() {
        node.push(
            XmlElement::new("wsdl:input")
                .attr("element", input.element().qualified())
                .opt_attr("messageLabel", input.message_label()),
        );
    }
    if let Some(output) = operation.output() {
        node.push(
            XmlElement::new("wsdl:output")
                .attr("element", output.element().qualified())
                .opt_attr("messageLabel", output.message_label()),
        );
    }
    for infault in operation.infaults() {
        node.push(
            XmlElement::new("wsdl:infault")
                .attr("ref", infault.fault().qualified())
                .opt_attr("messageLabel", infault.message_label()),
        );
    }
    for outfault in operation.outfaults() {
        node.push(
            XmlElement::new("wsdl:outfault")
                .attr("ref", outfault.fault().qualified())
                .opt_attr("messageLabel", outfault.message_label()),
        );
    }
    node
}

fn binding_element(binding: &Binding, ns: &mut NamespaceDeclarations) -> XmlElement {
    let mut node = XmlElement::new("wsdl:binding")
        .attr("name", binding.name())
        .attr("interface", binding.interface().qualified());

    match binding.kind() {
        Some(BindingKind::Soap { version, protocol }) => {
            ns.declare("wsoap", WSOAP_NS);
            node.set_attribute("type", SOAP_BINDING_TYPE);
            if let Some(version) = version {
                node.set_attribute("wsoap:version", version.as_str());
            }
            if let Some(protocol) = protocol {
                node.set_attribute("wsoap:protocol", protocol.as_str());
            }
        }
        Some(BindingKind::Http { method_default }) => {
            node.set_attribute("type", HTTP_BINDING_TYPE);
            if let Some(method) = method_default {
                ns.declare("whttp", WHTTP_NS);
                node.set_attribute("whttp:methodDefault", method.as_str());
            }
        }
        None => {}
    }

    let mut node = with_documentation(node, binding.documentation());
    node.extend(write_attachments(binding.attachments(), ns));

    if let Some(required) = binding.actions().using_addressing() {
        ns.declare("wsaw", WSAW_NS);
        node.push(
            XmlElement::new("wsaw:UsingAddressing").attr("wsdl:required", required.to_string()),
        );
    }

    for fault in binding.faults() {
        let mut fault_node =
            XmlElement::new("wsdl:fault").attr("ref", fault.reference().qualified());
        if let Some(code) = fault.code() {
            ns.declare("wsoap", WSOAP_NS);
            fault_node.set_attribute("wsoap:code", code);
        }
        node.push(fault_node);
    }

    for operation in binding.operations().values() {
        let actions = binding.operation_actions(operation);
        let mut op = XmlElement::new("wsdl:operation").attr("ref", operation.reference().qualified());
        let soap_action = match binding.kind() {
            Some(BindingKind::Soap { .. }) => operation
                .soap_action()
                .or_else(|| actions.map(|a| a.input())),
            _ => operation.soap_action(),
        };
        if let Some(action) = soap_action {
            ns.declare("wsoap", WSOAP_NS);
            op.set_attribute("wsoap:action", action);
        }
        if let Some(method) = operation.http_method() {
            ns.declare("whttp", WHTTP_NS);
            op.set_attribute("whttp:method", method);
        }
        if let Some(location) = operation.http_location() {
            ns.declare("whttp", WHTTP_NS);
            op.set_attribute("whttp:location", location);
        }
        let mut op = with_documentation(op, operation.documentation());
        op.extend(write_attachments(operation.attachments(), ns));
        if let Some(actions) = actions {
            op.extend(action_elements(actions, ns));
        }
        node.push(op);
    }
    node
}

/// `wsdl:input`/`wsdl:output`/`wsdl:outfault` carrying `wsam:Action`
fn action_elements(actions: &OperationActions, ns: &mut NamespaceDeclarations) -> Vec<XmlElement> {
    ns.declare("wsam", WSAM_NS);
    let mut nodes = vec![XmlElement::new("wsdl:input").attr("wsam:Action", actions.input())];
    if let Some(output) = actions.output() {
        nodes.push(XmlElement::new("wsdl:output").attr("wsam:Action", output));
    }
    for (fault, action) in actions.faults() {
        nodes.push(
            XmlElement::new("wsdl:outfault")
                .attr("ref", QualifiedName::new(fault.as_str()).qualified())
                .attr("wsam:Action", action.as_str()),
        );
    }
    nodes
}

fn service_element(service: &Service, ns: &mut NamespaceDeclarations) -> XmlElement {
    let mut node = with_documentation(
        XmlElement::new("wsdl:service")
            .attr("name", service.name())
            .attr("interface", service.interface().qualified()),
        service.documentation(),
    );
    node.extend(write_attachments(service.attachments(), ns));
    for endpoint in service.endpoints() {
        node.push(with_documentation(
            XmlElement::new("wsdl:endpoint")
                .attr("name", endpoint.name())
                .attr("binding", endpoint.binding().qualified())
                .opt_attr("address", endpoint.address()),
            endpoint.documentation(),
        ));
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wsdl2::{MEP_IN_ONLY, STYLE_IRI};

    fn names(node: &XmlElement) -> Vec<&str> {
        node.elements().map(|e| e.name()).collect()
    }

    #[test]
    fn test_root_and_fixed_namespaces() {
        let root = Wsdl2::create("Svc", "urn:svc").to_xml();
        assert_eq!(root.name(), "wsdl:description");
        let attrs: Vec<&str> = root.attributes().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            attrs,
            vec!["xmlns:wsdl", "xmlns:xs", "xmlns:tns", "targetNamespace"]
        );
        assert_eq!(root.attribute("xmlns:wsdl"), Some(WSDL2_NS));
    }

    #[test]
    fn test_section_order_and_xs_schema() {
        let root = Wsdl2::create("Svc", "urn:svc")
            .service("S", "I")
            .end()
            .binding("B", "I")
            .end()
            .interface("I")
            .end()
            .element("User", "xs:string")
            .end()
            .policy("P", None)
            .end()
            .include("inc.wsdl")
            .import("urn:other", None)
            .documentation("docs")
            .to_xml();
        assert_eq!(
            names(&root),
            vec![
                "wsdl:documentation",
                "wsdl:import",
                "wsdl:include",
                "wsp:Policy",
                "wsdl:types",
                "wsdl:interface",
                "wsdl:binding",
                "wsdl:service"
            ]
        );
        let schema = root
            .find("wsdl:types")
            .and_then(|t| t.find("xs:schema"))
            .expect("xs:schema");
        assert_eq!(schema.attribute("targetNamespace"), Some("urn:svc"));
    }

    #[test]
    fn test_interface_operation_attributes() {
        let root = Wsdl2::create("Svc", "urn:svc")
            .interface("Users")
            .style_default(STYLE_IRI)
            .fault("NotFound", "NotFoundFault")
            .operation("getUser")
            .safe(true)
            .input("GetUser")
            .output("GetUserResponse")
            .outfault("NotFound")
            .end()
            .operation("notify")
            .pattern(MEP_IN_ONLY)
            .input("#none")
            .end()
            .end()
            .to_xml();
        assert_eq!(root.attribute("xmlns:wsdlx"), Some(WSDLX_NS));

        let interface = root.find("wsdl:interface").expect("interface");
        assert_eq!(interface.attribute("styleDefault"), Some(STYLE_IRI));
        let fault = interface.find("wsdl:fault").expect("fault");
        assert_eq!(fault.attribute("element"), Some("tns:NotFoundFault"));

        let ops: Vec<&XmlElement> = interface.find_all("wsdl:operation").collect();
        assert_eq!(ops[0].attribute("wsdlx:safe"), Some("true"));
        assert_eq!(
            ops[0].find("wsdl:outfault").and_then(|f| f.attribute("ref")),
            Some("tns:NotFound")
        );
        assert_eq!(
            ops[1].find("wsdl:input").and_then(|i| i.attribute("element")),
            Some("#none")
        );
        assert!(ops[1].find("wsdl:output").is_none());
    }

    #[test]
    fn test_soap_binding_attributes() {
        let root = Wsdl2::create("Svc", "urn:svc")
            .binding("UserSoap", "Users")
            .soap_binding()
            .fault("NotFound", Some("soap:Sender"))
            .operation("getUser")
            .soap_action("urn:getUser")
            .end()
            .end()
            .to_xml();
        let binding = root.find("wsdl:binding").expect("binding");
        assert_eq!(binding.attribute("interface"), Some("tns:Users"));
        assert_eq!(binding.attribute("type"), Some(SOAP_BINDING_TYPE));
        assert_eq!(binding.attribute("wsoap:version"), Some("1.2"));
        assert_eq!(root.attribute("xmlns:wsoap"), Some(WSOAP_NS));
        assert_eq!(
            binding.find("wsdl:fault").and_then(|f| f.attribute("wsoap:code")),
            Some("soap:Sender")
        );
        let op = binding.find("wsdl:operation").expect("operation");
        assert_eq!(op.attribute("ref"), Some("tns:getUser"));
        assert_eq!(op.attribute("wsoap:action"), Some("urn:getUser"));
        assert!(root.attribute("xmlns:whttp").is_none());
    }

    #[test]
    fn test_http_binding_and_endpoint() {
        let root = Wsdl2::create("Svc", "urn:svc")
            .binding("UserHttp", "Users")
            .http_binding(Some("GET"))
            .operation("getUser")
            .http_location("users/{id}")
            .end()
            .end()
            .service("UserService", "Users")
            .endpoint("http", "UserHttp", Some("http://example.com/"))
            .end()
            .to_xml();
        let binding = root.find("wsdl:binding").expect("binding");
        assert_eq!(binding.attribute("type"), Some(HTTP_BINDING_TYPE));
        assert_eq!(binding.attribute("whttp:methodDefault"), Some("GET"));
        assert_eq!(
            binding
                .find("wsdl:operation")
                .and_then(|o| o.attribute("whttp:location")),
            Some("users/{id}")
        );
        assert!(root.attribute("xmlns:wsoap").is_none());

        let service = root.find("wsdl:service").expect("service");
        assert_eq!(service.attribute("interface"), Some("tns:Users"));
        let endpoint = service.find("wsdl:endpoint").expect("endpoint");
        assert_eq!(endpoint.attribute("binding"), Some("tns:UserHttp"));
        assert_eq!(endpoint.attribute("address"), Some("http://example.com/"));
    }
}
