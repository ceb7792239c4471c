//! WSDL 1.1 end-to-end tests
//!
//! Documents are built through the public API, serialized, and parsed back
//! with roxmltree to check structure on the real output text.

use pretty_assertions::assert_eq;
use roxmltree::Document;

use wsdl_builder::namespaces::{HTTP_NS, SOAP12_NS, WSAM_NS, WSDL_NS, WSP_NS, WSU_NS, XSD_NS};
use wsdl_builder::prelude::*;
use wsdl_builder::wsdl::BodyUse;

fn user_service_http() -> Wsdl {
    Wsdl::create("UserService", "http://test.example.com/")
        .message("GetUserRequest")
        .part("userId", "xsd:string")
        .end()
        .message("GetUserResponse")
        .part("user", "xsd:string")
        .end()
        .port_type("UserPortType")
        .operation("GetUser")
        .input("GetUserRequest")
        .output("GetUserResponse")
        .end()
        .end()
        .binding("UserBinding", "UserPortType")
        .http_binding("GET")
        .operation("GetUser")
        .http_operation("/users/(userId)")
        .end()
        .end()
}

fn child_names<'a>(node: roxmltree::Node<'a, 'a>) -> Vec<&'a str> {
    node.children()
        .filter(|n| n.is_element())
        .map(|n| n.tag_name().name())
        .collect()
}

#[test]
fn test_http_binding_scenario() {
    let xml = user_service_http().generate().unwrap();

    assert!(xml.contains(r#"xmlns:http="http://schemas.xmlsoap.org/wsdl/http/""#));
    assert!(xml.contains(r#"<http:binding verb="GET"/>"#));
    assert!(xml.contains(r#"location="/users/(userId)""#));
    assert!(!xml.contains("<soap:binding"));

    let doc = Document::parse(&xml).unwrap();
    let root = doc.root_element();
    assert_eq!(root.tag_name().namespace(), Some(WSDL_NS));
    assert_eq!(root.attribute("name"), Some("UserService"));
    assert_eq!(
        child_names(root),
        vec!["message", "message", "portType", "binding"]
    );

    let binding = root
        .children()
        .find(|n| n.has_tag_name((WSDL_NS, "binding")))
        .unwrap();
    assert_eq!(binding.attribute("type"), Some("tns:UserPortType"));
    let http_op = binding
        .descendants()
        .find(|n| n.has_tag_name((HTTP_NS, "operation")))
        .unwrap();
    assert_eq!(http_op.attribute("location"), Some("/users/(userId)"));
}

#[test]
fn test_fault_action_requires_action() {
    let err = Wsdl::create("Svc", "urn:svc")
        .binding("B", "PT")
        .soap_binding()
        .fault_action("Op", "F", "urn:fault")
        .unwrap_err();
    assert!(matches!(err, Error::InvalidOperation(_)));
    assert_eq!(
        err.message(),
        "No action defined for operation 'Op'. Call action() first."
    );
}

#[test]
fn test_fault_action_after_action() -> Result<()> {
    let builder = Wsdl::create("Svc", "urn:svc")
        .binding("B", "PT")
        .soap_binding()
        .operation("Op")
        .fault("F")
        .end()
        .action("Op", "urn:in", Some("urn:out"))
        .fault_action("Op", "F", "urn:fault")?;

    let actions = builder.actions().get("Op").unwrap();
    assert_eq!(actions.input(), "urn:in");
    assert_eq!(actions.output(), Some("urn:out"));
    assert_eq!(actions.fault("F"), Some("urn:fault"));

    let wsdl = builder.end();
    let xml = wsdl.generate()?;
    let doc = Document::parse(&xml).unwrap();
    let fault = doc
        .descendants()
        .find(|n| n.has_tag_name((WSDL_NS, "fault")) && n.parent().map(|p| p.has_tag_name((WSDL_NS, "operation"))) == Some(true))
        .unwrap();
    assert_eq!(fault.attribute((WSAM_NS, "Action")), Some("urn:fault"));
    Ok(())
}

#[test]
fn test_soap12_service_round_trip_structure() -> Result<()> {
    let xml = Wsdl::create("Orders", "urn:orders")
        .documentation("Order management")
        .element("Order", "tns:OrderType")
        .end()
        .complex_type("OrderType")
        .element("id", "xsd:string")
        .attribute("version", "xsd:int")
        .end()
        .message("PlaceOrder")
        .element_part("parameters", "Order")
        .end()
        .port_type("OrderPort")
        .operation("Place")
        .input("PlaceOrder")
        .end()
        .end()
        .binding("OrderSoap12", "OrderPort")
        .soap12_binding()
        .operation("Place")
        .soap_action("urn:Place")
        .input()
        .header("PlaceOrder", "parameters")
        .body()
        .end()
        .end()
        .end()
        .service("OrderService")
        .soap12_port("OrderPort", "OrderSoap12", "http://localhost/orders")
        .end()
        .generate()?;

    let doc = Document::parse(&xml).unwrap();
    let root = doc.root_element();
    assert_eq!(
        child_names(root),
        vec!["documentation", "types", "message", "portType", "binding", "service"]
    );

    let schema = root
        .descendants()
        .find(|n| n.has_tag_name((XSD_NS, "schema")))
        .unwrap();
    assert_eq!(schema.attribute("targetNamespace"), Some("urn:orders"));
    assert_eq!(child_names(schema), vec!["complexType", "element"]);

    let part = root
        .descendants()
        .find(|n| n.has_tag_name((WSDL_NS, "part")))
        .unwrap();
    assert_eq!(part.attribute("element"), Some("tns:Order"));

    let op = root
        .descendants()
        .find(|n| n.has_tag_name((SOAP12_NS, "operation")))
        .unwrap();
    assert_eq!(op.attribute("soapAction"), Some("urn:Place"));

    // one-way in the port type: no output in the binding
    assert!(!xml.contains("<wsdl:output"));
    let input = root
        .descendants()
        .find(|n| n.has_tag_name((WSDL_NS, "input")) && n.parent().map(|p| p.parent().map(|g| g.has_tag_name((WSDL_NS, "binding")))) == Some(Some(true)))
        .unwrap();
    assert_eq!(child_names(input), vec!["header", "body"]);

    let address = root
        .descendants()
        .find(|n| n.has_tag_name((SOAP12_NS, "address")))
        .unwrap();
    assert_eq!(address.attribute("location"), Some("http://localhost/orders"));
    assert!(!xml.contains("xmlns:soap="));
    Ok(())
}

#[test]
fn test_binding_policy_attachment() -> Result<()> {
    let sp_ns = wsdl_builder::namespaces::SP_NS;
    let xml = Wsdl::create("Secure", "urn:secure")
        .policy("SecurePolicy", None)
        .assertion(Assertion::new("sp", sp_ns, "TransportBinding").with_empty_nested_policy())
        .end()
        .binding("B", "PT")
        .policy_reference("#SecurePolicy", None, None)
        .soap_binding()
        .operation("Op")
        .fault_with_use("Failure", BodyUse::Encoded)
        .end()
        .end()
        .generate()?;

    let doc = Document::parse(&xml).unwrap();
    let root = doc.root_element();
    let policy = root
        .children()
        .find(|n| n.has_tag_name((WSP_NS, "Policy")))
        .unwrap();
    assert_eq!(policy.attribute((WSU_NS, "Id")), Some("SecurePolicy"));

    let binding = root
        .children()
        .find(|n| n.has_tag_name((WSDL_NS, "binding")))
        .unwrap();
    assert_eq!(child_names(binding), vec!["PolicyReference", "binding", "operation"]);

    let soap_fault = binding
        .descendants()
        .find(|n| n.tag_name().name() == "fault" && n.tag_name().namespace() != Some(WSDL_NS))
        .unwrap();
    assert_eq!(soap_fault.attribute("use"), Some("encoded"));
    Ok(())
}

#[test]
fn test_generation_is_deterministic() {
    let first = user_service_http().generate().unwrap();
    let second = user_service_http().generate().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_compact_output() -> Result<()> {
    let xml = user_service_http().generate_with(&GeneratorOptions::compact())?;
    assert!(!xml.contains('\n'));
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    Ok(())
}
