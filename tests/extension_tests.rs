//! WS-* vocabularies attached to generated documents

use pretty_assertions::assert_eq;
use roxmltree::{Document, Node};

use wsdl_builder::extensions::{
    event_source, topic_set, AlgorithmSuite, AtomicTransaction, IncludeToken, MessageParts,
    Metadata, MetadataContent, MetadataSection, MtomPolicy, SecurityPolicy, SymmetricBinding,
    Token, TransportBinding, Trust13, Wss11,
};
use wsdl_builder::extensions::metadata::DIALECT_WSDL;
use wsdl_builder::namespaces::{
    MEX_NS, SP_NS, WSAT_NS, WSDL_NS, WSE_NS, WSOMA_NS, WSP_NS, WSTOP_NS, WSU_NS,
};
use wsdl_builder::prelude::*;

fn element_children<'a, 'input>(node: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    node.children().filter(|n| n.is_element()).collect()
}

fn local_names<'a, 'input>(node: Node<'a, 'input>) -> Vec<&'a str> {
    element_children(node)
        .into_iter()
        .map(|n| n.tag_name().name())
        .collect()
}

fn secured_service() -> Result<String> {
    let security = SecurityPolicy::new()
        .transport_binding(
            TransportBinding::new(Token::https())
                .algorithm_suite(AlgorithmSuite::Basic256Sha256)
                .include_timestamp(true),
        )
        .signed_supporting_tokens([Token::username()])
        .wss11(Wss11 {
            must_support_ref_thumbprint: true,
            ..Wss11::default()
        })
        .build();

    Wsdl::create("Bank", "urn:bank")
        .policy("TransportPolicy", None)
        .assertions(security)
        .end()
        .policy("TxPolicy", None)
        .exactly_one()
        .assertion(AtomicTransaction::optional().to_assertion())
        .all()
        .end()
        .end()
        .end()
        .binding("BankSoap", "BankPort")
        .policy_reference("#TransportPolicy", None, None)
        .soap_binding()
        .operation("Transfer")
        .policy_reference("#TxPolicy", None, None)
        .end()
        .end()
        .generate()
}

#[test]
fn test_security_policy_in_document() -> Result<()> {
    let xml = secured_service()?;
    let doc = Document::parse(&xml).unwrap();
    let root = doc.root_element();

    let policies: Vec<_> = root
        .children()
        .filter(|n| n.has_tag_name((WSP_NS, "Policy")))
        .collect();
    assert_eq!(policies.len(), 2);
    assert_eq!(policies[0].attribute((WSU_NS, "Id")), Some("TransportPolicy"));
    assert_eq!(
        local_names(policies[0]),
        vec!["TransportBinding", "SignedSupportingTokens", "Wss11"]
    );

    let transport = element_children(policies[0])[0];
    assert!(transport.has_tag_name((SP_NS, "TransportBinding")));
    let nested = element_children(transport)[0];
    assert!(nested.has_tag_name((WSP_NS, "Policy")));
    assert_eq!(
        local_names(nested),
        vec!["TransportToken", "AlgorithmSuite", "Layout", "IncludeTimestamp"]
    );
    assert!(transport
        .descendants()
        .any(|n| n.has_tag_name((SP_NS, "HttpsToken"))));
    assert!(transport
        .descendants()
        .any(|n| n.has_tag_name((SP_NS, "Basic256Sha256"))));
    Ok(())
}

#[test]
fn test_policy_operators_and_references() -> Result<()> {
    let xml = secured_service()?;
    let doc = Document::parse(&xml).unwrap();
    let root = doc.root_element();

    let tx = root
        .children()
        .find(|n| n.attribute((WSU_NS, "Id")) == Some("TxPolicy"))
        .unwrap();
    let exactly_one = element_children(tx)[0];
    assert!(exactly_one.has_tag_name((WSP_NS, "ExactlyOne")));
    assert_eq!(local_names(exactly_one), vec!["ATAssertion", "All"]);

    let at = element_children(exactly_one)[0];
    assert!(at.has_tag_name((WSAT_NS, "ATAssertion")));
    assert_eq!(at.attribute((WSP_NS, "Optional")), Some("true"));

    let operation = root
        .descendants()
        .find(|n| {
            n.has_tag_name((WSDL_NS, "operation")) && n.attribute("name") == Some("Transfer")
        })
        .unwrap();
    let reference = element_children(operation)[0];
    assert!(reference.has_tag_name((WSP_NS, "PolicyReference")));
    assert_eq!(reference.attribute("URI"), Some("#TxPolicy"));
    Ok(())
}

#[test]
fn test_symmetric_binding_with_trust_and_parts() -> Result<()> {
    let assertions = SecurityPolicy::new()
        .symmetric_binding(
            SymmetricBinding::new(Token::x509(IncludeToken::Never)).encrypt_signature(true),
        )
        .trust(Trust13::with_entropy())
        .signed_parts(MessageParts::body().header(Some("To"), "http://www.w3.org/2005/08/addressing"))
        .encrypted_parts(MessageParts::body())
        .build();

    let names: Vec<&str> = assertions.iter().map(|a| a.local_name()).collect();
    assert_eq!(names, vec!["SymmetricBinding", "Trust13", "SignedParts", "EncryptedParts"]);

    let xml = Wsdl2::create("Sym", "urn:sym")
        .policy("SymPolicy", None)
        .assertions(assertions)
        .end()
        .generate()?;
    let doc = Document::parse(&xml).unwrap();
    let signed = doc
        .descendants()
        .find(|n| n.has_tag_name((SP_NS, "SignedParts")))
        .unwrap();
    assert_eq!(local_names(signed), vec!["Body", "Header"]);
    let header = element_children(signed)[1];
    assert_eq!(header.attribute("Name"), Some("To"));
    assert_eq!(
        header.attribute("Namespace"),
        Some("http://www.w3.org/2005/08/addressing")
    );
    Ok(())
}

#[test]
fn test_mtom_and_eventing_assertions() -> Result<()> {
    let mut assertions: Vec<Assertion> = MtomPolicy::Required.to_assertion().into_iter().collect();
    assertions.push(event_source());
    assertions.push(topic_set("urn:events", ["StockTick", "Alert"]));

    let xml = Wsdl::create("Events", "urn:events")
        .policy("EventPolicy", None)
        .assertions(assertions)
        .end()
        .generate()?;

    assert!(xml.contains(&format!(r#"xmlns:wsoma="{}""#, WSOMA_NS)));
    let doc = Document::parse(&xml).unwrap();

    let mtom = doc
        .descendants()
        .find(|n| n.has_tag_name((WSOMA_NS, "OptimizedMimeSerialization")))
        .unwrap();
    assert_eq!(mtom.attribute((WSP_NS, "Optional")), None);

    assert!(doc
        .descendants()
        .any(|n| n.has_tag_name((WSE_NS, "EventSource"))));

    let topics = doc
        .descendants()
        .find(|n| n.has_tag_name((WSTOP_NS, "TopicSet")))
        .unwrap();
    let topic_names: Vec<&str> = local_names(topics);
    assert_eq!(topic_names, vec!["StockTick", "Alert"]);
    let first = element_children(topics)[0];
    assert_eq!(first.tag_name().namespace(), Some("urn:events"));
    assert_eq!(first.attribute((WSTOP_NS, "topic")), Some("true"));
    Ok(())
}

#[test]
fn test_metadata_document() -> Result<()> {
    let wsdl = Wsdl::create("Svc", "urn:svc");
    let xml = Metadata::new()
        .section(
            MetadataSection::new(DIALECT_WSDL, MetadataContent::Structured(wsdl.to_xml()))
                .identifier("urn:svc"),
        )
        .section(MetadataSection::new(
            DIALECT_WSDL,
            MetadataContent::Location("http://example.com/svc?wsdl".into()),
        ))
        .generate(&GeneratorOptions::default())?;

    let doc = Document::parse(&xml).unwrap();
    let root = doc.root_element();
    assert!(root.has_tag_name((MEX_NS, "Metadata")));

    let sections = element_children(root);
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].attribute("Dialect"), Some(WSDL_NS));
    assert_eq!(sections[0].attribute("Identifier"), Some("urn:svc"));
    let embedded = element_children(sections[0])[0];
    assert!(embedded.has_tag_name((WSDL_NS, "definitions")));

    let location = element_children(sections[1])[0];
    assert!(location.has_tag_name((MEX_NS, "Location")));
    assert_eq!(location.text(), Some("http://example.com/svc?wsdl"));
    Ok(())
}

#[test]
fn test_assertion_with_taken_prefix_keeps_its_namespace() -> Result<()> {
    let xml = Wsdl::create("S", "urn:target")
        .policy("P", None)
        .assertion(Assertion::new("tns", "urn:vendor", "Custom"))
        .end()
        .generate()?;

    let doc = Document::parse(&xml).unwrap();
    let root = doc.root_element();
    assert_eq!(root.lookup_namespace_uri(Some("tns")), Some("urn:target"));

    let custom = doc
        .descendants()
        .find(|n| n.tag_name().name() == "Custom")
        .unwrap();
    assert_eq!(custom.tag_name().namespace(), Some("urn:vendor"));
    Ok(())
}

#[test]
fn test_topic_set_resolves_inside_metadata() -> Result<()> {
    let wsdl = Wsdl::create("Events", "urn:events")
        .policy("TopicPolicy", None)
        .assertion(topic_set("urn:market", ["Tick"]))
        .end();
    let xml = Metadata::new()
        .section(MetadataSection::new(
            DIALECT_WSDL,
            MetadataContent::Structured(wsdl.to_xml()),
        ))
        .generate(&GeneratorOptions::default())?;

    let doc = Document::parse(&xml).unwrap();
    let tick = doc
        .descendants()
        .find(|n| n.tag_name().name() == "Tick")
        .unwrap();
    assert_eq!(tick.tag_name().namespace(), Some("urn:market"));
    assert_eq!(tick.attribute((WSTOP_NS, "topic")), Some("true"));
    Ok(())
}
