//! Embedded schema tests
//!
//! Covers the `xs:all` cardinality rules, wildcard validation and the
//! shapes the schema writer produces inside `wsdl:types`.

use pretty_assertions::assert_eq;
use roxmltree::{Document, Node};

use wsdl_builder::namespaces::XSD_NS;
use wsdl_builder::prelude::*;

fn schema_of(wsdl: &Wsdl) -> String {
    wsdl.generate().expect("generation should succeed")
}

fn find<'a, 'input>(node: Node<'a, 'input>, local: &str, name: &str) -> Node<'a, 'input> {
    node.descendants()
        .find(|n| n.has_tag_name((XSD_NS, local)) && n.attribute("name") == Some(name))
        .unwrap_or_else(|| panic!("missing xsd:{} named {}", local, name))
}

fn element_children<'a, 'input>(node: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    node.children().filter(|n| n.is_element()).collect()
}

// ============================================================================
// xs:all cardinality
// ============================================================================

#[test]
fn test_all_rejects_min_occurs_above_one() {
    let err = Wsdl::create("S", "urn:s")
        .complex_type("T")
        .all()
        .element_decl(Element::new("a", "xsd:string").with_min_occurs(2))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert_eq!(err.message(), "Elements in <all> can only have minOccurs 0 or 1");
}

#[test]
fn test_all_rejects_max_occurs_other_than_one() {
    let err = Wsdl::create("S", "urn:s")
        .complex_type("T")
        .all()
        .element_decl(Element::new("a", "xsd:string").with_max_occurs(2))
        .unwrap_err();
    assert_eq!(err.message(), "Elements in <all> can only have maxOccurs 1");

    let err = Wsdl::create("S", "urn:s")
        .complex_type("T")
        .all()
        .element_decl(Element::new("a", "xsd:string").with_max_occurs(-1))
        .unwrap_err();
    assert_eq!(err.message(), "Elements in <all> can only have maxOccurs 1");
}

#[test]
fn test_all_accepts_optional_members() -> Result<()> {
    let wsdl = Wsdl::create("S", "urn:s")
        .complex_type("Person")
        .all()
        .element_decl(Element::new("first", "xsd:string").with_min_occurs(0))?
        .element_decl(
            Element::new("last", "xsd:string")
                .with_min_occurs(1)
                .with_max_occurs(1),
        )?
        .element("nick", "xsd:string")
        .end()
        .end();

    let xml = schema_of(&wsdl);
    let doc = Document::parse(&xml).unwrap();
    let person = find(doc.root_element(), "complexType", "Person");
    let all = element_children(person)[0];
    assert!(all.has_tag_name((XSD_NS, "all")));

    let members = element_children(all);
    assert_eq!(members.len(), 3);
    assert_eq!(members[0].attribute("minOccurs"), Some("0"));
    assert_eq!(members[1].attribute("maxOccurs"), Some("1"));
    assert_eq!(members[2].attribute("minOccurs"), None);
    Ok(())
}

// ============================================================================
// Wildcards
// ============================================================================

#[test]
fn test_process_contents_is_validated() {
    let err = Wsdl::create("S", "urn:s")
        .complex_type("Open")
        .any()
        .process_contents("loose")
        .unwrap_err();
    assert_eq!(err.message(), "processContents must be one of: strict, lax, skip");

    let err = Wsdl::create("S", "urn:s")
        .complex_type("Open")
        .any_attribute()
        .process_contents("STRICT")
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn test_any_writes_namespace_and_process_contents() -> Result<()> {
    let wsdl = Wsdl::create("S", "urn:s")
        .complex_type("Open")
        .element("id", "xsd:string")
        .any()
        .namespace("##other")
        .process_contents("lax")?
        .max_occurs(-1)
        .end()
        .any_attribute()
        .end()
        .end();

    let xml = schema_of(&wsdl);
    let doc = Document::parse(&xml).unwrap();
    let open = find(doc.root_element(), "complexType", "Open");

    let sequence = element_children(open)[0];
    let any = element_children(sequence)[1];
    assert!(any.has_tag_name((XSD_NS, "any")));
    assert_eq!(any.attribute("namespace"), Some("##other"));
    assert_eq!(any.attribute("processContents"), Some("lax"));
    assert_eq!(any.attribute("maxOccurs"), Some("unbounded"));

    let any_attribute = open
        .children()
        .find(|n| n.has_tag_name((XSD_NS, "anyAttribute")))
        .unwrap();
    assert_eq!(any_attribute.attribute("namespace"), Some("##any"));
    assert_eq!(any_attribute.attribute("processContents"), Some("strict"));
    Ok(())
}

// ============================================================================
// Element declarations
// ============================================================================

#[test]
fn test_optional_attributes_omitted_and_unbounded() {
    let wsdl = Wsdl::create("S", "urn:s")
        .complex_type("Order")
        .element("id", "xsd:string")
        .element_decl(Element::new("line", "LineItem").with_max_occurs(-1))
        .end();

    let xml = schema_of(&wsdl);
    let doc = Document::parse(&xml).unwrap();
    let order = find(doc.root_element(), "complexType", "Order");

    let id = find(order, "element", "id");
    let attrs: Vec<&str> = id.attributes().map(|a| a.name()).collect();
    assert_eq!(attrs, vec!["name", "type"]);

    let line = find(order, "element", "line");
    assert_eq!(line.attribute("type"), Some("tns:LineItem"));
    assert_eq!(line.attribute("maxOccurs"), Some("unbounded"));
    assert_eq!(line.attribute("minOccurs"), None);
}

#[test]
fn test_global_element_with_identity_constraints() {
    let wsdl = Wsdl::create("S", "urn:s")
        .element("Catalog", "CatalogType")
        .nillable(true)
        .documentation("Product catalog")
        .key("productKey")
        .selector("tns:product")
        .end()
        .field("@id")
        .end()
        .end()
        .keyref("productRef", "productKey")
        .selector("tns:ref")
        .end()
        .field("@product")
        .end()
        .end()
        .end();

    let xml = schema_of(&wsdl);
    let doc = Document::parse(&xml).unwrap();
    let catalog = find(doc.root_element(), "element", "Catalog");
    assert_eq!(catalog.attribute("nillable"), Some("true"));
    assert_eq!(catalog.attribute("abstract"), None);

    let names: Vec<&str> = element_children(catalog)
        .iter()
        .map(|n| n.tag_name().name())
        .collect();
    assert_eq!(names, vec!["annotation", "key", "keyref"]);

    let keyref = find(catalog, "keyref", "productRef");
    assert_eq!(keyref.attribute("refer"), Some("tns:productKey"));
}

// ============================================================================
// Types and groups
// ============================================================================

#[test]
fn test_simple_list_and_union_types() {
    let wsdl = Wsdl::create("S", "urn:s")
        .simple_type("Status")
        .base("xsd:string")
        .enumerations(["active", "inactive"])
        .end()
        .list_type("Codes")
        .item_type("xsd:int")
        .end()
        .union_type("Flexible")
        .member_types(["xsd:int", "Status"])
        .end();

    let xml = schema_of(&wsdl);
    let doc = Document::parse(&xml).unwrap();
    let root = doc.root_element();

    let status = find(root, "simpleType", "Status");
    let restriction = element_children(status)[0];
    assert_eq!(restriction.attribute("base"), Some("xsd:string"));
    let values: Vec<&str> = element_children(restriction)
        .iter()
        .filter_map(|n| n.attribute("value"))
        .collect();
    assert_eq!(values, vec!["active", "inactive"]);

    let codes = find(root, "simpleType", "Codes");
    let list = element_children(codes)[0];
    assert!(list.has_tag_name((XSD_NS, "list")));
    assert_eq!(list.attribute("itemType"), Some("xsd:int"));

    let flexible = find(root, "simpleType", "Flexible");
    let union = element_children(flexible)[0];
    assert_eq!(union.attribute("memberTypes"), Some("xsd:int tns:Status"));
}

#[test]
fn test_unset_simple_type_facets_omitted() {
    let wsdl = Wsdl::create("S", "urn:s")
        .simple_type("Plain")
        .max_length(10)
        .end()
        .simple_type("Sealed")
        .base("xsd:token")
        .final_derivation("restriction")
        .pattern("[A-Z]+")
        .min_length(2)
        .end();

    let xml = schema_of(&wsdl);
    let doc = Document::parse(&xml).unwrap();
    let root = doc.root_element();

    let plain = find(root, "simpleType", "Plain");
    assert_eq!(plain.attribute("final"), None);
    let restriction = element_children(plain)[0];
    assert_eq!(restriction.attribute("base"), Some("xsd:string"));
    let facets: Vec<&str> = element_children(restriction)
        .iter()
        .map(|n| n.tag_name().name())
        .collect();
    assert_eq!(facets, vec!["maxLength"]);

    let sealed = find(root, "simpleType", "Sealed");
    assert_eq!(sealed.attribute("final"), Some("restriction"));
    let facets: Vec<&str> = element_children(element_children(sealed)[0])
        .iter()
        .map(|n| n.tag_name().name())
        .collect();
    assert_eq!(facets, vec!["minLength", "pattern"]);
}

#[test]
fn test_groups_and_choice_content() {
    let wsdl = Wsdl::create("S", "urn:s")
        .element_group("Contact")
        .element("email", "xsd:string")
        .element("phone", "xsd:string")
        .end()
        .attribute_group("Audit")
        .attribute_decl(Attribute::required("createdBy", "xsd:string"))
        .end()
        .complex_type("Customer")
        .group_ref("Contact")
        .attribute_group_ref("Audit")
        .choice()
        .element("company", "xsd:string")
        .element("person", "xsd:string")
        .end()
        .end();

    let xml = schema_of(&wsdl);
    let doc = Document::parse(&xml).unwrap();
    let root = doc.root_element();

    let schema = root
        .descendants()
        .find(|n| n.has_tag_name((XSD_NS, "schema")))
        .unwrap();
    let sections: Vec<&str> = element_children(schema)
        .iter()
        .map(|n| n.tag_name().name())
        .collect();
    assert_eq!(sections, vec!["group", "attributeGroup", "complexType"]);

    let audit = find(root, "attributeGroup", "Audit");
    let created_by = find(audit, "attribute", "createdBy");
    assert_eq!(created_by.attribute("use"), Some("required"));

    let customer = find(root, "complexType", "Customer");
    let sequence = element_children(customer)[0];
    let particles: Vec<&str> = element_children(sequence)
        .iter()
        .map(|n| n.tag_name().name())
        .collect();
    assert_eq!(particles, vec!["group", "choice"]);
    assert_eq!(element_children(sequence)[0].attribute("ref"), Some("tns:Contact"));

    let attribute_group_ref = element_children(customer)[1];
    assert_eq!(attribute_group_ref.attribute("ref"), Some("tns:Audit"));
}

#[test]
fn test_duplicate_type_replaces_in_place() {
    let wsdl = Wsdl::create("S", "urn:s")
        .complex_type("A")
        .element("old", "xsd:string")
        .end()
        .complex_type("B")
        .end()
        .complex_type("A")
        .element("new", "xsd:string")
        .end();

    let names: Vec<&str> = wsdl.complex_types().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(wsdl.complex_types()["A"].elements()[0].name(), "new");
}

#[test]
fn test_element_form_default_option() -> Result<()> {
    let wsdl = Wsdl::create("S", "urn:s")
        .element("Ping", "xsd:string")
        .end();
    let options = GeneratorOptions::new().with_element_form_default(Some("unqualified"));
    let xml = wsdl.generate_with(&options)?;
    let doc = Document::parse(&xml).unwrap();
    let schema = doc
        .descendants()
        .find(|n| n.has_tag_name((XSD_NS, "schema")))
        .unwrap();
    assert_eq!(schema.attribute("elementFormDefault"), Some("unqualified"));

    let xml = wsdl.generate_with(&GeneratorOptions::new().with_element_form_default(None))?;
    assert!(!xml.contains("elementFormDefault"));
    Ok(())
}
