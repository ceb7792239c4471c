//! Property tests for builder invariants

use proptest::prelude::*;

use wsdl_builder::prelude::*;
use wsdl_builder::schema::MaxOccurs;
use wsdl_builder::QualifiedName;

fn build_messages(names: &[String]) -> Wsdl {
    let mut wsdl = Wsdl::create("Props", "urn:props");
    for name in names {
        wsdl = wsdl.message(name.as_str()).part("value", "xsd:string").end();
    }
    wsdl
}

proptest! {
    #[test]
    fn all_accepts_only_zero_or_one_bounds(min in 0u32..4, max in -1i32..4) {
        let element = Element::new("item", "xsd:string")
            .with_min_occurs(min)
            .with_max_occurs(max);
        let result = Wsdl::create("S", "urn:s")
            .complex_type("T")
            .all()
            .element_decl(element);

        let allowed = min <= 1 && max == 1;
        prop_assert_eq!(result.is_ok(), allowed);
        if let Err(err) = result {
            prop_assert!(matches!(err, Error::InvalidArgument(_)));
        }
    }

    #[test]
    fn negative_max_occurs_is_unbounded(max in i32::MIN..0) {
        prop_assert_eq!(MaxOccurs::from_i32(max), MaxOccurs::Unbounded);
        let element = Element::new("e", "xsd:string").with_max_occurs(max);
        prop_assert_eq!(element.max_occurs(), Some(MaxOccurs::Unbounded));
    }

    #[test]
    fn messages_keep_first_insertion_order(
        names in proptest::collection::vec("[A-Z][a-z]{0,6}", 1..8)
    ) {
        let wsdl = build_messages(&names);

        let mut expected: Vec<&str> = Vec::new();
        for name in &names {
            if !expected.contains(&name.as_str()) {
                expected.push(name.as_str());
            }
        }
        let actual: Vec<&str> = wsdl.messages().keys().map(String::as_str).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn generation_is_deterministic(
        names in proptest::collection::vec("[A-Z][a-z]{0,6}", 0..6),
        compact in any::<bool>()
    ) {
        let options = if compact {
            GeneratorOptions::compact()
        } else {
            GeneratorOptions::pretty(2)
        };
        let first = build_messages(&names).generate_with(&options).unwrap();
        let second = build_messages(&names).generate_with(&options).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn bare_names_are_qualified(name in "[a-zA-Z][a-zA-Z0-9]{0,10}") {
        let qualified = QualifiedName::new(name.as_str()).qualified();
        prop_assert_eq!(qualified, format!("tns:{}", name));

        let prefixed = format!("ns1:{}", name);
        prop_assert_eq!(QualifiedName::new(prefixed.as_str()).qualified(), prefixed);
    }
}
