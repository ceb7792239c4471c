//! XML Schema object model
//!
//! The types section shared by WSDL 1.1 and WSDL 2.0 documents: named
//! simple/list/union/complex types, element and attribute groups, global
//! elements, and schema imports/includes/redefines.
//!
//! Builders follow one ownership rule: a child builder owns its parent by
//! value, and `end()` moves the finished child into the parent and hands
//! the parent back. A whole tree can therefore be written as one chain.

pub mod complex_types;
pub mod compositors;
pub mod declarations;
pub mod elements;
pub mod groups;
pub mod identities;
pub mod simple_types;
pub mod writer;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::names::{is_valid_ncname, QualifiedName};

pub use complex_types::{
    ComplexType, ComplexTypeBuilder, DerivationKind, SimpleContent, SimpleContentBuilder,
};
pub use compositors::{
    All, AllBuilder, Any, AnyAttribute, AnyAttributeBuilder, AnyAttributeHost, AnyBuilder, Choice,
    ChoiceBuilder, Compositor, CompositorHost, ModelGroup, ModelGroupBuilder, Particle,
    ProcessContents, Sequence, SequenceBuilder,
};
pub use declarations::{
    Attribute, AttributeUse, Documentation, Element, GroupRef, MaxOccurs, Occurs,
};
pub use elements::ElementBuilder;
pub use groups::{AttributeGroup, AttributeGroupBuilder, ElementGroup, ElementGroupBuilder};
pub use identities::{
    Field, FieldBuilder, IdentityBuilder, IdentityConstraint, IdentityKind, Selector,
    SelectorBuilder,
};
pub use simple_types::{
    Facets, ListType, ListTypeBuilder, SimpleType, SimpleTypeBuilder, UnionType, UnionTypeBuilder,
};
pub use writer::SchemaWriter;

/// `xs:import`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaImport {
    /// Imported namespace
    pub namespace: String,
    /// `schemaLocation`, if given
    pub schema_location: Option<String>,
}

/// `xs:include` / `xs:redefine` target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaLocation {
    /// `schemaLocation`
    pub schema_location: String,
}

/// Contents of the embedded `schema` element
#[derive(Debug, Clone, Default)]
pub struct Schema {
    imports: Vec<SchemaImport>,
    includes: Vec<SchemaLocation>,
    redefines: Vec<SchemaLocation>,
    element_groups: IndexMap<String, ElementGroup>,
    attribute_groups: IndexMap<String, AttributeGroup>,
    simple_types: IndexMap<String, SimpleType>,
    list_types: IndexMap<String, ListType>,
    union_types: IndexMap<String, UnionType>,
    complex_types: IndexMap<String, ComplexType>,
    elements: IndexMap<String, Element>,
}

/// Insert into a name-keyed collection; a duplicate replaces the earlier
/// entry in place.
fn upsert<T>(map: &mut IndexMap<String, T>, kind: &str, name: &str, value: T) {
    if !is_valid_ncname(name) {
        warn!(kind, name, "declaration name is not a valid NCName");
    }
    if map.insert(name.to_string(), value).is_some() {
        debug!(kind, name, "replaced existing declaration");
    }
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the schema has nothing to emit
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
            && self.includes.is_empty()
            && self.redefines.is_empty()
            && self.element_groups.is_empty()
            && self.attribute_groups.is_empty()
            && self.simple_types.is_empty()
            && self.list_types.is_empty()
            && self.union_types.is_empty()
            && self.complex_types.is_empty()
            && self.elements.is_empty()
    }

    /// Schema imports in insertion order
    pub fn imports(&self) -> &[SchemaImport] {
        &self.imports
    }

    /// Schema includes in insertion order
    pub fn includes(&self) -> &[SchemaLocation] {
        &self.includes
    }

    /// Schema redefines in insertion order
    pub fn redefines(&self) -> &[SchemaLocation] {
        &self.redefines
    }

    /// Element groups by name
    pub fn element_groups(&self) -> &IndexMap<String, ElementGroup> {
        &self.element_groups
    }

    /// Attribute groups by name
    pub fn attribute_groups(&self) -> &IndexMap<String, AttributeGroup> {
        &self.attribute_groups
    }

    /// Simple types by name
    pub fn simple_types(&self) -> &IndexMap<String, SimpleType> {
        &self.simple_types
    }

    /// List types by name
    pub fn list_types(&self) -> &IndexMap<String, ListType> {
        &self.list_types
    }

    /// Union types by name
    pub fn union_types(&self) -> &IndexMap<String, UnionType> {
        &self.union_types
    }

    /// Complex types by name
    pub fn complex_types(&self) -> &IndexMap<String, ComplexType> {
        &self.complex_types
    }

    /// Global elements by name
    pub fn elements(&self) -> &IndexMap<String, Element> {
        &self.elements
    }

    /// Append an `xs:import`
    pub fn add_import(&mut self, namespace: impl Into<String>, schema_location: Option<String>) {
        self.imports.push(SchemaImport {
            namespace: namespace.into(),
            schema_location,
        });
    }

    /// Append an `xs:include`
    pub fn add_include(&mut self, schema_location: impl Into<String>) {
        self.includes.push(SchemaLocation {
            schema_location: schema_location.into(),
        });
    }

    /// Append an `xs:redefine`
    pub fn add_redefine(&mut self, schema_location: impl Into<String>) {
        self.redefines.push(SchemaLocation {
            schema_location: schema_location.into(),
        });
    }

    /// Register an element group
    pub fn insert_element_group(&mut self, group: ElementGroup) {
        let name = group.name().to_string();
        upsert(&mut self.element_groups, "group", &name, group);
    }

    /// Register an attribute group
    pub fn insert_attribute_group(&mut self, group: AttributeGroup) {
        let name = group.name().to_string();
        upsert(&mut self.attribute_groups, "attributeGroup", &name, group);
    }

    /// Register a simple type
    pub fn insert_simple_type(&mut self, simple_type: SimpleType) {
        let name = simple_type.name().to_string();
        upsert(&mut self.simple_types, "simpleType", &name, simple_type);
    }

    /// Register a list type
    pub fn insert_list_type(&mut self, list_type: ListType) {
        let name = list_type.name().to_string();
        upsert(&mut self.list_types, "listType", &name, list_type);
    }

    /// Register a union type
    pub fn insert_union_type(&mut self, union_type: UnionType) {
        let name = union_type.name().to_string();
        upsert(&mut self.union_types, "unionType", &name, union_type);
    }

    /// Register a complex type
    pub fn insert_complex_type(&mut self, complex_type: ComplexType) {
        let name = complex_type.name().to_string();
        upsert(&mut self.complex_types, "complexType", &name, complex_type);
    }

    /// Register a global element
    pub fn insert_element(&mut self, element: Element) {
        let name = element.name().to_string();
        upsert(&mut self.elements, "element", &name, element);
    }
}

/// Documents that carry an embedded schema.
///
/// Provides the type-definition factories shared by `Wsdl` and `Wsdl2`.
pub trait SchemaHost: Sized {
    /// The embedded schema
    fn schema(&self) -> &Schema;

    /// Mutable access to the embedded schema
    fn schema_mut(&mut self) -> &mut Schema;

    /// Start a named complex type
    fn complex_type(self, name: impl Into<String>) -> ComplexTypeBuilder<Self> {
        ComplexTypeBuilder::new(self, name.into())
    }

    /// Start a named simple type
    fn simple_type(self, name: impl Into<String>) -> SimpleTypeBuilder<Self> {
        SimpleTypeBuilder::new(self, name.into())
    }

    /// Start a named list type
    fn list_type(self, name: impl Into<String>) -> ListTypeBuilder<Self> {
        ListTypeBuilder::new(self, name.into())
    }

    /// Start a named union type
    fn union_type(self, name: impl Into<String>) -> UnionTypeBuilder<Self> {
        UnionTypeBuilder::new(self, name.into())
    }

    /// Start a named element group
    fn element_group(self, name: impl Into<String>) -> ElementGroupBuilder<Self> {
        ElementGroupBuilder::new(self, name.into())
    }

    /// Start a named attribute group
    fn attribute_group(self, name: impl Into<String>) -> AttributeGroupBuilder<Self> {
        AttributeGroupBuilder::new(self, name.into())
    }

    /// Start a global element declaration
    fn element(
        self,
        name: impl Into<String>,
        type_name: impl Into<QualifiedName>,
    ) -> ElementBuilder<Self> {
        ElementBuilder::new(self, Element::new(name, type_name))
    }

    /// Add an `xs:import`
    fn schema_import(mut self, namespace: impl Into<String>, schema_location: Option<&str>) -> Self {
        self.schema_mut()
            .add_import(namespace, schema_location.map(String::from));
        self
    }

    /// Add an `xs:include`
    fn schema_include(mut self, schema_location: impl Into<String>) -> Self {
        self.schema_mut().add_include(schema_location);
        self
    }

    /// Add an `xs:redefine`
    fn schema_redefine(mut self, schema_location: impl Into<String>) -> Self {
        self.schema_mut().add_redefine(schema_location);
        self
    }

    /// Complex types by name
    fn complex_types(&self) -> &IndexMap<String, ComplexType> {
        self.schema().complex_types()
    }

    /// Simple types by name
    fn simple_types(&self) -> &IndexMap<String, SimpleType> {
        self.schema().simple_types()
    }

    /// List types by name
    fn list_types(&self) -> &IndexMap<String, ListType> {
        self.schema().list_types()
    }

    /// Union types by name
    fn union_types(&self) -> &IndexMap<String, UnionType> {
        self.schema().union_types()
    }

    /// Element groups by name
    fn element_groups(&self) -> &IndexMap<String, ElementGroup> {
        self.schema().element_groups()
    }

    /// Attribute groups by name
    fn attribute_groups(&self) -> &IndexMap<String, AttributeGroup> {
        self.schema().attribute_groups()
    }

    /// Global elements by name
    fn elements(&self) -> &IndexMap<String, Element> {
        self.schema().elements()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Host {
        schema: Schema,
    }

    impl SchemaHost for Host {
        fn schema(&self) -> &Schema {
            &self.schema
        }

        fn schema_mut(&mut self) -> &mut Schema {
            &mut self.schema
        }
    }

    #[test]
    fn test_empty_schema() {
        assert!(Schema::new().is_empty());
        assert!(Host::default().schema().is_empty());
    }

    #[test]
    fn test_duplicate_name_replaces_in_place() {
        let host = Host::default()
            .complex_type("A")
            .documentation("first")
            .end()
            .complex_type("B")
            .end()
            .complex_type("A")
            .documentation("second")
            .end();

        let names: Vec<&String> = host.complex_types().keys().collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(
            host.complex_types()["A"].documentation().map(|d| d.text()),
            Some("second")
        );
    }

    #[test]
    fn test_imports_includes_redefines() {
        let host = Host::default()
            .schema_import("urn:common", Some("common.xsd"))
            .schema_import("urn:bare", None)
            .schema_include("local.xsd")
            .schema_redefine("base.xsd");
        let schema = host.schema();
        assert!(!schema.is_empty());
        assert_eq!(schema.imports().len(), 2);
        assert_eq!(schema.imports()[0].schema_location.as_deref(), Some("common.xsd"));
        assert_eq!(schema.imports()[1].schema_location, None);
        assert_eq!(schema.includes()[0].schema_location, "local.xsd");
        assert_eq!(schema.redefines()[0].schema_location, "base.xsd");
    }

    #[test]
    fn test_global_element_registered_on_end() {
        let host = Host::default().element("User", "tns:UserType").nillable(true).end();
        let user = &host.elements()["User"];
        assert_eq!(user.type_name().as_str(), "tns:UserType");
        assert!(user.is_nillable());
    }
}
