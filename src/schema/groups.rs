//! Named model groups and attribute groups
//!
//! `xs:group` bundles elements (plus one `choice`/`all` compositor) for
//! reuse through `group ref`; `xs:attributeGroup` does the same for
//! attributes.

use crate::names::QualifiedName;

use super::compositors::{
    AllBuilder, AnyAttribute, AnyAttributeBuilder, AnyAttributeHost, ChoiceBuilder, Compositor,
    CompositorHost, ModelGroupBuilder,
};
use super::declarations::{Attribute, Documentation, Element};
use super::SchemaHost;

/// Named element group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementGroup {
    name: String,
    documentation: Option<Documentation>,
    elements: Vec<Element>,
    compositor: Option<Compositor>,
}

impl ElementGroup {
    /// Create an empty element group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documentation: None,
            elements: Vec::new(),
            compositor: None,
        }
    }

    /// Group name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    /// Elements in insertion order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The single `choice` or `all` compositor, if any
    pub fn compositor(&self) -> Option<&Compositor> {
        self.compositor.as_ref()
    }
}

/// Named attribute group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeGroup {
    name: String,
    documentation: Option<Documentation>,
    attributes: Vec<Attribute>,
    attribute_group_refs: Vec<QualifiedName>,
    any_attribute: Option<AnyAttribute>,
}

impl AttributeGroup {
    /// Create an empty attribute group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documentation: None,
            attributes: Vec::new(),
            attribute_group_refs: Vec::new(),
            any_attribute: None,
        }
    }

    /// Group name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Nested attribute group references
    pub fn attribute_group_refs(&self) -> &[QualifiedName] {
        &self.attribute_group_refs
    }

    /// `anyAttribute` wildcard
    pub fn any_attribute(&self) -> Option<&AnyAttribute> {
        self.any_attribute.as_ref()
    }
}

/// Builder for a named element group
#[derive(Debug)]
pub struct ElementGroupBuilder<P> {
    parent: P,
    group: ElementGroup,
}

impl<P: SchemaHost> ElementGroupBuilder<P> {
    pub(crate) fn new(parent: P, name: String) -> Self {
        Self {
            parent,
            group: ElementGroup::new(name),
        }
    }

    /// Append an element
    pub fn element(self, name: impl Into<String>, type_name: impl Into<QualifiedName>) -> Self {
        self.element_decl(Element::new(name, type_name))
    }

    /// Append a fully configured element
    pub fn element_decl(mut self, element: Element) -> Self {
        self.group.elements.push(element);
        self
    }

    /// Open the group's `xs:choice`, replacing an `all` set earlier
    pub fn choice(self) -> ChoiceBuilder<Self> {
        ModelGroupBuilder::new(self)
    }

    /// Open the group's `xs:all`, replacing a `choice` set earlier
    pub fn all(self) -> AllBuilder<Self> {
        AllBuilder::new(self)
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.group.documentation = Some(documentation.into());
        self
    }

    /// Register the group and return to the document
    pub fn end(self) -> P {
        let mut parent = self.parent;
        parent.schema_mut().insert_element_group(self.group);
        parent
    }
}

impl<P> CompositorHost for ElementGroupBuilder<P> {
    fn add_compositor(&mut self, compositor: Compositor) {
        self.group.compositor = Some(compositor);
    }
}

/// Builder for a named attribute group
#[derive(Debug)]
pub struct AttributeGroupBuilder<P> {
    parent: P,
    group: AttributeGroup,
}

impl<P: SchemaHost> AttributeGroupBuilder<P> {
    pub(crate) fn new(parent: P, name: String) -> Self {
        Self {
            parent,
            group: AttributeGroup::new(name),
        }
    }

    /// Append an attribute
    pub fn attribute(self, name: impl Into<String>, type_name: impl Into<QualifiedName>) -> Self {
        self.attribute_decl(Attribute::new(name, type_name))
    }

    /// Append a fully configured attribute
    pub fn attribute_decl(mut self, attribute: Attribute) -> Self {
        self.group.attributes.push(attribute);
        self
    }

    /// Reference another attribute group
    pub fn attribute_group_ref(mut self, reference: impl Into<QualifiedName>) -> Self {
        self.group.attribute_group_refs.push(reference.into());
        self
    }

    /// Open the `xs:anyAttribute` wildcard
    pub fn any_attribute(self) -> AnyAttributeBuilder<Self> {
        AnyAttributeBuilder::new(self)
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.group.documentation = Some(documentation.into());
        self
    }

    /// Register the group and return to the document
    pub fn end(self) -> P {
        let mut parent = self.parent;
        parent.schema_mut().insert_attribute_group(self.group);
        parent
    }
}

impl<P> AnyAttributeHost for AttributeGroupBuilder<P> {
    fn set_any_attribute(&mut self, wildcard: AnyAttribute) {
        self.group.any_attribute = Some(wildcard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

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
    fn test_element_group_compositor_last_write_wins() {
        let host = Host::default()
            .element_group("Contact")
            .choice()
            .element("email", "xsd:string")
            .end()
            .all()
            .element("phone", "xsd:string")
            .end()
            .end();
        let group = &host.schema.element_groups()["Contact"];
        assert!(matches!(group.compositor(), Some(Compositor::All(_))));
    }

    #[test]
    fn test_attribute_group_contents() {
        let host = Host::default()
            .attribute_group("Audit")
            .attribute("createdAt", "xsd:dateTime")
            .attribute("createdBy", "xsd:string")
            .attribute_group_ref("tns:Versioned")
            .any_attribute()
            .end()
            .end();
        let group = &host.schema.attribute_groups()["Audit"];
        assert_eq!(group.attributes().len(), 2);
        assert_eq!(group.attribute_group_refs().len(), 1);
        assert!(group.any_attribute().is_some());
    }
}
