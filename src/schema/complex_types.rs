//! XSD complex types
//!
//! A complex type holds either simple content (a derivation of a simple
//! base plus attributes) or a content model built from elements, group
//! references and compositors, optionally extending a base type.

use crate::names::QualifiedName;

use super::compositors::{
    AllBuilder, AnyAttribute, AnyAttributeBuilder, AnyAttributeHost, AnyBuilder, ChoiceBuilder,
    Compositor, CompositorHost, ModelGroupBuilder, SequenceBuilder,
};
use super::declarations::{Attribute, Documentation, Element, GroupRef};
use super::SchemaHost;

/// How simple content derives from its base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivationKind {
    /// `xs:extension`
    Extension,
    /// `xs:restriction`
    Restriction,
}

impl DerivationKind {
    /// Element local name
    pub fn as_str(&self) -> &'static str {
        match self {
            DerivationKind::Extension => "extension",
            DerivationKind::Restriction => "restriction",
        }
    }
}

/// `xs:simpleContent`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimpleContent {
    derivation: Option<(DerivationKind, QualifiedName)>,
    attributes: Vec<Attribute>,
}

impl SimpleContent {
    /// Derivation kind and base, if set
    pub fn derivation(&self) -> Option<(DerivationKind, &QualifiedName)> {
        self.derivation.as_ref().map(|(kind, base)| (*kind, base))
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

/// Named complex type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexType {
    name: String,
    documentation: Option<Documentation>,
    is_abstract: bool,
    mixed: bool,
    block: Option<String>,
    final_derivation: Option<String>,
    extends: Option<QualifiedName>,
    elements: Vec<Element>,
    group_refs: Vec<GroupRef>,
    compositors: Vec<Compositor>,
    attributes: Vec<Attribute>,
    attribute_group_refs: Vec<QualifiedName>,
    any_attribute: Option<AnyAttribute>,
    simple_content: Option<SimpleContent>,
}

impl ComplexType {
    /// Create an empty complex type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documentation: None,
            is_abstract: false,
            mixed: false,
            block: None,
            final_derivation: None,
            extends: None,
            elements: Vec::new(),
            group_refs: Vec::new(),
            compositors: Vec::new(),
            attributes: Vec::new(),
            attribute_group_refs: Vec::new(),
            any_attribute: None,
            simple_content: None,
        }
    }

    /// Type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    /// `abstract`
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// `mixed`
    pub fn is_mixed(&self) -> bool {
        self.mixed
    }

    /// `block`
    pub fn block(&self) -> Option<&str> {
        self.block.as_deref()
    }

    /// `final`
    pub fn final_derivation(&self) -> Option<&str> {
        self.final_derivation.as_deref()
    }

    /// Base type of a `complexContent` extension
    pub fn extends(&self) -> Option<&QualifiedName> {
        self.extends.as_ref()
    }

    /// Sequence elements in insertion order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Group references in insertion order
    pub fn group_refs(&self) -> &[GroupRef] {
        &self.group_refs
    }

    /// Compositors in insertion order
    pub fn compositors(&self) -> &[Compositor] {
        &self.compositors
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Attribute group references
    pub fn attribute_group_refs(&self) -> &[QualifiedName] {
        &self.attribute_group_refs
    }

    /// `anyAttribute` wildcard
    pub fn any_attribute(&self) -> Option<&AnyAttribute> {
        self.any_attribute.as_ref()
    }

    /// Simple content, which takes precedence over everything else on output
    pub fn simple_content(&self) -> Option<&SimpleContent> {
        self.simple_content.as_ref()
    }
}

/// Builder for a named complex type
#[derive(Debug)]
pub struct ComplexTypeBuilder<P> {
    parent: P,
    complex_type: ComplexType,
}

impl<P: SchemaHost> ComplexTypeBuilder<P> {
    pub(crate) fn new(parent: P, name: String) -> Self {
        Self {
            parent,
            complex_type: ComplexType::new(name),
        }
    }

    /// Append a sequence element
    pub fn element(self, name: impl Into<String>, type_name: impl Into<QualifiedName>) -> Self {
        self.element_decl(Element::new(name, type_name))
    }

    /// Append a fully configured sequence element
    pub fn element_decl(mut self, element: Element) -> Self {
        self.complex_type.elements.push(element);
        self
    }

    /// Append an attribute
    pub fn attribute(self, name: impl Into<String>, type_name: impl Into<QualifiedName>) -> Self {
        self.attribute_decl(Attribute::new(name, type_name))
    }

    /// Append a fully configured attribute
    pub fn attribute_decl(mut self, attribute: Attribute) -> Self {
        self.complex_type.attributes.push(attribute);
        self
    }

    /// Reference a named element group inside the sequence
    pub fn group_ref(mut self, reference: impl Into<QualifiedName>) -> Self {
        self.complex_type.group_refs.push(GroupRef::new(reference));
        self
    }

    /// Reference a named attribute group
    pub fn attribute_group_ref(mut self, reference: impl Into<QualifiedName>) -> Self {
        self.complex_type
            .attribute_group_refs
            .push(reference.into());
        self
    }

    /// Derive from `base` by `complexContent` extension
    pub fn extends(mut self, base: impl Into<QualifiedName>) -> Self {
        self.complex_type.extends = Some(base.into());
        self
    }

    /// Set `abstract`
    pub fn abstract_type(mut self, is_abstract: bool) -> Self {
        self.complex_type.is_abstract = is_abstract;
        self
    }

    /// Set `mixed`
    pub fn mixed(mut self, mixed: bool) -> Self {
        self.complex_type.mixed = mixed;
        self
    }

    /// Set `block`
    pub fn block(mut self, block: impl Into<String>) -> Self {
        self.complex_type.block = Some(block.into());
        self
    }

    /// Set `final`
    pub fn final_derivation(mut self, value: impl Into<String>) -> Self {
        self.complex_type.final_derivation = Some(value.into());
        self
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.complex_type.documentation = Some(documentation.into());
        self
    }

    /// Open an `xs:choice`
    pub fn choice(self) -> ChoiceBuilder<Self> {
        ModelGroupBuilder::new(self)
    }

    /// Open an `xs:sequence` compositor
    pub fn sequence(self) -> SequenceBuilder<Self> {
        ModelGroupBuilder::new(self)
    }

    /// Open an `xs:all`
    pub fn all(self) -> AllBuilder<Self> {
        AllBuilder::new(self)
    }

    /// Open an `xs:any`
    pub fn any(self) -> AnyBuilder<Self> {
        AnyBuilder::new(self)
    }

    /// Open the `xs:anyAttribute` wildcard
    pub fn any_attribute(self) -> AnyAttributeBuilder<Self> {
        AnyAttributeBuilder::new(self)
    }

    /// Open `xs:simpleContent`
    pub fn simple_content(self) -> SimpleContentBuilder<P> {
        SimpleContentBuilder::new(self)
    }

    /// Register the type and return to the document
    pub fn end(self) -> P {
        let mut parent = self.parent;
        parent.schema_mut().insert_complex_type(self.complex_type);
        parent
    }
}

impl<P> CompositorHost for ComplexTypeBuilder<P> {
    fn add_compositor(&mut self, compositor: Compositor) {
        self.complex_type.compositors.push(compositor);
    }
}

impl<P> AnyAttributeHost for ComplexTypeBuilder<P> {
    fn set_any_attribute(&mut self, wildcard: AnyAttribute) {
        self.complex_type.any_attribute = Some(wildcard);
    }
}

/// Builder for `xs:simpleContent`
#[derive(Debug)]
pub struct SimpleContentBuilder<P> {
    parent: ComplexTypeBuilder<P>,
    content: SimpleContent,
}

impl<P: SchemaHost> SimpleContentBuilder<P> {
    fn new(parent: ComplexTypeBuilder<P>) -> Self {
        Self {
            parent,
            content: SimpleContent::default(),
        }
    }

    /// Derive by extension of `base`, replacing any earlier derivation
    pub fn extension(mut self, base: impl Into<QualifiedName>) -> Self {
        self.content.derivation = Some((DerivationKind::Extension, base.into()));
        self
    }

    /// Derive by restriction of `base`, replacing any earlier derivation
    pub fn restriction(mut self, base: impl Into<QualifiedName>) -> Self {
        self.content.derivation = Some((DerivationKind::Restriction, base.into()));
        self
    }

    /// Append an attribute
    pub fn attribute(self, name: impl Into<String>, type_name: impl Into<QualifiedName>) -> Self {
        self.attribute_decl(Attribute::new(name, type_name))
    }

    /// Append a fully configured attribute
    pub fn attribute_decl(mut self, attribute: Attribute) -> Self {
        self.content.attributes.push(attribute);
        self
    }

    /// Attach the content to the complex type and return to it
    pub fn end(self) -> ComplexTypeBuilder<P> {
        let mut parent = self.parent;
        parent.complex_type.simple_content = Some(self.content);
        parent
    }
}
