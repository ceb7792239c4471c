//! XSD compositors and wildcards
//!
//! - `xs:sequence` / `xs:choice` - ordered or alternative particles, nestable
//! - `xs:all` - unordered elements, each at most once
//! - `xs:any` / `xs:anyAttribute` - wildcards
//!
//! Reference: https://www.w3.org/TR/xmlschema-1/#Model_Groups

use std::fmt;

use crate::error::{Error, Result};
use crate::names::QualifiedName;

use super::declarations::{Documentation, Element, GroupRef, MaxOccurs, Occurs};

/// Default wildcard namespace constraint
pub const ANY_NAMESPACE: &str = "##any";

/// Process contents mode for wildcards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessContents {
    /// Validate strictly - element/attribute must be declared
    #[default]
    Strict,
    /// Validate if declaration found, otherwise accept
    Lax,
    /// Skip validation entirely
    Skip,
}

impl ProcessContents {
    /// Parse from string value
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "strict" => Ok(Self::Strict),
            "lax" => Ok(Self::Lax),
            "skip" => Ok(Self::Skip),
            _ => Err(Error::invalid_argument(
                "processContents must be one of: strict, lax, skip",
            )),
        }
    }

    /// Attribute value as written in XSD
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lax => "lax",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for ProcessContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model-group member
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Particle {
    /// Local element declaration
    Element(Element),
    /// Reference to a named element group
    Group(GroupRef),
    /// Nested compositor
    Compositor(Compositor),
}

/// A compositor attached to a complex type, group or outer compositor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compositor {
    /// `xs:sequence`
    Sequence(Sequence),
    /// `xs:choice`
    Choice(Choice),
    /// `xs:all`
    All(All),
    /// `xs:any`
    Any(Any),
}

/// `xs:choice`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Choice {
    occurs: Occurs,
    particles: Vec<Particle>,
}

impl Choice {
    /// Occurrence bounds of the choice itself
    pub fn occurs(&self) -> Occurs {
        self.occurs
    }

    /// Alternatives in insertion order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

/// `xs:sequence`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    occurs: Occurs,
    particles: Vec<Particle>,
}

impl Sequence {
    /// Occurrence bounds of the sequence itself
    pub fn occurs(&self) -> Occurs {
        self.occurs
    }

    /// Members in insertion order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

/// Shared shape of `xs:choice` and `xs:sequence`
pub trait ModelGroup: Default {
    /// Mutable access to the members
    fn particles_mut(&mut self) -> &mut Vec<Particle>;

    /// Mutable access to the occurrence bounds
    fn occurs_mut(&mut self) -> &mut Occurs;

    /// Wrap into a compositor
    fn into_compositor(self) -> Compositor;
}

impl ModelGroup for Choice {
    fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    fn occurs_mut(&mut self) -> &mut Occurs {
        &mut self.occurs
    }

    fn into_compositor(self) -> Compositor {
        Compositor::Choice(self)
    }
}

impl ModelGroup for Sequence {
    fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    fn occurs_mut(&mut self) -> &mut Occurs {
        &mut self.occurs
    }

    fn into_compositor(self) -> Compositor {
        Compositor::Sequence(self)
    }
}

/// `xs:all`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct All {
    occurs: Occurs,
    elements: Vec<Element>,
}

impl All {
    /// Add an element, enforcing the XSD 1.0 cardinality rules for `<all>`
    pub fn add_element(&mut self, element: Element) -> Result<()> {
        if let Some(min) = element.min_occurs() {
            if min > 1 {
                return Err(Error::invalid_argument(
                    "Elements in <all> can only have minOccurs 0 or 1",
                ));
            }
        }
        if let Some(max) = element.max_occurs() {
            if !max.is_one() {
                return Err(Error::invalid_argument(
                    "Elements in <all> can only have maxOccurs 1",
                ));
            }
        }
        self.elements.push(element);
        Ok(())
    }

    /// Occurrence bounds of the group itself
    pub fn occurs(&self) -> Occurs {
        self.occurs
    }

    /// Member elements in insertion order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

/// `xs:any` element wildcard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Any {
    namespace: String,
    process_contents: ProcessContents,
    occurs: Occurs,
    documentation: Option<Documentation>,
}

impl Default for Any {
    fn default() -> Self {
        Self {
            namespace: ANY_NAMESPACE.to_string(),
            process_contents: ProcessContents::Strict,
            occurs: Occurs::default(),
            documentation: None,
        }
    }
}

impl Any {
    /// Namespace constraint (`##any`, `##other`, `##local`, URI list...)
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `processContents`
    pub fn process_contents(&self) -> ProcessContents {
        self.process_contents
    }

    /// Occurrence bounds
    pub fn occurs(&self) -> Occurs {
        self.occurs
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }
}

/// `xs:anyAttribute` wildcard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnyAttribute {
    namespace: String,
    process_contents: ProcessContents,
}

impl Default for AnyAttribute {
    fn default() -> Self {
        Self {
            namespace: ANY_NAMESPACE.to_string(),
            process_contents: ProcessContents::Strict,
        }
    }
}

impl AnyAttribute {
    /// Namespace constraint
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `processContents`
    pub fn process_contents(&self) -> ProcessContents {
        self.process_contents
    }
}

/// Builders that accept a finished compositor
pub trait CompositorHost {
    /// Take ownership of a finished compositor
    fn add_compositor(&mut self, compositor: Compositor);
}

/// Builders that accept a finished `anyAttribute`
pub trait AnyAttributeHost {
    /// Take ownership of a finished wildcard
    fn set_any_attribute(&mut self, wildcard: AnyAttribute);
}

/// Builder for `xs:choice` / `xs:sequence`
#[derive(Debug)]
pub struct ModelGroupBuilder<P, G> {
    parent: P,
    group: G,
}

/// Builder for `xs:choice`
pub type ChoiceBuilder<P> = ModelGroupBuilder<P, Choice>;

/// Builder for `xs:sequence`
pub type SequenceBuilder<P> = ModelGroupBuilder<P, Sequence>;

impl<P: CompositorHost, G: ModelGroup> ModelGroupBuilder<P, G> {
    pub(crate) fn new(parent: P) -> Self {
        Self {
            parent,
            group: G::default(),
        }
    }

    /// Add an element member
    pub fn element(self, name: impl Into<String>, type_name: impl Into<QualifiedName>) -> Self {
        self.element_decl(Element::new(name, type_name))
    }

    /// Add a fully configured element member
    pub fn element_decl(mut self, element: Element) -> Self {
        self.group.particles_mut().push(Particle::Element(element));
        self
    }

    /// Add a reference to a named element group
    pub fn group_ref(mut self, reference: impl Into<QualifiedName>) -> Self {
        self.group
            .particles_mut()
            .push(Particle::Group(GroupRef::new(reference)));
        self
    }

    /// Set `minOccurs` on the compositor
    pub fn min_occurs(mut self, min: u32) -> Self {
        self.group.occurs_mut().min = Some(min);
        self
    }

    /// Set `maxOccurs` on the compositor; `-1` means unbounded
    pub fn max_occurs(mut self, max: i32) -> Self {
        self.group.occurs_mut().max = Some(MaxOccurs::from_i32(max));
        self
    }

    /// Open a nested `xs:choice`
    pub fn choice(self) -> ChoiceBuilder<Self> {
        ModelGroupBuilder::new(self)
    }

    /// Open a nested `xs:sequence`
    pub fn sequence(self) -> SequenceBuilder<Self> {
        ModelGroupBuilder::new(self)
    }

    /// Open a nested `xs:any`
    pub fn any(self) -> AnyBuilder<Self> {
        AnyBuilder::new(self)
    }

    /// Finish the compositor and return to the parent
    pub fn end(self) -> P {
        let mut parent = self.parent;
        parent.add_compositor(self.group.into_compositor());
        parent
    }
}

impl<P, G: ModelGroup> CompositorHost for ModelGroupBuilder<P, G> {
    fn add_compositor(&mut self, compositor: Compositor) {
        self.group
            .particles_mut()
            .push(Particle::Compositor(compositor));
    }
}

/// Builder for `xs:all`
#[derive(Debug)]
pub struct AllBuilder<P> {
    parent: P,
    all: All,
}

impl<P: CompositorHost> AllBuilder<P> {
    pub(crate) fn new(parent: P) -> Self {
        Self {
            parent,
            all: All::default(),
        }
    }

    /// Add an element without explicit bounds
    pub fn element(mut self, name: impl Into<String>, type_name: impl Into<QualifiedName>) -> Self {
        self.all.elements.push(Element::new(name, type_name));
        self
    }

    /// Add a configured element; fails on cardinality not allowed in `<all>`
    pub fn element_decl(mut self, element: Element) -> Result<Self> {
        self.all.add_element(element)?;
        Ok(self)
    }

    /// Set `minOccurs` on the group
    pub fn min_occurs(mut self, min: u32) -> Self {
        self.all.occurs.min = Some(min);
        self
    }

    /// Set `maxOccurs` on the group
    pub fn max_occurs(mut self, max: i32) -> Self {
        self.all.occurs.max = Some(MaxOccurs::from_i32(max));
        self
    }

    /// Finish the group and return to the parent
    pub fn end(self) -> P {
        let mut parent = self.parent;
        parent.add_compositor(Compositor::All(self.all));
        parent
    }
}

/// Builder for `xs:any`
#[derive(Debug)]
pub struct AnyBuilder<P> {
    parent: P,
    any: Any,
}

impl<P: CompositorHost> AnyBuilder<P> {
    pub(crate) fn new(parent: P) -> Self {
        Self {
            parent,
            any: Any::default(),
        }
    }

    /// Set the namespace constraint
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.any.namespace = namespace.into();
        self
    }

    /// Set `processContents`; only `strict`, `lax` and `skip` are accepted
    pub fn process_contents(mut self, value: &str) -> Result<Self> {
        self.any.process_contents = ProcessContents::parse(value)?;
        Ok(self)
    }

    /// Set `minOccurs`
    pub fn min_occurs(mut self, min: u32) -> Self {
        self.any.occurs.min = Some(min);
        self
    }

    /// Set `maxOccurs`; `-1` means unbounded
    pub fn max_occurs(mut self, max: i32) -> Self {
        self.any.occurs.max = Some(MaxOccurs::from_i32(max));
        self
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.any.documentation = Some(documentation.into());
        self
    }

    /// Finish the wildcard and return to the parent
    pub fn end(self) -> P {
        let mut parent = self.parent;
        parent.add_compositor(Compositor::Any(self.any));
        parent
    }
}

/// Builder for `xs:anyAttribute`
#[derive(Debug)]
pub struct AnyAttributeBuilder<P> {
    parent: P,
    wildcard: AnyAttribute,
}

impl<P: AnyAttributeHost> AnyAttributeBuilder<P> {
    pub(crate) fn new(parent: P) -> Self {
        Self {
            parent,
            wildcard: AnyAttribute::default(),
        }
    }

    /// Set the namespace constraint
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.wildcard.namespace = namespace.into();
        self
    }

    /// Set `processContents`; only `strict`, `lax` and `skip` are accepted
    pub fn process_contents(mut self, value: &str) -> Result<Self> {
        self.wildcard.process_contents = ProcessContents::parse(value)?;
        Ok(self)
    }

    /// Finish the wildcard and return to the parent
    pub fn end(self) -> P {
        let mut parent = self.parent;
        parent.set_any_attribute(self.wildcard);
        parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Collector {
        compositors: Vec<Compositor>,
    }

    impl CompositorHost for Collector {
        fn add_compositor(&mut self, compositor: Compositor) {
            self.compositors.push(compositor);
        }
    }

    #[test]
    fn test_process_contents_parse() {
        assert_eq!(ProcessContents::parse("lax").unwrap(), ProcessContents::Lax);
        let err = ProcessContents::parse("loose").unwrap_err();
        assert_eq!(
            err.message(),
            "processContents must be one of: strict, lax, skip"
        );
    }

    #[test]
    fn test_any_defaults() {
        let collector = AnyBuilder::new(Collector::default()).end();
        match &collector.compositors[0] {
            Compositor::Any(any) => {
                assert_eq!(any.namespace(), "##any");
                assert_eq!(any.process_contents(), ProcessContents::Strict);
            }
            other => panic!("unexpected compositor: {:?}", other),
        }
    }

    #[test]
    fn test_all_rejects_min_occurs_above_one() {
        let err = AllBuilder::new(Collector::default())
            .element_decl(Element::new("a", "xsd:string").with_min_occurs(2))
            .unwrap_err();
        assert!(err.to_string().contains("minOccurs 0 or 1"));
    }

    #[test]
    fn test_all_rejects_unbounded() {
        let err = AllBuilder::new(Collector::default())
            .element_decl(Element::new("a", "xsd:string").with_max_occurs(-1))
            .unwrap_err();
        assert!(err.to_string().contains("maxOccurs 1"));
    }

    #[test]
    fn test_all_accepts_optional_element() {
        let collector = AllBuilder::new(Collector::default())
            .element_decl(
                Element::new("a", "xsd:string")
                    .with_min_occurs(0)
                    .with_max_occurs(1),
            )
            .unwrap()
            .element("b", "xsd:int")
            .end();
        match &collector.compositors[0] {
            Compositor::All(all) => assert_eq!(all.elements().len(), 2),
            other => panic!("unexpected compositor: {:?}", other),
        }
    }

    #[test]
    fn test_nested_choice_in_sequence() {
        let collector = SequenceBuilder::new(Collector::default())
            .element("id", "xsd:int")
            .choice()
            .element("email", "xsd:string")
            .element("phone", "xsd:string")
            .end()
            .end();

        let sequence = match &collector.compositors[0] {
            Compositor::Sequence(s) => s,
            other => panic!("unexpected compositor: {:?}", other),
        };
        assert_eq!(sequence.particles().len(), 2);
        match &sequence.particles()[1] {
            Particle::Compositor(Compositor::Choice(choice)) => {
                assert_eq!(choice.particles().len(), 2)
            }
            other => panic!("unexpected particle: {:?}", other),
        }
    }
}
