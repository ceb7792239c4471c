//! XSD declaration nodes
//!
//! Leaf values owned by container builders: element and attribute
//! declarations, documentation, group references and occurrence bounds.
//! They are configured with `with_*` calls before being handed to a
//! container and are not modified afterwards.

use std::fmt;

use crate::names::QualifiedName;

use super::identities::IdentityConstraint;

/// Upper occurrence bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxOccurs {
    /// A finite bound
    Bounded(u32),
    /// No upper bound (`unbounded`)
    Unbounded,
}

impl MaxOccurs {
    /// Convert the integer convention used by the builder API: any negative
    /// value (normally `-1`) means unbounded.
    pub fn from_i32(value: i32) -> Self {
        if value < 0 {
            MaxOccurs::Unbounded
        } else {
            MaxOccurs::Bounded(value as u32)
        }
    }

    /// Check for a bound of exactly one
    pub fn is_one(&self) -> bool {
        matches!(self, MaxOccurs::Bounded(1))
    }
}

impl From<i32> for MaxOccurs {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl fmt::Display for MaxOccurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxOccurs::Bounded(n) => write!(f, "{}", n),
            MaxOccurs::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Occurrence bounds; unset bounds are not written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Occurs {
    /// `minOccurs`
    pub min: Option<u32>,
    /// `maxOccurs`
    pub max: Option<MaxOccurs>,
}

impl Occurs {
    /// Create new occurrence bounds
    pub fn new(min: Option<u32>, max: Option<MaxOccurs>) -> Self {
        Self { min, max }
    }

    /// Zero or more (0, unbounded)
    pub fn zero_or_more() -> Self {
        Self::new(Some(0), Some(MaxOccurs::Unbounded))
    }

    /// Optional occurrence (0, 1)
    pub fn optional() -> Self {
        Self::new(Some(0), Some(MaxOccurs::Bounded(1)))
    }

    /// True when neither bound is set
    pub fn is_unset(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// `use` of an attribute declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeUse {
    /// `optional`
    Optional,
    /// `required`
    Required,
    /// `prohibited`
    Prohibited,
}

impl AttributeUse {
    /// Attribute value as written in XSD
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeUse::Optional => "optional",
            AttributeUse::Required => "required",
            AttributeUse::Prohibited => "prohibited",
        }
    }
}

impl fmt::Display for AttributeUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable documentation attached to a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Documentation {
    text: String,
    lang: Option<String>,
    source: Option<String>,
}

impl Documentation {
    /// Create documentation from text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: None,
            source: None,
        }
    }

    /// Set `xml:lang`
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Set the `source` URI
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Documentation text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// `xml:lang` value
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    /// `source` value
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl From<&str> for Documentation {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Documentation {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// `<element>` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    type_name: QualifiedName,
    occurs: Occurs,
    nillable: bool,
    is_abstract: bool,
    substitution_group: Option<QualifiedName>,
    block: Option<String>,
    final_derivation: Option<String>,
    default: Option<String>,
    fixed: Option<String>,
    form: Option<String>,
    documentation: Option<Documentation>,
    identity_constraints: Vec<IdentityConstraint>,
}

impl Element {
    /// Create an element declaration with a name and type reference
    pub fn new(name: impl Into<String>, type_name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            occurs: Occurs::default(),
            nillable: false,
            is_abstract: false,
            substitution_group: None,
            block: None,
            final_derivation: None,
            default: None,
            fixed: None,
            form: None,
            documentation: None,
            identity_constraints: Vec::new(),
        }
    }

    /// Set `minOccurs`
    pub fn with_min_occurs(mut self, min: u32) -> Self {
        self.occurs.min = Some(min);
        self
    }

    /// Set `maxOccurs`; `-1` means unbounded
    pub fn with_max_occurs(mut self, max: i32) -> Self {
        self.occurs.max = Some(MaxOccurs::from_i32(max));
        self
    }

    /// Set both bounds at once
    pub fn with_occurs(mut self, occurs: Occurs) -> Self {
        self.occurs = occurs;
        self
    }

    /// Set `nillable`
    pub fn with_nillable(mut self, nillable: bool) -> Self {
        self.nillable = nillable;
        self
    }

    /// Set `abstract`
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Set `substitutionGroup`
    pub fn with_substitution_group(mut self, head: impl Into<QualifiedName>) -> Self {
        self.substitution_group = Some(head.into());
        self
    }

    /// Set `block` (`#all`, `extension`, `restriction`, `substitution`)
    pub fn with_block(mut self, block: impl Into<String>) -> Self {
        self.block = Some(block.into());
        self
    }

    /// Set `final`
    pub fn with_final(mut self, value: impl Into<String>) -> Self {
        self.final_derivation = Some(value.into());
        self
    }

    /// Set `default`
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set `fixed`
    pub fn with_fixed(mut self, value: impl Into<String>) -> Self {
        self.fixed = Some(value.into());
        self
    }

    /// Set `form` (`qualified` / `unqualified`)
    pub fn with_form(mut self, form: impl Into<String>) -> Self {
        self.form = Some(form.into());
        self
    }

    /// Attach documentation
    pub fn with_documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Attach an identity constraint
    pub fn with_identity_constraint(mut self, constraint: IdentityConstraint) -> Self {
        self.identity_constraints.push(constraint);
        self
    }

    pub(crate) fn push_identity_constraint(&mut self, constraint: IdentityConstraint) {
        self.identity_constraints.push(constraint);
    }

    pub(crate) fn set_nillable(&mut self, nillable: bool) {
        self.nillable = nillable;
    }

    pub(crate) fn set_abstract(&mut self, is_abstract: bool) {
        self.is_abstract = is_abstract;
    }

    pub(crate) fn set_substitution_group(&mut self, head: QualifiedName) {
        self.substitution_group = Some(head);
    }

    pub(crate) fn set_block(&mut self, block: String) {
        self.block = Some(block);
    }

    pub(crate) fn set_final(&mut self, value: String) {
        self.final_derivation = Some(value);
    }

    pub(crate) fn set_default(&mut self, value: String) {
        self.default = Some(value);
    }

    pub(crate) fn set_fixed(&mut self, value: String) {
        self.fixed = Some(value);
    }

    pub(crate) fn set_documentation(&mut self, documentation: Documentation) {
        self.documentation = Some(documentation);
    }

    /// Element name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type reference
    pub fn type_name(&self) -> &QualifiedName {
        &self.type_name
    }

    /// Occurrence bounds
    pub fn occurs(&self) -> Occurs {
        self.occurs
    }

    /// `minOccurs`, if set
    pub fn min_occurs(&self) -> Option<u32> {
        self.occurs.min
    }

    /// `maxOccurs`, if set
    pub fn max_occurs(&self) -> Option<MaxOccurs> {
        self.occurs.max
    }

    /// `nillable`
    pub fn is_nillable(&self) -> bool {
        self.nillable
    }

    /// `abstract`
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// `substitutionGroup`
    pub fn substitution_group(&self) -> Option<&QualifiedName> {
        self.substitution_group.as_ref()
    }

    /// `block`
    pub fn block(&self) -> Option<&str> {
        self.block.as_deref()
    }

    /// `final`
    pub fn final_derivation(&self) -> Option<&str> {
        self.final_derivation.as_deref()
    }

    /// `default`
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// `fixed`
    pub fn fixed(&self) -> Option<&str> {
        self.fixed.as_deref()
    }

    /// `form`
    pub fn form(&self) -> Option<&str> {
        self.form.as_deref()
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    /// Identity constraints in declaration order
    pub fn identity_constraints(&self) -> &[IdentityConstraint] {
        &self.identity_constraints
    }
}

/// `<attribute>` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    type_name: QualifiedName,
    use_: Option<AttributeUse>,
    default: Option<String>,
    fixed: Option<String>,
    form: Option<String>,
    documentation: Option<Documentation>,
}

impl Attribute {
    /// Create an attribute declaration
    pub fn new(name: impl Into<String>, type_name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            use_: None,
            default: None,
            fixed: None,
            form: None,
            documentation: None,
        }
    }

    /// Shorthand for a `use="required"` attribute
    pub fn required(name: impl Into<String>, type_name: impl Into<QualifiedName>) -> Self {
        Self::new(name, type_name).with_use(AttributeUse::Required)
    }

    /// Set `use`
    pub fn with_use(mut self, use_: AttributeUse) -> Self {
        self.use_ = Some(use_);
        self
    }

    /// Set `default`
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set `fixed`
    pub fn with_fixed(mut self, value: impl Into<String>) -> Self {
        self.fixed = Some(value.into());
        self
    }

    /// Set `form`
    pub fn with_form(mut self, form: impl Into<String>) -> Self {
        self.form = Some(form.into());
        self
    }

    /// Attach documentation
    pub fn with_documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Attribute name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type reference
    pub fn type_name(&self) -> &QualifiedName {
        &self.type_name
    }

    /// `use`, if set
    pub fn use_(&self) -> Option<AttributeUse> {
        self.use_
    }

    /// `default`
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// `fixed`
    pub fn fixed(&self) -> Option<&str> {
        self.fixed.as_deref()
    }

    /// `form`
    pub fn form(&self) -> Option<&str> {
        self.form.as_deref()
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }
}

/// `<group ref="..."/>` particle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRef {
    reference: QualifiedName,
    occurs: Occurs,
}

impl GroupRef {
    /// Reference a named element group
    pub fn new(reference: impl Into<QualifiedName>) -> Self {
        Self {
            reference: reference.into(),
            occurs: Occurs::default(),
        }
    }

    /// Set occurrence bounds
    pub fn with_occurs(mut self, occurs: Occurs) -> Self {
        self.occurs = occurs;
        self
    }

    /// Referenced group
    pub fn reference(&self) -> &QualifiedName {
        &self.reference
    }

    /// Occurrence bounds
    pub fn occurs(&self) -> Occurs {
        self.occurs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_occurs_sentinel() {
        assert_eq!(MaxOccurs::from_i32(-1), MaxOccurs::Unbounded);
        assert_eq!(MaxOccurs::from_i32(3), MaxOccurs::Bounded(3));
        assert_eq!(MaxOccurs::Unbounded.to_string(), "unbounded");
        assert_eq!(MaxOccurs::Bounded(1).to_string(), "1");
    }

    #[test]
    fn test_element_defaults() {
        let element = Element::new("id", "xsd:int");
        assert_eq!(element.name(), "id");
        assert_eq!(element.type_name().as_str(), "xsd:int");
        assert!(element.occurs().is_unset());
        assert!(!element.is_nillable());
        assert!(element.block().is_none());
    }

    #[test]
    fn test_element_configuration() {
        let element = Element::new("tags", "xsd:string")
            .with_min_occurs(0)
            .with_max_occurs(-1)
            .with_nillable(true)
            .with_substitution_group("tns:head")
            .with_block("#all");

        assert_eq!(element.min_occurs(), Some(0));
        assert_eq!(element.max_occurs(), Some(MaxOccurs::Unbounded));
        assert!(element.is_nillable());
        assert_eq!(element.substitution_group().map(|q| q.as_str()), Some("tns:head"));
        assert_eq!(element.block(), Some("#all"));
    }

    #[test]
    fn test_attribute_required() {
        let attr = Attribute::required("id", "xsd:ID");
        assert_eq!(attr.use_(), Some(AttributeUse::Required));
        assert_eq!(attr.use_().map(|u| u.as_str()), Some("required"));
    }

    #[test]
    fn test_documentation_builder() {
        let doc = Documentation::new("A user").with_lang("en");
        assert_eq!(doc.text(), "A user");
        assert_eq!(doc.lang(), Some("en"));
        assert_eq!(doc.source(), None);
    }
}
