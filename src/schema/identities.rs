//! XSD Identity Constraints
//!
//! - xs:unique - values are unique within scope
//! - xs:key - like unique, but all field values must be present
//! - xs:keyref - references a key/unique constraint (foreign key)
//!
//! Each constraint owns one optional selector and an ordered list of
//! fields. The `refer` target of a keyref is kept as a plain name.

use crate::names::QualifiedName;

use super::declarations::Documentation;
use super::elements::ElementBuilder;
use super::SchemaHost;

/// Kind of identity constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityKind {
    /// `xs:key`
    Key,
    /// `xs:keyref` referring to a key or unique constraint
    KeyRef {
        /// Referenced constraint name
        refer: QualifiedName,
    },
    /// `xs:unique`
    Unique,
}

impl IdentityKind {
    /// Element local name
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityKind::Key => "key",
            IdentityKind::KeyRef { .. } => "keyref",
            IdentityKind::Unique => "unique",
        }
    }
}

/// XPath selector for identity constraints.
/// The selector identifies which elements are subject to the constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    xpath: String,
    documentation: Option<Documentation>,
}

impl Selector {
    /// Create a new selector with the given XPath expression
    pub fn new(xpath: impl Into<String>) -> Self {
        Self {
            xpath: xpath.into(),
            documentation: None,
        }
    }

    /// The XPath expression
    pub fn xpath(&self) -> &str {
        &self.xpath
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }
}

/// XPath field for identity constraints.
/// Fields identify the values that make up the key tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    xpath: String,
    documentation: Option<Documentation>,
}

impl Field {
    /// Create a new field with the given XPath expression
    pub fn new(xpath: impl Into<String>) -> Self {
        Self {
            xpath: xpath.into(),
            documentation: None,
        }
    }

    /// The XPath expression
    pub fn xpath(&self) -> &str {
        &self.xpath
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }
}

/// A key, keyref or unique constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConstraint {
    name: String,
    kind: IdentityKind,
    selector: Option<Selector>,
    fields: Vec<Field>,
    documentation: Option<Documentation>,
}

impl IdentityConstraint {
    /// Create a constraint of the given kind
    pub fn new(name: impl Into<String>, kind: IdentityKind) -> Self {
        Self {
            name: name.into(),
            kind,
            selector: None,
            fields: Vec::new(),
            documentation: None,
        }
    }

    /// Create an `xs:key`
    pub fn key(name: impl Into<String>) -> Self {
        Self::new(name, IdentityKind::Key)
    }

    /// Create an `xs:keyref`
    pub fn keyref(name: impl Into<String>, refer: impl Into<QualifiedName>) -> Self {
        Self::new(
            name,
            IdentityKind::KeyRef {
                refer: refer.into(),
            },
        )
    }

    /// Create an `xs:unique`
    pub fn unique(name: impl Into<String>) -> Self {
        Self::new(name, IdentityKind::Unique)
    }

    /// Set the selector, replacing any earlier one
    pub fn with_selector(mut self, xpath: impl Into<String>) -> Self {
        self.selector = Some(Selector::new(xpath));
        self
    }

    /// Append a field
    pub fn with_field(mut self, xpath: impl Into<String>) -> Self {
        self.fields.push(Field::new(xpath));
        self
    }

    /// Constraint name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Constraint kind
    pub fn kind(&self) -> &IdentityKind {
        &self.kind
    }

    /// `refer` target of a keyref
    pub fn refer(&self) -> Option<&QualifiedName> {
        match &self.kind {
            IdentityKind::KeyRef { refer } => Some(refer),
            _ => None,
        }
    }

    /// Selector, if set
    pub fn selector(&self) -> Option<&Selector> {
        self.selector.as_ref()
    }

    /// Fields in insertion order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }
}

/// Builder for a key, keyref or unique constraint on a global element
#[derive(Debug)]
pub struct IdentityBuilder<P> {
    parent: ElementBuilder<P>,
    constraint: IdentityConstraint,
}

impl<P: SchemaHost> IdentityBuilder<P> {
    pub(crate) fn new(parent: ElementBuilder<P>, constraint: IdentityConstraint) -> Self {
        Self { parent, constraint }
    }

    /// Open the selector, replacing any earlier one on `end()`
    pub fn selector(self, xpath: impl Into<String>) -> SelectorBuilder<P> {
        SelectorBuilder {
            parent: self,
            selector: Selector::new(xpath),
        }
    }

    /// Open a new field
    pub fn field(self, xpath: impl Into<String>) -> FieldBuilder<P> {
        FieldBuilder {
            parent: self,
            field: Field::new(xpath),
        }
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.constraint.documentation = Some(documentation.into());
        self
    }

    /// Attach the constraint to the element and return to it
    pub fn end(self) -> ElementBuilder<P> {
        let mut parent = self.parent;
        parent.push_identity_constraint(self.constraint);
        parent
    }
}

/// Builder for an identity-constraint selector
#[derive(Debug)]
pub struct SelectorBuilder<P> {
    parent: IdentityBuilder<P>,
    selector: Selector,
}

impl<P: SchemaHost> SelectorBuilder<P> {
    /// Replace the XPath expression
    pub fn xpath(mut self, xpath: impl Into<String>) -> Self {
        self.selector.xpath = xpath.into();
        self
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.selector.documentation = Some(documentation.into());
        self
    }

    /// Set the selector on the constraint and return to it
    pub fn end(self) -> IdentityBuilder<P> {
        let mut parent = self.parent;
        parent.constraint.selector = Some(self.selector);
        parent
    }
}

/// Builder for an identity-constraint field
#[derive(Debug)]
pub struct FieldBuilder<P> {
    parent: IdentityBuilder<P>,
    field: Field,
}

impl<P: SchemaHost> FieldBuilder<P> {
    /// Replace the XPath expression
    pub fn xpath(mut self, xpath: impl Into<String>) -> Self {
        self.field.xpath = xpath.into();
        self
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.field.documentation = Some(documentation.into());
        self
    }

    /// Append the field to the constraint and return to it
    pub fn end(self) -> IdentityBuilder<P> {
        let mut parent = self.parent;
        parent.constraint.fields.push(self.field);
        parent
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
    fn test_identity_kind_names() {
        assert_eq!(IdentityKind::Key.as_str(), "key");
        assert_eq!(IdentityConstraint::keyref("r", "tns:k").kind().as_str(), "keyref");
        assert_eq!(IdentityKind::Unique.as_str(), "unique");
    }

    #[test]
    fn test_selector_overwrites_and_fields_append() {
        let host = Host::default()
            .element("Orders", "tns:OrdersType")
            .key("orderKey")
            .selector("./first")
            .end()
            .selector("./order")
            .end()
            .field("@id")
            .end()
            .field("@region")
            .end()
            .end()
            .end();

        let orders = &host.schema.elements()["Orders"];
        let key = &orders.identity_constraints()[0];
        assert_eq!(key.selector().map(|s| s.xpath()), Some("./order"));
        let fields: Vec<&str> = key.fields().iter().map(|f| f.xpath()).collect();
        assert_eq!(fields, vec!["@id", "@region"]);
    }

    #[test]
    fn test_keyref_refer_is_not_resolved() {
        let constraint = IdentityConstraint::keyref("customerRef", "tns:missingKey")
            .with_selector("./order")
            .with_field("@customer");
        assert_eq!(constraint.refer().map(|r| r.as_str()), Some("tns:missingKey"));
        assert_eq!(constraint.fields().len(), 1);
    }
}
