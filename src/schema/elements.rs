//! Global element declarations

use crate::names::QualifiedName;

use super::declarations::{Documentation, Element};
use super::identities::{IdentityBuilder, IdentityConstraint};
use super::SchemaHost;

/// Builder for a top-level `xs:element`
#[derive(Debug)]
pub struct ElementBuilder<P> {
    parent: P,
    element: Element,
}

impl<P: SchemaHost> ElementBuilder<P> {
    pub(crate) fn new(parent: P, element: Element) -> Self {
        Self { parent, element }
    }

    /// Set `nillable`
    pub fn nillable(mut self, nillable: bool) -> Self {
        self.element.set_nillable(nillable);
        self
    }

    /// Set `abstract`
    pub fn abstract_element(mut self, is_abstract: bool) -> Self {
        self.element.set_abstract(is_abstract);
        self
    }

    /// Set `substitutionGroup`
    pub fn substitution_group(mut self, head: impl Into<QualifiedName>) -> Self {
        self.element.set_substitution_group(head.into());
        self
    }

    /// Set `block`
    pub fn block(mut self, block: impl Into<String>) -> Self {
        self.element.set_block(block.into());
        self
    }

    /// Set `final`
    pub fn final_derivation(mut self, value: impl Into<String>) -> Self {
        self.element.set_final(value.into());
        self
    }

    /// Set `default`
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.element.set_default(value.into());
        self
    }

    /// Set `fixed`
    pub fn fixed(mut self, value: impl Into<String>) -> Self {
        self.element.set_fixed(value.into());
        self
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.element.set_documentation(documentation.into());
        self
    }

    /// Open an `xs:key`
    pub fn key(self, name: impl Into<String>) -> IdentityBuilder<P> {
        IdentityBuilder::new(self, IdentityConstraint::key(name))
    }

    /// Open an `xs:keyref` referring to `refer`
    pub fn keyref(
        self,
        name: impl Into<String>,
        refer: impl Into<QualifiedName>,
    ) -> IdentityBuilder<P> {
        IdentityBuilder::new(self, IdentityConstraint::keyref(name, refer))
    }

    /// Open an `xs:unique`
    pub fn unique(self, name: impl Into<String>) -> IdentityBuilder<P> {
        IdentityBuilder::new(self, IdentityConstraint::unique(name))
    }

    pub(crate) fn push_identity_constraint(&mut self, constraint: IdentityConstraint) {
        self.element.push_identity_constraint(constraint);
    }

    /// Register the element and return to the document
    pub fn end(self) -> P {
        let mut parent = self.parent;
        parent.schema_mut().insert_element(self.element);
        parent
    }
}
