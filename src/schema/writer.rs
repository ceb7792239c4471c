//! Schema serialization
//!
//! Walks a [`Schema`] and produces the `schema` element of a `types`
//! section. The schema prefix is `xsd` for WSDL 1.1 and `xs` for WSDL 2.0;
//! everything else is identical between the two.

use tracing::trace;

use crate::names::QualifiedName;
use crate::options::GeneratorOptions;
use crate::xml::XmlElement;

use super::complex_types::ComplexType;
use super::compositors::{All, Any, AnyAttribute, Compositor, Particle};
use super::declarations::{Attribute, Documentation, Element, GroupRef, Occurs};
use super::groups::{AttributeGroup, ElementGroup};
use super::identities::IdentityConstraint;
use super::simple_types::{Facets, ListType, SimpleType, UnionType};
use super::Schema;

/// Writes schema declarations under a fixed prefix
#[derive(Debug, Clone)]
pub struct SchemaWriter {
    prefix: String,
}

impl SchemaWriter {
    /// Writer using `prefix` for every schema element
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Writer for WSDL 1.1 documents (`xsd:`)
    pub fn xsd() -> Self {
        Self::new("xsd")
    }

    /// Writer for WSDL 2.0 documents (`xs:`)
    pub fn xs() -> Self {
        Self::new("xs")
    }

    /// Schema prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn el(&self, local: &str) -> XmlElement {
        XmlElement::new(format!("{}:{}", self.prefix, local))
    }

    fn builtin_string(&self) -> String {
        format!("{}:string", self.prefix)
    }

    /// Build the `schema` element for `target_namespace`
    pub fn write_schema(
        &self,
        schema: &Schema,
        target_namespace: &str,
        options: &GeneratorOptions,
    ) -> XmlElement {
        let mut root = self
            .el("schema")
            .attr("targetNamespace", target_namespace)
            .opt_attr("elementFormDefault", options.element_form_default.as_deref());

        for import in schema.imports() {
            root.push(
                self.el("import")
                    .attr("namespace", import.namespace.as_str())
                    .opt_attr("schemaLocation", import.schema_location.as_deref()),
            );
        }
        for include in schema.includes() {
            root.push(
                self.el("include")
                    .attr("schemaLocation", include.schema_location.as_str()),
            );
        }
        for redefine in schema.redefines() {
            root.push(
                self.el("redefine")
                    .attr("schemaLocation", redefine.schema_location.as_str()),
            );
        }

        for group in schema.element_groups().values() {
            trace!(name = group.name(), "writing group");
            root.push(self.element_group(group));
        }
        for group in schema.attribute_groups().values() {
            trace!(name = group.name(), "writing attributeGroup");
            root.push(self.attribute_group(group));
        }
        for simple_type in schema.simple_types().values() {
            trace!(name = simple_type.name(), "writing simpleType");
            root.push(self.simple_type(simple_type));
        }
        for list_type in schema.list_types().values() {
            trace!(name = list_type.name(), "writing list simpleType");
            root.push(self.list_type(list_type));
        }
        for union_type in schema.union_types().values() {
            trace!(name = union_type.name(), "writing union simpleType");
            root.push(self.union_type(union_type));
        }
        for complex_type in schema.complex_types().values() {
            trace!(name = complex_type.name(), "writing complexType");
            root.push(self.complex_type(complex_type));
        }
        for element in schema.elements().values() {
            trace!(name = element.name(), "writing element");
            root.push(self.element(element));
        }

        root
    }

    /// `annotation/documentation`
    pub fn annotation(&self, documentation: &Documentation) -> XmlElement {
        self.el("annotation").child(
            self.el("documentation")
                .opt_attr("xml:lang", documentation.lang())
                .opt_attr("source", documentation.source())
                .text(documentation.text()),
        )
    }

    fn push_annotation(&self, target: &mut XmlElement, documentation: Option<&Documentation>) {
        if let Some(documentation) = documentation {
            target.push(self.annotation(documentation));
        }
    }

    fn occurs(element: XmlElement, occurs: Occurs) -> XmlElement {
        element
            .opt_attr("minOccurs", occurs.min.map(|m| m.to_string()))
            .opt_attr("maxOccurs", occurs.max.map(|m| m.to_string()))
    }

    /// Local or global element declaration
    pub fn element(&self, element: &Element) -> XmlElement {
        let mut node = self
            .el("element")
            .attr("name", element.name())
            .attr("type", element.type_name().qualified());
        node = Self::occurs(node, element.occurs());
        if element.is_nillable() {
            node.set_attribute("nillable", "true");
        }
        if element.is_abstract() {
            node.set_attribute("abstract", "true");
        }
        node = node
            .opt_attr(
                "substitutionGroup",
                element.substitution_group().map(QualifiedName::qualified),
            )
            .opt_attr("block", element.block())
            .opt_attr("final", element.final_derivation())
            .opt_attr("default", element.default_value())
            .opt_attr("fixed", element.fixed())
            .opt_attr("form", element.form());

        self.push_annotation(&mut node, element.documentation());
        for constraint in element.identity_constraints() {
            node.push(self.identity_constraint(constraint));
        }
        node
    }

    fn identity_constraint(&self, constraint: &IdentityConstraint) -> XmlElement {
        let mut node = self
            .el(constraint.kind().as_str())
            .attr("name", constraint.name())
            .opt_attr("refer", constraint.refer().map(QualifiedName::qualified));
        self.push_annotation(&mut node, constraint.documentation());

        if let Some(selector) = constraint.selector() {
            let mut child = self.el("selector").attr("xpath", selector.xpath());
            self.push_annotation(&mut child, selector.documentation());
            node.push(child);
        }
        for field in constraint.fields() {
            let mut child = self.el("field").attr("xpath", field.xpath());
            self.push_annotation(&mut child, field.documentation());
            node.push(child);
        }
        node
    }

    /// Attribute declaration
    pub fn attribute(&self, attribute: &Attribute) -> XmlElement {
        let mut node = self
            .el("attribute")
            .attr("name", attribute.name())
            .attr("type", attribute.type_name().qualified())
            .opt_attr("use", attribute.use_().map(|u| u.as_str()))
            .opt_attr("default", attribute.default_value())
            .opt_attr("fixed", attribute.fixed())
            .opt_attr("form", attribute.form());
        self.push_annotation(&mut node, attribute.documentation());
        node
    }

    fn group_ref(&self, group: &GroupRef) -> XmlElement {
        Self::occurs(
            self.el("group").attr("ref", group.reference().qualified()),
            group.occurs(),
        )
    }

    fn attribute_group_ref(&self, reference: &QualifiedName) -> XmlElement {
        self.el("attributeGroup").attr("ref", reference.qualified())
    }

    fn any_attribute(&self, wildcard: &AnyAttribute) -> XmlElement {
        self.el("anyAttribute")
            .attr("namespace", wildcard.namespace())
            .attr("processContents", wildcard.process_contents().as_str())
    }

    fn any(&self, any: &Any) -> XmlElement {
        let mut node = Self::occurs(
            self.el("any")
                .attr("namespace", any.namespace())
                .attr("processContents", any.process_contents().as_str()),
            any.occurs(),
        );
        self.push_annotation(&mut node, any.documentation());
        node
    }

    fn all(&self, all: &All) -> XmlElement {
        let mut node = Self::occurs(self.el("all"), all.occurs());
        node.extend(all.elements().iter().map(|e| self.element(e)));
        node
    }

    fn particle(&self, particle: &Particle) -> XmlElement {
        match particle {
            Particle::Element(element) => self.element(element),
            Particle::Group(group) => self.group_ref(group),
            Particle::Compositor(compositor) => self.compositor(compositor),
        }
    }

    /// Compositor subtree
    pub fn compositor(&self, compositor: &Compositor) -> XmlElement {
        match compositor {
            Compositor::Sequence(sequence) => {
                let mut node = Self::occurs(self.el("sequence"), sequence.occurs());
                node.extend(sequence.particles().iter().map(|p| self.particle(p)));
                node
            }
            Compositor::Choice(choice) => {
                let mut node = Self::occurs(self.el("choice"), choice.occurs());
                node.extend(choice.particles().iter().map(|p| self.particle(p)));
                node
            }
            Compositor::All(all) => self.all(all),
            Compositor::Any(any) => self.any(any),
        }
    }

    /// Content model: one sequence holding elements, group references and
    /// then compositors; a lone compositor is written bare.
    fn content_model(
        &self,
        elements: &[Element],
        group_refs: &[GroupRef],
        compositors: &[&Compositor],
    ) -> Option<XmlElement> {
        if elements.is_empty() && group_refs.is_empty() {
            return match compositors {
                [] => None,
                [single] => Some(self.compositor(single)),
                many => {
                    let mut sequence = self.el("sequence");
                    sequence.extend(many.iter().map(|c| self.compositor(c)));
                    Some(sequence)
                }
            };
        }

        let mut sequence = self.el("sequence");
        sequence.extend(elements.iter().map(|e| self.element(e)));
        sequence.extend(group_refs.iter().map(|g| self.group_ref(g)));
        sequence.extend(compositors.iter().map(|c| self.compositor(c)));
        Some(sequence)
    }

    /// Named complex type
    pub fn complex_type(&self, complex_type: &ComplexType) -> XmlElement {
        let mut node = self.el("complexType").attr("name", complex_type.name());
        if complex_type.is_abstract() {
            node.set_attribute("abstract", "true");
        }
        if complex_type.is_mixed() {
            node.set_attribute("mixed", "true");
        }
        node = node
            .opt_attr("block", complex_type.block())
            .opt_attr("final", complex_type.final_derivation());
        self.push_annotation(&mut node, complex_type.documentation());

        if let Some(content) = complex_type.simple_content() {
            let (kind, base) = match content.derivation() {
                Some((kind, base)) => (kind.as_str(), base.qualified()),
                None => ("extension", self.builtin_string()),
            };
            let mut derivation = self.el(kind).attr("base", base);
            derivation.extend(content.attributes().iter().map(|a| self.attribute(a)));
            node.push(self.el("simpleContent").child(derivation));
            return node;
        }

        let compositors: Vec<&Compositor> = complex_type.compositors().iter().collect();
        let mut body = Vec::new();
        body.extend(self.content_model(
            complex_type.elements(),
            complex_type.group_refs(),
            &compositors,
        ));
        body.extend(complex_type.attributes().iter().map(|a| self.attribute(a)));
        body.extend(
            complex_type
                .attribute_group_refs()
                .iter()
                .map(|r| self.attribute_group_ref(r)),
        );
        body.extend(complex_type.any_attribute().map(|w| self.any_attribute(w)));

        match complex_type.extends() {
            Some(base) => {
                let mut extension = self.el("extension").attr("base", base.qualified());
                extension.extend(body);
                node.push(self.el("complexContent").child(extension));
            }
            None => node.extend(body),
        }
        node
    }

    /// Named element group
    pub fn element_group(&self, group: &ElementGroup) -> XmlElement {
        let mut node = self.el("group").attr("name", group.name());
        self.push_annotation(&mut node, group.documentation());
        let compositors: Vec<&Compositor> = group.compositor().into_iter().collect();
        let content = self
            .content_model(group.elements(), &[], &compositors)
            .unwrap_or_else(|| self.el("sequence"));
        node.push(content);
        node
    }

    /// Named attribute group
    pub fn attribute_group(&self, group: &AttributeGroup) -> XmlElement {
        let mut node = self.el("attributeGroup").attr("name", group.name());
        self.push_annotation(&mut node, group.documentation());
        node.extend(group.attributes().iter().map(|a| self.attribute(a)));
        node.extend(
            group
                .attribute_group_refs()
                .iter()
                .map(|r| self.attribute_group_ref(r)),
        );
        node.extend(group.any_attribute().map(|w| self.any_attribute(w)));
        node
    }

    fn facets(&self, target: &mut XmlElement, facets: &Facets) {
        let mut facet = |name: &str, value: String| {
            target.push(self.el(name).attr("value", value));
        };
        if let Some(v) = facets.length {
            facet("length", v.to_string());
        }
        if let Some(v) = facets.min_length {
            facet("minLength", v.to_string());
        }
        if let Some(v) = facets.max_length {
            facet("maxLength", v.to_string());
        }
        if let Some(v) = &facets.pattern {
            facet("pattern", v.clone());
        }
        for v in &facets.enumerations {
            facet("enumeration", v.clone());
        }
        if let Some(v) = &facets.white_space {
            facet("whiteSpace", v.clone());
        }
        if let Some(v) = &facets.max_inclusive {
            facet("maxInclusive", v.clone());
        }
        if let Some(v) = &facets.max_exclusive {
            facet("maxExclusive", v.clone());
        }
        if let Some(v) = &facets.min_exclusive {
            facet("minExclusive", v.clone());
        }
        if let Some(v) = &facets.min_inclusive {
            facet("minInclusive", v.clone());
        }
        if let Some(v) = facets.total_digits {
            facet("totalDigits", v.to_string());
        }
        if let Some(v) = facets.fraction_digits {
            facet("fractionDigits", v.to_string());
        }
    }

    /// Named restriction simple type
    pub fn simple_type(&self, simple_type: &SimpleType) -> XmlElement {
        let mut node = self
            .el("simpleType")
            .attr("name", simple_type.name())
            .opt_attr("final", simple_type.final_derivation());
        self.push_annotation(&mut node, simple_type.documentation());

        let base = simple_type
            .base()
            .map(QualifiedName::qualified)
            .unwrap_or_else(|| self.builtin_string());
        let mut restriction = self.el("restriction").attr("base", base);
        self.facets(&mut restriction, simple_type.facets());
        node.push(restriction);
        node
    }

    /// Named list type
    pub fn list_type(&self, list_type: &ListType) -> XmlElement {
        let mut node = self.el("simpleType").attr("name", list_type.name());
        self.push_annotation(&mut node, list_type.documentation());

        let item_type = list_type
            .item_type()
            .map(QualifiedName::qualified)
            .unwrap_or_else(|| self.builtin_string());
        let list = self.el("list").attr("itemType", item_type);

        if list_type.is_restricted() {
            let mut restriction = self.el("restriction").child(self.el("simpleType").child(list));
            self.facets(&mut restriction, list_type.facets());
            node.push(restriction);
        } else {
            node.push(list);
        }
        node
    }

    /// Named union type
    pub fn union_type(&self, union_type: &UnionType) -> XmlElement {
        let mut node = self.el("simpleType").attr("name", union_type.name());
        self.push_annotation(&mut node, union_type.documentation());
        let members: Vec<String> = union_type
            .member_types()
            .iter()
            .map(QualifiedName::qualified)
            .collect();
        node.push(self.el("union").attr("memberTypes", members.join(" ")));
        node
    }
}
