//! WS-Policy 1.5 attachment
//!
//! Policies are trees of operators (`ExactlyOne`, `All`) over assertions.
//! Documents, bindings, binding operations and services carry their own
//! policies and policy references through [`PolicyAttachable`].
//!
//! Assertions are plain records: the WS-* vocabulary modules in
//! [`crate::extensions`] only decide which records to create.

use tracing::debug;

use crate::namespaces::{NamespaceDeclarations, WSP_NS, WSU_NS};
use crate::xml::XmlElement;

/// A single policy assertion such as `sp:TransportBinding`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    prefix: String,
    namespace: String,
    local_name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    optional: bool,
    ignorable: bool,
    children: Vec<Assertion>,
    nested_policy: Option<Vec<PolicyItem>>,
}

impl Assertion {
    /// Create an assertion `prefix:local_name` in `namespace`
    pub fn new(
        prefix: impl Into<String>,
        namespace: impl Into<String>,
        local_name: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            namespace: namespace.into(),
            local_name: local_name.into(),
            attributes: Vec::new(),
            text: None,
            optional: false,
            ignorable: false,
            children: Vec::new(),
            nested_policy: None,
        }
    }

    /// Add an attribute; attribute names are written as given
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Mark as `wsp:Optional="true"`
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Mark as `wsp:Ignorable="true"`
    pub fn ignorable(mut self, ignorable: bool) -> Self {
        self.ignorable = ignorable;
        self
    }

    /// Append a child element (not wrapped in a nested policy)
    pub fn with_child(mut self, child: Assertion) -> Self {
        self.children.push(child);
        self
    }

    /// Append assertions to the nested `wsp:Policy`, creating it if needed
    pub fn with_nested<I>(mut self, assertions: I) -> Self
    where
        I: IntoIterator<Item = Assertion>,
    {
        self.nested_policy
            .get_or_insert_with(Vec::new)
            .extend(assertions.into_iter().map(PolicyItem::Assertion));
        self
    }

    /// Add an empty nested `wsp:Policy` when none exists yet
    pub fn with_empty_nested_policy(mut self) -> Self {
        self.nested_policy.get_or_insert_with(Vec::new);
        self
    }

    /// Append one item to the nested `wsp:Policy`
    pub fn with_nested_item(mut self, item: PolicyItem) -> Self {
        self.nested_policy.get_or_insert_with(Vec::new).push(item);
        self
    }

    /// Namespace prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Namespace URI
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Local name
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// `prefix:local_name`
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.prefix, self.local_name)
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Look up an attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Text content
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// `wsp:Optional`
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// `wsp:Ignorable`
    pub fn is_ignorable(&self) -> bool {
        self.ignorable
    }

    /// Direct child elements
    pub fn children(&self) -> &[Assertion] {
        &self.children
    }

    /// Items of the nested policy, if present
    pub fn nested_policy(&self) -> Option<&[PolicyItem]> {
        self.nested_policy.as_deref()
    }

    /// Find a nested-policy assertion by local name, searching operators too
    pub fn find_nested(&self, local_name: &str) -> Option<&Assertion> {
        self.nested_policy()
            .and_then(|items| find_assertion(items, local_name))
    }
}

fn find_assertion<'a>(items: &'a [PolicyItem], local_name: &str) -> Option<&'a Assertion> {
    items.iter().find_map(|item| match item {
        PolicyItem::Assertion(a) if a.local_name() == local_name => Some(a),
        PolicyItem::ExactlyOne(inner) | PolicyItem::All(inner) => {
            find_assertion(inner, local_name)
        }
        _ => None,
    })
}

/// Member of a policy or policy operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyItem {
    /// Domain assertion
    Assertion(Assertion),
    /// `wsp:ExactlyOne`
    ExactlyOne(Vec<PolicyItem>),
    /// `wsp:All`
    All(Vec<PolicyItem>),
    /// `wsp:PolicyReference`
    Reference(PolicyReference),
}

/// `wsp:PolicyReference`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyReference {
    uri: String,
    digest: Option<String>,
    digest_algorithm: Option<String>,
}

impl PolicyReference {
    /// Reference the policy at `uri` (often `#id`)
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            digest: None,
            digest_algorithm: None,
        }
    }

    /// Set `Digest`
    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }

    /// Set `DigestAlgorithm`
    pub fn with_digest_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.digest_algorithm = Some(algorithm.into());
        self
    }

    /// `URI`
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// `Digest`
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// `DigestAlgorithm`
    pub fn digest_algorithm(&self) -> Option<&str> {
        self.digest_algorithm.as_deref()
    }
}

/// A named `wsp:Policy`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    id: String,
    name: Option<String>,
    items: Vec<PolicyItem>,
}

impl Policy {
    /// Create an empty policy with a `wsu:Id`
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
            items: Vec::new(),
        }
    }

    /// `wsu:Id`
    pub fn id(&self) -> &str {
        &self.id
    }

    /// `Name`
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Top-level items
    pub fn items(&self) -> &[PolicyItem] {
        &self.items
    }

    /// Append an item
    pub fn push(&mut self, item: PolicyItem) {
        self.items.push(item);
    }

    /// Find an assertion by local name anywhere under the top-level operators
    pub fn find_assertion(&self, local_name: &str) -> Option<&Assertion> {
        find_assertion(&self.items, local_name)
    }
}

/// Policies and references attached to one WSDL component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyAttachments {
    policies: Vec<Policy>,
    references: Vec<PolicyReference>,
}

impl PolicyAttachments {
    /// Attached policies in insertion order
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    /// Attached references in insertion order
    pub fn references(&self) -> &[PolicyReference] {
        &self.references
    }

    /// True when nothing is attached
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty() && self.references.is_empty()
    }

    /// Attach a finished policy
    pub fn add_policy(&mut self, policy: Policy) {
        self.policies.push(policy);
    }

    /// Attach a policy reference
    pub fn add_reference(&mut self, reference: PolicyReference) {
        self.references.push(reference);
    }
}

/// Components that can carry WS-Policy attachments
pub trait PolicyAttachable: Sized {
    /// Attachment storage
    fn attachments(&self) -> &PolicyAttachments;

    /// Mutable attachment storage
    fn attachments_mut(&mut self) -> &mut PolicyAttachments;

    /// Start an inline `wsp:Policy` with the given `wsu:Id`
    fn policy(self, id: impl Into<String>, name: Option<&str>) -> PolicyBuilder<Self> {
        PolicyBuilder::new(self, Policy::new(id, name.map(String::from)))
    }

    /// Attach a `wsp:PolicyReference`
    fn policy_reference(
        mut self,
        uri: impl Into<String>,
        digest: Option<&str>,
        digest_algorithm: Option<&str>,
    ) -> Self {
        let mut reference = PolicyReference::new(uri);
        reference.digest = digest.map(String::from);
        reference.digest_algorithm = digest_algorithm.map(String::from);
        self.attachments_mut().add_reference(reference);
        self
    }

    /// Attached policies
    fn policies(&self) -> &[Policy] {
        self.attachments().policies()
    }

    /// Attached policy references
    fn policy_references(&self) -> &[PolicyReference] {
        self.attachments().references()
    }
}

/// Builders that collect policy items
pub trait PolicyItemHost {
    /// Take ownership of a finished item
    fn push_policy_item(&mut self, item: PolicyItem);
}

/// Builder for a top-level `wsp:Policy`
#[derive(Debug)]
pub struct PolicyBuilder<P> {
    parent: P,
    policy: Policy,
}

impl<P: PolicyAttachable> PolicyBuilder<P> {
    fn new(parent: P, policy: Policy) -> Self {
        Self { parent, policy }
    }

    /// Append an assertion
    pub fn assertion(mut self, assertion: Assertion) -> Self {
        self.policy.push(PolicyItem::Assertion(assertion));
        self
    }

    /// Append several assertions
    pub fn assertions<I>(mut self, assertions: I) -> Self
    where
        I: IntoIterator<Item = Assertion>,
    {
        self.policy
            .items
            .extend(assertions.into_iter().map(PolicyItem::Assertion));
        self
    }

    /// Append a nested `wsp:PolicyReference`
    pub fn reference(mut self, uri: impl Into<String>) -> Self {
        self.policy
            .push(PolicyItem::Reference(PolicyReference::new(uri)));
        self
    }

    /// Open a `wsp:ExactlyOne`
    pub fn exactly_one(self) -> PolicyOperatorBuilder<Self> {
        PolicyOperatorBuilder::new(self, OperatorKind::ExactlyOne)
    }

    /// Open a `wsp:All`
    pub fn all(self) -> PolicyOperatorBuilder<Self> {
        PolicyOperatorBuilder::new(self, OperatorKind::All)
    }

    /// Attach the policy and return to the component
    pub fn end(self) -> P {
        let mut parent = self.parent;
        parent.attachments_mut().add_policy(self.policy);
        parent
    }
}

impl<P> PolicyItemHost for PolicyBuilder<P> {
    fn push_policy_item(&mut self, item: PolicyItem) {
        self.policy.push(item);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperatorKind {
    ExactlyOne,
    All,
}

/// Builder for `wsp:ExactlyOne` / `wsp:All`
#[derive(Debug)]
pub struct PolicyOperatorBuilder<P> {
    parent: P,
    kind: OperatorKind,
    items: Vec<PolicyItem>,
}

impl<P: PolicyItemHost> PolicyOperatorBuilder<P> {
    fn new(parent: P, kind: OperatorKind) -> Self {
        Self {
            parent,
            kind,
            items: Vec::new(),
        }
    }

    /// Append an assertion
    pub fn assertion(mut self, assertion: Assertion) -> Self {
        self.items.push(PolicyItem::Assertion(assertion));
        self
    }

    /// Append several assertions
    pub fn assertions<I>(mut self, assertions: I) -> Self
    where
        I: IntoIterator<Item = Assertion>,
    {
        self.items
            .extend(assertions.into_iter().map(PolicyItem::Assertion));
        self
    }

    /// Append a `wsp:PolicyReference`
    pub fn reference(mut self, uri: impl Into<String>) -> Self {
        self.items
            .push(PolicyItem::Reference(PolicyReference::new(uri)));
        self
    }

    /// Open a nested `wsp:ExactlyOne`
    pub fn exactly_one(self) -> PolicyOperatorBuilder<Self> {
        PolicyOperatorBuilder::new(self, OperatorKind::ExactlyOne)
    }

    /// Open a nested `wsp:All`
    pub fn all(self) -> PolicyOperatorBuilder<Self> {
        PolicyOperatorBuilder::new(self, OperatorKind::All)
    }

    /// Close the operator and return to the parent
    pub fn end(self) -> P {
        let item = match self.kind {
            OperatorKind::ExactlyOne => PolicyItem::ExactlyOne(self.items),
            OperatorKind::All => PolicyItem::All(self.items),
        };
        let mut parent = self.parent;
        parent.push_policy_item(item);
        parent
    }
}

impl<P> PolicyItemHost for PolicyOperatorBuilder<P> {
    fn push_policy_item(&mut self, item: PolicyItem) {
        self.items.push(item);
    }
}

/// Write a policy, declaring every prefix it uses
pub fn write_policy(policy: &Policy, ns: &mut NamespaceDeclarations) -> XmlElement {
    ns.declare("wsp", WSP_NS);
    let mut node = XmlElement::new("wsp:Policy");
    if !policy.id().is_empty() {
        ns.declare("wsu", WSU_NS);
        node.set_attribute("wsu:Id", policy.id());
    }
    node = node.opt_attr("Name", policy.name());
    node.extend(policy.items().iter().map(|item| write_item(item, ns)));
    node
}

/// Write a `wsp:PolicyReference`
pub fn write_reference(reference: &PolicyReference, ns: &mut NamespaceDeclarations) -> XmlElement {
    ns.declare("wsp", WSP_NS);
    XmlElement::new("wsp:PolicyReference")
        .attr("URI", reference.uri())
        .opt_attr("Digest", reference.digest())
        .opt_attr("DigestAlgorithm", reference.digest_algorithm())
}

/// Write policies followed by policy references
pub fn write_attachments(
    attachments: &PolicyAttachments,
    ns: &mut NamespaceDeclarations,
) -> Vec<XmlElement> {
    let mut nodes: Vec<XmlElement> = attachments
        .policies()
        .iter()
        .map(|p| write_policy(p, ns))
        .collect();
    nodes.extend(attachments.references().iter().map(|r| write_reference(r, ns)));
    nodes
}

fn write_item(item: &PolicyItem, ns: &mut NamespaceDeclarations) -> XmlElement {
    match item {
        PolicyItem::Assertion(assertion) => write_assertion(assertion, ns),
        PolicyItem::ExactlyOne(items) => {
            let mut node = XmlElement::new("wsp:ExactlyOne");
            node.extend(items.iter().map(|i| write_item(i, ns)));
            node
        }
        PolicyItem::All(items) => {
            let mut node = XmlElement::new("wsp:All");
            node.extend(items.iter().map(|i| write_item(i, ns)));
            node
        }
        PolicyItem::Reference(reference) => write_reference(reference, ns),
    }
}

/// Write one assertion subtree
pub fn write_assertion(assertion: &Assertion, ns: &mut NamespaceDeclarations) -> XmlElement {
    let mut node = XmlElement::new(assertion.qualified_name());
    if !assertion.namespace().is_empty()
        && !ns.try_declare(assertion.prefix(), assertion.namespace())
    {
        debug!(
            prefix = assertion.prefix(),
            namespace = assertion.namespace(),
            "prefix taken, binding it on the assertion"
        );
        node.set_attribute(
            format!("xmlns:{}", assertion.prefix()),
            assertion.namespace(),
        );
    }
    for (name, value) in assertion.attributes() {
        node.set_attribute(name.as_str(), value.as_str());
    }
    if assertion.is_optional() {
        ns.declare("wsp", WSP_NS);
        node.set_attribute("wsp:Optional", "true");
    }
    if assertion.is_ignorable() {
        ns.declare("wsp", WSP_NS);
        node.set_attribute("wsp:Ignorable", "true");
    }
    if let Some(text) = assertion.text() {
        node = node.text(text);
    }
    for child in assertion.children() {
        node.push(write_assertion(child, ns));
    }
    if let Some(items) = assertion.nested_policy() {
        ns.declare("wsp", WSP_NS);
        let mut nested = XmlElement::new("wsp:Policy");
        nested.extend(items.iter().map(|i| write_item(i, ns)));
        node.push(nested);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::SP_NS;

    #[derive(Debug, Default)]
    struct Component {
        attachments: PolicyAttachments,
    }

    impl PolicyAttachable for Component {
        fn attachments(&self) -> &PolicyAttachments {
            &self.attachments
        }

        fn attachments_mut(&mut self) -> &mut PolicyAttachments {
            &mut self.attachments
        }
    }

    fn sp(local: &str) -> Assertion {
        Assertion::new("sp", SP_NS, local)
    }

    #[test]
    fn test_policy_builder_nesting() {
        let component = Component::default()
            .policy("SecurePolicy", Some("Secure"))
            .exactly_one()
            .all()
            .assertion(sp("TransportBinding"))
            .end()
            .assertion(sp("AsymmetricBinding"))
            .end()
            .end()
            .policy_reference("#Other", None, None);

        assert_eq!(component.policies().len(), 1);
        assert_eq!(component.policy_references()[0].uri(), "#Other");

        let policy = &component.policies()[0];
        assert_eq!(policy.name(), Some("Secure"));
        match &policy.items()[0] {
            PolicyItem::ExactlyOne(items) => {
                assert_eq!(items.len(), 2);
                assert!(matches!(items[0], PolicyItem::All(_)));
            }
            other => panic!("unexpected item: {:?}", other),
        }
        assert!(policy.find_assertion("TransportBinding").is_some());
    }

    #[test]
    fn test_write_policy_declares_prefixes() {
        let mut policy = Policy::new("P1", None);
        policy.push(PolicyItem::Assertion(
            sp("IncludeTimestamp").optional(true),
        ));

        let mut ns = NamespaceDeclarations::new();
        let node = write_policy(&policy, &mut ns);

        assert_eq!(node.attribute("wsu:Id"), Some("P1"));
        assert!(node.attribute("Name").is_none());
        assert!(ns.contains("wsp") && ns.contains("wsu") && ns.contains("sp"));

        let assertion = node.find("sp:IncludeTimestamp").expect("assertion");
        assert_eq!(assertion.attribute("wsp:Optional"), Some("true"));
        assert!(assertion.attribute("wsp:Ignorable").is_none());
    }

    #[test]
    fn test_nested_policy_written_inside_assertion() {
        let binding = sp("TransportBinding").with_nested([sp("IncludeTimestamp")]);
        let mut ns = NamespaceDeclarations::new();
        let node = write_assertion(&binding, &mut ns);
        let nested = node.find("wsp:Policy").expect("nested policy");
        assert!(nested.find("sp:IncludeTimestamp").is_some());
        assert!(binding.find_nested("IncludeTimestamp").is_some());
    }

    #[test]
    fn test_taken_prefix_bound_locally() {
        let mut ns = NamespaceDeclarations::new();
        ns.declare("tns", "urn:target");

        let vendor = Assertion::new("tns", "urn:vendor", "Custom")
            .with_child(Assertion::new("tns", "urn:vendor", "Inner"));
        let node = write_assertion(&vendor, &mut ns);

        assert_eq!(node.attribute("xmlns:tns"), Some("urn:vendor"));
        assert_eq!(ns.get("tns"), Some("urn:target"));

        let shared = write_assertion(&sp("Wss11"), &mut ns);
        assert!(shared.attribute("xmlns:sp").is_none());
        assert_eq!(ns.get("sp"), Some(SP_NS));
    }

    #[test]
    fn test_reference_digest_attributes() {
        let reference = PolicyReference::new("#P")
            .with_digest("abc")
            .with_digest_algorithm("http://www.w3.org/ns/ws-policy/Sha1Exc");
        let mut ns = NamespaceDeclarations::new();
        let node = write_reference(&reference, &mut ns);
        let names: Vec<&str> = node.attributes().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["URI", "Digest", "DigestAlgorithm"]);
    }
}
