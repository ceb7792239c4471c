//! WS-MetadataExchange documents (`mex:Metadata`)
//!
//! Unlike the policy vocabularies, a metadata document is written as its own
//! XML tree. Each section carries exactly one kind of content.

use crate::error::Result;
use crate::namespaces::{NamespaceDeclarations, MEX_NS, WSA_NS, WSDL_NS, XSD_NS};
use crate::options::GeneratorOptions;
use crate::xml::{write_document, XmlElement};

/// WSDL dialect
pub const DIALECT_WSDL: &str = WSDL_NS;
/// XML Schema dialect
pub const DIALECT_XSD: &str = XSD_NS;
/// WS-Policy dialect
pub const DIALECT_POLICY: &str = "http://schemas.xmlsoap.org/ws/2004/09/policy";
/// WS-MetadataExchange dialect
pub const DIALECT_MEX: &str = MEX_NS;

/// Content of a metadata section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataContent {
    /// Inline text
    Text(String),
    /// `mex:Location` URL to fetch the metadata from
    Location(String),
    /// `mex:MetadataReference` endpoint address
    Reference(String),
    /// Inline XML such as an embedded WSDL tree
    Structured(XmlElement),
}

/// `mex:MetadataSection`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataSection {
    dialect: String,
    identifier: Option<String>,
    content: MetadataContent,
}

impl MetadataSection {
    /// Section of `dialect` holding `content`
    pub fn new(dialect: impl Into<String>, content: MetadataContent) -> Self {
        Self {
            dialect: dialect.into(),
            identifier: None,
            content,
        }
    }

    /// Set `Identifier`
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// `Dialect`
    pub fn dialect(&self) -> &str {
        &self.dialect
    }

    /// `Identifier`
    pub fn get_identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Section content
    pub fn content(&self) -> &MetadataContent {
        &self.content
    }

    fn write(&self, ns: &mut NamespaceDeclarations) -> XmlElement {
        let node = XmlElement::new("mex:MetadataSection")
            .attr("Dialect", self.dialect.as_str())
            .opt_attr("Identifier", self.identifier.as_deref());
        match &self.content {
            MetadataContent::Text(text) => node.text(text.as_str()),
            MetadataContent::Location(location) => {
                node.child(XmlElement::new("mex:Location").text(location.as_str()))
            }
            MetadataContent::Reference(address) => {
                ns.declare("wsa", WSA_NS);
                node.child(
                    XmlElement::new("mex:MetadataReference")
                        .child(XmlElement::new("wsa:Address").text(address.as_str())),
                )
            }
            MetadataContent::Structured(element) => node.child(element.clone()),
        }
    }
}

/// `mex:Metadata` document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    sections: Vec<MetadataSection>,
}

impl Metadata {
    /// Empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section
    pub fn section(mut self, section: MetadataSection) -> Self {
        self.sections.push(section);
        self
    }

    /// Sections in insertion order
    pub fn sections(&self) -> &[MetadataSection] {
        &self.sections
    }

    /// Build the `mex:Metadata` tree with its namespace declarations
    pub fn to_xml(&self) -> XmlElement {
        let mut ns = NamespaceDeclarations::new();
        ns.declare("mex", MEX_NS);
        let mut root = XmlElement::new("mex:Metadata");
        for section in &self.sections {
            let node = section.write(&mut ns);
            root.push(node);
        }
        ns.apply_to(&mut root);
        root
    }

    /// Serialize the document
    pub fn generate(&self, options: &GeneratorOptions) -> Result<String> {
        write_document(&self.to_xml(), options)
    }
}
