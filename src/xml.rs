//! In-memory XML tree and its serializer
//!
//! Generators build an [`XmlElement`] tree first and serialize it in a
//! second step, so tests can inspect structure without parsing text.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{Error, Result};
use crate::options::{GeneratorOptions, OUTPUT_ENCODING};

/// Child node of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// Nested element
    Element(XmlElement),
    /// Character data
    Text(String),
}

/// Element with a prefixed name, ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create a new element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Prefixed element name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local part of the element name
    pub fn local_name(&self) -> &str {
        crate::names::split_qname(&self.name).1
    }

    /// Attributes in output order
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// All child nodes
    pub fn nodes(&self) -> &[XmlNode] {
        &self.children
    }

    /// Add an attribute (builder style)
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Add an attribute only when `value` is present
    pub fn opt_attr<V: Into<String>>(mut self, name: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.set_attribute(name, value);
        }
        self
    }

    /// Add a child element (builder style)
    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Add text content (builder style)
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Set an attribute, replacing an existing one of the same name
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Insert attributes in front of the existing ones
    pub fn prepend_attributes(&mut self, attributes: impl IntoIterator<Item = (String, String)>) {
        let mut merged: Vec<(String, String)> = attributes.into_iter().collect();
        merged.append(&mut self.attributes);
        self.attributes = merged;
    }

    /// Append a child element
    pub fn push(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Append several child elements
    pub fn extend(&mut self, children: impl IntoIterator<Item = XmlElement>) {
        self.children
            .extend(children.into_iter().map(XmlNode::Element));
    }

    /// True when the element has neither children nor text
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Get an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements in document order
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element with the given prefixed name
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name == name)
    }

    /// All child elements with the given prefixed name
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements().filter(move |e| e.name == name)
    }

    /// Concatenated text content of direct text children
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(t) => Some(t.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }
}

/// Serialize `root` as a complete document
pub fn write_document(root: &XmlElement, options: &GeneratorOptions) -> Result<String> {
    let mut writer = if options.pretty {
        Writer::new_with_indent(Vec::new(), options.indent_char, options.indent_size)
    } else {
        Writer::new(Vec::new())
    };

    if options.xml_declaration {
        writer.write_event(Event::Decl(BytesDecl::new(
            "1.0",
            Some(OUTPUT_ENCODING),
            None,
        )))?;
    }

    write_element(&mut writer, root)?;

    String::from_utf8(writer.into_inner()).map_err(|e| Error::Xml(e.to_string()))
}

/// Serialize `root` without an XML declaration
pub fn write_fragment(root: &XmlElement, options: &GeneratorOptions) -> Result<String> {
    let options = options.clone().with_xml_declaration(false);
    write_document(root, &options)
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (name, value) in &element.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for node in &element.children {
        match node {
            XmlNode::Element(child) => write_element(writer, child)?,
            XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
