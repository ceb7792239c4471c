//! `wsdl:message` and its parts

use crate::names::QualifiedName;
use crate::schema::Documentation;

use super::Wsdl;

/// What a part refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartKind {
    /// `type="..."`
    Type(QualifiedName),
    /// `element="..."`
    Element(QualifiedName),
}

/// `wsdl:part`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    name: String,
    kind: PartKind,
}

impl Part {
    /// Part name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type or element reference
    pub fn kind(&self) -> &PartKind {
        &self.kind
    }
}

/// `wsdl:message`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    name: String,
    documentation: Option<Documentation>,
    parts: Vec<Part>,
}

impl Message {
    /// Message name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    /// Parts in insertion order
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }
}

/// Builder for a message
#[derive(Debug)]
pub struct MessageBuilder {
    parent: Wsdl,
    message: Message,
}

impl MessageBuilder {
    pub(crate) fn new(parent: Wsdl, name: String) -> Self {
        Self {
            parent,
            message: Message {
                name,
                documentation: None,
                parts: Vec::new(),
            },
        }
    }

    /// Add a part typed by `type_name`
    pub fn part(mut self, name: impl Into<String>, type_name: impl Into<QualifiedName>) -> Self {
        self.message.parts.push(Part {
            name: name.into(),
            kind: PartKind::Type(type_name.into()),
        });
        self
    }

    /// Add a part referring to a global element
    pub fn element_part(
        mut self,
        name: impl Into<String>,
        element: impl Into<QualifiedName>,
    ) -> Self {
        self.message.parts.push(Part {
            name: name.into(),
            kind: PartKind::Element(element.into()),
        });
        self
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.message.documentation = Some(documentation.into());
        self
    }

    /// Register the message and return to the document
    pub fn end(self) -> Wsdl {
        let mut parent = self.parent;
        parent.insert_message(self.message);
        parent
    }
}
