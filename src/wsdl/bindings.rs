//! `wsdl:binding`
//!
//! A binding maps a port type onto one protocol: SOAP 1.1, SOAP 1.2 or
//! plain HTTP. Binding operations carry per-message extensions (SOAP body
//! and headers, HTTP URL encoding, MIME content) and a binding carries the
//! WS-Addressing action map.

use indexmap::IndexMap;
use tracing::warn;

use crate::addressing::AddressingActions;
use crate::error::Result;
use crate::names::QualifiedName;
use crate::namespaces::{SOAP12_NS, SOAP_HTTP_TRANSPORT, SOAP_NS};
use crate::policy::{PolicyAttachable, PolicyAttachments};
use crate::schema::Documentation;

use super::Wsdl;

/// SOAP binding version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoapVersion {
    /// SOAP 1.1 (`soap:`)
    Soap11,
    /// SOAP 1.2 (`soap12:`)
    Soap12,
}

impl SoapVersion {
    /// Extension prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            SoapVersion::Soap11 => "soap",
            SoapVersion::Soap12 => "soap12",
        }
    }

    /// Extension namespace
    pub fn namespace(&self) -> &'static str {
        match self {
            SoapVersion::Soap11 => SOAP_NS,
            SoapVersion::Soap12 => SOAP12_NS,
        }
    }
}

/// `soap:binding` / `soap12:binding`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapBinding {
    /// Protocol version
    pub version: SoapVersion,
    /// `style`
    pub style: String,
    /// `transport`
    pub transport: String,
}

impl SoapBinding {
    /// Document/literal over HTTP
    pub fn new(version: SoapVersion) -> Self {
        Self {
            version,
            style: "document".to_string(),
            transport: SOAP_HTTP_TRANSPORT.to_string(),
        }
    }
}

/// Protocol of a binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingProtocol {
    /// SOAP binding
    Soap(SoapBinding),
    /// `http:binding verb="..."`
    Http {
        /// HTTP verb
        verb: String,
    },
}

/// `use` of a SOAP body, header or fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyUse {
    /// `literal`
    #[default]
    Literal,
    /// `encoded`
    Encoded,
}

impl BodyUse {
    /// Attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyUse::Literal => "literal",
            BodyUse::Encoded => "encoded",
        }
    }
}

/// Extension element inside a binding input or output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageExtension {
    /// `soap:body`
    SoapBody {
        /// `use`
        use_: BodyUse,
        /// `namespace`
        namespace: Option<String>,
        /// `encodingStyle`
        encoding_style: Option<String>,
        /// `parts`
        parts: Option<String>,
    },
    /// `soap:header`
    SoapHeader {
        /// `message`
        message: QualifiedName,
        /// `part`
        part: String,
        /// `use`
        use_: BodyUse,
    },
    /// `http:urlEncoded`
    UrlEncoded,
    /// `http:urlReplacement`
    UrlReplacement,
    /// `mime:content`
    MimeContent {
        /// `part`
        part: Option<String>,
        /// `type`
        content_type: String,
    },
    /// `mime:mimeXml`
    MimeXml {
        /// `part`
        part: Option<String>,
    },
    /// `mime:multipartRelated`
    MultipartRelated(Vec<MimePart>),
}

/// `mime:part` of a multipart message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MimePart {
    extensions: Vec<MessageExtension>,
}

impl MimePart {
    /// Extensions in insertion order
    pub fn extensions(&self) -> &[MessageExtension] {
        &self.extensions
    }
}

/// Binding of an operation's input or output
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BindingMessage {
    extensions: Vec<MessageExtension>,
}

impl BindingMessage {
    /// Extensions in insertion order
    pub fn extensions(&self) -> &[MessageExtension] {
        &self.extensions
    }
}

/// Binding of a named fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingFault {
    name: String,
    use_: BodyUse,
}

impl BindingFault {
    /// Fault name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `use`
    pub fn use_(&self) -> BodyUse {
        self.use_
    }
}

/// `wsdl:operation` inside a binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingOperation {
    name: String,
    documentation: Option<Documentation>,
    soap_action: Option<String>,
    style: Option<String>,
    http_location: Option<String>,
    input: Option<BindingMessage>,
    output: Option<BindingMessage>,
    faults: Vec<BindingFault>,
    one_way: bool,
    policies: PolicyAttachments,
}

impl BindingOperation {
    fn new(name: String) -> Self {
        Self {
            name,
            documentation: None,
            soap_action: None,
            style: None,
            http_location: None,
            input: None,
            output: None,
            faults: Vec::new(),
            one_way: false,
            policies: PolicyAttachments::default(),
        }
    }

    /// Operation name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    /// `soapAction`
    pub fn soap_action(&self) -> Option<&str> {
        self.soap_action.as_deref()
    }

    /// Operation-level `style`
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// `http:operation location`
    pub fn http_location(&self) -> Option<&str> {
        self.http_location.as_deref()
    }

    /// Configured input, if any
    pub fn input(&self) -> Option<&BindingMessage> {
        self.input.as_ref()
    }

    /// Configured output, if any
    pub fn output(&self) -> Option<&BindingMessage> {
        self.output.as_ref()
    }

    /// Fault bindings
    pub fn faults(&self) -> &[BindingFault] {
        &self.faults
    }

    /// True when the output is suppressed
    pub fn is_one_way(&self) -> bool {
        self.one_way
    }

    /// Policy attachments
    pub fn attachments(&self) -> &PolicyAttachments {
        &self.policies
    }
}

/// `wsdl:binding`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    name: String,
    port_type: QualifiedName,
    documentation: Option<Documentation>,
    protocol: Option<BindingProtocol>,
    operations: IndexMap<String, BindingOperation>,
    actions: AddressingActions,
    policies: PolicyAttachments,
}

impl Binding {
    /// Binding name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bound port type
    pub fn port_type(&self) -> &QualifiedName {
        &self.port_type
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    /// Protocol, if chosen
    pub fn protocol(&self) -> Option<&BindingProtocol> {
        self.protocol.as_ref()
    }

    /// SOAP version for SOAP bindings
    pub fn soap_version(&self) -> Option<SoapVersion> {
        match &self.protocol {
            Some(BindingProtocol::Soap(soap)) => Some(soap.version),
            _ => None,
        }
    }

    /// Operations by name
    pub fn operations(&self) -> &IndexMap<String, BindingOperation> {
        &self.operations
    }

    /// WS-Addressing actions
    pub fn actions(&self) -> &AddressingActions {
        &self.actions
    }

    /// Policy attachments
    pub fn attachments(&self) -> &PolicyAttachments {
        &self.policies
    }
}

/// Builder for a binding
#[derive(Debug)]
pub struct BindingBuilder {
    parent: Wsdl,
    binding: Binding,
}

impl BindingBuilder {
    pub(crate) fn new(parent: Wsdl, name: String, port_type: QualifiedName) -> Self {
        Self {
            parent,
            binding: Binding {
                name,
                port_type,
                documentation: None,
                protocol: None,
                operations: IndexMap::new(),
                actions: AddressingActions::new(),
                policies: PolicyAttachments::default(),
            },
        }
    }

    /// Bind with SOAP 1.1, document style over HTTP
    pub fn soap_binding(mut self) -> Self {
        self.binding.protocol = Some(BindingProtocol::Soap(SoapBinding::new(SoapVersion::Soap11)));
        self
    }

    /// Bind with SOAP 1.2, document style over HTTP
    pub fn soap12_binding(mut self) -> Self {
        self.binding.protocol = Some(BindingProtocol::Soap(SoapBinding::new(SoapVersion::Soap12)));
        self
    }

    /// Bind with HTTP using `verb`
    pub fn http_binding(mut self, verb: impl Into<String>) -> Self {
        self.binding.protocol = Some(BindingProtocol::Http { verb: verb.into() });
        self
    }

    fn soap_mut(&mut self) -> Option<&mut SoapBinding> {
        if self.binding.protocol.is_none() {
            self.binding.protocol =
                Some(BindingProtocol::Soap(SoapBinding::new(SoapVersion::Soap11)));
        }
        match &mut self.binding.protocol {
            Some(BindingProtocol::Soap(soap)) => Some(soap),
            _ => None,
        }
    }

    /// Set the SOAP `style` (`document` or `rpc`)
    pub fn style(mut self, style: impl Into<String>) -> Self {
        let binding = self.binding.name.clone();
        match self.soap_mut() {
            Some(soap) => soap.style = style.into(),
            None => warn!(%binding, "style ignored on HTTP binding"),
        }
        self
    }

    /// Set the SOAP `transport` URI
    pub fn transport(mut self, transport: impl Into<String>) -> Self {
        let binding = self.binding.name.clone();
        match self.soap_mut() {
            Some(soap) => soap.transport = transport.into(),
            None => warn!(%binding, "transport ignored on HTTP binding"),
        }
        self
    }

    /// Start a binding operation
    pub fn operation(self, name: impl Into<String>) -> BindingOperationBuilder {
        BindingOperationBuilder {
            parent: self,
            operation: BindingOperation::new(name.into()),
        }
    }

    /// Register WS-Addressing actions for `operation`
    pub fn action(
        mut self,
        operation: impl Into<String>,
        input: impl Into<String>,
        output: Option<&str>,
    ) -> Self {
        self.binding
            .actions
            .set_action(operation, input, output.map(String::from));
        self
    }

    /// Register a fault action; `action()` must have been called for
    /// `operation` first
    pub fn fault_action(
        mut self,
        operation: &str,
        fault: impl Into<String>,
        action: impl Into<String>,
    ) -> Result<Self> {
        self.binding
            .actions
            .set_fault_action(operation, fault, action)?;
        Ok(self)
    }

    /// Emit `wsaw:UsingAddressing`
    pub fn using_addressing(mut self, required: bool) -> Self {
        self.binding.actions.set_using_addressing(required);
        self
    }

    /// Registered WS-Addressing actions
    pub fn actions(&self) -> &AddressingActions {
        &self.binding.actions
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.binding.documentation = Some(documentation.into());
        self
    }

    /// Register the binding and return to the document
    pub fn end(self) -> Wsdl {
        let mut parent = self.parent;
        parent.insert_binding(self.binding);
        parent
    }
}

impl PolicyAttachable for BindingBuilder {
    fn attachments(&self) -> &PolicyAttachments {
        &self.binding.policies
    }

    fn attachments_mut(&mut self) -> &mut PolicyAttachments {
        &mut self.binding.policies
    }
}

/// Builder for a binding operation
#[derive(Debug)]
pub struct BindingOperationBuilder {
    parent: BindingBuilder,
    operation: BindingOperation,
}

impl BindingOperationBuilder {
    /// Set `soapAction`
    pub fn soap_action(mut self, action: impl Into<String>) -> Self {
        self.operation.soap_action = Some(action.into());
        self
    }

    /// Set the operation `style`
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.operation.style = Some(style.into());
        self
    }

    /// Set `http:operation location`
    pub fn http_operation(mut self, location: impl Into<String>) -> Self {
        self.operation.http_location = Some(location.into());
        self
    }

    /// Configure the input binding
    pub fn input(self) -> BindingMessageBuilder {
        BindingMessageBuilder::new(self, Direction::Input)
    }

    /// Configure the output binding
    pub fn output(self) -> BindingMessageBuilder {
        BindingMessageBuilder::new(self, Direction::Output)
    }

    /// Bind a named fault (literal use)
    pub fn fault(self, name: impl Into<String>) -> Self {
        self.fault_with_use(name, BodyUse::Literal)
    }

    /// Bind a named fault with an explicit `use`
    pub fn fault_with_use(mut self, name: impl Into<String>, use_: BodyUse) -> Self {
        self.operation.faults.push(BindingFault {
            name: name.into(),
            use_,
        });
        self
    }

    /// Suppress the output element
    pub fn one_way(mut self) -> Self {
        self.operation.one_way = true;
        self
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.operation.documentation = Some(documentation.into());
        self
    }

    /// Add the operation to the binding and return to it
    pub fn end(self) -> BindingBuilder {
        let mut parent = self.parent;
        parent
            .binding
            .operations
            .insert(self.operation.name.clone(), self.operation);
        parent
    }
}

impl PolicyAttachable for BindingOperationBuilder {
    fn attachments(&self) -> &PolicyAttachments {
        &self.operation.policies
    }

    fn attachments_mut(&mut self) -> &mut PolicyAttachments {
        &mut self.operation.policies
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Input,
    Output,
}

/// Builder for a binding input or output
#[derive(Debug)]
pub struct BindingMessageBuilder {
    parent: BindingOperationBuilder,
    direction: Direction,
    message: BindingMessage,
}

impl BindingMessageBuilder {
    fn new(parent: BindingOperationBuilder, direction: Direction) -> Self {
        Self {
            parent,
            direction,
            message: BindingMessage::default(),
        }
    }

    /// `soap:body use="literal"`
    pub fn body(mut self) -> Self {
        self.message.extensions.push(MessageExtension::SoapBody {
            use_: BodyUse::Literal,
            namespace: None,
            encoding_style: None,
            parts: None,
        });
        self
    }

    /// `soap:body` limited to the given parts
    pub fn body_parts(mut self, parts: impl Into<String>) -> Self {
        self.message.extensions.push(MessageExtension::SoapBody {
            use_: BodyUse::Literal,
            namespace: None,
            encoding_style: None,
            parts: Some(parts.into()),
        });
        self
    }

    /// `soap:body use="encoded"` with namespace and encoding style
    pub fn encoded_body(
        mut self,
        namespace: impl Into<String>,
        encoding_style: impl Into<String>,
    ) -> Self {
        self.message.extensions.push(MessageExtension::SoapBody {
            use_: BodyUse::Encoded,
            namespace: Some(namespace.into()),
            encoding_style: Some(encoding_style.into()),
            parts: None,
        });
        self
    }

    /// `soap:header` carrying `part` of `message`
    pub fn header(mut self, message: impl Into<QualifiedName>, part: impl Into<String>) -> Self {
        self.message.extensions.push(MessageExtension::SoapHeader {
            message: message.into(),
            part: part.into(),
            use_: BodyUse::Literal,
        });
        self
    }

    /// `http:urlEncoded`
    pub fn url_encoded(mut self) -> Self {
        self.message.extensions.push(MessageExtension::UrlEncoded);
        self
    }

    /// `http:urlReplacement`
    pub fn url_replacement(mut self) -> Self {
        self.message.extensions.push(MessageExtension::UrlReplacement);
        self
    }

    /// `mime:content`
    pub fn mime_content(mut self, part: Option<&str>, content_type: impl Into<String>) -> Self {
        self.message.extensions.push(MessageExtension::MimeContent {
            part: part.map(String::from),
            content_type: content_type.into(),
        });
        self
    }

    /// `mime:mimeXml`
    pub fn mime_xml(mut self, part: Option<&str>) -> Self {
        self.message.extensions.push(MessageExtension::MimeXml {
            part: part.map(String::from),
        });
        self
    }

    /// Open `mime:multipartRelated`
    pub fn multipart_related(self) -> MultipartBuilder {
        MultipartBuilder {
            parent: self,
            parts: Vec::new(),
        }
    }

    /// Store the message binding on the operation and return to it
    pub fn end(self) -> BindingOperationBuilder {
        let mut parent = self.parent;
        match self.direction {
            Direction::Input => parent.operation.input = Some(self.message),
            Direction::Output => parent.operation.output = Some(self.message),
        }
        parent
    }
}

/// Builder for `mime:multipartRelated`
#[derive(Debug)]
pub struct MultipartBuilder {
    parent: BindingMessageBuilder,
    parts: Vec<MimePart>,
}

impl MultipartBuilder {
    /// Open a `mime:part`
    pub fn part(self) -> MimePartBuilder {
        MimePartBuilder {
            parent: self,
            part: MimePart::default(),
        }
    }

    /// Close the multipart and return to the message binding
    pub fn end(self) -> BindingMessageBuilder {
        let mut parent = self.parent;
        parent
            .message
            .extensions
            .push(MessageExtension::MultipartRelated(self.parts));
        parent
    }
}

/// Builder for one `mime:part`
#[derive(Debug)]
pub struct MimePartBuilder {
    parent: MultipartBuilder,
    part: MimePart,
}

impl MimePartBuilder {
    /// `soap:body use="literal"` inside the part
    pub fn body(mut self) -> Self {
        self.part.extensions.push(MessageExtension::SoapBody {
            use_: BodyUse::Literal,
            namespace: None,
            encoding_style: None,
            parts: None,
        });
        self
    }

    /// `soap:body` limited to the given parts
    pub fn body_parts(mut self, parts: impl Into<String>) -> Self {
        self.part.extensions.push(MessageExtension::SoapBody {
            use_: BodyUse::Literal,
            namespace: None,
            encoding_style: None,
            parts: Some(parts.into()),
        });
        self
    }

    /// `mime:content`
    pub fn mime_content(mut self, part: Option<&str>, content_type: impl Into<String>) -> Self {
        self.part.extensions.push(MessageExtension::MimeContent {
            part: part.map(String::from),
            content_type: content_type.into(),
        });
        self
    }

    /// `mime:mimeXml`
    pub fn mime_xml(mut self, part: Option<&str>) -> Self {
        self.part.extensions.push(MessageExtension::MimeXml {
            part: part.map(String::from),
        });
        self
    }

    /// Add the part and return to the multipart
    pub fn end(self) -> MultipartBuilder {
        let mut parent = self.parent;
        parent.parts.push(self.part);
        parent
    }
}
