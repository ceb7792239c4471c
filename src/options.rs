//! Output options for the generators
//!
//! Controls how the generated XML tree is turned into text: indentation,
//! the XML declaration and the schema-level `elementFormDefault`.

/// Default indentation width
pub const DEFAULT_INDENT_SIZE: usize = 4;

/// Encoding label of every generated document; output is always UTF-8
pub const OUTPUT_ENCODING: &str = "UTF-8";

/// Generator output configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Break lines and indent nested elements
    pub pretty: bool,

    /// Character used for indentation
    pub indent_char: u8,

    /// Number of indent characters per nesting level
    pub indent_size: usize,

    /// Emit `<?xml version="1.0" encoding="UTF-8"?>`
    pub xml_declaration: bool,

    /// `elementFormDefault` on the embedded schema; `None` omits it
    pub element_form_default: Option<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent_char: b' ',
            indent_size: DEFAULT_INDENT_SIZE,
            xml_declaration: true,
            element_form_default: Some("qualified".to_string()),
        }
    }
}

impl GeneratorOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output without indentation
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }

    /// Indented output with `indent_size` spaces per level
    pub fn pretty(indent_size: usize) -> Self {
        Self {
            pretty: true,
            indent_size,
            ..Self::default()
        }
    }

    /// Set the indentation character and width
    pub fn with_indent(mut self, indent_char: u8, indent_size: usize) -> Self {
        self.pretty = true;
        self.indent_char = indent_char;
        self.indent_size = indent_size;
        self
    }

    /// Enable or disable the XML declaration
    pub fn with_xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }

    /// Set `elementFormDefault`, or omit it with `None`
    pub fn with_element_form_default(mut self, form: Option<&str>) -> Self {
        self.element_form_default = form.map(String::from);
        self
    }
}
