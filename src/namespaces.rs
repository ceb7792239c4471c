//! Namespace URIs and prefix declarations
//!
//! Every namespace the generators can emit is listed here with the prefix
//! the output uses for it. The URIs are the published W3C/OASIS/Microsoft
//! strings; consumers validate against them, so they must not drift.

use indexmap::IndexMap;

use crate::xml::XmlElement;

/// WSDL 1.1
pub const WSDL_NS: &str = "http://schemas.xmlsoap.org/wsdl/";
/// WSDL 2.0
pub const WSDL2_NS: &str = "http://www.w3.org/ns/wsdl";
/// WSDL 2.0 extensions (`wsdlx:safe`)
pub const WSDLX_NS: &str = "http://www.w3.org/ns/wsdl-extensions";
/// XML Schema
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";
/// XML namespace (bound to `xml:` implicitly)
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// WSDL 1.1 SOAP 1.1 binding
pub const SOAP_NS: &str = "http://schemas.xmlsoap.org/wsdl/soap/";
/// WSDL 1.1 SOAP 1.2 binding
pub const SOAP12_NS: &str = "http://schemas.xmlsoap.org/wsdl/soap12/";
/// WSDL 1.1 HTTP binding
pub const HTTP_NS: &str = "http://schemas.xmlsoap.org/wsdl/http/";
/// WSDL 1.1 MIME binding
pub const MIME_NS: &str = "http://schemas.xmlsoap.org/wsdl/mime/";
/// WSDL 2.0 SOAP binding
pub const WSOAP_NS: &str = "http://www.w3.org/ns/wsdl/soap";
/// WSDL 2.0 HTTP binding
pub const WHTTP_NS: &str = "http://www.w3.org/ns/wsdl/http";

/// SOAP over HTTP transport for WSDL 1.1 `soap:binding`
pub const SOAP_HTTP_TRANSPORT: &str = "http://schemas.xmlsoap.org/soap/http";
/// SOAP 1.1 encoding style
pub const SOAP_ENCODING: &str = "http://schemas.xmlsoap.org/soap/encoding/";
/// SOAP 1.2 HTTP protocol binding for WSDL 2.0 `wsoap:protocol`
pub const SOAP12_HTTP_PROTOCOL: &str = "http://www.w3.org/2003/05/soap/bindings/HTTP/";

/// WS-Policy 1.5
pub const WSP_NS: &str = "http://www.w3.org/ns/ws-policy";
/// WS-Security utility (`wsu:Id`)
pub const WSU_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-utility-1.0.xsd";
/// WS-Addressing 1.0
pub const WSA_NS: &str = "http://www.w3.org/2005/08/addressing";
/// WS-Addressing metadata (`wsam:Action`)
pub const WSAM_NS: &str = "http://www.w3.org/2007/05/addressing/metadata";
/// WS-Addressing WSDL binding (`wsaw:UsingAddressing`)
pub const WSAW_NS: &str = "http://www.w3.org/2006/05/addressing/wsdl";
/// WS-SecurityPolicy 1.2
pub const SP_NS: &str = "http://docs.oasis-open.org/ws-sx/ws-securitypolicy/200702";
/// WS-Trust 1.3
pub const WST_NS: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512";
/// WS-AtomicTransaction 1.2
pub const WSAT_NS: &str = "http://docs.oasis-open.org/ws-tx/wsat/2006/06";
/// WS-BusinessActivity 1.2
pub const WSBA_NS: &str = "http://docs.oasis-open.org/ws-tx/wsba/2006/06";
/// WS-Coordination 1.2
pub const WSCOOR_NS: &str = "http://docs.oasis-open.org/ws-tx/wscoor/2006/06";
/// WS-Eventing (W3C Recommendation)
pub const WSE_NS: &str = "http://www.w3.org/2011/03/ws-evt";
/// WS-BaseNotification 1.3
pub const WSNT_NS: &str = "http://docs.oasis-open.org/wsn/b-2";
/// WS-Topics 1.3
pub const WSTOP_NS: &str = "http://docs.oasis-open.org/wsn/t-1";
/// WS-Discovery 1.1
pub const WSD_NS: &str = "http://docs.oasis-open.org/ws-dd/ns/discovery/2009/01";
/// WS-MetadataExchange (2004/09 submission)
pub const MEX_NS: &str = "http://schemas.xmlsoap.org/ws/2004/09/mex";
/// WS-ResourceProperties 1.2
pub const WSRF_RP_NS: &str = "http://docs.oasis-open.org/wsrf/rp-2";
/// WS-ResourceLifetime 1.2
pub const WSRF_RL_NS: &str = "http://docs.oasis-open.org/wsrf/rl-2";
/// MTOM policy assertion
pub const WSOMA_NS: &str = "http://schemas.xmlsoap.org/ws/2004/09/policy/optimizedmimeserialization";
/// XOP include
pub const XOP_NS: &str = "http://www.w3.org/2004/08/xop/include";
/// XML media types (`xmime:contentType`)
pub const XMIME_NS: &str = "http://www.w3.org/2005/05/xmlmime";

/// Well-known prefixes and their namespace URIs, in declaration order
pub const WELL_KNOWN: &[(&str, &str)] = &[
    ("wsdl", WSDL_NS),
    ("xsd", XSD_NS),
    ("soap", SOAP_NS),
    ("soap12", SOAP12_NS),
    ("http", HTTP_NS),
    ("mime", MIME_NS),
    ("wsoap", WSOAP_NS),
    ("whttp", WHTTP_NS),
    ("wsdlx", WSDLX_NS),
    ("wsp", WSP_NS),
    ("wsu", WSU_NS),
    ("wsa", WSA_NS),
    ("wsam", WSAM_NS),
    ("wsaw", WSAW_NS),
    ("sp", SP_NS),
    ("wst", WST_NS),
    ("wsat", WSAT_NS),
    ("wsba", WSBA_NS),
    ("wscoor", WSCOOR_NS),
    ("wse", WSE_NS),
    ("wsnt", WSNT_NS),
    ("wstop", WSTOP_NS),
    ("wsd", WSD_NS),
    ("mex", MEX_NS),
    ("wsrf-rp", WSRF_RP_NS),
    ("wsrf-rl", WSRF_RL_NS),
    ("wsoma", WSOMA_NS),
    ("xop", XOP_NS),
    ("xmime", XMIME_NS),
];

/// Look up the URI of a well-known prefix
pub fn well_known_uri(prefix: &str) -> Option<&'static str> {
    WELL_KNOWN
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, uri)| *uri)
}

/// Ordered set of `xmlns:` declarations collected while a tree is built.
///
/// Generators call [`declare`](Self::declare) whenever they emit a prefixed
/// node, so the root ends up declaring exactly the namespaces in use.
#[derive(Debug, Clone, Default)]
pub struct NamespaceDeclarations {
    prefixes: IndexMap<String, String>,
}

impl NamespaceDeclarations {
    /// Create an empty declaration set
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `prefix` bound to `uri`. The first binding of a prefix wins.
    pub fn declare(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        let prefix = prefix.into();
        if prefix == "xml" || prefix == "xmlns" {
            return;
        }
        self.prefixes.entry(prefix).or_insert_with(|| uri.into());
    }

    /// Declare `prefix` for `uri` unless that prefix already belongs to
    /// another namespace, either declared here or reserved as well-known.
    ///
    /// Returns `false` on a conflict; the caller then has to bind the prefix
    /// locally on the element that uses it.
    pub fn try_declare(&mut self, prefix: &str, uri: &str) -> bool {
        if let Some(bound) = self.get(prefix) {
            return bound == uri;
        }
        if well_known_uri(prefix).is_some_and(|known| known != uri) {
            return false;
        }
        self.declare(prefix, uri);
        true
    }

    /// Declare a well-known prefix; unknown prefixes are ignored
    pub fn declare_known(&mut self, prefix: &str) {
        if let Some(uri) = well_known_uri(prefix) {
            self.declare(prefix, uri);
        }
    }

    /// Check whether a prefix has been declared
    pub fn contains(&self, prefix: &str) -> bool {
        self.prefixes.contains_key(prefix)
    }

    /// Get the URI bound to a prefix
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Number of declared prefixes
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// True when nothing is declared
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Iterate over `(prefix, uri)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }

    /// Write the declarations onto `root` ahead of its own attributes
    pub fn apply_to(&self, root: &mut XmlElement) {
        let declarations = self
            .prefixes
            .iter()
            .map(|(prefix, uri)| (format!("xmlns:{}", prefix), uri.clone()));
        root.prepend_attributes(declarations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_lookup() {
        assert_eq!(well_known_uri("http"), Some(HTTP_NS));
        assert_eq!(well_known_uri("wsp"), Some("http://www.w3.org/ns/ws-policy"));
        assert_eq!(well_known_uri("nope"), None);
    }

    #[test]
    fn test_first_binding_wins() {
        let mut ns = NamespaceDeclarations::new();
        ns.declare("tns", "urn:a");
        ns.declare("tns", "urn:b");
        assert_eq!(ns.get("tns"), Some("urn:a"));
        assert_eq!(ns.len(), 1);
    }

    #[test]
    fn test_try_declare_reports_conflicts() {
        let mut ns = NamespaceDeclarations::new();
        ns.declare("tns", "urn:target");

        assert!(ns.try_declare("tns", "urn:target"));
        assert!(!ns.try_declare("tns", "urn:vendor"));
        assert!(!ns.try_declare("soap", "urn:vendor"));
        assert!(ns.try_declare("acme", "urn:vendor"));

        assert_eq!(ns.get("tns"), Some("urn:target"));
        assert!(!ns.contains("soap"));
        assert_eq!(ns.get("acme"), Some("urn:vendor"));
    }

    #[test]
    fn test_reserved_prefixes_skipped() {
        let mut ns = NamespaceDeclarations::new();
        ns.declare("xml", XML_NS);
        assert!(ns.is_empty());
    }

    #[test]
    fn test_apply_to_root() {
        let mut ns = NamespaceDeclarations::new();
        ns.declare_known("wsdl");
        ns.declare("tns", "urn:example");

        let mut root = XmlElement::new("wsdl:definitions").attr("name", "Example");
        ns.apply_to(&mut root);

        let names: Vec<&str> = root.attributes().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["xmlns:wsdl", "xmlns:tns", "name"]);
    }
}
