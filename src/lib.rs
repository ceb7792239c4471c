//! # wsdl-builder
//!
//! A fluent, in-memory builder for WSDL 1.1 / 2.0 and XML Schema documents,
//! with WS-Policy attachment and assertion vocabularies for the common WS-*
//! specifications.
//!
//! ## Features
//!
//! - WSDL 1.1 messages, port types, SOAP 1.1 / SOAP 1.2 / HTTP bindings, MIME
//! - WSDL 2.0 interfaces, bindings and endpoints
//! - Embedded XML Schema: complex and simple types, lists, unions, groups,
//!   compositors, wildcards, identity constraints
//! - WS-Addressing actions, WS-Policy attachment, WS-SecurityPolicy,
//!   WS-Trust, WS-AtomicTransaction, MTOM, WS-Eventing, WS-MetadataExchange
//! - Deterministic output: the same calls always produce the same bytes
//!
//! ## Example
//!
//! ```rust
//! use wsdl_builder::prelude::*;
//!
//! let xml = Wsdl::create("UserService", "http://example.com/users")
//!     .complex_type("User")
//!     .element("id", "xsd:int")
//!     .element("name", "xsd:string")
//!     .end()
//!     .message("GetUserRequest")
//!     .part("userId", "xsd:int")
//!     .end()
//!     .message("GetUserResponse")
//!     .part("user", "tns:User")
//!     .end()
//!     .port_type("UserPortType")
//!     .operation("GetUser")
//!     .input("GetUserRequest")
//!     .output("GetUserResponse")
//!     .end()
//!     .end()
//!     .binding("UserBinding", "UserPortType")
//!     .soap_binding()
//!     .operation("GetUser")
//!     .soap_action("urn:GetUser")
//!     .end()
//!     .end()
//!     .service("UserService")
//!     .port("UserPort", "UserBinding", "http://localhost/users")
//!     .end()
//!     .generate()?;
//!
//! assert!(xml.contains(r#"<soap:operation soapAction="urn:GetUser"/>"#));
//! # Ok::<(), wsdl_builder::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod options;

// Names and namespaces
pub mod names;
pub mod namespaces;

// XML tree and serializer
pub mod xml;

// Schema model
pub mod schema;

// WS-* vocabulary
pub mod addressing;
pub mod extensions;
pub mod policy;

// Documents
pub mod wsdl;
pub mod wsdl2;

// Manifests
pub mod manifest;

// Re-exports for convenience
pub use error::{Error, Result};
pub use names::QualifiedName;
pub use options::GeneratorOptions;
pub use wsdl::{Wsdl, WsdlGenerator};
pub use wsdl2::{Wsdl2, Wsdl2Generator};

/// Builder traits and document types in one import
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::options::GeneratorOptions;
    pub use crate::policy::{Assertion, PolicyAttachable};
    pub use crate::schema::{Attribute, Documentation, Element, Occurs, SchemaHost};
    pub use crate::wsdl::Wsdl;
    pub use crate::wsdl2::Wsdl2;
}

/// Version of the wsdl-builder library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
