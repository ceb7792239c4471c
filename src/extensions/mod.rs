//! WS-* assertion vocabularies
//!
//! Each module is a set of configuration records that turn into
//! [`Assertion`](crate::policy::Assertion)s (or, for metadata exchange, an
//! XML tree). They are attached to documents and bindings through
//! [`PolicyAttachable`](crate::policy::PolicyAttachable).
//!
//! WS-Discovery and WS-ResourceFramework have no assertions of their own;
//! their namespaces are exported from [`crate::namespaces`].

pub mod eventing;
pub mod metadata;
pub mod mtom;
pub mod security;
pub mod transaction;
pub mod trust;

pub use eventing::{event_source, topic_set, EventingPolicy};
pub use metadata::{Metadata, MetadataContent, MetadataSection};
pub use mtom::{optimized_mime_serialization, MtomPolicy};
pub use security::{
    AlgorithmSuite, AsymmetricBinding, IncludeToken, Layout, MessageParts, SecurityPolicy,
    SymmetricBinding, Token, TransportBinding, Wss10, Wss11,
};
pub use transaction::{AtomicTransaction, BusinessActivity};
pub use trust::Trust13;
