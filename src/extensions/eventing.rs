//! WS-Eventing and WS-Notification markers

use crate::namespaces::{WSE_NS, WSTOP_NS};
use crate::policy::Assertion;

/// `wse:EventSource` marker for port types / interfaces that emit events
pub fn event_source() -> Assertion {
    Assertion::new("wse", WSE_NS, "EventSource").with_attribute("value", "true")
}

/// `wstop:TopicSet` listing the given topic names as children.
///
/// Topics are written as `tns:<topic>` and carry their own namespace, so
/// they resolve correctly inside a WSDL document (usually its target
/// namespace) and inside a standalone metadata document alike.
pub fn topic_set<I, S>(namespace: &str, topics: I) -> Assertion
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    topics.into_iter().fold(
        Assertion::new("wstop", WSTOP_NS, "TopicSet"),
        |set, topic| {
            let topic = topic.as_ref();
            set.with_child(
                Assertion::new("tns", namespace, topic).with_attribute("wstop:topic", "true"),
            )
        },
    )
}

/// Eventing capabilities of a service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventingPolicy {
    event_source: bool,
    topic_namespace: String,
    topics: Vec<String>,
}

impl EventingPolicy {
    /// No eventing
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark as event source
    pub fn event_source(mut self) -> Self {
        self.event_source = true;
        self
    }

    /// Publish notification topics from `namespace`; a later call
    /// replaces the namespace and appends its topics
    pub fn topics<I, S>(mut self, namespace: impl Into<String>, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topic_namespace = namespace.into();
        self.topics.extend(topics.into_iter().map(Into::into));
        self
    }

    /// The resulting assertions
    pub fn build(&self) -> Vec<Assertion> {
        let mut assertions = Vec::new();
        if self.event_source {
            assertions.push(event_source());
        }
        if !self.topics.is_empty() {
            assertions.push(topic_set(&self.topic_namespace, &self.topics));
        }
        assertions
    }
}
