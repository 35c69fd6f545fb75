use chrono::{DateTime, SubsecRound, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::headers::HeaderValue;

// ============================================================================
// Event Message - payload + identity + metadata
// ============================================================================
//
// The in-memory side of the header codec. A generic event carries an
// identifier, a timestamp, a payload and a metadata map. A domain event
// additionally carries the aggregate it was sourced from and its position
// in that aggregate's stream.
//
// ============================================================================

/// Metadata attached to an event, ordered by key
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetaData(BTreeMap<String, HeaderValue>);

impl MetaData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata with a single entry
    pub fn with(key: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        let mut metadata = Self::new();
        metadata.insert(key, value);
        metadata
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<HeaderValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<HeaderValue>> FromIterator<(K, V)> for MetaData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Identity of the aggregate a domain event was sourced from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateSequence {
    pub aggregate_type: String,
    pub aggregate_identifier: String,
    pub sequence_number: i64,
}

/// Event Message - wraps any payload with identity and metadata
///
/// `aggregate` is `Some` for domain events.
#[derive(Clone, Debug, PartialEq)]
pub struct EventMessage<P> {
    pub identifier: String,
    pub timestamp: DateTime<Utc>,
    pub payload: P,
    pub metadata: MetaData,
    pub aggregate: Option<AggregateSequence>,
}

impl<P> EventMessage<P> {
    /// New event stamped with the current time, truncated to whole
    /// milliseconds since that is all the timestamp header carries.
    pub fn new(payload: P) -> Self {
        Self {
            identifier: Uuid::new_v4().to_string(),
            timestamp: Utc::now().trunc_subsecs(3),
            payload,
            metadata: MetaData::new(),
            aggregate: None,
        }
    }

    /// Domain event for the given aggregate and sequence number
    pub fn domain(
        aggregate_type: impl Into<String>,
        aggregate_identifier: impl Into<String>,
        sequence_number: i64,
        payload: P,
    ) -> Self {
        Self {
            aggregate: Some(AggregateSequence {
                aggregate_type: aggregate_type.into(),
                aggregate_identifier: aggregate_identifier.into(),
                sequence_number,
            }),
            ..Self::new(payload)
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Sub-millisecond precision is kept here but dropped on the wire.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Replace the whole metadata map
    pub fn with_meta_data(mut self, metadata: MetaData) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        self.metadata.insert(key, value);
        self
    }

    pub fn is_domain_event(&self) -> bool {
        self.aggregate.is_some()
    }

    /// Swap the payload, keeping identity and metadata
    pub fn try_map_payload<Q, E>(self, f: impl FnOnce(P) -> Result<Q, E>) -> Result<EventMessage<Q>, E> {
        Ok(EventMessage {
            identifier: self.identifier,
            timestamp: self.timestamp,
            payload: f(self.payload)?,
            metadata: self.metadata,
            aggregate: self.aggregate,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
