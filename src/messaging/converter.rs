use anyhow::{Context, Result};
use rdkafka::message::Message;
use rdkafka::producer::FutureRecord;

use crate::event_sourcing::{
    serialize_payload, AggregateSequence, EventMessage, EventPayload, SerializedObject,
    SerializedType,
};
use crate::headers::{
    extract_axon_metadata, is_axon_message, to_headers, value_as_long, value_as_string,
    value_as_timestamp, RecordHeaders, AGGREGATE_ID, AGGREGATE_SEQ, AGGREGATE_TYPE, MESSAGE_ID,
    MESSAGE_REVISION, MESSAGE_TIMESTAMP, MESSAGE_TYPE,
};
use crate::metrics::ReadOutcome;

use super::config::{ConverterConfig, SequencingPolicy};

// ============================================================================
// Kafka Message Converter
// ============================================================================
//
// Producer side: event message -> (topic, key, payload bytes, headers)
// Consumer side: record -> event message with a still-serialized payload
//
// The converter only shapes records. Sending, polling and committing belong
// to whoever owns the producer/consumer.
//
// ============================================================================

/// Owned producer record; borrow it as an rdkafka `FutureRecord` to send
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KafkaRecord {
    pub topic: String,
    pub key: Option<String>,
    pub payload: Vec<u8>,
    pub headers: RecordHeaders,
}

impl KafkaRecord {
    pub fn to_future_record(&self) -> FutureRecord<'_, str, [u8]> {
        let record = FutureRecord::to(&self.topic)
            .payload(self.payload.as_slice())
            .headers(self.headers.to_kafka_headers());

        match &self.key {
            Some(key) => record.key(key.as_str()),
            None => record,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct KafkaMessageConverter {
    config: ConverterConfig,
}

impl KafkaMessageConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Serialize the payload and assemble headers for `topic`
    pub fn create_record<P: EventPayload>(
        &self,
        event: &EventMessage<P>,
        topic: &str,
    ) -> Result<KafkaRecord> {
        let serialized = serialize_payload(&event.payload)
            .with_context(|| format!("Failed to serialize payload of event {}", event.identifier))?;

        self.create_record_from_serialized(event, serialized, topic)
    }

    /// Like `create_record`, for a payload that is already serialized
    pub fn create_record_from_serialized<P>(
        &self,
        event: &EventMessage<P>,
        serialized: SerializedObject,
        topic: &str,
    ) -> Result<KafkaRecord> {
        let headers = to_headers(event, &serialized, self.config.header_value_mapper.as_ref())
            .with_context(|| format!("Failed to build headers for event {}", event.identifier))?;

        let key = match self.config.sequencing_policy {
            SequencingPolicy::SequentialPerAggregate => event
                .aggregate
                .as_ref()
                .map(|a| a.aggregate_identifier.clone()),
            SequencingPolicy::FullConcurrency => None,
        };

        if let Some(metrics) = &self.config.metrics {
            metrics.record_created(event.is_domain_event(), headers.len(), event.metadata.len());
        }

        tracing::debug!(
            event_id = %event.identifier,
            topic = %topic,
            key = ?key,
            header_count = headers.len(),
            "Created Kafka record"
        );

        Ok(KafkaRecord {
            topic: topic.to_string(),
            key,
            payload: serialized.data,
            headers,
        })
    }

    /// Read a record back into an event message.
    ///
    /// `Ok(None)` when the record does not carry an event envelope; an error
    /// when the envelope is there but malformed. The timestamp comes back at
    /// millisecond precision and metadata values come back as text.
    pub fn read_record(&self, record: &KafkaRecord) -> Result<Option<EventMessage<SerializedObject>>> {
        self.read_parts(&record.topic, Some(&record.headers), Some(&record.payload))
    }

    /// Read a message consumed through rdkafka
    pub fn read_kafka_message<M: Message>(
        &self,
        message: &M,
    ) -> Result<Option<EventMessage<SerializedObject>>> {
        let headers = message.headers().map(RecordHeaders::from_kafka_headers);
        self.read_parts(message.topic(), headers.as_ref(), message.payload())
    }

    fn read_parts(
        &self,
        topic: &str,
        headers: Option<&RecordHeaders>,
        payload: Option<&[u8]>,
    ) -> Result<Option<EventMessage<SerializedObject>>> {
        let headers = match headers {
            Some(headers) if is_axon_message(headers) => headers,
            _ => {
                tracing::debug!(topic = %topic, "Skipping record without event envelope");
                self.record_read(ReadOutcome::Skipped);
                return Ok(None);
            }
        };

        match read_event(headers, payload) {
            Ok(event) => {
                let outcome = if event.is_domain_event() {
                    ReadOutcome::DomainEvent
                } else {
                    ReadOutcome::Event
                };
                self.record_read(outcome);
                Ok(Some(event))
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    topic = %topic,
                    "Failed to read event message from record"
                );
                self.record_read(ReadOutcome::Failed);
                Err(e)
            }
        }
    }

    fn record_read(&self, outcome: ReadOutcome) {
        if let Some(metrics) = &self.config.metrics {
            metrics.record_read(outcome);
        }
    }
}

fn read_event(
    headers: &RecordHeaders,
    payload: Option<&[u8]>,
) -> Result<EventMessage<SerializedObject>> {
    let identifier = value_as_string(headers, MESSAGE_ID)?.context("Message id header is null")?;
    let timestamp = value_as_timestamp(headers, MESSAGE_TIMESTAMP)?
        .with_context(|| format!("Missing timestamp header for message {}", identifier))?;
    let type_name = value_as_string(headers, MESSAGE_TYPE)?
        .with_context(|| format!("Payload type header is null for message {}", identifier))?;
    let revision = value_as_string(headers, MESSAGE_REVISION)?;

    let aggregate = match value_as_string(headers, AGGREGATE_ID)? {
        Some(aggregate_identifier) => Some(AggregateSequence {
            aggregate_type: value_as_string(headers, AGGREGATE_TYPE)?.unwrap_or_default(),
            sequence_number: value_as_long(headers, AGGREGATE_SEQ)?.with_context(|| {
                format!("Missing sequence number for aggregate {}", aggregate_identifier)
            })?,
            aggregate_identifier,
        }),
        None => None,
    };

    let serialized = SerializedObject::new(
        payload.map(<[u8]>::to_vec).unwrap_or_default(),
        SerializedType::new(type_name, revision),
    );

    Ok(EventMessage {
        identifier,
        timestamp,
        payload: serialized,
        metadata: extract_axon_metadata(headers)?,
        aggregate,
    })
}
