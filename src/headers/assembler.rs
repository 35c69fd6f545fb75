use crate::event_sourcing::{EventMessage, MetaData, SerializedObject};

use super::accessor::{add_header, add_header_with, keys, value_as_string_lossy};
use super::errors::HeaderResult;
use super::mapper::HeaderValueMapper;
use super::namespace::{extract_key, generate_metadata_key, is_metadata_key};
use super::record::RecordHeaders;
use super::value::HeaderValue;
use super::{
    AGGREGATE_ID, AGGREGATE_SEQ, AGGREGATE_TYPE, MESSAGE_ID, MESSAGE_REVISION, MESSAGE_TIMESTAMP,
    MESSAGE_TYPE,
};

// ============================================================================
// Event Header Assembler
// ============================================================================
//
// Single pass over an event:
// 1. reserved envelope headers (id, timestamp, payload type + revision)
// 2. one namespaced header per metadata entry, through the caller's mapper
// 3. aggregate id / type / sequence for domain events
//
// Reserved headers always go through the default codec; only metadata values
// are handed to the mapper. The namespace prefix keeps metadata from ever
// shadowing a reserved key.
//
// ============================================================================

/// Build the full header set for `event`
pub fn to_headers<P, M>(
    event: &EventMessage<P>,
    serialized: &SerializedObject,
    mapper: &M,
) -> HeaderResult<RecordHeaders>
where
    M: HeaderValueMapper + ?Sized,
{
    let mut headers = RecordHeaders::with_capacity(4 + event.metadata.len() + 3);

    add_header(&mut headers, MESSAGE_ID, event.identifier.as_str())?;
    add_header(&mut headers, MESSAGE_TIMESTAMP, event.timestamp)?;
    add_header(&mut headers, MESSAGE_TYPE, serialized.type_name())?;
    add_header(&mut headers, MESSAGE_REVISION, serialized.revision())?;

    for (key, value) in event.metadata.iter() {
        add_header_with(&mut headers, &generate_metadata_key(key), value, mapper)?;
    }

    if let Some(aggregate) = &event.aggregate {
        add_header(&mut headers, AGGREGATE_ID, aggregate.aggregate_identifier.as_str())?;
        add_header(&mut headers, AGGREGATE_TYPE, aggregate.aggregate_type.as_str())?;
        add_header(&mut headers, AGGREGATE_SEQ, aggregate.sequence_number)?;
    }

    tracing::debug!(
        message_id = %event.identifier,
        payload_type = %serialized.type_name(),
        header_count = headers.len(),
        domain_event = event.is_domain_event(),
        "Assembled event headers"
    );

    Ok(headers)
}

/// Append the event's headers to an existing collection.
///
/// `target` is left untouched if any header fails to encode.
pub fn append_event_headers<P, M>(
    target: &mut RecordHeaders,
    event: &EventMessage<P>,
    serialized: &SerializedObject,
    mapper: &M,
) -> HeaderResult<()>
where
    M: HeaderValueMapper + ?Sized,
{
    let headers = to_headers(event, serialized, mapper)?;
    target.extend(headers);
    Ok(())
}

/// Rebuild user metadata from the namespaced headers.
///
/// Values come back as text since the header carries no type tag. Numeric and
/// timestamp values are raw big-endian bytes, so their text is a lossy UTF-8
/// reading of those bytes. A header written with a null value comes back as
/// `HeaderValue::Null`.
pub fn extract_axon_metadata<'a>(
    headers: impl Into<Option<&'a RecordHeaders>>,
) -> HeaderResult<MetaData> {
    let headers = headers.into();
    let mut metadata = MetaData::new();

    for key in keys(headers)?.iter().filter(|k| is_metadata_key(k)) {
        let value = value_as_string_lossy(headers, key)?;
        metadata.insert(extract_key(key.as_str())?, HeaderValue::from(value));
    }

    Ok(metadata)
}

/// True when the headers carry the envelope of a published event message
pub fn is_axon_message(headers: &RecordHeaders) -> bool {
    headers.last_header(MESSAGE_ID).is_some() && headers.last_header(MESSAGE_TYPE).is_some()
}
