use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Payload Serialization
// ============================================================================
//
// Payloads are serialized to JSON bytes. The type name and revision travel
// next to the bytes (as headers) so the consumer knows how to read them.
//
// ============================================================================

/// Payload trait - every payload published through the converter implements this
pub trait EventPayload: Serialize + for<'de> Deserialize<'de> + Send + Sync {
    fn payload_type() -> &'static str where Self: Sized;
    fn payload_revision() -> Option<&'static str> where Self: Sized { None }
}

/// Type name plus optional revision of a serialized payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializedType {
    pub name: String,
    pub revision: Option<String>,
}

impl SerializedType {
    pub fn new(name: impl Into<String>, revision: Option<String>) -> Self {
        Self {
            name: name.into(),
            revision,
        }
    }

    pub fn of<P: EventPayload>() -> Self {
        Self::new(P::payload_type(), P::payload_revision().map(str::to_string))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializedObject {
    pub data: Vec<u8>,
    pub serialized_type: SerializedType,
}

impl SerializedObject {
    pub fn new(data: Vec<u8>, serialized_type: SerializedType) -> Self {
        Self {
            data,
            serialized_type,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.serialized_type.name
    }

    pub fn revision(&self) -> Option<&str> {
        self.serialized_type.revision.as_deref()
    }

    pub fn deserialize<P: EventPayload>(&self) -> Result<P> {
        if self.type_name() != P::payload_type() {
            bail!(
                "Payload type mismatch: expected {}, got {}",
                P::payload_type(),
                self.type_name()
            );
        }
        Ok(serde_json::from_slice(&self.data)?)
    }
}

pub fn serialize_payload<P: EventPayload>(payload: &P) -> Result<SerializedObject> {
    Ok(SerializedObject::new(
        serde_json::to_vec(payload)?,
        SerializedType::of::<P>(),
    ))
}
