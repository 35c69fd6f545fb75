use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use kafka_event_headers::headers::{decode_text, is_metadata_key, value_as_long, AGGREGATE_SEQ};
use kafka_event_headers::metrics::ConverterMetrics;
use kafka_event_headers::{ConverterConfig, EventMessage, EventPayload, KafkaMessageConverter};

/// Sample payload used to show what goes on the wire
#[derive(Serialize, Deserialize, Clone, Debug)]
struct OrderConfirmed {
    customer_id: Uuid,
    confirmed_at: DateTime<Utc>,
}

impl EventPayload for OrderConfirmed {
    fn payload_type() -> &'static str { "OrderConfirmed" }
    fn payload_revision() -> Option<&'static str> { Some("1") }
}

fn main() -> anyhow::Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,kafka_event_headers=debug"))
        )
        .init();

    let metrics = Arc::new(ConverterMetrics::new()?);
    let converter = KafkaMessageConverter::new(ConverterConfig::default().with_metrics(metrics.clone()));

    let order_id = Uuid::new_v4();
    let event = EventMessage::domain(
        "Order",
        order_id.to_string(),
        1,
        OrderConfirmed {
            customer_id: Uuid::new_v4(),
            confirmed_at: Utc::now(),
        },
    )
    .with_metadata("correlationId", Uuid::new_v4().to_string())
    .with_metadata("attempt", 1i32)
    .with_metadata("receivedAt", Utc::now());

    let record = converter.create_record(&event, "order-events")?;
    tracing::info!(
        topic = %record.topic,
        key = ?record.key,
        payload_bytes = record.payload.len(),
        "📤 Record ready to publish"
    );

    for header in &record.headers {
        let rendered = match header.value() {
            None => "<null>".to_string(),
            Some(bytes) if is_metadata_key(header.key()) => format!("{:02x?}", bytes),
            Some(bytes) => decode_text(bytes).unwrap_or_else(|_| format!("{:02x?}", bytes)),
        };
        tracing::info!(key = %header.key(), value = %rendered, "Header");
    }

    let sequence = value_as_long(&record.headers, AGGREGATE_SEQ)?;
    tracing::info!(sequence = ?sequence, "Aggregate sequence decoded from header");

    match converter.read_record(&record)? {
        Some(read) => {
            let payload: OrderConfirmed = read.payload.deserialize()?;
            tracing::info!(
                event_id = %read.identifier,
                aggregate = ?read.aggregate,
                customer_id = %payload.customer_id,
                metadata_entries = read.metadata.len(),
                "📥 Event message read back from record"
            );
        }
        None => tracing::warn!("Record did not carry an event envelope"),
    }

    tracing::info!("📊 Converter metrics:\n{}", metrics.encode_text()?);

    Ok(())
}
