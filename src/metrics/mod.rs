use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus metrics for the message converter
// ============================================================================
//
// Counts records created from event messages, records read back into event
// messages (by outcome) and metadata headers written. The registry is owned
// by whoever builds the converter; nothing here is global.
//
// ============================================================================

pub struct ConverterMetrics {
    registry: Registry,

    pub records_created: IntCounterVec,
    pub records_read: IntCounterVec,
    pub metadata_headers_written: IntCounter,
    pub headers_per_record: Histogram,
}

/// Outcome label for `kafka_records_read_total`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    Event,
    DomainEvent,
    Skipped,
    Failed,
}

impl ReadOutcome {
    fn as_label(&self) -> &'static str {
        match self {
            ReadOutcome::Event => "event",
            ReadOutcome::DomainEvent => "domain_event",
            ReadOutcome::Skipped => "skipped",
            ReadOutcome::Failed => "failed",
        }
    }
}

impl ConverterMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let records_created = IntCounterVec::new(
            Opts::new("kafka_records_created_total", "Kafka records created from event messages"),
            &["event_kind"],
        )?;
        registry.register(Box::new(records_created.clone()))?;

        let records_read = IntCounterVec::new(
            Opts::new("kafka_records_read_total", "Kafka records read back into event messages"),
            &["outcome"],
        )?;
        registry.register(Box::new(records_read.clone()))?;

        let metadata_headers_written = IntCounter::new(
            "metadata_headers_written_total",
            "Namespaced metadata headers written",
        )?;
        registry.register(Box::new(metadata_headers_written.clone()))?;

        let headers_per_record = Histogram::with_opts(
            HistogramOpts::new("kafka_record_header_count", "Headers attached per created record")
                .buckets(vec![4.0, 5.0, 7.0, 10.0, 15.0, 25.0, 50.0]),
        )?;
        registry.register(Box::new(headers_per_record.clone()))?;

        Ok(Self {
            registry,
            records_created,
            records_read,
            metadata_headers_written,
            headers_per_record,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record a created record
    pub fn record_created(&self, domain_event: bool, header_count: usize, metadata_entries: usize) {
        let kind = if domain_event { "domain_event" } else { "event" };
        self.records_created.with_label_values(&[kind]).inc();
        self.metadata_headers_written.inc_by(metadata_entries as u64);
        self.headers_per_record.observe(header_count as f64);
    }

    /// Helper to record a read attempt
    pub fn record_read(&self, outcome: ReadOutcome) {
        self.records_read.with_label_values(&[outcome.as_label()]).inc();
    }

    /// Render all metrics in the Prometheus text format
    pub fn encode_text(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
