use std::sync::Arc;

use crate::headers::{ByteMapper, HeaderValueMapper};
use crate::metrics::ConverterMetrics;

// ============================================================================
// Converter Configuration
// ============================================================================

/// How the record key is derived from an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SequencingPolicy {
    /// Key by aggregate identifier so one aggregate's events share a partition.
    /// Non-domain events get no key.
    #[default]
    SequentialPerAggregate,
    /// Never set a key
    FullConcurrency,
}

#[derive(Clone)]
pub struct ConverterConfig {
    pub sequencing_policy: SequencingPolicy,
    /// Maps metadata values to headers; reserved headers always use the default codec
    pub header_value_mapper: Arc<dyn HeaderValueMapper>,
    pub metrics: Option<Arc<ConverterMetrics>>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            sequencing_policy: SequencingPolicy::default(),
            header_value_mapper: Arc::new(ByteMapper),
            metrics: None,
        }
    }
}

impl ConverterConfig {
    /// Unkeyed records, default codec
    pub fn unordered() -> Self {
        Self {
            sequencing_policy: SequencingPolicy::FullConcurrency,
            ..Self::default()
        }
    }

    pub fn with_sequencing_policy(mut self, policy: SequencingPolicy) -> Self {
        self.sequencing_policy = policy;
        self
    }

    pub fn with_header_value_mapper(mut self, mapper: impl HeaderValueMapper + 'static) -> Self {
        self.header_value_mapper = Arc::new(mapper);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ConverterMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

impl std::fmt::Debug for ConverterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterConfig")
            .field("sequencing_policy", &self.sequencing_policy)
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}
