//! OpenTelemetry counters for story turns.
//!
//! Instruments come from the global meter provider, so they are no-ops until
//! a provider is installed with `diver_core::init_metrics`.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Meter},
};
use tracing::debug;

/// Turn-level counters.
#[derive(Clone)]
pub struct StoryMetrics {
    _meter: Meter,
    /// Scenes generated and parsed
    pub turns: Counter<u64>,
    /// Provider calls that failed
    pub provider_failures: Counter<u64>,
    /// Completions that broke the choice contract
    pub parse_failures: Counter<u64>,
}

impl StoryMetrics {
    /// Creates the counters on the `diver_story` meter.
    pub fn new() -> Self {
        let meter = global::meter("diver_story");

        let turns = meter
            .u64_counter("diver.turns")
            .with_description("Scenes generated")
            .build();
        let provider_failures = meter
            .u64_counter("diver.provider_failures")
            .with_description("Failed provider calls")
            .build();
        let parse_failures = meter
            .u64_counter("diver.parse_failures")
            .with_description("Completions without a parseable decision point")
            .build();

        debug!("StoryMetrics instruments created");
        Self {
            _meter: meter,
            turns,
            provider_failures,
            parse_failures,
        }
    }

    /// Records a generated scene.
    pub fn record_turn(&self, provider: &'static str, world: &str) {
        self.turns.add(
            1,
            &[
                KeyValue::new("provider", provider),
                KeyValue::new("world", world.to_string()),
            ],
        );
    }

    /// Records a failed provider call.
    pub fn record_provider_failure(&self, provider: &'static str, retryable: bool) {
        self.provider_failures.add(
            1,
            &[
                KeyValue::new("provider", provider),
                KeyValue::new("retryable", retryable),
            ],
        );
    }

    /// Records a completion that could not be parsed.
    pub fn record_parse_failure(&self, provider: &'static str) {
        self.parse_failures
            .add(1, &[KeyValue::new("provider", provider)]);
    }
}

impl Default for StoryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StoryMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryMetrics").finish_non_exhaustive()
    }
}
