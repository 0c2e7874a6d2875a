//! OpenTelemetry metrics initialization.

use diver_error::ConfigError;
#[cfg(feature = "metrics")]
use opentelemetry::{KeyValue, global};
#[cfg(feature = "metrics")]
use opentelemetry_otlp::{MetricExporter as OtlpExporter, WithExportConfig};
#[cfg(feature = "metrics")]
use opentelemetry_sdk::{
    Resource,
    metrics::{PeriodicReader, SdkMeterProvider},
};
#[cfg(feature = "metrics")]
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Meter provider installed by [`init_metrics`].
///
/// The global registry keeps its own copy alive for the whole process, so the
/// periodic reader only exports pending counters when this handle is passed to
/// [`shutdown_metrics`].
#[derive(Debug, Default)]
pub struct MetricsHandle {
    #[cfg(feature = "metrics")]
    provider: Option<SdkMeterProvider>,
}

/// Installs a global meter provider so the story counters are exported.
///
/// `OTEL_EXPORTER=otlp` selects the OTLP/HTTP exporter (endpoint from
/// `OTEL_EXPORTER_OTLP_ENDPOINT`, default `http://localhost:4318`); anything
/// else exports to stdout.
///
/// Without the `metrics` feature this logs and returns an empty handle; the
/// counters then stay no-ops.
#[instrument(skip_all, fields(service_name))]
pub fn init_metrics(
    service_name: &'static str,
    export_interval_secs: u64,
) -> Result<MetricsHandle, ConfigError> {
    #[cfg(not(feature = "metrics"))]
    {
        let _ = export_interval_secs;
        info!(service_name, "Metrics feature disabled, counters are no-ops");
        Ok(MetricsHandle::default())
    }

    #[cfg(feature = "metrics")]
    {
        let resource = Resource::builder_empty()
            .with_attributes([KeyValue::new("service.name", service_name)])
            .build();
        let interval = Duration::from_secs(export_interval_secs);

        let exporter_type = std::env::var("OTEL_EXPORTER").unwrap_or_else(|_| "stdout".to_string());
        info!(exporter_type = %exporter_type, export_interval_secs, "Initializing metrics");

        let reader = match exporter_type.as_str() {
            "otlp" => {
                let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                    .unwrap_or_else(|_| "http://localhost:4318".to_string());
                let exporter = OtlpExporter::builder()
                    .with_http()
                    .with_endpoint(&endpoint)
                    .with_timeout(Duration::from_secs(10))
                    .build()
                    .map_err(|e| ConfigError::new(format!("Failed to create OTLP exporter: {}", e)))?;
                debug!(endpoint = %endpoint, "OTLP metric exporter created");
                PeriodicReader::builder(exporter).with_interval(interval).build()
            }
            _ => PeriodicReader::builder(opentelemetry_stdout::MetricExporter::default())
                .with_interval(interval)
                .build(),
        };

        let provider = SdkMeterProvider::builder()
            .with_resource(resource)
            .with_reader(reader)
            .build();
        global::set_meter_provider(provider.clone());
        info!(service_name, "Meter provider registered globally");
        Ok(MetricsHandle {
            provider: Some(provider),
        })
    }
}

/// Flushes pending counters and stops the exporter.
///
/// # Errors
///
/// Fails if the exporter cannot flush or shut down.
#[instrument(skip_all)]
pub fn shutdown_metrics(handle: MetricsHandle) -> Result<(), ConfigError> {
    #[cfg(feature = "metrics")]
    {
        if let Some(provider) = handle.provider {
            provider
                .shutdown()
                .map_err(|e| ConfigError::new(format!("Failed to shut down meter provider: {}", e)))?;
        }
    }
    #[cfg(not(feature = "metrics"))]
    let _ = handle;

    debug!("Metrics shutdown complete");
    Ok(())
}
