//! Tracing and metrics initialization.

use herald_error::{ConfigError, HeraldResult};
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
use opentelemetry_stdout::MetricExporter as StdoutExporter;
#[cfg(feature = "metrics")]
use std::time::Duration;
use std::str::FromStr;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` (default `info`). Setting
/// `HERALD_LOG_FORMAT=json` switches to one JSON object per line.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("HERALD_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let result = if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    if result.is_ok() {
        debug!(json, "Tracing subscriber installed");
    }
}

/// Environment variable selecting the metrics exporter.
pub const METRICS_EXPORTER_VAR: &str = "HERALD_METRICS_EXPORTER";

/// Collector endpoint used by [`MetricsExporter::Otlp`] when
/// `OTEL_EXPORTER_OTLP_ENDPOINT` is unset.
pub const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4318";

/// Where run metrics are exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MetricsExporter {
    /// Periodic dump to stdout
    #[default]
    Stdout,
    /// OTLP over HTTP to a collector
    Otlp,
    /// Instruments are no-ops
    None,
}

impl MetricsExporter {
    /// Reads [`METRICS_EXPORTER_VAR`], falling back to `OTEL_EXPORTER`.
    ///
    /// # Errors
    ///
    /// A [`ConfigError`] naming the value when it is not an exporter.
    pub fn from_env() -> HeraldResult<Self> {
        let raw = std::env::var(METRICS_EXPORTER_VAR)
            .or_else(|_| std::env::var("OTEL_EXPORTER"))
            .ok();
        Ok(Self::parse_setting(raw.as_deref())?)
    }

    fn parse_setting(raw: Option<&str>) -> Result<Self, ConfigError> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(Self::default()),
            Some(value) => Self::from_str(value).map_err(|_| {
                ConfigError::new(format!(
                    "Unknown metrics exporter '{}'; expected stdout, otlp or none",
                    value
                ))
            }),
        }
    }
}

/// Registers the global meter provider that run metrics record into.
///
/// The exporter comes from [`MetricsExporter::from_env`]. Without the
/// `metrics` feature nothing is registered and the call only logs.
///
/// # Errors
///
/// A [`ConfigError`] for an unknown exporter or an OTLP exporter that
/// cannot be built.
#[instrument(skip_all, fields(service_name))]
pub fn init_observability(service_name: &'static str, export_interval_secs: u64) -> HeraldResult<()> {
    let exporter = MetricsExporter::from_env()?;

    #[cfg(not(feature = "metrics"))]
    {
        let _ = export_interval_secs;
        info!(service_name, %exporter, "Built without metrics; nothing to export");
        Ok(())
    }

    #[cfg(feature = "metrics")]
    {
        let resource = Resource::builder_empty()
            .with_attributes([KeyValue::new("service.name", service_name)])
            .build();
        let interval = Duration::from_secs(export_interval_secs);
        let provider = SdkMeterProvider::builder().with_resource(resource);

        let provider = match exporter {
            MetricsExporter::None => {
                info!(service_name, "Metrics export disabled");
                return Ok(());
            }
            MetricsExporter::Stdout => provider.with_reader(
                PeriodicReader::builder(StdoutExporter::default())
                    .with_interval(interval)
                    .build(),
            ),
            MetricsExporter::Otlp => {
                let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                    .unwrap_or_else(|_| DEFAULT_OTLP_ENDPOINT.to_string());
                let otlp = OtlpExporter::builder()
                    .with_http()
                    .with_endpoint(&endpoint)
                    .with_timeout(Duration::from_secs(10))
                    .build()
                    .map_err(|e| ConfigError::new(format!("OTLP exporter for {}: {}", endpoint, e)))?;
                debug!(%endpoint, "OTLP metric exporter ready");
                provider.with_reader(PeriodicReader::builder(otlp).with_interval(interval).build())
            }
        };

        global::set_meter_provider(provider.build());
        info!(service_name, %exporter, export_interval_secs, "Metrics exporting");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exporter_defaults_to_stdout() {
        assert_eq!(MetricsExporter::parse_setting(None).unwrap(), MetricsExporter::Stdout);
        assert_eq!(MetricsExporter::parse_setting(Some("  ")).unwrap(), MetricsExporter::Stdout);
    }

    #[test]
    fn test_exporter_names_are_case_insensitive() {
        assert_eq!(MetricsExporter::parse_setting(Some("OTLP")).unwrap(), MetricsExporter::Otlp);
        assert_eq!(MetricsExporter::parse_setting(Some("none")).unwrap(), MetricsExporter::None);
    }

    #[test]
    fn test_unknown_exporter_is_a_config_error() {
        let err = MetricsExporter::parse_setting(Some("prometheus")).unwrap_err();
        assert!(err.message.contains("'prometheus'"));
    }
}
