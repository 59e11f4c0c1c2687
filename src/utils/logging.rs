/*---------- Imports ----------*/
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{
    field::{Field, Visit},
    Event, Subscriber,
};
use tracing_subscriber::{
    filter::EnvFilter,
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields, MakeWriter},
    registry::LookupSpan,
    util::{SubscriberInitExt, TryInitError},
};

/*---------- Constants ----------*/
/// Fields whose recorded text is a serialized JSON document, embedded as-is.
pub const STRUCTURED_FIELDS: &[&str] = &["item"];

/// One JSON object per event: `timestamp`, `level`, `message`, then every field
/// the callsite declares. A declared field with no recorded value is `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLines;

struct FieldCollector {
    message: Option<String>,
    fields: Vec<(&'static str, Value)>,
}

impl FieldCollector {
    fn new(event: &Event<'_>) -> Self {
        let fields = event
            .metadata()
            .fields()
            .iter()
            .filter(|field| field.name() != "message")
            .map(|field| (field.name(), Value::Null))
            .collect();

        Self {
            message: None,
            fields,
        }
    }

    fn set(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = Some(match value {
                Value::String(text) => text,
                other => other.to_string(),
            });
            return;
        }

        let value = match value {
            Value::String(text) if STRUCTURED_FIELDS.contains(&field.name()) => {
                serde_json::from_str(&text).unwrap_or(Value::String(text))
            }
            other => other,
        };

        match self.fields.iter_mut().find(|(name, _)| *name == field.name()) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((field.name(), value)),
        }
    }

    fn into_line(self, level: &tracing::Level) -> Map<String, Value> {
        let mut line = Map::new();

        line.insert(
            "timestamp".to_owned(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        line.insert("level".to_owned(), Value::String(level.as_str().to_owned()));
        line.insert(
            "message".to_owned(),
            self.message.map(Value::String).unwrap_or(Value::Null),
        );

        for (name, value) in self.fields {
            line.insert(name.to_owned(), value);
        }

        line
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.set(field, Value::String(value.to_owned()));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.set(field, Value::Bool(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.set(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.set(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.set(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.set(field, Value::String(format!("{:?}", value)));
    }
}

impl<S, N> FormatEvent<S, N> for JsonLines
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut collector = FieldCollector::new(event);
        event.record(&mut collector);

        let line = collector.into_line(event.metadata().level());
        let encoded = serde_json::to_string(&line).map_err(|_| fmt::Error)?;

        writeln!(writer, "{}", encoded)
    }
}

/// Subscriber writing [`JsonLines`] to `make_writer`, filtered by `filter`.
pub fn subscriber<W>(make_writer: W, filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .event_format(JsonLines)
        .with_writer(make_writer)
        .with_env_filter(filter)
        .finish()
}

/// Installs the process-wide logger on stdout. `RUST_LOG` overrides the `info` default.
pub fn init() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    subscriber(std::io::stdout, filter).try_init()
}
