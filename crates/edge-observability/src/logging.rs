//! Structured logging with request context.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Instant;

use edge_core::RequestId;
use serde::Serialize;

/// Log level for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Unknown log level name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0}")]
pub struct ParseLogLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ParseLogLevelError(other.to_string())),
        }
    }
}

/// A structured log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
    /// Request ID for correlation.
    pub request_id: String,
    /// Workload name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<String>,
    /// Route path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Additional structured fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
    /// Microseconds since the logger was created.
    pub elapsed_us: u64,
}

impl LogEntry {
    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// Format as human-readable string.
    pub fn to_human(&self) -> String {
        let mut s = format!("[{}] {} ({}us)", self.level, self.message, self.elapsed_us);

        if !self.fields.is_empty() {
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            s.push_str(" | ");
            s.push_str(&fields.join(" "));
        }

        s
    }

    /// Get a field value.
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }
}

/// Entries kept by a capturing logger.
pub type LogBuffer = Rc<RefCell<Vec<LogEntry>>>;

/// Output format for logs.
#[derive(Debug, Clone, Default)]
pub enum LogFormat {
    /// JSON lines on stderr (Spin captures this).
    #[default]
    Json,
    /// Human-readable lines on stderr (for development).
    Human,
    /// Forward to the `tracing` dispatcher.
    Tracing,
    /// Keep entries in memory.
    Capture(LogBuffer),
}

/// Unknown log format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log format: {0}")]
pub struct ParseLogFormatError(pub String);

impl FromStr for LogFormat {
    type Err = ParseLogFormatError;

    /// Parse `json`, `human` or `tracing`. Capture is only built in code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "human" => Ok(Self::Human),
            "tracing" => Ok(Self::Tracing),
            other => Err(ParseLogFormatError(other.to_string())),
        }
    }
}

/// Structured logger with request context.
///
/// Every entry carries the request ID, the workload and route when set,
/// and the time since the logger was created.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    request_id: RequestId,
    workload: Option<String>,
    route: Option<String>,
    start_time: Instant,
    min_level: LogLevel,
    format: LogFormat,
}

impl StructuredLogger {
    /// Create a new logger with request context.
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            workload: None,
            route: None,
            start_time: Instant::now(),
            min_level: LogLevel::Info,
            format: LogFormat::Json,
        }
    }

    /// Create a logger that keeps entries in memory, and the buffer holding them.
    pub fn capturing(request_id: RequestId) -> (Self, LogBuffer) {
        let buffer = LogBuffer::default();
        let logger = Self::new(request_id)
            .with_min_level(LogLevel::Trace)
            .with_format(LogFormat::Capture(buffer.clone()));
        (logger, buffer)
    }

    /// Set the workload name.
    pub fn with_workload(mut self, workload: impl Into<String>) -> Self {
        self.workload = Some(workload.into());
        self
    }

    /// Set the route path.
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Set minimum log level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Log at debug level.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, BTreeMap::new());
    }

    /// Log at info level.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, BTreeMap::new());
    }

    /// Log at warn level.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, BTreeMap::new());
    }

    /// Log at error level.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, BTreeMap::new());
    }

    fn log(&self, level: LogLevel, message: &str, fields: BTreeMap<String, serde_json::Value>) {
        if level < self.min_level {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            request_id: self.request_id.to_string(),
            workload: self.workload.clone(),
            route: self.route.clone(),
            fields,
            elapsed_us: self.start_time.elapsed().as_micros() as u64,
        };

        match &self.format {
            LogFormat::Json => eprintln!("{}", entry.to_json()),
            LogFormat::Human => eprintln!("{}", entry.to_human()),
            LogFormat::Tracing => emit_tracing(&entry),
            LogFormat::Capture(buffer) => buffer.borrow_mut().push(entry),
        }
    }

    /// Get the request ID.
    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }
}

fn emit_tracing(entry: &LogEntry) {
    let fields = serde_json::to_string(&entry.fields).unwrap_or_default();
    let request_id = entry.request_id.as_str();
    let workload = entry.workload.as_deref().unwrap_or("");
    match entry.level {
        LogLevel::Trace => tracing::trace!(request_id, workload, %fields, "{}", entry.message),
        LogLevel::Debug => tracing::debug!(request_id, workload, %fields, "{}", entry.message),
        LogLevel::Info => tracing::info!(request_id, workload, %fields, "{}", entry.message),
        LogLevel::Warn => tracing::warn!(request_id, workload, %fields, "{}", entry.message),
        LogLevel::Error => tracing::error!(request_id, workload, %fields, "{}", entry.message),
    }
}

/// Builder for log entries with fluent API.
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, serde_json::Value>,
}

impl<'a> LogBuilder<'a> {
    /// Create a new log builder.
    pub fn new(logger: &'a StructuredLogger, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            logger,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a string field.
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(value.into()));
        self
    }

    /// Add an integer field.
    pub fn field_i64(mut self, key: &str, value: i64) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add a boolean field.
    pub fn field_bool(mut self, key: &str, value: bool) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add a duration field (in milliseconds).
    pub fn duration_ms(mut self, key: &str, duration: std::time::Duration) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(duration.as_millis() as u64));
        self
    }

    /// Emit the log entry.
    pub fn emit(self) {
        self.logger.log(self.level, &self.message, self.fields);
    }
}

impl StructuredLogger {
    /// Start building an info log entry.
    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Info, message)
    }

    /// Start building a warn log entry.
    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Warn, message)
    }

    /// Start building an error log entry.
    pub fn error_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Error, message)
    }

    /// Start building a debug log entry.
    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Debug, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_capture_records_fields() {
        let (logger, buffer) = StructuredLogger::capturing(RequestId::from_string("r-1"));
        let logger = logger.with_workload("pdp").with_route("/products/1");

        logger
            .info_builder("fetch complete")
            .field("product_id", "1")
            .field_i64("status", 200)
            .field_bool("ok", true)
            .emit();

        let entries = buffer.borrow();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.request_id, "r-1");
        assert_eq!(entry.workload.as_deref(), Some("pdp"));
        assert_eq!(entry.field("status"), Some(&serde_json::json!(200)));
        assert_eq!(entry.field("ok"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_min_level_filters() {
        let (logger, buffer) = StructuredLogger::capturing(RequestId::from_string("r"));
        let logger = logger.with_min_level(LogLevel::Warn);
        logger.info("dropped");
        logger.debug("dropped");
        logger.warn("kept");
        logger.error("kept");
        assert_eq!(buffer.borrow().len(), 2);
    }

    #[test]
    fn test_json_format_flattens_fields() {
        let mut fields = BTreeMap::new();
        fields.insert("product_id".to_string(), serde_json::json!("abc"));
        let entry = LogEntry {
            level: LogLevel::Warn,
            message: "fetch failed".to_string(),
            request_id: "r".to_string(),
            workload: None,
            route: None,
            fields,
            elapsed_us: 5,
        };

        let json: serde_json::Value = serde_json::from_str(&entry.to_json()).unwrap();
        assert_eq!(json["level"], "warn");
        assert_eq!(json["product_id"], "abc");
        assert!(json.get("workload").is_none());
        assert_eq!(entry.to_human(), r#"[WARN] fetch failed (5us) | product_id="abc""#);
    }

    #[test]
    fn test_parse_log_format() {
        assert!(matches!("json".parse::<LogFormat>(), Ok(LogFormat::Json)));
        assert!(matches!("Human".parse::<LogFormat>(), Ok(LogFormat::Human)));
        assert!(matches!("tracing".parse::<LogFormat>(), Ok(LogFormat::Tracing)));
        assert!("capture".parse::<LogFormat>().is_err());
    }

    #[derive(Clone, Default)]
    struct SharedWriter(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tracing_format_emits_events() {
        let writer = SharedWriter::default();
        let make_writer = writer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || make_writer.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::TRACE)
            .finish();

        let logger = StructuredLogger::new(RequestId::from_string("r-trace"))
            .with_workload("pdp")
            .with_format(LogFormat::Tracing);
        tracing::subscriber::with_default(subscriber, || {
            logger
                .warn_builder("catalog rejected")
                .field_i64("status", 404)
                .emit();
            logger.debug("below min level");
        });

        let output = String::from_utf8(writer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("catalog rejected"));
        assert!(output.contains("r-trace"));
        assert!(output.contains(r#"{"status":404}"#));
        assert!(!output.contains("below min level"));
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!("INFO".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
