use crate::models::ProfileField;

/// Receives a notification for every extraction strategy the extractor tries
pub trait ExtractionObserver: Send + Sync {
    /// `value` is `None` when the strategy produced nothing
    fn attempt(&self, field: ProfileField, strategy: &'static str, value: Option<&str>);
}

/// Default observer: emits a `tracing` debug event per attempt
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ExtractionObserver for TracingObserver {
    fn attempt(&self, field: ProfileField, strategy: &'static str, value: Option<&str>) {
        match value {
            Some(value) => tracing::debug!(%field, strategy, value, "extraction strategy matched"),
            None => tracing::debug!(%field, strategy, "extraction strategy found nothing"),
        }
    }
}

/// One recorded extraction attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub field: ProfileField,
    pub strategy: &'static str,
    pub value: Option<String>,
}

/// Observer that keeps every attempt in memory
#[derive(Debug, Default)]
pub struct RecordingObserver {
    attempts: std::sync::Mutex<Vec<Attempt>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> Vec<Attempt> {
        self.attempts
            .lock()
            .map(|attempts| attempts.clone())
            .unwrap_or_default()
    }

    /// Strategies tried for one field, in order
    pub fn strategies_for(&self, field: ProfileField) -> Vec<&'static str> {
        self.attempts()
            .into_iter()
            .filter(|a| a.field == field)
            .map(|a| a.strategy)
            .collect()
    }
}

impl ExtractionObserver for RecordingObserver {
    fn attempt(&self, field: ProfileField, strategy: &'static str, value: Option<&str>) {
        if let Ok(mut attempts) = self.attempts.lock() {
            attempts.push(Attempt {
                field,
                strategy,
                value: value.map(str::to_string),
            });
        }
    }
}
