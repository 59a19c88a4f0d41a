//! Sinks for the diagnostic messages emitted while resolving settings.

/// Receives diagnostic messages from the resolver.
///
/// Implementations must not panic; resolution outcomes never depend on them.
pub trait Diagnostics: Send + Sync + std::fmt::Debug {
    fn warn(&self, message: &str);
    fn debug(&self, message: &str);
}

/// Discards every message. This is the default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn warn(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
}

/// Forwards messages to the `tracing` ecosystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "dragon_settings", "{message}");
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "dragon_settings", "{message}");
    }
}
