//! Tracing and logging (shared setup).

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize process-wide observability.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}
