//! Shared logging utilities for consistent tracing across the workspace

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::types::Component;

/// Default level applied to workspace crates when none is given
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Build the env-filter directive string for a base level
pub fn filter_directives(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or(DEFAULT_LOG_LEVEL);
    format!("workflow={base_level},shared={base_level},reqwest=warn,hyper=warn")
}

/// Initialize the stdout tracing subscriber.
///
/// Must be called once, from the binary's composition root.
pub fn init_tracing(log_level: Option<&str>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let directives = filter_directives(log_level);

    fmt()
        .with_env_filter(EnvFilter::new(&directives))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for component-aware info logging
#[macro_export]
macro_rules! component_info {
    ($component:expr, $($arg:tt)*) => {
        tracing::info!(
            component = %$component,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for component-aware warning logging
#[macro_export]
macro_rules! component_warn {
    ($component:expr, $($arg:tt)*) => {
        tracing::warn!(
            component = %$component,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for component-aware error logging
#[macro_export]
macro_rules! component_error {
    ($component:expr, $($arg:tt)*) => {
        tracing::error!(
            component = %$component,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for component-aware debug logging
#[macro_export]
macro_rules! component_debug {
    ($component:expr, $($arg:tt)*) => {
        tracing::debug!(
            component = %$component,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(component: Component, details: &str) {
    info!(
        component = %component,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for shutdown messages
pub fn log_shutdown(component: Component, reason: &str) {
    info!(
        component = %component,
        timestamp = format_timestamp(),
        "🛑 Shutting down: {}",
        reason
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(component: Component, context: &str, error: &dyn std::fmt::Display) {
    error!(
        component = %component,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(component: Component, message: &str) {
    info!(
        component = %component,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        assert_eq!(
            filter_directives(None),
            "workflow=info,shared=info,reqwest=warn,hyper=warn"
        );
        assert!(filter_directives(Some("debug")).starts_with("workflow=debug,shared=debug"));
    }

    #[test]
    fn test_timestamp_format() {
        let stamp = format_timestamp();
        // HH:MM:SS.mmm
        assert_eq!(stamp.len(), 12);
        assert_eq!(&stamp[2..3], ":");
        assert_eq!(&stamp[8..9], ".");
    }

    #[test]
    fn test_component_macros_accept_fields() {
        let subscriber = tracing_subscriber::fmt().with_test_writer().finish();
        tracing::subscriber::with_default(subscriber, || {
            let reason = "server returned 500";
            component_error!(Component::Cli, error = %reason, "❌ Workflow stopped before {}", "model trained");
            component_warn!(Component::Store, error = %reason, "⚠️ Asset refresh failed");
            log_error(Component::Store, "Workflow advance", &reason);
        });
    }
}
