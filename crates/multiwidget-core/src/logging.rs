//! Logging facilities.
//!
//! The configurator uses the `tracing` crate for instrumentation. To see
//! logs, install a subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("multiwidget::deriver=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "multiwidget_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "multiwidget_core::signal";
    /// List models and their notifications.
    pub const MODEL: &str = "multiwidget::model";
    /// Service field derivation.
    pub const DERIVER: &str = "multiwidget::deriver";
    /// Element list controller and row binding.
    pub const CONTROLLER: &str = "multiwidget::controller";
    /// Service and entity catalogs.
    pub const CATALOG: &str = "multiwidget::catalog";
    /// Settings loading.
    pub const SETTINGS: &str = "multiwidget::settings";
}

#[cfg(test)]
mod tests {
    use super::targets;

    #[test]
    fn test_targets_are_namespaced() {
        for target in [
            targets::MODEL,
            targets::DERIVER,
            targets::CONTROLLER,
            targets::CATALOG,
            targets::SETTINGS,
        ] {
            assert!(target.starts_with("multiwidget::"));
        }
        assert!(targets::SIGNAL.starts_with(targets::CORE));
    }
}
