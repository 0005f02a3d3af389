// Application Configuration
// Defaults compiled from config.yaml at build time
// Modify config.yaml and rebuild to change these values

// Include the auto-generated config from build.rs
pub mod compiled {
    include!(concat!(env!("OUT_DIR"), "/compiled_config.rs"));
}

/// Application-level configuration for the token inspector
/// Values are compiled in from config.yaml at build time
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Pixels added or removed per window resize step
    pub window_step: u32,

    /// Workspace config file searched for when locating the workspace
    pub workspace_config_name: String,

    /// Log file used when the workspace does not name one
    pub default_log_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_step: compiled::WINDOW_STEP,
            workspace_config_name: compiled::WORKSPACE_CONFIG_NAME.to_string(),
            default_log_file: compiled::DEFAULT_LOG_FILE.to_string(),
        }
    }
}
