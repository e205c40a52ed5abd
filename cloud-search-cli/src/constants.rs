// ABOUTME: Centralized constants for the cloudsearch CLI
// ABOUTME: Contains limits, config locations, output formats, and display widths

/// Result limits for the search command
pub mod limits {
    /// Largest per-type limit accepted on the command line
    pub const MAX_RESULT_LIMIT: usize = 500;
}

/// Configuration file locations
pub mod config {
    /// Project-local config file name
    pub const PROJECT_CONFIG_FILE: &str = "cloudsearch.toml";

    /// Directory under the XDG config home
    pub const CONFIG_DIR: &str = "cloudsearch";

    /// File name inside the config directory
    pub const CONFIG_FILE: &str = "config.toml";
}

/// Output format names accepted in configuration
pub mod formats {
    pub const TABLE: &str = "table";
    pub const JSON: &str = "json";
    pub const YAML: &str = "yaml";

    pub const ALL_FORMATS: &[&str] = &[TABLE, JSON, YAML];
}

/// UI and formatting constants
pub mod ui {
    /// Labels longer than this are truncated in table output
    pub const MAX_LABEL_WIDTH: usize = 40;

    /// Tags and IPs columns are truncated past this width
    pub const MAX_LIST_WIDTH: usize = 32;
}

/// Environment variables consulted by the CLI
pub mod env {
    pub const NO_COLOR: &str = "NO_COLOR";
    pub const TERM: &str = "TERM";
    pub const XDG_CONFIG_HOME: &str = "XDG_CONFIG_HOME";
}
