/// Constants used throughout the raii codebase
// Environment variable names
pub const RAII_LOG_VAR: &str = "RAII_LOG";
pub const RAII_DEMO_FORMAT_VAR: &str = "RAII_DEMO_FORMAT";
pub const RAII_DEMO_INITIAL_VAR: &str = "RAII_DEMO_INITIAL";

// Filter used when RAII_LOG is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "warn";

// Label given to resources acquired without one
pub const ANONYMOUS_RESOURCE: &str = "<anonymous>";
