/// Configuration for tracing initialization, filled in from `Settings` at
/// startup.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
}
