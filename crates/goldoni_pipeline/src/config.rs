//! Pipeline configuration.

use std::time::Duration;

/// Tunable knobs for one pipeline instance.
///
/// These are independent of the per-kind [`Contract`](goldoni_core::Contract)
/// table: the contract says what an accepted continuation looks like, the
/// config says how the backend is driven.
///
/// # Examples
///
/// ```
/// use goldoni_pipeline::PipelineConfig;
/// use std::time::Duration;
///
/// let config = PipelineConfig::builder()
///     .context_window_lines(30)
///     .invocation_timeout(Duration::from_secs(30))
///     .build()
///     .unwrap();
/// assert_eq!(*config.context_window_lines(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, derive_builder::Builder, derive_getters::Getters)]
#[builder(default)]
pub struct PipelineConfig {
    /// Maximum number of context lines sent to the backend
    context_window_lines: usize,
    /// Upper bound on one backend invocation
    invocation_timeout: Duration,
    /// Model identifier forwarded to the driver
    model: Option<String>,
    /// Sampling temperature forwarded to the driver
    temperature: Option<f32>,
    /// Token budget forwarded to the driver
    max_tokens: Option<u32>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            context_window_lines: 24,
            invocation_timeout: Duration::from_secs(60),
            model: None,
            temperature: None,
            max_tokens: None,
        }
    }
}

impl PipelineConfig {
    /// Start building a config.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(*config.context_window_lines(), 24);
        assert_eq!(*config.invocation_timeout(), Duration::from_secs(60));
        assert!(config.model().is_none());
    }
}
