//! Explicit, constructed-not-global pipeline configuration.
use std::path::PathBuf;

/// Default value of [`PipelineConfig::footer_margin_left`] / [`PipelineConfig::footer_margin_right`].
pub const DEFAULT_FOOTER_MARGIN: usize = 2;

/// The struct an external configuration loader hands to the pipeline coordinator.
///
/// Only `raw_data_folder` and `processed_folder` are required by the external interface
/// (§6); the remaining fields are implementer-level knobs that default to the documented
/// stock behavior, so a config built from just the two required fields reproduces the
/// specification exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Root of the input tree, as discovered by the external crawler.
    pub raw_data_folder: PathBuf,
    /// Root of the output tree.
    pub processed_folder: PathBuf,
    /// Enables the optional startup-pop trim on IMU chunks. Off by default.
    pub trim_startup_pop: bool,
    /// Bytes dropped before a footer's magic word during audio splicing.
    pub footer_margin_left: usize,
    /// Bytes dropped after a footer during audio splicing.
    pub footer_margin_right: usize,
}

impl PipelineConfig {
    /// Builds a config with every optional knob at its documented default.
    pub fn new(raw_data_folder: impl Into<PathBuf>, processed_folder: impl Into<PathBuf>) -> Self {
        PipelineConfig {
            raw_data_folder: raw_data_folder.into(),
            processed_folder: processed_folder.into(),
            trim_startup_pop: false,
            footer_margin_left: DEFAULT_FOOTER_MARGIN,
            footer_margin_right: DEFAULT_FOOTER_MARGIN,
        }
    }

    /// Enables the startup-pop trim (§4.2.1).
    pub fn with_startup_pop_trim(mut self, enabled: bool) -> Self {
        self.trim_startup_pop = enabled;
        self
    }
}
