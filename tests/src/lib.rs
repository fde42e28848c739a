//! Integration tests for scrollsync

use scrollsync_config::ScrollbarConfig;
use scrollsync_core::logging::{ci_config, dev_config, prod_config, LogLevel};
use scrollsync_surface::{HeadlessHost, ScrollSynchronizer};

pub mod properties;
pub mod scenarios;

/// Synchronizer wired to an in-memory host, recording row requests
pub type TestSync = ScrollSynchronizer<HeadlessHost, Vec<usize>>;

/// Synchronizer with measured cells and a laid-out container
pub fn laid_out(cell_height: f64, width: f64, height: f64) -> TestSync {
    let mut sync = ScrollSynchronizer::new(HeadlessHost::new(), Vec::new(), ScrollbarConfig::default());
    sync.host_mut().visible.height = height;
    sync.cell_size_changed(cell_height);
    sync.resized(width, height);
    sync
}

#[test]
fn test_logging_configurations() {
    let dev_config = dev_config();
    assert_eq!(dev_config.global_level, LogLevel::Debug);
    assert!(!dev_config.json_format);
    assert!(dev_config.use_colors);

    let prod_config = prod_config();
    assert_eq!(prod_config.global_level, LogLevel::Info);
    assert!(prod_config.json_format);
    assert!(!prod_config.use_colors);

    let ci_config = ci_config();
    assert_eq!(ci_config.global_level, LogLevel::Info);
    assert!(ci_config.json_format);
    assert!(!ci_config.use_colors);
    assert!(ci_config.include_timestamps);
}
