#![no_main]

use libfuzzer_sys::fuzz_target;
use webmirror::config::AppConfig;

fuzz_target!(|data: &[u8]| {
    // Arbitrary preference file bytes must never panic on load
    if let Ok(mut config) = serde_json::from_slice::<AppConfig>(data) {
        config.sanitize();
        assert!(config.preview_size.is_valid());
        assert!((1..=AppConfig::MAX_POLL_INTERVAL_MS).contains(&config.poll_interval_ms));
    }
});
