//! Fuzz target for YAML document loading.

#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use winedata::utils::io_yaml::from_yaml_str;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(config) = from_yaml_str(text, Path::new("<fuzz>")) {
            let _ = config.path("COLUMNS");
        }
    }
});
