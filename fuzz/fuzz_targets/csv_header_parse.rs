//! Fuzz target for CSV header extraction.
//!
//! Feeds arbitrary bytes to the column reader used by schema validation,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use winedata::validation::columns_from_csv_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = columns_from_csv_slice(data);
});
