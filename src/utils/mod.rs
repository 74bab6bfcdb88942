//! File-system and structured-document helpers shared by the pipeline stages.
//!
//! Every helper logs what it touched through `tracing` and returns
//! [`PrepError`](crate::PrepError) with the offending path attached.
//!
//! - [`config_box`]: a loaded document with key and dotted-path access
//! - [`io_yaml`], [`io_json`], [`io_bin`]: document readers and writers
//! - [`fs`]: directory creation and size reporting

pub mod config_box;
pub mod fs;
pub mod io_bin;
pub mod io_json;
pub mod io_yaml;

pub use config_box::ConfigBox;
pub use fs::{create_directories, get_size};
pub use io_bin::{load_bin, save_bin};
pub use io_json::{load_json, save_json};
pub use io_yaml::read_yaml;
