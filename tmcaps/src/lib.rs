pub mod analysis;
pub mod classify;
pub mod error;
pub mod locator;
pub mod report;
pub mod scan;
pub mod summary;

pub use analysis::{analyze_file, analyze_str, FileResult, Violation};
pub use classify::{classify_key, KeyClass, NumericKey};
pub use error::{Result, TmCapsError};
pub use locator::{find_capture_objects, CaptureLocation};
pub use scan::{verify_directory, DEFAULT_GRAMMAR_DIR};
pub use summary::Summary;
