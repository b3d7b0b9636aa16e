//! Project detectors.
//!
//! Detectors are registered explicitly through [`builtin_detectors`]. The
//! order of that list is the resolution priority, so a detector for a more
//! specific stack must come before a general one it overlaps with.

mod nodejs;

use cicdgen_core::{application::ports::Detector, error::CicdResult};

pub use nodejs::{MANIFEST_FILE, NodeJsDetector};

/// Every detector shipped with cicdgen, in priority order.
///
/// Each entry is a `Result` so a detector that needs setup can fail on its
/// own without taking the others down; the registry skips failures.
pub fn builtin_detectors() -> Vec<CicdResult<Box<dyn Detector>>> {
    vec![Ok(Box::new(NodeJsDetector::new()))]
}
