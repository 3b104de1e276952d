pub mod detector;
pub mod motion;
pub mod types;

pub use detector::{angular_separation, compute_aspects, AspectDetector};
pub use motion::is_applying;
pub use types::{
    AspectCatalog, AspectKind, AspectNature, AspectRecord, AspectType, OverlapPolicy, STANDARD_ASPECTS,
};
