pub mod mapper;
pub mod types;

pub use mapper::{normalize_degrees, ZodiacMapper};
pub use types::{Element, Modality, Sign, ZodiacPlacement};
