pub mod assigner;
pub mod types;

pub use assigner::{HouseAssigner, FALLBACK_HOUSE, HOUSE_COUNT};
pub use types::{HouseCusp, HouseInconsistency, HouseSystem};
