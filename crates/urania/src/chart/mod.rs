pub mod engine;
pub mod settings;
pub mod summary;
pub mod types;

pub use engine::ChartEngine;
pub use settings::ChartSettings;
pub use summary::{dominant, ChartAggregator};
pub use types::{BirthChart, BirthData, ChartPlanet, ChartPoint, ChartSummary};
