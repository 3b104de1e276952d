//! Natal chart computation.
//!
//! Raw positions come from an [`ephemeris::EphemerisProvider`]; the engine maps
//! them onto the tropical zodiac, assigns houses, detects aspects and
//! summarizes the result into a [`BirthChart`].

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod zodiac;

pub use aspects::{compute_aspects, AspectCatalog, AspectKind, AspectNature, AspectRecord, OverlapPolicy};
pub use chart::{BirthChart, ChartEngine, ChartSettings, ChartSummary};
pub use ephemeris::{Body, EphemerisError, EphemerisProvider, PlanetPosition, SnapshotEphemeris};
#[cfg(feature = "swiss-ephemeris")]
pub use ephemeris::SwissEphemerisAdapter;
pub use error::ChartError;
pub use houses::HouseSystem;
pub use zodiac::{Element, Modality, Sign};
