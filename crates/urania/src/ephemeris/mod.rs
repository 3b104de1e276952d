#[cfg(feature = "swiss-ephemeris")]
pub mod adapter;
pub mod provider;
pub mod snapshot;
pub mod types;

#[cfg(feature = "swiss-ephemeris")]
pub use adapter::SwissEphemerisAdapter;
pub use provider::{julian_day_from_utc, EphemerisError, EphemerisProvider};
pub use snapshot::{EphemerisSnapshot, SnapshotEphemeris};
pub use types::{Body, GeoLocation, PlanetPosition, RawHouses, RawPosition};
