//! Fixed domain schemas for Starcheck: space-station telemetry,
//! alien-contact event logs, and mission manifests with nested crew.
//!
//! Each module declares its schema, the business rules that go with it,
//! and a validated record wrapper with typed accessors.

pub mod contact;
pub mod mission;
pub mod station;

pub use contact::{AlienContact, ContactType, contact_schema};
pub use mission::{CrewMember, Rank, SpaceMission, crew_member_schema, mission_schema};
pub use station::{SpaceStation, station_schema};
