//! # metro-sim
//!
//! Simulated train movement over a [`metro_track`] network.
//!
//! The crate deliberately owns no timer. [`advance`] is a pure transition
//! on immutable state records, [`Fleet::advance_all`] applies it across a
//! roster, and whatever scheduling primitive the embedding environment
//! provides (interval timer, actor tick, event loop) decides when to call
//! it.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use geo::Point;
//! use metro_track::prelude::*;
//! use metro_sim::Fleet;
//!
//! let line = LineDefinition::new(
//!     "line-1",
//!     "Line 1",
//!     vec![
//!         StationRecord::new("aluva", "Aluva", Point::new(76.3530, 10.1102)),
//!         StationRecord::new("pulinchode", "Pulinchode", Point::new(76.3445, 10.0987)),
//!     ],
//! );
//! let network: Arc<dyn TrackNetwork> = Arc::new(StaticTrackNetwork::new(line).unwrap());
//!
//! let mut fleet = Fleet::new(network, 2).unwrap();
//! let tick = chrono::NaiveDate::from_ymd_opt(2026, 8, 3).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! fleet.advance_all(0.1, tick);
//! assert_eq!(fleet.trains().len(), 2);
//! ```

pub mod fleet;
pub mod schedule;
pub mod state;

pub use fleet::{Fleet, SimError};
pub use schedule::{OperatingDays, ServiceWindow};
pub use state::{advance, round_trip, Direction, RouteLeg, TrainState};
