//! Simulated brewing hardware: tanks, device parts and the combined
//! mechanism. Pure and synchronous; the server wraps one instance in a
//! mutex and every request goes through it.

mod containers;
mod devices;
mod mechanism;

pub use containers::Tank;
pub use devices::{CoffeeGrinder, MilkHeater, PressurePump, TrashBin, WaterHeater};
pub use mechanism::{BrewMechanism, BrewProblems};
