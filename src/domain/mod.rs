//! Domain model: categories, the rate and loan formulas, simulation records and the
//! ports the application layer depends on.

pub mod category;
pub mod loan;
pub mod ports;
pub mod rate;
pub mod simulation;
