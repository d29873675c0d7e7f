//! Value objects for the FareLane domain

mod coordinates;
mod place;

pub use coordinates::Coordinates;
pub use place::Place;
