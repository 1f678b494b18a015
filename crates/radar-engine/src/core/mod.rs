pub mod geometry;
pub mod orbit;
pub mod rng;
pub mod scheduler;
pub mod time;
