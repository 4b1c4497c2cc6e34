//! Flow particles advected along vessel centerlines.

mod advector;

pub use advector::{wall_clock_seconds, Particle, ParticleSystem};
