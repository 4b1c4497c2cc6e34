//! Configuration module for loading scene parameters.
//!
//! Defaults reproduce the reference cerebral vessel scene; JSON files in a
//! parameter directory override them.

mod parameters;

pub use parameters::{
    ParticleParameters, Parameters, TubeParameters, VesselParameters, VesselSpec, ViewParameters,
};
