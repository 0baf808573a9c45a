// only use std when feature = "std" is enabled or during testing
#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod fmt;

mod controller;
mod drag_model;
mod error;
mod parameters;
mod utils;

pub use controller::{
    AirBrakesController, CoastModel, ControllerState, PidController, PidGains, PidOutput,
    PidTerms, SEA_LEVEL_AIR_DENSITY, StepInput, StepOutput, clamp_drag, predict_apogee,
};
pub use drag_model::{
    DEFAULT_DRAG_SURFACES, DEPLOYMENT_LEVELS, DragModel, DragSurfaceTable, FULL_DEPLOYMENT_LEVEL,
};
pub use error::{ControllerError, PhysicalParameter};
pub use parameters::ControllerParameters;

#[cfg(test)]
mod tests;
