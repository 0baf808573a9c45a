use serde::{Deserialize, Serialize};

use crate::{
    error::ControllerError,
    utils::{inverse_lerp, lerp},
};

/// Number of pre-simulated air brakes extensions, 0% to 100% in 20% steps.
pub const DEPLOYMENT_LEVELS: usize = 6;

/// Index of the fully deployed (100%) surface.
pub const FULL_DEPLOYMENT_LEVEL: usize = DEPLOYMENT_LEVELS - 1;

/// Polynomial surface coefficients, one row per deployment level.
///
/// Each row `[c0, c1, c2, c3, c4]` gives
/// `drag = c0 + c1*alt + c2*vel + c3*alt*vel + c4*vel^2`.
pub type DragSurfaceTable = [[f64; 5]; DEPLOYMENT_LEVELS];

/// Surface fits for the flight vehicle, altitude in m, velocity in m/s, drag in N.
pub const DEFAULT_DRAG_SURFACES: DragSurfaceTable = [
    [0.0, 0.0, 0.0, 0.0, 0.0],                                                // 0%
    [-0.102912726, -0.000151700, 0.001042665, 0.0000041259, 0.000415087], // 20%
    [-0.183309557, -0.000256191, 0.008246675, 0.0000120688, 0.000861634], // 40%
    [-0.378713528, -0.000554695, 0.004619966, 0.0000177406, 0.001427697], // 60%
    [-0.679742164, -0.000995227, 0.001080119, 0.0000233844, 0.002092339], // 80%
    [-1.161195104, -0.001690272, -0.003398721, 0.0000376809, 0.002936851], // 100%
];

/// Drag force produced by the air brakes at each discrete deployment level.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragModel {
    surfaces: DragSurfaceTable,
}

impl Default for DragModel {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_SURFACES)
    }
}

impl DragModel {
    pub const fn new(surfaces: DragSurfaceTable) -> Self {
        Self { surfaces }
    }

    pub fn surfaces(&self) -> &DragSurfaceTable {
        &self.surfaces
    }

    /// Drag at one of the 6 deployment levels, each level is a 20% step.
    pub fn drag(
        &self,
        level: usize,
        altitude: f64,
        velocity: f64,
    ) -> Result<f64, ControllerError> {
        let c = self
            .surfaces
            .get(level)
            .ok_or(ControllerError::InvalidLevel(level))?;

        Ok(evaluate_surface(c, altitude, velocity))
    }

    /// Largest drag the air brakes can realize at this flight condition.
    pub fn max_drag(&self, altitude: f64, velocity: f64) -> f64 {
        evaluate_surface(&self.surfaces[FULL_DEPLOYMENT_LEVEL], altitude, velocity)
    }

    /// Drag of every level at this flight condition, 0% first.
    pub fn level_drags(&self, altitude: f64, velocity: f64) -> [f64; DEPLOYMENT_LEVELS] {
        let mut drags = [0.0; DEPLOYMENT_LEVELS];
        for (drag, c) in drags.iter_mut().zip(self.surfaces.iter()) {
            *drag = evaluate_surface(c, altitude, velocity);
        }
        drags
    }

    /// true when drag strictly increases with deployment level
    pub fn is_monotonic(&self, altitude: f64, velocity: f64) -> bool {
        self.level_drags(altitude, velocity)
            .windows(2)
            .all(|pair| pair[1] > pair[0])
    }

    /// deployment: 0.0 - 1.0, clamped
    ///
    /// Linear interpolation between the two neighbouring levels.
    pub fn drag_at_deployment(&self, deployment: f64, altitude: f64, velocity: f64) -> f64 {
        lerp(
            deployment.clamp(0.0, 1.0),
            &self.level_drags(altitude, velocity),
        )
    }

    /// returns the deployment 0.0 - 1.0 that produces `requested_drag`
    ///
    /// Only meaningful where [`Self::is_monotonic`] holds. Requests below the
    /// retracted drag map to 0.0, requests above the full deployment drag map
    /// to 1.0.
    pub fn deployment_from_drag(
        &self,
        requested_drag: f64,
        altitude: f64,
        velocity: f64,
    ) -> f64 {
        inverse_lerp(requested_drag, &self.level_drags(altitude, velocity))
    }
}

fn evaluate_surface(c: &[f64; 5], altitude: f64, velocity: f64) -> f64 {
    c[0] + c[1] * altitude
        + c[2] * velocity
        + c[3] * altitude * velocity
        + c[4] * velocity * velocity
}
