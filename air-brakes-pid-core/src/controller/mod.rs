use nalgebra::Vector3;

use crate::{
    drag_model::DragModel,
    error::ControllerError,
    parameters::ControllerParameters,
};

mod apogee_predictor;
mod pid;

pub use apogee_predictor::{CoastModel, SEA_LEVEL_AIR_DENSITY, predict_apogee};
pub use pid::{ControllerState, PidController, PidGains, PidOutput, PidTerms};

/// Vehicle state reported by the host for one time step.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInput {
    /// m
    pub altitude: f64,
    /// m/s, positive up
    pub vertical_velocity: f64,
    /// magnitude of the velocity, m/s
    pub speed: f64,
    /// current motor thrust, N
    pub thrust: f64,
    /// local gravitational acceleration, m/s^2
    pub gravity: f64,
    /// m^2
    pub reference_area: f64,
}

impl StepInput {
    /// Builds the input from world frame vectors with z pointing up.
    pub fn from_vectors(
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
        thrust: f64,
        gravity: f64,
        reference_area: f64,
    ) -> Self {
        Self {
            altitude: position.z,
            vertical_velocity: velocity.z,
            speed: velocity.magnitude(),
            thrust,
            gravity,
            reference_area,
        }
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutput {
    /// force to add to the thrust of this step, always <= 0
    pub force: f64,
    pub predicted_apogee: f64,
    /// air brakes extension 0.0 - 1.0 that produces `force`, interpolated
    /// at the predicted apogee and current speed
    ///
    /// Exact only where [`DragModel::is_monotonic`] holds at that condition.
    /// Elsewhere it is still clamped to 0.0 - 1.0 but may not reproduce
    /// `force` through [`DragModel::drag_at_deployment`].
    pub deployment: f64,
}

/// Closes the loop between apogee prediction, the PID law and the air brakes
/// drag envelope. One instance per flight.
#[derive(Debug, Clone)]
pub struct AirBrakesController {
    parameters: ControllerParameters,
    drag_model: DragModel,
    pid: PidController,
    in_flight: bool,
}

impl AirBrakesController {
    pub fn new(parameters: ControllerParameters) -> Result<Self, ControllerError> {
        Self::with_drag_model(parameters, DragModel::default())
    }

    pub fn with_drag_model(
        parameters: ControllerParameters,
        drag_model: DragModel,
    ) -> Result<Self, ControllerError> {
        parameters.validate()?;
        let pid = PidController::new(parameters.gains(), parameters.sample_period)?;

        Ok(Self {
            parameters,
            drag_model,
            pid,
            in_flight: false,
        })
    }

    pub fn parameters(&self) -> &ControllerParameters {
        &self.parameters
    }

    pub fn drag_model(&self) -> &DragModel {
        &self.drag_model
    }

    pub fn pid(&self) -> &PidController {
        &self.pid
    }

    /// Adopts the host's time step as the PID sample period.
    ///
    /// Must be called before the first [`Self::step`] of the flight.
    pub fn start_flight(&mut self, time_step: f64) -> Result<(), ControllerError> {
        if self.in_flight {
            return Err(ControllerError::FlightInProgress);
        }
        self.pid.set_sample_period(time_step)?;
        log_info!("flight started, sample period {} s", time_step);
        Ok(())
    }

    pub fn step(&mut self, input: &StepInput) -> Result<StepOutput, ControllerError> {
        if !(input.speed.is_finite() && input.thrust.is_finite()) {
            return Err(ControllerError::NumericDomain(
                "speed or thrust is not finite",
            ));
        }

        let coast_model = CoastModel {
            mass: self.parameters.mass,
            drag_coefficient: self.parameters.drag_coefficient,
            reference_area: input.reference_area,
            gravity: input.gravity,
            air_density: self.parameters.air_density,
        };
        let predicted_apogee =
            coast_model.predict_apogee(input.altitude, input.vertical_velocity)?;
        self.in_flight = true;

        let envelope = self.drag_model.max_drag(predicted_apogee, input.speed);
        let requested_drag = self
            .pid
            .update(
                self.parameters.setpoint,
                predicted_apogee,
                input.thrust == 0.0,
                envelope,
            )
            .value();
        if !requested_drag.is_finite() {
            return Err(ControllerError::NumericDomain(
                "requested drag is not finite",
            ));
        }

        let drag = clamp_drag(requested_drag, envelope);
        if requested_drag > drag && drag > 0.0 {
            log_debug!(
                "air brakes saturated, requested {} N, envelope {} N",
                requested_drag,
                envelope
            );
        }

        log_trace!(
            "altitude: {}, apogee: {}, envelope: {}, requested: {}, drag: {}",
            input.altitude,
            predicted_apogee,
            envelope,
            requested_drag,
            drag
        );

        Ok(StepOutput {
            force: -drag,
            predicted_apogee,
            deployment: self
                .drag_model
                .deployment_from_drag(drag, predicted_apogee, input.speed),
        })
    }
}

/// Limits a requested drag to `[0, envelope]`.
///
/// A negative envelope (air brakes producing no usable drag, e.g. close to
/// apogee) collapses the range to 0.
pub fn clamp_drag(requested_drag: f64, envelope: f64) -> f64 {
    requested_drag.min(envelope.max(0.0)).max(0.0)
}
