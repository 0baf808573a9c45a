use serde::{Deserialize, Serialize};

use crate::error::{ControllerError, PhysicalParameter, ensure_finite, ensure_positive};

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// derivative low pass filter time constant, s
    pub tau: f64,
}

/// Memory carried between controller updates within one flight.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerState {
    pub integral: f64,
    pub prev_error: f64,
    pub filtered_derivative: f64,
    pub prev_measurement: f64,
}

/// Individual terms of one active update.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidTerms {
    pub error: f64,
    pub proportional: f64,
    pub integral: f64,
    pub derivative: f64,
    pub min_integral: f64,
    pub max_integral: f64,
}

impl PidTerms {
    pub fn output(&self) -> f64 {
        self.proportional + self.integral + self.derivative
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PidOutput {
    /// Motor is burning, no correction is computed.
    Idle,
    Active(PidTerms),
}

impl PidOutput {
    pub fn value(&self) -> f64 {
        match self {
            Self::Idle => 0.0,
            Self::Active(terms) => terms.output(),
        }
    }
}

/// PID law with trapezoidal integration, dynamic integral clamping and a
/// first order low pass filter on the derivative of the measurement.
#[derive(Debug, Clone)]
pub struct PidController {
    gains: PidGains,
    sample_period: f64,
    state: ControllerState,
}

impl PidController {
    pub fn new(gains: PidGains, sample_period: f64) -> Result<Self, ControllerError> {
        ensure_finite(PhysicalParameter::ProportionalGain, gains.kp)?;
        ensure_finite(PhysicalParameter::IntegralGain, gains.ki)?;
        ensure_finite(PhysicalParameter::DerivativeGain, gains.kd)?;
        ensure_positive(PhysicalParameter::FilterTimeConstant, gains.tau)?;
        ensure_positive(PhysicalParameter::SamplePeriod, sample_period)?;

        Ok(Self {
            gains,
            sample_period,
            state: ControllerState::default(),
        })
    }

    pub fn gains(&self) -> &PidGains {
        &self.gains
    }

    pub fn sample_period(&self) -> f64 {
        self.sample_period
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub(crate) fn set_sample_period(&mut self, sample_period: f64) -> Result<(), ControllerError> {
        self.sample_period = ensure_positive(PhysicalParameter::SamplePeriod, sample_period)?;
        Ok(())
    }

    /// need to be called once per sample period
    ///
    /// `max_achievable_drag` bounds the integral term, it should be the full
    /// deployment drag at the current flight condition. While the motor
    /// produces thrust the controller is idle: it returns 0 and keeps its
    /// memory untouched so the next active update resumes from the last one.
    pub fn update(
        &mut self,
        setpoint: f64,
        measurement: f64,
        thrust_is_zero: bool,
        max_achievable_drag: f64,
    ) -> PidOutput {
        if !thrust_is_zero {
            return PidOutput::Idle;
        }

        let PidGains { kp, ki, kd, tau } = self.gains;
        let t = self.sample_period;
        let state = &mut self.state;

        let error = setpoint - measurement;
        let proportional = kp * error;

        // trapezoidal integration
        state.integral += 0.5 * ki * t * (error + state.prev_error);

        // the integral may only fill the gap between the proportional term
        // and what the air brakes can actually deliver
        let max_integral = (max_achievable_drag - proportional).max(0.0);
        let min_integral = (-proportional).min(0.0);
        if state.integral > max_integral {
            state.integral = max_integral;
        } else if state.integral < min_integral {
            state.integral = min_integral;
        }

        state.filtered_derivative = (-2.0 * kd * (measurement - state.prev_measurement)
            + (2.0 * tau - t) * state.filtered_derivative)
            / (2.0 * tau + t);

        state.prev_error = error;
        state.prev_measurement = measurement;

        PidOutput::Active(PidTerms {
            error,
            proportional,
            integral: state.integral,
            derivative: state.filtered_derivative,
            min_integral,
            max_integral,
        })
    }
}
