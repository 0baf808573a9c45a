use serde::{Deserialize, Serialize};

use crate::{
    controller::{PidGains, SEA_LEVEL_AIR_DENSITY},
    error::{ControllerError, PhysicalParameter, ensure_finite, ensure_positive},
};

/// Resolved controller configuration for one flight.
///
/// Lengths in m, mass in kg, times in s.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerParameters {
    /// target apogee
    pub setpoint: f64,
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// derivative low pass filter time constant
    pub tau: f64,
    /// used unless the host reports its own step size at flight start
    pub sample_period: f64,
    /// drag coefficient estimate of the vehicle, for the apogee prediction
    pub drag_coefficient: f64,
    /// burnout mass estimate of the vehicle, for the apogee prediction
    pub mass: f64,
    pub air_density: f64,
}

impl Default for ControllerParameters {
    fn default() -> Self {
        Self {
            setpoint: 1371.6,
            kp: 5.0,
            ki: 0.0,
            kd: 0.0,
            tau: 1.0,
            sample_period: 0.05,
            drag_coefficient: 0.49,
            mass: 20.02,
            air_density: SEA_LEVEL_AIR_DENSITY,
        }
    }
}

impl ControllerParameters {
    pub fn validate(&self) -> Result<(), ControllerError> {
        ensure_finite(PhysicalParameter::Setpoint, self.setpoint)?;
        ensure_finite(PhysicalParameter::ProportionalGain, self.kp)?;
        ensure_finite(PhysicalParameter::IntegralGain, self.ki)?;
        ensure_finite(PhysicalParameter::DerivativeGain, self.kd)?;
        ensure_positive(PhysicalParameter::SamplePeriod, self.sample_period)?;
        ensure_positive(PhysicalParameter::FilterTimeConstant, self.tau)?;
        ensure_positive(PhysicalParameter::DragCoefficient, self.drag_coefficient)?;
        ensure_positive(PhysicalParameter::Mass, self.mass)?;
        ensure_positive(PhysicalParameter::AirDensity, self.air_density)?;
        Ok(())
    }

    pub fn gains(&self) -> PidGains {
        PidGains {
            kp: self.kp,
            ki: self.ki,
            kd: self.kd,
            tau: self.tau,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ControllerParameters::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_physical_values() {
        let invalid = [
            ControllerParameters {
                mass: 0.0,
                ..Default::default()
            },
            ControllerParameters {
                drag_coefficient: -0.49,
                ..Default::default()
            },
            ControllerParameters {
                sample_period: 0.0,
                ..Default::default()
            },
            ControllerParameters {
                tau: 0.0,
                ..Default::default()
            },
            ControllerParameters {
                air_density: f64::INFINITY,
                ..Default::default()
            },
        ];

        for parameters in invalid {
            let err = parameters.validate().unwrap_err();
            assert!(err.is_configuration_error(), "{:?}", err);
        }
    }

    #[test]
    fn rejects_non_finite_setpoint_and_gains() {
        let cases = [
            (
                ControllerParameters {
                    setpoint: f64::NAN,
                    ..Default::default()
                },
                PhysicalParameter::Setpoint,
            ),
            (
                ControllerParameters {
                    kp: f64::NAN,
                    ..Default::default()
                },
                PhysicalParameter::ProportionalGain,
            ),
            (
                ControllerParameters {
                    ki: f64::INFINITY,
                    ..Default::default()
                },
                PhysicalParameter::IntegralGain,
            ),
            (
                ControllerParameters {
                    kd: f64::NEG_INFINITY,
                    ..Default::default()
                },
                PhysicalParameter::DerivativeGain,
            ),
        ];

        for (parameters, expected) in cases {
            match parameters.validate() {
                Err(ControllerError::NonFiniteParameter { parameter, .. }) => {
                    assert_eq!(parameter, expected)
                }
                other => panic!("expected {:?} to be rejected, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn gains_are_copied() {
        let parameters = ControllerParameters {
            kp: -1.5,
            ki: 0.25,
            kd: 0.125,
            tau: 0.5,
            ..Default::default()
        };
        assert_eq!(
            parameters.gains(),
            PidGains {
                kp: -1.5,
                ki: 0.25,
                kd: 0.125,
                tau: 0.5
            }
        );
    }
}
