use crate::error::{ControllerError, PhysicalParameter, ensure_positive};

/// Sea level air density (kg/m^3) from the standard atmosphere.
pub const SEA_LEVEL_AIR_DENSITY: f64 = 1.225;

/// Vehicle and environment constants for the ballistic coast model.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoastModel {
    pub mass: f64,
    pub drag_coefficient: f64,
    pub reference_area: f64,
    pub gravity: f64,
    pub air_density: f64,
}

impl CoastModel {
    pub fn validate(&self) -> Result<(), ControllerError> {
        ensure_positive(PhysicalParameter::Mass, self.mass)?;
        ensure_positive(PhysicalParameter::DragCoefficient, self.drag_coefficient)?;
        ensure_positive(PhysicalParameter::ReferenceArea, self.reference_area)?;
        ensure_positive(PhysicalParameter::Gravity, self.gravity)?;
        ensure_positive(PhysicalParameter::AirDensity, self.air_density)?;
        Ok(())
    }

    /// Speed at which drag balances weight, m/s.
    pub fn terminal_velocity(&self) -> Result<f64, ControllerError> {
        self.validate()?;
        Ok(libm::sqrt(
            (2.0 * self.mass * self.gravity)
                / (self.drag_coefficient * self.reference_area * self.air_density),
        ))
    }

    /// Apogee of an unpowered coast under velocity squared drag.
    ///
    /// Closed form solution of `dv/dt = -g - k v^2` integrated until v = 0:
    /// `h = vt^2 / (2g) * ln((v^2 + vt^2) / vt^2)` where vt is the terminal
    /// velocity. Only valid while the motor is not producing thrust.
    pub fn predict_apogee(
        &self,
        altitude: f64,
        vertical_velocity: f64,
    ) -> Result<f64, ControllerError> {
        if !altitude.is_finite() {
            return Err(ControllerError::NumericDomain("altitude is not finite"));
        }
        if !vertical_velocity.is_finite() {
            return Err(ControllerError::NumericDomain(
                "vertical velocity is not finite",
            ));
        }

        let terminal_velocity = self.terminal_velocity()?;
        let vt_squared = terminal_velocity * terminal_velocity;

        let log_argument = (vertical_velocity * vertical_velocity + vt_squared) / vt_squared;
        if !(log_argument.is_finite() && log_argument > 0.0) {
            return Err(ControllerError::NumericDomain(
                "apogee log argument is not positive",
            ));
        }

        let apogee = altitude + (vt_squared / (2.0 * self.gravity)) * libm::log(log_argument);
        if !apogee.is_finite() {
            return Err(ControllerError::NumericDomain("predicted apogee is not finite"));
        }

        Ok(apogee)
    }
}

/// Free function form of [`CoastModel::predict_apogee`].
pub fn predict_apogee(
    altitude: f64,
    vertical_velocity: f64,
    mass: f64,
    drag_coefficient: f64,
    reference_area: f64,
    gravity: f64,
    air_density: f64,
) -> Result<f64, ControllerError> {
    CoastModel {
        mass,
        drag_coefficient,
        reference_area,
        gravity,
        air_density,
    }
    .predict_apogee(altitude, vertical_velocity)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn coast_model() -> CoastModel {
        CoastModel {
            mass: 20.02,
            drag_coefficient: 0.49,
            reference_area: 0.0136,
            gravity: 9.81,
            air_density: SEA_LEVEL_AIR_DENSITY,
        }
    }

    #[test]
    fn terminal_velocity() {
        // sqrt(2 * 20.02 * 9.81 / (0.49 * 0.0136 * 1.225))
        assert_relative_eq!(
            coast_model().terminal_velocity().unwrap(),
            219.3542,
            epsilon = 1e-3
        );
    }

    #[test]
    fn stationary_vehicle_is_at_apogee() {
        let model = coast_model();
        for altitude in [0.0, 512.0, 1371.6, 3000.0] {
            assert_eq!(model.predict_apogee(altitude, 0.0).unwrap(), altitude);
        }
    }

    #[test]
    fn apogee_increases_with_vertical_velocity() {
        let model = coast_model();
        let mut last = model.predict_apogee(300.0, 0.0).unwrap();
        for i in 1..=60 {
            let apogee = model.predict_apogee(300.0, i as f64 * 5.0).unwrap();
            assert!(apogee > last, "apogee did not increase at {} m/s", i * 5);
            last = apogee;
        }
    }

    #[test]
    fn burnout_apogee() {
        // vt^2 / 2g * ln((200^2 + vt^2) / vt^2) = 2452.5 * 0.60502
        let apogee = coast_model().predict_apogee(300.0, 200.0).unwrap();
        assert_relative_eq!(apogee, 1783.8, epsilon = 0.5);
    }

    #[test]
    fn matches_free_function() {
        let model = coast_model();
        assert_eq!(
            model.predict_apogee(812.0, 143.0),
            predict_apogee(812.0, 143.0, 20.02, 0.49, 0.0136, 9.81, 1.225)
        );
    }

    #[test]
    fn rejects_degenerate_parameters() {
        let cases = [
            (CoastModel { mass: 0.0, ..coast_model() }, PhysicalParameter::Mass),
            (
                CoastModel { drag_coefficient: -0.49, ..coast_model() },
                PhysicalParameter::DragCoefficient,
            ),
            (
                CoastModel { reference_area: 0.0, ..coast_model() },
                PhysicalParameter::ReferenceArea,
            ),
            (CoastModel { gravity: 0.0, ..coast_model() }, PhysicalParameter::Gravity),
            (
                CoastModel { air_density: f64::NAN, ..coast_model() },
                PhysicalParameter::AirDensity,
            ),
        ];

        for (model, expected) in cases {
            match model.predict_apogee(1000.0, 100.0) {
                Err(ControllerError::InvalidPhysicalParameter { parameter, .. }) => {
                    assert_eq!(parameter, expected)
                }
                other => panic!("expected {:?} to be rejected, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn rejects_non_finite_kinematics() {
        let model = coast_model();
        assert!(matches!(
            model.predict_apogee(f64::NAN, 100.0),
            Err(ControllerError::NumericDomain(_))
        ));
        assert!(matches!(
            model.predict_apogee(1000.0, f64::INFINITY),
            Err(ControllerError::NumericDomain(_))
        ));
    }
}
