use core::fmt;

/// Physical or tuning quantity named by [`ControllerError::InvalidPhysicalParameter`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalParameter {
    Mass,
    DragCoefficient,
    ReferenceArea,
    Gravity,
    AirDensity,
    SamplePeriod,
    FilterTimeConstant,
    Setpoint,
    ProportionalGain,
    IntegralGain,
    DerivativeGain,
}

impl PhysicalParameter {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mass => "mass",
            Self::DragCoefficient => "drag coefficient",
            Self::ReferenceArea => "reference area",
            Self::Gravity => "gravity",
            Self::AirDensity => "air density",
            Self::SamplePeriod => "sample period",
            Self::FilterTimeConstant => "derivative filter time constant",
            Self::Setpoint => "apogee setpoint",
            Self::ProportionalGain => "proportional gain",
            Self::IntegralGain => "integral gain",
            Self::DerivativeGain => "derivative gain",
        }
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerError {
    /// A configured or host-supplied quantity is not strictly positive and finite.
    InvalidPhysicalParameter {
        parameter: PhysicalParameter,
        value: f64,
    },
    /// A setpoint or gain is NaN or infinite.
    NonFiniteParameter {
        parameter: PhysicalParameter,
        value: f64,
    },
    /// Drag table row outside `0..=5`.
    InvalidLevel(usize),
    /// Kinematics drove the apogee model outside its domain.
    NumericDomain(&'static str),
    /// The sample period can only be set before the first step of a flight.
    FlightInProgress,
}

impl ControllerError {
    /// Configuration errors are fatal and must be fixed by the host before
    /// any step is attempted.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPhysicalParameter { .. }
                | Self::NonFiniteParameter { .. }
                | Self::FlightInProgress
        )
    }
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPhysicalParameter { parameter, value } => write!(
                f,
                "{} must be positive and finite, got {}",
                parameter.name(),
                value
            ),
            Self::NonFiniteParameter { parameter, value } => {
                write!(f, "{} must be finite, got {}", parameter.name(), value)
            }
            Self::InvalidLevel(level) => {
                write!(f, "deployment level {} is outside 0..=5", level)
            }
            Self::NumericDomain(what) => write!(f, "numeric domain error: {}", what),
            Self::FlightInProgress => {
                write!(f, "sample period cannot change once a flight has started")
            }
        }
    }
}

impl core::error::Error for ControllerError {}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn ensure_positive(
    parameter: PhysicalParameter,
    value: f64,
) -> Result<f64, ControllerError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ControllerError::InvalidPhysicalParameter { parameter, value })
    }
}

/// Checks that `value` is neither NaN nor infinite, any sign allowed.
pub(crate) fn ensure_finite(
    parameter: PhysicalParameter,
    value: f64,
) -> Result<f64, ControllerError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ControllerError::NonFiniteParameter { parameter, value })
    }
}
