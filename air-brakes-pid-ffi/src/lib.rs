use air_brakes_pid_core::{AirBrakesController, ControllerParameters, StepInput};
use log::error;

/// Creates a controller for one flight, returns null if the parameters are
/// invalid. Release it with [`air_brakes_pid_free`].
#[unsafe(no_mangle)]
pub extern "C" fn air_brakes_pid_new(
    setpoint: f64,
    kp: f64,
    ki: f64,
    kd: f64,
    tau: f64,
    drag_coefficient: f64,
    mass: f64,
) -> *mut AirBrakesController {
    let parameters = ControllerParameters {
        setpoint,
        kp,
        ki,
        kd,
        tau,
        drag_coefficient,
        mass,
        ..Default::default()
    };

    match AirBrakesController::new(parameters) {
        Ok(controller) => Box::into_raw(Box::new(controller)),
        Err(e) => {
            error!("rejected air brakes parameters: {}", e);
            core::ptr::null_mut()
        }
    }
}

/// Sets the sample period from the simulator time step, before the first step.
///
/// # Safety
///
/// `controller` must be null or a pointer returned by [`air_brakes_pid_new`]
/// that has not been freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn air_brakes_pid_start_flight(
    controller: *mut AirBrakesController,
    time_step: f64,
) -> bool {
    let Some(controller) = (unsafe { controller.as_mut() }) else {
        return false;
    };

    match controller.start_flight(time_step) {
        Ok(()) => true,
        Err(e) => {
            error!("failed to start flight: {}", e);
            false
        }
    }
}

/// Runs one control step and writes the force to add to the thrust into
/// `force`. Returns false and leaves `force` untouched on failure.
///
/// # Safety
///
/// `controller` must be null or a live pointer from [`air_brakes_pid_new`],
/// `force` must be null or valid for writes.
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn air_brakes_pid_step(
    controller: *mut AirBrakesController,
    altitude: f64,
    vertical_velocity: f64,
    speed: f64,
    thrust: f64,
    gravity: f64,
    reference_area: f64,
    force: *mut f64,
) -> bool {
    let Some(controller) = (unsafe { controller.as_mut() }) else {
        return false;
    };
    let Some(force) = (unsafe { force.as_mut() }) else {
        return false;
    };

    let input = StepInput {
        altitude,
        vertical_velocity,
        speed,
        thrust,
        gravity,
        reference_area,
    };
    match controller.step(&input) {
        Ok(output) => {
            *force = output.force;
            true
        }
        Err(e) => {
            error!("air brakes step failed: {}", e);
            false
        }
    }
}

/// # Safety
///
/// `controller` must be null or a pointer from [`air_brakes_pid_new`] that is
/// not used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn air_brakes_pid_free(controller: *mut AirBrakesController) {
    if !controller.is_null() {
        drop(unsafe { Box::from_raw(controller) });
    }
}
