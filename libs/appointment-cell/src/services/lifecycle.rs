use tracing::{debug, warn};

use crate::models::{AppointmentError, AppointmentStatus};

/// Next statuses reachable from `current`. Completed and cancelled are terminal.
pub fn valid_transitions(current: AppointmentStatus) -> &'static [AppointmentStatus] {
    match current {
        AppointmentStatus::Booked => &[AppointmentStatus::Completed, AppointmentStatus::Cancelled],
        AppointmentStatus::Completed => &[],
        AppointmentStatus::Cancelled => &[],
    }
}

pub fn validate_status_transition(
    current: AppointmentStatus,
    next: AppointmentStatus,
) -> Result<(), AppointmentError> {
    debug!("Validating status transition from {} to {}", current, next);

    if !valid_transitions(current).contains(&next) {
        warn!("Invalid status transition attempted: {} -> {}", current, next);
        return Err(AppointmentError::InvalidStatusTransition { from: current, to: next });
    }

    Ok(())
}
