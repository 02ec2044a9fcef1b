pub mod handlers;
pub mod router;
pub mod models;
pub mod services;

pub use models::{
    Appointment, AppointmentError, AppointmentStatus, AvailableSlotsQuery, BookAppointmentRequest,
    DoctorAppointmentsQuery,
};
pub use services::{AppointmentStore, BookingService};

pub use router::appointment_routes;
