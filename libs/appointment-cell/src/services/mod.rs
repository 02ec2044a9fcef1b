pub mod booking;
pub mod lifecycle;
pub mod store;

pub use booking::BookingService;
pub use store::AppointmentStore;
