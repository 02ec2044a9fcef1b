pub mod patient;
pub mod session;

pub use patient::PatientService;
pub use session::SessionService;
