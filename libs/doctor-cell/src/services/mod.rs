pub mod availability;
pub mod doctor;

pub use availability::{compute_available_slots, BookedSlot, SlotCandidates};
pub use doctor::DoctorService;
