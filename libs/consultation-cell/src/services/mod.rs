pub mod ai;
pub mod consultation;
pub mod prescription;

pub use ai::{AiAssistant, GeminiClient, SymptomAnalyzer};
pub use consultation::ConsultationService;
pub use prescription::PrescriptionService;
