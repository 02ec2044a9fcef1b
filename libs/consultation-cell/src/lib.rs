pub mod models;
pub mod handlers;
pub mod router;
pub mod services;

pub use models::*;
pub use services::{AiAssistant, ConsultationService, GeminiClient, PrescriptionService, SymptomAnalyzer};
pub use router::{ai_routes, consultation_routes, prescription_routes};
