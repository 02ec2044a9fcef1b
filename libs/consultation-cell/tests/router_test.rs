use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use consultation_cell::{
    ai_routes, consultation_routes, prescription_routes, AiAssistant, ConsultationService, InlineImage,
    Medication, PrescriptionService, SymptomAnalyzer,
};

struct CannedAnalyzer;

#[async_trait]
impl SymptomAnalyzer for CannedAnalyzer {
    async fn analyze_symptoms(&self, symptoms_text: &str, image: Option<&InlineImage>) -> anyhow::Result<String> {
        if symptoms_text == "offline" {
            return Err(anyhow!("connection refused"));
        }
        Ok(format!("analysis of {} (image: {})", symptoms_text, image.is_some()))
    }

    async fn suggest_medications(&self, _symptoms_text: &str) -> Vec<Medication> {
        vec![Medication {
            name: "Cetirizine".to_string(),
            dosage: "10mg".to_string(),
            frequency: "Once a day".to_string(),
        }]
    }
}

struct TestApp {
    consultations: Router,
    prescriptions: Router,
}

fn create_test_app() -> TestApp {
    let consultations = Arc::new(ConsultationService::new());
    let prescriptions = Arc::new(PrescriptionService::new(consultations.clone()));
    TestApp {
        consultations: consultation_routes(consultations),
        prescriptions: prescription_routes(prescriptions),
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_consultation_review_flow() {
    let app = create_test_app();
    let patient_id = Uuid::new_v4();

    let (status, created) = send(
        &app.consultations,
        "POST",
        "/",
        Some(json!({ "patientId": patient_id, "symptomsText": "persistent cough" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], json!("pending"));

    let (_, pending) = send(&app.consultations, "GET", "/pending", None).await;
    assert_eq!(pending["total"], json!(1));

    let uri = format!("/{}/review", created["id"].as_str().unwrap());
    let (status, reviewed) =
        send(&app.consultations, "POST", &uri, Some(json!({ "doctorNotes": "Steam inhalation" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviewed["status"], json!("reviewed"));
    assert_eq!(reviewed["doctorNotes"], json!("Steam inhalation"));

    let (status, _) = send(&app.consultations, "POST", &uri, Some(json!({ "doctorNotes": "again" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, pending) = send(&app.consultations, "GET", "/?status=pending", None).await;
    assert_eq!(pending["total"], json!(0));

    let (_, mine) = send(&app.consultations, "GET", &format!("/?patient_id={}", patient_id), None).await;
    assert_eq!(mine["consultations"][0]["id"], created["id"]);
}

#[tokio::test]
async fn test_review_unknown_consultation() {
    let app = create_test_app();
    let uri = format!("/{}/review", Uuid::new_v4());
    let (status, _) = send(&app.consultations, "POST", &uri, Some(json!({ "doctorNotes": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_prescription_for_patient() {
    let app = create_test_app();
    let patient_id = Uuid::new_v4();
    let (_, consultation) = send(
        &app.consultations,
        "POST",
        "/",
        Some(json!({ "patientId": patient_id, "symptomsText": "sneezing" })),
    )
    .await;

    let (status, prescription) = send(
        &app.prescriptions,
        "POST",
        "/",
        Some(json!({
            "patientId": patient_id,
            "doctorId": Uuid::new_v4(),
            "consultationRequestId": consultation["id"],
            "date": "2024-06-10",
            "medications": [{ "name": "Cetirizine", "dosage": "10mg", "frequency": "Once a day" }],
            "notes": "Avoid dust"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(prescription["date"], json!("2024-06-10"));

    let (_, listed) = send(&app.prescriptions, "GET", &format!("/?patient_id={}", patient_id), None).await;
    assert_eq!(listed["prescriptions"], json!([prescription]));

    let (_, others) = send(&app.prescriptions, "GET", &format!("/?patient_id={}", Uuid::new_v4()), None).await;
    assert_eq!(others["total"], json!(0));
}

#[tokio::test]
async fn test_ai_routes_with_analyzer() {
    let app = ai_routes(Arc::new(AiAssistant::new(Arc::new(CannedAnalyzer))));

    let (status, body) = send(&app, "POST", "/analyze", Some(json!({ "symptomsText": "itchy eyes" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"], json!("analysis of itchy eyes (image: false)"));

    let (status, body) = send(&app, "POST", "/medications", Some(json!({ "symptomsText": "itchy eyes" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["medications"][0]["name"], json!("Cetirizine"));

    let (status, body) = send(&app, "POST", "/analyze", Some(json!({ "symptomsText": "offline" }))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("Failed to get analysis"));
}

#[tokio::test]
async fn test_ai_routes_without_configuration() {
    let app = ai_routes(Arc::new(AiAssistant::unconfigured()));

    let (analyze, _) = send(&app, "POST", "/analyze", Some(json!({ "symptomsText": "fever" }))).await;
    let (medications, _) = send(&app, "POST", "/medications", Some(json!({ "symptomsText": "fever" }))).await;

    assert_eq!(analyze, StatusCode::BAD_GATEWAY);
    assert_eq!(medications, StatusCode::BAD_GATEWAY);
}
