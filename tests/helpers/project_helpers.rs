use axum_test::{TestResponse, TestServer};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Sentence, Words};
use fake::faker::name::en::Name;
use fake::Fake;
use freelinkd_server::models::view::project::JobView;
use freelinkd_server::models::web::ApiResponse;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

#[allow(dead_code)]
pub fn job_payload(client_email: &str) -> Value {
    let skills: Vec<String> = Words(1..4).fake();
    json!({
        "title": Sentence(2..5).fake::<String>(),
        "description": Sentence(5..12).fake::<String>(),
        "skills": skills,
        "budgetFrom": 100000,
        "budgetTo": 200000,
        "durationDays": 14,
        "clientEmail": client_email,
        "clientName": Name().fake::<String>(),
    })
}

#[allow(dead_code)]
pub fn fake_email() -> String {
    SafeEmail().fake::<String>().to_lowercase()
}

#[allow(dead_code)]
pub fn data<T: DeserializeOwned>(response: &TestResponse) -> T {
    response
        .json::<ApiResponse<T>>()
        .data
        .expect("response has data")
}

#[allow(dead_code)]
pub fn error_message(response: &TestResponse) -> String {
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(false));
    assert!(body["reqId"].is_string());
    body["error"].as_str().unwrap_or_default().to_string()
}

#[allow(dead_code)]
pub async fn create_job(server: &TestServer, client_email: &str) -> JobView {
    let response = server
        .post("/api/jobs")
        .json(&job_payload(client_email))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    data::<JobView>(&response)
}

#[allow(dead_code)]
pub async fn accept_job(server: &TestServer, job_id: &str, freelancer_id: &str) -> TestResponse {
    server
        .post(&format!("/api/projects/{job_id}/accept"))
        .json(&json!({
            "freelancerId": freelancer_id,
            "name": Name().fake::<String>(),
            "skills": ["rust"],
            "matchScore": 87.5,
        }))
        .await
}

#[allow(dead_code)]
pub async fn submit_link(server: &TestServer, job_id: &str) -> TestResponse {
    server
        .post(&format!("/api/projects/{job_id}/submit"))
        .json(&json!({
            "link": "https://drive.example.com/deliverable",
            "note": "first version",
        }))
        .await
}

#[allow(dead_code)]
pub async fn rate_job(server: &TestServer, job_id: &str, rating: u8) -> TestResponse {
    server
        .post(&format!("/api/projects/{job_id}/rating"))
        .json(&json!({ "rating": rating, "review": "Great work" }))
        .await
}
