mod helpers;

use axum::http::StatusCode;
use freelinkd_server::entities::project::project_status::ProjectStatus;
use freelinkd_server::interfaces::repositories::rating_ifce::RatingRepositoryInterface;
use freelinkd_server::models::view::project::JobView;
use helpers::project_helpers::{
    create_job, data, error_message, fake_email, job_payload, rate_job, submit_link,
};
use serde_json::json;

test_with_server!(create_job_stores_pending_project, |server, ctx_state, config| {
    let email = fake_email();
    let job = create_job(&server, &email).await;
    assert_eq!(job.status, ProjectStatus::Pending);
    assert_eq!(job.progress, 0);
    assert_eq!(job.client_email, email);
    assert_eq!(job.budget_from, Some(100000));
    assert!(job.freelancer_id.is_none());

    let response = server.get(&format!("/api/jobs/{}", job.id)).await;
    response.assert_status_ok();
    let fetched = data::<JobView>(&response);
    assert_eq!(fetched.title, job.title);
});

test_with_server!(legacy_deadline_names_are_accepted, |server, ctx_state, config| {
    let mut payload = job_payload(&fake_email());
    payload["dueDate"] = json!("2026-12-01");
    let response = server.post("/api/jobs").json(&payload).await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(data::<JobView>(&response).deadline.as_deref(), Some("2026-12-01"));

    let mut payload = job_payload(&fake_email());
    payload["deadlineDate"] = json!("2026-12-02T10:00:00Z");
    let response = server.post("/api/jobs").json(&payload).await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(data::<JobView>(&response).deadline.as_deref(), Some("2026-12-02"));
});

test_with_server!(create_job_from_form, |server, ctx_state, config| {
    let response = server
        .post("/api/jobs")
        .form(&[
            ("title", "Logo design"),
            ("skills", "figma, illustrator"),
            ("budgetFrom", "50000"),
            ("clientEmail", "warung@umkm.id"),
        ])
        .await;
    response.assert_status(StatusCode::CREATED);
    let job = data::<JobView>(&response);
    assert_eq!(job.skills, vec!["figma", "illustrator"]);
    assert_eq!(job.budget_from, Some(50000));
});

test_with_server!(create_job_validation_errors, |server, ctx_state, config| {
    let mut bad_email = job_payload("not-an-email");
    bad_email["title"] = json!("Website");
    let response = server.post("/api/jobs").json(&bad_email).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(error_message(&response).contains("email"));

    let mut reversed_budget = job_payload(&fake_email());
    reversed_budget["budgetFrom"] = json!(300000);
    let response = server.post("/api/jobs").json(&reversed_budget).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let mut bad_deadline = job_payload(&fake_email());
    bad_deadline["deadline"] = json!("next friday");
    let response = server.post("/api/jobs").json(&bad_deadline).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let mut blank_title = job_payload(&fake_email());
    blank_title["title"] = json!("   ");
    let response = server.post("/api/jobs").json(&blank_title).await;
    response.assert_status(StatusCode::BAD_REQUEST);
});

test_with_server!(list_jobs_filters_by_client, |server, ctx_state, config| {
    let email = fake_email();
    create_job(&server, &email).await;
    create_job(&server, &email).await;
    create_job(&server, &fake_email()).await;

    let response = server
        .get("/api/jobs")
        .add_query_param("clientEmail", &email)
        .await;
    response.assert_status_ok();
    let jobs = data::<Vec<JobView>>(&response);
    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().all(|j| j.client_email == email));

    let response = server.get("/api/jobs").add_query_param("count", 1).await;
    assert_eq!(data::<Vec<JobView>>(&response).len(), 1);

    let response = server.get("/api/jobs").add_query_param("status", "archived").await;
    response.assert_status(StatusCode::BAD_REQUEST);
});

test_with_server!(update_job_merges_given_fields, |server, ctx_state, config| {
    let job = create_job(&server, &fake_email()).await;
    let response = server
        .put(&format!("/api/jobs/{}", job.id))
        .json(&json!({ "title": "Updated title", "budgetTo": 250000 }))
        .await;
    response.assert_status_ok();
    let updated = data::<JobView>(&response);
    assert_eq!(updated.title, "Updated title");
    assert_eq!(updated.budget_to, Some(250000));
    assert_eq!(updated.description, job.description);
    assert_eq!(updated.budget_from, job.budget_from);

    let response = server
        .put(&format!("/api/jobs/{}", job.id))
        .json(&json!({ "budgetFrom": 900000 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
});

test_with_server!(unknown_job_is_404, |server, ctx_state, config| {
    let response = server.get("/api/jobs/doesnotexist").await;
    response.assert_status(StatusCode::NOT_FOUND);
    error_message(&response);

    let response = server.get("/api/jobs/rating:abc").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.delete("/api/jobs/doesnotexist").await;
    response.assert_status(StatusCode::NOT_FOUND);
});

test_with_server!(delete_job_removes_rating, |server, ctx_state, config| {
    let job = create_job(&server, &fake_email()).await;
    submit_link(&server, &job.id).await.assert_status_ok();
    rate_job(&server, &job.id, 5).await.assert_status_ok();

    let response = server.delete(&format!("/api/jobs/{}", job.id)).await;
    response.assert_status_ok();

    let rating = ctx_state.db.ratings.get_by_project(&job.id).await.unwrap();
    assert!(rating.is_none());
    let response = server.get(&format!("/api/jobs/{}", job.id)).await;
    response.assert_status(StatusCode::NOT_FOUND);
});

test_with_server!(body_rejections_use_the_error_envelope, |server, ctx_state, config| {
    let req_id = "6f1c2a9e-3b7d-4c1e-9a55-0d2f8e4b7c10";

    let response = server
        .post("/api/jobs")
        .add_header("x-request-id", req_id)
        .text("title=Logo")
        .await;
    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(error_message(&response).contains("text/plain"));
    assert_eq!(response.json::<serde_json::Value>()["reqId"], json!(req_id));

    let response = server
        .post("/api/jobs")
        .add_header("x-request-id", req_id)
        .json(&json!({ "title": "", "clientEmail": "owner@umkm.id" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<serde_json::Value>()["reqId"], json!(req_id));
});
