mod helpers;

use axum::http::StatusCode;
use freelinkd_server::entities::project::project_status::ProjectStatus;
use freelinkd_server::models::view::project::{
    AdminProjectView, ClientProjectView, FreelancerProjectView, ProjectStatsView,
};
use helpers::project_helpers::{
    accept_job, create_job, data, fake_email, job_payload, rate_job, submit_link,
};
use serde_json::json;

test_with_server!(client_view_labels, |server, ctx_state, config| {
    let email = fake_email();
    let mut payload = job_payload(&email);
    payload["deadline"] = json!("2026-10-17");
    payload["budgetTo"] = json!(100000);
    server.post("/api/jobs").json(&payload).await.assert_status(StatusCode::CREATED);
    let open = create_job(&server, &email).await;

    let response = server
        .get("/api/umkm/projects")
        .add_query_param("email", email.to_uppercase())
        .await;
    response.assert_status_ok();
    let views = data::<Vec<ClientProjectView>>(&response);
    assert_eq!(views.len(), 2);

    // newest first
    assert_eq!(views[0].id, open.id);
    assert_eq!(views[0].status, "Waiting for Freelancer");
    assert_eq!(views[0].deadline, "No Deadline");
    assert_eq!(views[0].budget, "Rp 100.000 - Rp 200.000");
    assert!(views[0].freelancer.is_none());

    assert_eq!(views[1].deadline, "17 Oct 2026");
    assert_eq!(views[1].budget, "Rp 100.000");
});

test_with_server!(client_list_needs_email_and_known_status, |server, ctx_state, config| {
    server
        .get("/api/umkm/projects")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .get("/api/umkm/projects")
        .add_query_param("email", "a@b.id")
        .add_query_param("status", "whatever")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .get("/api/umkm/projects/missing")
        .await
        .assert_status(StatusCode::NOT_FOUND);
});

test_with_server!(client_list_status_filter, |server, ctx_state, config| {
    let email = fake_email();
    let assigned = create_job(&server, &email).await;
    create_job(&server, &email).await;
    accept_job(&server, &assigned.id, "f-1").await.assert_status_ok();

    let response = server
        .get("/api/umkm/projects")
        .add_query_param("email", &email)
        .add_query_param("status", "In Progress")
        .await;
    let views = data::<Vec<ClientProjectView>>(&response);
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].id, assigned.id);
    assert_eq!(views[0].status, "In Progress");
    let freelancer = views[0].freelancer.as_ref().expect("freelancer");
    assert_eq!(freelancer.id, "f-1");
    assert_eq!(freelancer.match_score, Some(87.5));
});

test_with_server!(freelancer_views, |server, ctx_state, config| {
    let mine = create_job(&server, &fake_email()).await;
    let open = create_job(&server, &fake_email()).await;
    let other = create_job(&server, &fake_email()).await;
    accept_job(&server, &mine.id, "me").await.assert_status_ok();
    accept_job(&server, &other.id, "someone-else").await.assert_status_ok();

    let response = server
        .get("/api/freelancer/projects")
        .add_query_param("freelancerId", "me")
        .await;
    response.assert_status_ok();
    let views = data::<Vec<FreelancerProjectView>>(&response);
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].id, mine.id);
    assert!(views[0].is_assigned_to_me);
    assert_eq!(views[0].status, "In Progress");
    assert_eq!(views[0].client_email, mine.client_email);

    let response = server.get("/api/freelancer/projects/available").await;
    response.assert_status_ok();
    let available = data::<Vec<FreelancerProjectView>>(&response);
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, open.id);
    assert_eq!(available[0].status, "Open");

    let response = server
        .get(&format!("/api/freelancer/projects/{}", other.id))
        .add_query_param("freelancerId", "me")
        .await;
    assert!(!data::<FreelancerProjectView>(&response).is_assigned_to_me);

    server
        .get("/api/freelancer/projects")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
});

test_with_server!(admin_views_and_stats, |server, ctx_state, config| {
    let pending = create_job(&server, &fake_email()).await;
    let assigned = create_job(&server, &fake_email()).await;
    let completed = create_job(&server, &fake_email()).await;
    accept_job(&server, &assigned.id, "f-2").await.assert_status_ok();
    accept_job(&server, &completed.id, "f-3").await.assert_status_ok();
    submit_link(&server, &completed.id).await.assert_status_ok();
    rate_job(&server, &completed.id, 4).await.assert_status_ok();

    let response = server.get(&format!("/api/admin/projects/{}", pending.id)).await;
    response.assert_status_ok();
    let view = data::<AdminProjectView>(&response);
    assert_eq!(view.status, ProjectStatus::Pending);
    assert_eq!(view.status_label, "Pending");
    assert_eq!(view.submitted_at, "N/A");
    assert_eq!(view.deadline, "N/A");
    assert!(!view.has_rating);
    assert_ne!(view.created_at, "N/A");

    let response = server
        .get("/api/admin/projects")
        .add_query_param("status", "done")
        .await;
    let views = data::<Vec<AdminProjectView>>(&response);
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].id, completed.id);
    assert!(views[0].has_rating);
    assert_ne!(views[0].submitted_at, "N/A");

    let response = server.get("/api/admin/projects/stats").await;
    response.assert_status_ok();
    let stats = data::<ProjectStatsView>(&response);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.assigned, 1);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.canceled, 0);
    assert_eq!(stats.average_rating, Some(4.0));
});

test_with_server!(legacy_status_spelling_reads_as_canonical, |server, ctx_state, config| {
    let job = create_job(&server, &fake_email()).await;
    ctx_state
        .db
        .client
        .query("UPDATE type::thing('project', $key) SET status = 'Selesai';")
        .bind(("key", job.id.clone()))
        .await
        .unwrap()
        .check()
        .unwrap();

    let response = server.get(&format!("/api/admin/projects/{}", job.id)).await;
    assert_eq!(data::<AdminProjectView>(&response).status, ProjectStatus::Completed);

    ctx_state
        .db
        .client
        .query("UPDATE type::thing('project', $key) SET status = 'archived';")
        .bind(("key", job.id.clone()))
        .await
        .unwrap()
        .check()
        .unwrap();
    let response = server.get(&format!("/api/umkm/projects/{}", job.id)).await;
    assert_eq!(data::<ClientProjectView>(&response).status, "Waiting for Freelancer");
});

test_with_server!(status_filters_match_legacy_spellings, |server, ctx_state, config| {
    let email = fake_email();
    let mut ids = vec![];
    for stored in ["Selesai", "open", "in_progress", "archived"] {
        let job = create_job(&server, &email).await;
        ctx_state
            .db
            .client
            .query("UPDATE type::thing('project', $key) SET status = $status;")
            .bind(("key", job.id.clone()))
            .bind(("status", stored))
            .await
            .unwrap()
            .check()
            .unwrap();
        ids.push(job.id);
    }
    let (done, open, in_progress, unknown) = (&ids[0], &ids[1], &ids[2], &ids[3]);

    let response = server
        .get("/api/admin/projects")
        .add_query_param("status", "completed")
        .await;
    let views = data::<Vec<AdminProjectView>>(&response);
    assert_eq!(views.iter().map(|v| &v.id).collect::<Vec<_>>(), vec![done]);

    let response = server
        .get("/api/umkm/projects")
        .add_query_param("email", &email)
        .add_query_param("status", "in process")
        .await;
    let views = data::<Vec<ClientProjectView>>(&response);
    assert_eq!(views.iter().map(|v| &v.id).collect::<Vec<_>>(), vec![in_progress]);

    let response = server.get("/api/freelancer/projects/available").await;
    let mut available = data::<Vec<FreelancerProjectView>>(&response)
        .into_iter()
        .map(|v| v.id)
        .collect::<Vec<_>>();
    available.sort();
    let mut expected = vec![open.clone(), unknown.clone()];
    expected.sort();
    assert_eq!(available, expected);
});
