mod helpers;

use axum::http::StatusCode;
use freelinkd_server::models::view::project::AdminProjectView;
use freelinkd_server::models::view::rating::RatingView;
use helpers::project_helpers::{
    accept_job, create_job, data, error_message, fake_email, rate_job, submit_link,
};
use serde_json::json;

test_with_server!(project_is_rated_once, |server, ctx_state, config| {
    let job = create_job(&server, &fake_email()).await;
    accept_job(&server, &job.id, "f-7").await.assert_status_ok();
    submit_link(&server, &job.id).await.assert_status_ok();

    rate_job(&server, &job.id, 4).await.assert_status_ok();
    let response = rate_job(&server, &job.id, 1).await;
    response.assert_status(StatusCode::CONFLICT);
    assert!(error_message(&response).contains("already been rated"));

    let response = server.get(&format!("/api/admin/projects/{}", job.id)).await;
    let view = data::<AdminProjectView>(&response);
    assert!(view.has_rating);
    assert_eq!(view.rating.map(|r| r.score), Some(4.0));
});

test_with_server!(concurrent_ratings_have_one_winner, |server, ctx_state, config| {
    let job = create_job(&server, &fake_email()).await;
    accept_job(&server, &job.id, "f-9").await.assert_status_ok();
    submit_link(&server, &job.id).await.assert_status_ok();

    let (a, b, c, d) = tokio::join!(
        rate_job(&server, &job.id, 2),
        rate_job(&server, &job.id, 3),
        rate_job(&server, &job.id, 4),
        rate_job(&server, &job.id, 5),
    );
    let responses = [a, b, c, d];
    let winners = responses
        .iter()
        .filter(|r| r.status_code() == StatusCode::OK)
        .collect::<Vec<_>>();
    assert_eq!(winners.len(), 1);
    let score = data::<RatingView>(winners[0]).score;
    for loser in responses
        .iter()
        .filter(|r| r.status_code() != StatusCode::OK)
    {
        loser.assert_status(StatusCode::CONFLICT);
        assert!(error_message(loser).contains("already been rated"));
    }

    let response = server.get(&format!("/api/admin/projects/{}", job.id)).await;
    let view = data::<AdminProjectView>(&response);
    assert_eq!(view.rating.map(|r| r.score), Some(score));
});

test_with_server!(feedback_rejects_other_owner_email, |server, ctx_state, config| {
    let email = fake_email();
    let job = create_job(&server, &email).await;

    let response = server
        .post(&format!("/api/projects/{}/feedback", job.id))
        .json(&json!({
            "ratings": [4, 4, 4, 4, 4, 4],
            "umkmEmail": "not-the-owner@example.com",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(error_message(&response).contains("umkmEmail"));

    let response = server
        .post(&format!("/api/projects/{}/feedback", job.id))
        .json(&json!({
            "ratings": [4, 4, 4, 4, 4, 4],
            "umkmEmail": email.to_uppercase(),
        }))
        .await;
    response.assert_status_ok();
    assert_eq!(data::<RatingView>(&response).score, 4.0);
});

test_with_server!(feedback_vector_becomes_categories, |server, ctx_state, config| {
    let job = create_job(&server, &fake_email()).await;
    accept_job(&server, &job.id, "f-8").await.assert_status_ok();
    submit_link(&server, &job.id).await.assert_status_ok();

    let response = server
        .post(&format!("/api/projects/{}/feedback", job.id))
        .json(&json!({
            "ratings": [5, 4, 4, 5, 3, 5],
            "suggestion": "Faster replies",
            "freelancerId": "f-8",
        }))
        .await;
    response.assert_status_ok();
    let rating = data::<RatingView>(&response);
    assert_eq!(rating.score, 4.3);
    assert_eq!(rating.suggestion.as_deref(), Some("Faster replies"));
    let categories = rating.categories.expect("categories");
    assert_eq!(categories.deliverables, 5);
    assert_eq!(categories.match_quality, 3);
    assert_eq!(categories.would_hire_again, 5);

    let response = rate_job(&server, &job.id, 5).await;
    response.assert_status(StatusCode::CONFLICT);
});

test_with_server!(rating_input_errors, |server, ctx_state, config| {
    let job = create_job(&server, &fake_email()).await;

    rate_job(&server, &job.id, 6).await.assert_status(StatusCode::BAD_REQUEST);
    rate_job(&server, &job.id, 0).await.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post(&format!("/api/projects/{}/feedback", job.id))
        .json(&json!({ "ratings": [5, 4, 4] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    rate_job(&server, "missing", 5).await.assert_status(StatusCode::NOT_FOUND);

    // nothing was claimed by the rejected attempts
    rate_job(&server, &job.id, 3).await.assert_status_ok();
});

test_with_server!(admin_lists_ratings_newest_first, |server, ctx_state, config| {
    let first = create_job(&server, &fake_email()).await;
    let second = create_job(&server, &fake_email()).await;
    rate_job(&server, &first.id, 2).await.assert_status_ok();
    rate_job(&server, &second.id, 4).await.assert_status_ok();

    let response = server.get("/api/admin/ratings").await;
    response.assert_status_ok();
    let ratings = data::<Vec<RatingView>>(&response);
    assert_eq!(ratings.len(), 2);
    assert_eq!(ratings[0].project_id, second.id);
    assert_eq!(ratings[0].job_title, second.title);
    assert_eq!(ratings[1].score, 2.0);
});
