use axum::http::{StatusCode, header};
use folio_contact::{EMAIL_MESSAGE, MESSAGE_MESSAGE, NAME_MESSAGE, SubmissionState};

mod common;

use common::{
    VALID, body_string, create_test_app, empty, form, fragment, get, post, session_cookie,
    with_cookie,
};

#[tokio::test]
async fn test_invalid_submit_renders_inline_errors() {
    let app = create_test_app();

    let response = app
        .send(form(
            fragment(post("/contact")),
            &[("name", "J"), ("email", "jo@"), ("message", "short")],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = body_string(response).await;
    assert!(html.contains(NAME_MESSAGE));
    assert!(html.contains(EMAIL_MESSAGE));
    assert!(html.contains(MESSAGE_MESSAGE));
    assert!(html.contains(r#"value="J""#));
    assert!(html.contains(r#"data-state="idle""#));
    assert!(!html.contains("<html"));
}

#[tokio::test]
async fn test_only_failing_fields_are_flagged() {
    let app = create_test_app();

    let response = app
        .send(form(
            fragment(post("/contact")),
            &[
                ("name", "Jo"),
                ("email", "jo@example.com"),
                ("message", "too short"),
            ],
        ))
        .await;

    let html = body_string(response).await;
    assert!(!html.contains(NAME_MESSAGE));
    assert!(!html.contains(EMAIL_MESSAGE));
    assert!(html.contains(MESSAGE_MESSAGE));
    assert!(html.contains(r#"value="jo@example.com""#));
}

#[tokio::test]
async fn test_valid_submit_sets_cookie_and_shows_success() {
    let app = create_test_app();

    let response = app.send(form(fragment(post("/contact")), &VALID)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_owned();
    assert!(cookie.starts_with("folio_contact="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));

    let html = body_string(response).await;
    assert!(html.contains("Message sent"));
    assert!(html.contains(r#"data-revert-after="5000""#));
    assert!(html.contains(r#"data-state="submitted""#));

    assert_eq!(app.sessions.len(), 1);
}

#[tokio::test]
async fn test_success_clears_fields_for_next_render() {
    let app = create_test_app();

    let response = app.send(form(fragment(post("/contact")), &VALID)).await;
    let cookie = session_cookie(&response).unwrap();

    let id = cookie.trim_start_matches("folio_contact=");
    let controller = app.sessions.get(id).unwrap();
    let snapshot = controller.snapshot();

    assert_eq!(snapshot.state, SubmissionState::Submitted);
    assert!(snapshot.input.is_empty());
    assert!(snapshot.errors.is_empty());
}

#[tokio::test]
async fn test_submit_without_scripts_redirects_to_contact_section() {
    let app = create_test_app();

    let response = app
        .send(form(post("/contact"), &[("name", "J"), ("email", ""), ("message", "")]))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/#contact");

    let cookie = session_cookie(&response).unwrap();

    let response = app.send(empty(with_cookie(get("/"), &cookie))).await;
    let html = body_string(response).await;

    assert!(html.contains(NAME_MESSAGE));
    assert!(html.contains(r#"value="J""#));
}

#[tokio::test]
async fn test_card_fragment_follows_session() {
    let app = create_test_app();

    let response = app.send(form(fragment(post("/contact")), &VALID)).await;
    let cookie = session_cookie(&response).unwrap();

    let response = app
        .send(empty(with_cookie(fragment(get("/contact")), &cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Message sent"));

    let response = app.send(empty(fragment(get("/contact")))).await;
    let html = body_string(response).await;
    assert!(html.contains(r#"data-testid="form-contact""#));
    assert!(!html.contains("Message sent"));
}

#[tokio::test]
async fn test_card_without_fragment_header_redirects() {
    let app = create_test_app();

    let response = app.send(empty(get("/contact"))).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/#contact");
}

#[tokio::test]
async fn test_reset_returns_to_empty_form() {
    let app = create_test_app();

    let response = app.send(form(fragment(post("/contact")), &VALID)).await;
    let cookie = session_cookie(&response).unwrap();

    let response = app
        .send(empty(with_cookie(fragment(post("/contact/reset")), &cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains(r#"data-state="idle""#));
    assert!(html.contains(r#"data-testid="form-contact""#));
    assert!(!html.contains("Message sent"));
}

#[tokio::test]
async fn test_reset_without_session_is_harmless() {
    let app = create_test_app();

    let response = app.send(empty(post("/contact/reset"))).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(app.sessions.is_empty());
}

#[tokio::test]
async fn test_field_update_is_kept_and_clears_its_error() {
    let app = create_test_app();

    let response = app
        .send(form(
            fragment(post("/contact")),
            &[("name", "J"), ("email", "bad"), ("message", "")],
        ))
        .await;
    let cookie = session_cookie(&response).unwrap();

    let response = app
        .send(form(
            with_cookie(post("/contact/field"), &cookie),
            &[("field", "name"), ("value", "Joanna")],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .send(empty(with_cookie(fragment(get("/contact")), &cookie)))
        .await;
    let html = body_string(response).await;

    assert!(html.contains(r#"value="Joanna""#));
    assert!(!html.contains(NAME_MESSAGE));
    assert!(html.contains(EMAIL_MESSAGE));
}

#[tokio::test]
async fn test_unknown_field_is_rejected() {
    let app = create_test_app();

    let response = app
        .send(form(
            post("/contact/field"),
            &[("field", "subject"), ("value", "hi")],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_second_post_while_submitted_does_not_refill_form() {
    let app = create_test_app();

    let response = app.send(form(fragment(post("/contact")), &VALID)).await;
    let cookie = session_cookie(&response).unwrap();

    let response = app
        .send(form(
            with_cookie(fragment(post("/contact")), &cookie),
            &[
                ("name", "Sam"),
                ("email", "sam@example.com"),
                ("message", "A second note, still long enough."),
            ],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .send(empty(with_cookie(fragment(post("/contact/reset")), &cookie)))
        .await;
    let html = body_string(response).await;

    assert!(html.contains(r#"data-state="idle""#));
    assert!(!html.contains("Sam"));
    assert!(!html.contains("sam@example.com"));

    let id = cookie.trim_start_matches("folio_contact=");
    assert!(app.sessions.get(id).unwrap().snapshot().input.is_empty());
}
