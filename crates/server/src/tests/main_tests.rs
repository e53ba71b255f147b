use super::*;
use axum::{body, body::Body, http::Request};
use shared::protocol::BrewOutcome;
use tower::ServiceExt;

const TOKEN: &str = "test-csrf-token";

fn test_app() -> Router {
    build_router(Arc::new(AppState {
        api: ApiContext::new(),
        csrf_token: TOKEN.to_string(),
    }))
}

fn form_post(path: &str, body: String) -> Request<Body> {
    Request::post(path)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("request")
}

fn brew_body(token: &str, coffee_type: &str) -> String {
    format!("csrfmiddlewaretoken={token}&method=make_coffee&coffee_type={coffee_type}")
}

async fn decode_brew(response: axum::response::Response) -> BrewOutcome {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let wire: BrewResponseWire = serde_json::from_slice(&bytes).expect("json");
    wire.decode().expect("decode")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = test_app();
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(bytes.as_ref(), b"ok");
}

#[tokio::test]
async fn page_serves_the_form_with_the_token() {
    let app = test_app();
    let request = Request::get("/").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let page = String::from_utf8(bytes.to_vec()).expect("utf8");
    assert!(page.contains(&format!("value=\"{TOKEN}\"")));
    assert!(page.contains("id=\"coffee_maker\""));
}

#[tokio::test]
async fn brewing_espresso_returns_an_image() {
    let app = test_app();
    let response = app
        .oneshot(form_post("/", brew_body(TOKEN, "espresso")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        decode_brew(response).await,
        BrewOutcome::Image("/static/images/espresso.png".into())
    );
}

#[tokio::test]
async fn wrong_csrf_token_is_forbidden() {
    let app = test_app();
    let response = app
        .oneshot(form_post("/", brew_body("stale-token", "espresso")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_method_on_the_brew_endpoint_is_rejected() {
    let app = test_app();
    let body = format!("csrfmiddlewaretoken={TOKEN}&method=grind_only&coffee_type=espresso");
    let response = app.oneshot(form_post("/", body)).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_coffee_type_is_rejected() {
    let app = test_app();
    let response = app
        .oneshot(form_post("/", brew_body(TOKEN, "mocha")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let err: ApiError = serde_json::from_slice(&bytes).expect("json");
    assert!(matches!(err.code, ErrorCode::Validation));
}

#[tokio::test]
async fn dry_machine_answers_with_problems_not_an_error() {
    let app = test_app();
    loop {
        let response = app
            .clone()
            .oneshot(form_post("/", brew_body(TOKEN, "espresso")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        if let BrewOutcome::Problem(text) = decode_brew(response).await {
            assert!(text.contains("Empty water tank"));
            break;
        }
    }
}

#[tokio::test]
async fn option_click_refills_water_and_confirms() {
    let app = test_app();
    let body = format!("csrfmiddlewaretoken={TOKEN}&method=water_options");
    let response = app
        .clone()
        .oneshot(form_post("/ajax/", body))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let confirmation: OptionResponse = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(confirmation.action, "Water successfully refiled");
}

#[tokio::test]
async fn unknown_option_method_reports_not_implemented() {
    let app = test_app();
    let body = format!("csrfmiddlewaretoken={TOKEN}&method=sugar_options");
    let response = app
        .oneshot(form_post("/ajax/", body))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let err: ApiError = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(err.message, "NotImplemented method");
}

#[tokio::test]
async fn ajax_endpoint_also_enforces_the_token() {
    let app = test_app();
    let response = app
        .oneshot(form_post(
            "/ajax/",
            "csrfmiddlewaretoken=wrong&method=water_options".to_string(),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
