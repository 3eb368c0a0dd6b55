pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::engine::handlers as engine;
use crate::errors::AppError;
use crate::history::handlers as history;
use crate::state::AppState;

/// Resume parsing is not offered by this service.
async fn upload_resume_not_implemented() -> Result<(), AppError> {
    Err(AppError::NotImplemented(
        "Resume upload is not supported; enter skills manually".to_string(),
    ))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_handler))
        .route("/health", get(health::health_handler))
        // Recommendation
        .route("/recommend", post(engine::handle_recommend))
        .route("/upload-resume", post(upload_resume_not_implemented))
        // History
        .route("/history", get(history::handle_list_history))
        .route(
            "/history/:id",
            get(history::handle_get_history).delete(history::handle_delete_history),
        )
        // Accounts
        .route("/signup", post(auth::handle_signup))
        .route("/login", post(auth::handle_login))
        .route("/logout", post(auth::handle_logout))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::engine::catalog::Catalog;
    use crate::engine::recommender::Recommender;
    use crate::engine::scoring::ScoringWeights;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let recommender =
            Recommender::new(Catalog::bundled().unwrap(), ScoringWeights::default()).unwrap();
        build_router(AppState::in_memory(recommender, Config::default()))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Sends a raw body and returns the status, content type and JSON body.
    async fn send_raw(
        app: &Router,
        method: Method,
        uri: &str,
        body: &str,
    ) -> (StatusCode, String, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, serde_json::from_slice(&bytes).unwrap())
    }

    fn scenario_body() -> Value {
        json!({
            "skills": ["python", "math"],
            "interests": ["ai", "technology"],
            "career_mode": "growth",
            "risk_preference": "medium"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app();
        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        let (status, _) = send(&app, Method::GET, "/", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_recommend_returns_primary_and_backup() {
        let app = test_app();
        let (status, body) =
            send(&app, Method::POST, "/recommend", Some(scenario_body()), None).await;
        assert_eq!(status, StatusCode::OK);

        let primary = &body["primary_recommendation"];
        let backup = &body["backup_recommendation"];
        assert_ne!(primary["career"], backup["career"]);
        for rec in [primary, backup] {
            let score = rec["match_score"].as_f64().unwrap();
            assert!((0.0..=100.0).contains(&score));
            for field in [
                "skill_score",
                "interest_score",
                "growth_or_stability_score",
                "market_score",
                "risk_alignment_score",
            ] {
                assert!(rec["score_breakdown"][field].is_number(), "{field}");
            }
            assert!(rec["career_roadmap"].is_object());
            assert!(rec["learning_plan"].is_array());
            assert!(rec["average_salary_lpa"].is_number());
        }
    }

    #[tokio::test]
    async fn test_recommend_is_reproducible_for_reopen() {
        let app = test_app();
        let (_, first) = send(&app, Method::POST, "/recommend", Some(scenario_body()), None).await;
        let (_, second) =
            send(&app, Method::POST, "/recommend", Some(scenario_body()), None).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_recommend_records_history() {
        let app = test_app();
        let (_, rec) = send(&app, Method::POST, "/recommend", Some(scenario_body()), None).await;

        let (status, body) = send(&app, Method::GET, "/history", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let history = body["history"].as_array().unwrap();
        assert_eq!(history.len(), 1);
        let entry = &history[0];
        assert_eq!(entry["skills"], "python, math");
        assert_eq!(entry["interests"], "ai, technology");
        assert_eq!(entry["career_mode"], "growth");
        assert_eq!(entry["risk_preference"], "medium");
        assert_eq!(entry["primary_career"], rec["primary_recommendation"]["career"]);
        assert!(entry["id"].is_string());
        assert!(entry["created_at"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_career_mode_is_400_with_detail() {
        let app = test_app();
        let mut body = scenario_body();
        body["career_mode"] = json!("sideways");
        let (status, body) = send(&app, Method::POST, "/recommend", Some(body), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("career_mode"));
    }

    #[tokio::test]
    async fn test_blank_skills_is_400_and_not_recorded() {
        let app = test_app();
        let mut body = scenario_body();
        body["skills"] = json!(["", "  "]);
        let (status, body) = send(&app, Method::POST, "/recommend", Some(body), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("skills"));

        let (_, history) = send(&app, Method::GET, "/history", None, None).await;
        assert!(history["history"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_field_is_400_naming_it() {
        let app = test_app();
        let body = json!({ "skills": ["python"], "interests": ["ai"], "career_mode": "growth" });
        let (status, body) = send(&app, Method::POST, "/recommend", Some(body), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("risk_preference"));
    }

    #[tokio::test]
    async fn test_delete_history_twice() {
        let app = test_app();
        send(&app, Method::POST, "/recommend", Some(scenario_body()), None).await;
        let (_, body) = send(&app, Method::GET, "/history", None, None).await;
        let id = body["history"][0]["id"].as_str().unwrap().to_string();
        let uri = format!("/history/{id}");

        let (status, _) = send(&app, Method::DELETE, &uri, None, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, Method::DELETE, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["detail"].is_string());

        let (status, _) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::GET, "/history", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["history"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_pagination() {
        let app = test_app();
        for _ in 0..3 {
            send(&app, Method::POST, "/recommend", Some(scenario_body()), None).await;
        }
        let (_, body) = send(&app, Method::GET, "/history?limit=2", None, None).await;
        assert_eq!(body["history"].as_array().unwrap().len(), 2);
        let (_, body) = send(&app, Method::GET, "/history?limit=2&offset=2", None, None).await;
        assert_eq!(body["history"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_signup_login_logout_flow() {
        let app = test_app();
        let creds = json!({ "email": "Jane@Example.com", "password": "hunter2hunter2" });

        let (status, body) = send(&app, Method::POST, "/signup", Some(creds.clone()), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "jane@example.com");

        let (status, _) = send(&app, Method::POST, "/signup", Some(creds.clone()), None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(&app, Method::POST, "/login", Some(creds), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "bearer");
        let token = body["access_token"].as_str().unwrap().to_string();

        let (status, _) = send(&app, Method::POST, "/logout", None, Some(&token)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::POST, "/logout", None, Some(&token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_failures_share_one_message() {
        let app = test_app();
        let creds = json!({ "email": "jane@example.com", "password": "hunter2hunter2" });
        send(&app, Method::POST, "/signup", Some(creds), None).await;

        let wrong_password = json!({ "email": "jane@example.com", "password": "nope-nope" });
        let unknown_email = json!({ "email": "who@example.com", "password": "hunter2hunter2" });

        let (s1, b1) = send(&app, Method::POST, "/login", Some(wrong_password), None).await;
        let (s2, b2) = send(&app, Method::POST, "/login", Some(unknown_email), None).await;
        assert_eq!(s1, StatusCode::UNAUTHORIZED);
        assert_eq!(s2, StatusCode::UNAUTHORIZED);
        assert_eq!(b1["detail"], b2["detail"]);
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let app = test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/signup",
            Some(json!({ "email": "not-an-email", "password": "hunter2hunter2" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("email"));

        let (status, body) = send(
            &app,
            Method::POST,
            "/signup",
            Some(json!({ "email": "a@b.com", "password": "short" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("password"));
    }

    #[tokio::test]
    async fn test_logout_without_token_is_401() {
        let app = test_app();
        let (status, _) = send(&app, Method::POST, "/logout", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_upload_resume_not_implemented() {
        let app = test_app();
        let (status, body) = send(&app, Method::POST, "/upload-resume", None, None).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_wrong_typed_field_is_400_json_naming_it() {
        let app = test_app();
        let mut body = scenario_body();
        body["skills"] = json!("python");
        let (status, content_type, body) =
            send_raw(&app, Method::POST, "/recommend", &body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(content_type.starts_with("application/json"));
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["detail"].as_str().unwrap().contains("skills"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_400_json() {
        let app = test_app();
        for uri in ["/recommend", "/signup", "/login"] {
            let (status, content_type, body) =
                send_raw(&app, Method::POST, uri, "skills=python").await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(content_type.starts_with("application/json"), "{uri}");
            assert!(body["detail"].is_string(), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_malformed_history_id_is_400_json() {
        let app = test_app();
        for method in [Method::GET, Method::DELETE] {
            let (status, body) = send(&app, method, "/history/not-a-uuid", None, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_malformed_history_query_is_400_json() {
        let app = test_app();
        let (status, body) = send(&app, Method::GET, "/history?limit=lots", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_oversized_skill_list_is_400() {
        let app = test_app();
        let mut body = scenario_body();
        let skills: Vec<String> = (0..5_000).map(|i| format!("skill-{i}")).collect();
        body["skills"] = json!(skills);
        let (status, body) = send(&app, Method::POST, "/recommend", Some(body), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().starts_with("skills"));
    }

    #[tokio::test]
    async fn test_out_of_range_session_ttl_fails_login_without_panic() {
        let recommender =
            Recommender::new(Catalog::bundled().unwrap(), ScoringWeights::default()).unwrap();
        let config = Config {
            session_ttl_minutes: i64::MAX,
            ..Config::default()
        };
        let app = build_router(AppState::in_memory(recommender, config));
        let creds = json!({ "email": "jane@example.com", "password": "hunter2hunter2" });
        send(&app, Method::POST, "/signup", Some(creds.clone()), None).await;

        let (status, body) = send(&app, Method::POST, "/login", Some(creds), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INTERNAL_ERROR");
    }
}
