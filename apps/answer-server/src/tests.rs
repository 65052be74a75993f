//! Tests for the answer server
//!
//! Test categories:
//! - HTTP endpoint behavior via axum-test (status codes, envelopes, CORS)
//! - Property tests over arbitrary questions

#[cfg(test)]
mod endpoint_tests {
    //! HTTP endpoint integration tests using axum-test

    use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
    use axum_test::TestServer;
    use compliance_engine::{ComplianceCatalog, NO_MATCH_ANSWER};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use shared_types::ComplianceRecord;

    use crate::{app, AppState};

    /// Create a test server over the built-in catalog
    fn create_test_server() -> TestServer {
        let catalog = ComplianceCatalog::embedded().unwrap();
        TestServer::new(app(AppState::new(catalog, 3, 5))).unwrap()
    }

    /// Create a test server over a single GDPR encryption record
    fn create_gdpr_server() -> TestServer {
        let catalog = ComplianceCatalog::new(vec![ComplianceRecord {
            name: "GDPR".to_string(),
            jurisdiction: Some("EU".to_string()),
            category: "Data Privacy".to_string(),
            domains: vec!["encryption".to_string()],
            description: "EU regulation on personal data.".to_string(),
            requirement: Some("Organizations must encrypt data at rest using AES-256.".to_string()),
        }]);
        TestServer::new(app(AppState::new(catalog, 3, 5))).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_200() {
        let server = create_test_server();
        let response = server.get("/health").await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "answer-server");
        assert!(json["records"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_records_lists_catalog() {
        let server = create_test_server();
        let response = server.get("/api/records").await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert!(json["success"].as_bool().unwrap());
        let count = json["count"].as_u64().unwrap() as usize;
        assert_eq!(json["records"].as_array().unwrap().len(), count);
        assert!(json["records"][0].get("description").is_none());
    }

    #[tokio::test]
    async fn test_answer_envelope() {
        let server = create_test_server();
        let response = server
            .post("/api/answer")
            .json(&json!({ "question": "Are you compliant with PCI DSS?" }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["question"], "Are you compliant with PCI DSS?");
        assert!(json["answer"].as_str().unwrap().contains("PCI DSS"));
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_fallback_envelope_and_vendor_voice() {
        let server = create_gdpr_server();
        let response = server
            .post("/api/ask-fallback")
            .json(&json!({ "question": "Does your company encrypt data at rest?" }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        let answer = json["answer"].as_str().unwrap();
        assert!(answer.starts_with("Yes, we do encrypt data at rest using AES-256."));
        assert_eq!(json["metadata"]["source"], "fallback");
        assert_eq!(json["metadata"]["relevant_sources"], json!(["GDPR"]));
        assert!(json["metadata"]["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_fallback_keeps_singular_subjects_grammatical() {
        let server = create_test_server();
        let response = server
            .post("/api/ask-fallback")
            .json(&json!({ "question": "Are you compliant with SOX?" }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        let answer = json["answer"].as_str().unwrap();
        assert_eq!(json["metadata"]["relevant_sources"][0], "SOX");
        assert!(answer.starts_with("Yes, Management does assess"));
        assert!(answer.contains("the external auditor does attest"));
        assert!(!answer.contains("Management do "));
    }

    #[tokio::test]
    async fn test_fallback_caps_sources_at_five() {
        let server = create_test_server();
        let response = server
            .post("/api/ask-fallback")
            .json(&json!({
                "question": "Do you have controls for money laundering, sanctions screening, bribery and data security?"
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["metadata"]["relevant_sources"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_unrelated_question_gets_boilerplate() {
        let server = create_test_server();
        for path in ["/api/answer", "/api/ask-fallback"] {
            let response = server
                .post(path)
                .json(&json!({ "question": "What is the weather today?" }))
                .await;
            response.assert_status_ok();
            let json = response.json::<Value>();
            assert_eq!(json["answer"], NO_MATCH_ANSWER);
        }
    }

    #[tokio::test]
    async fn test_missing_question_is_400() {
        let server = create_test_server();
        for body in [json!({}), json!({ "question": "" }), json!({ "other": "x" })] {
            let response = server.post("/api/answer").json(&body).await;
            response.assert_status_bad_request();
            let json = response.json::<Value>();
            assert_eq!(json["code"], "MISSING_QUESTION");
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_500_with_message() {
        let server = create_test_server();
        let response = server.post("/api/ask-fallback").text("{not json").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let json = response.json::<Value>();
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert!(!json["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let server = create_test_server();
        let response = server.get("/api/answer").await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);

        let response = server.put("/api/ask-fallback").await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.json::<Value>()["code"], "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_options_is_204() {
        let server = create_test_server();
        let response = server.method(Method::OPTIONS, "/api/answer").await;
        response.assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_cors_preflight_is_permissive() {
        let server = create_test_server();
        let response = server
            .method(Method::OPTIONS, "/api/ask-fallback")
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("https://portal.example.com"),
            )
            .add_header(
                HeaderName::from_static("access-control-request-method"),
                HeaderValue::from_static("POST"),
            )
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
        assert_eq!(response.header("access-control-allow-origin"), "*");
    }

    #[tokio::test]
    async fn test_answers_carry_cors_header() {
        let server = create_test_server();
        let response = server
            .post("/api/answer")
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("https://portal.example.com"),
            )
            .json(&json!({ "question": "Do you screen for sanctions?" }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.header("access-control-allow-origin"), "*");
    }
}

#[cfg(test)]
mod property_tests {
    //! Property tests for arbitrary questions

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use compliance_engine::ComplianceCatalog;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    use crate::{app, AppState};

    fn post_question(path: &'static str, question: String) -> (StatusCode, Value) {
        tokio_test::block_on(async move {
            let catalog = ComplianceCatalog::embedded().unwrap();
            let server = TestServer::new(app(AppState::new(catalog, 3, 5))).unwrap();
            let response = server
                .post(path)
                .json(&json!({ "question": question }))
                .await;
            (response.status_code(), response.json::<Value>())
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Property: any non-blank question gets a 200 with a non-empty answer
        #[test]
        fn any_question_is_answered(question in "[A-Za-z][A-Za-z0-9 ,?'-]{0,80}") {
            let (status, json) = post_question("/api/answer", question.clone());
            prop_assert_eq!(status, StatusCode::OK);
            prop_assert!(!json["answer"].as_str().unwrap_or_default().is_empty());
            prop_assert_eq!(json["question"].as_str(), Some(question.as_str()));
        }

        /// Property: fallback never reports more sources than its top-N
        #[test]
        fn fallback_sources_bounded(question in "[A-Za-z][A-Za-z ?]{0,80}") {
            let (status, json) = post_question("/api/ask-fallback", question);
            prop_assert_eq!(status, StatusCode::OK);
            let sources = json["metadata"]["relevant_sources"].as_array().unwrap().len();
            prop_assert!(sources <= 5);
        }
    }
}
