//! Integration tests for `WhatsAppClient` using wiremock HTTP mocks.

use reloc_whatsapp::types::MessagePayload;
use reloc_whatsapp::{WhatsAppClient, WhatsAppError};
use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> WhatsAppClient {
    WhatsAppClient::with_base_url("1234567890", "test-token", base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn send_text_posts_the_cloud_api_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1234567890/messages"))
        .and(bearer_token("test-token"))
        .and(body_partial_json(serde_json::json!({
            "messaging_product": "whatsapp",
            "to": "447700123456",
            "type": "text",
            "text": { "body": "Hello!" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "messaging_product": "whatsapp",
            "messages": [{ "id": "wamid.test" }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client
        .send_text("+44 7700 123456", "Hello!")
        .await
        .expect("send should succeed");
    assert_eq!(response.messages[0].id, "wamid.test");
}

#[tokio::test]
async fn api_rejection_surfaces_the_provider_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1234567890/messages"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "message": "(#131030) Recipient phone number not in allowed list" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.send_text("447700123456", "Hello!").await.unwrap_err();
    assert!(
        matches!(err, WhatsAppError::Api(ref msg) if msg.contains("131030")),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn dispatch_swallows_failures() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    // Must not panic or propagate.
    client
        .dispatch("447700123456", MessagePayload::text("best effort"))
        .await;
}

#[tokio::test]
async fn lead_alert_carries_the_accept_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1234567890/messages"))
        .and(wiremock::matchers::body_string_contains("ACCEPT 42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "messages": [{ "id": "wamid.alert" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let lead = reloc_core::Lead {
        id: "42".to_owned(),
        customer_name: "Dr. Sarah Johnson".to_owned(),
        email: None,
        phone: None,
        hospital: "St Thomas' Hospital".to_owned(),
        service_type: "Temporary Accommodation".to_owned(),
        budget: "£1,200-£1,500".to_owned(),
        preferred_date: None,
        location: "Central London".to_owned(),
        notes: None,
        urgency: reloc_core::Urgency::High,
        status: reloc_core::LeadStatus::New,
        match_score: 92,
    };

    let client = test_client(&server.uri());
    client.dispatch_lead_alert("447700123456", &lead).await;
}

#[tokio::test]
async fn interactive_payload_reaches_the_wire_with_buttons() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1234567890/messages"))
        .and(body_partial_json(serde_json::json!({
            "type": "interactive",
            "interactive": {
                "type": "button",
                "action": { "buttons": [{ "type": "reply", "reply": { "id": "btn_0", "title": "Accept Lead" } }] }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "messages": [{ "id": "wamid.buttons" }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client
        .send(
            "447700123456",
            MessagePayload::quick_replies("New lead available", &["Accept Lead"]),
        )
        .await
        .expect("send should succeed");
    assert_eq!(response.messages[0].id, "wamid.buttons");
}
