//! End-to-end wizard flows over wiremock backends.

use reloc_api::ApiClient;
use reloc_core::BookingStatus;
use reloc_payments::{
    BookingWizard, PaymentError, PaymentMethod, ServiceSummary, StripeGateway, WizardStep,
};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service() -> ServiceSummary {
    ServiceSummary {
        id: "safestay".to_owned(),
        title: "SafeStay 2-bed flat".to_owned(),
        description: "Modern 2-bed flat".to_owned(),
        provider: "SafeStay Housing Ltd".to_owned(),
        location: "Central London".to_owned(),
        price_pence: 120_000,
    }
}

fn api(base_url: &str) -> ApiClient {
    ApiClient::with_base_url(base_url, 30, "justrelocation-test/0.1")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn card_flow_reaches_confirmation() {
    let backend = MockServer::start().await;
    let stripe_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/create-intent"))
        .and(body_partial_json(serde_json::json!({
            "amount": 120_000,
            "service_id": "safestay"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "client_secret": "pi_42_secret_abc",
            "intent_id": "pi_42"
        })))
        .mount(&backend)
        .await;

    Mock::given(method("POST"))
        .and(path("/payment_intents/pi_42/confirm"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "succeeded"})),
        )
        .mount(&stripe_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/payments/confirm/pi_42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&backend)
        .await;

    Mock::given(method("POST"))
        .and(path("/bookings/create"))
        .and(body_partial_json(serde_json::json!({"status": "confirmed"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"booking_id": "bk_card_1"})),
        )
        .mount(&backend)
        .await;

    let api = api(&backend.uri());
    let stripe = StripeGateway::with_base_url("pk_test_key", &stripe_server.uri()).unwrap();

    let mut wizard = BookingWizard::new(service());
    wizard
        .proceed_to_payment("2025-03-10", "14:00", Some("ground floor please".to_owned()))
        .unwrap();

    let confirmation = wizard
        .pay_by_card(&api, &stripe, "pm_card_visa")
        .await
        .expect("card flow should confirm");
    assert_eq!(confirmation.booking_id, "bk_card_1");
    assert_eq!(confirmation.payment_status, BookingStatus::Confirmed);
    assert!(confirmation.reference.is_none());
    assert_eq!(wizard.step(), WizardStep::Confirmation);
}

#[tokio::test]
async fn declined_card_surfaces_the_provider_message_and_stays_on_payment() {
    let backend = MockServer::start().await;
    let stripe_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/create-intent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "client_secret": "pi_43_secret_abc",
            "intent_id": "pi_43"
        })))
        .mount(&backend)
        .await;

    Mock::given(method("POST"))
        .and(path("/payment_intents/pi_43/confirm"))
        .respond_with(ResponseTemplate::new(402).set_body_json(serde_json::json!({
            "error": { "message": "Your card was declined." }
        })))
        .mount(&stripe_server)
        .await;

    let api = api(&backend.uri());
    let stripe = StripeGateway::with_base_url("pk_test_key", &stripe_server.uri()).unwrap();

    let mut wizard = BookingWizard::new(service());
    wizard.proceed_to_payment("2025-03-10", "14:00", None).unwrap();

    let err = wizard
        .pay_by_card(&api, &stripe, "pm_card_declined")
        .await
        .unwrap_err();
    assert!(
        matches!(err, PaymentError::Card(ref msg) if msg == "Your card was declined."),
        "got: {err:?}"
    );
    assert_eq!(wizard.step(), WizardStep::Payment, "no transition on decline");
}

#[tokio::test]
async fn bank_transfer_creates_a_pending_booking_with_reference() {
    let backend = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bookings/create"))
        .and(body_partial_json(
            serde_json::json!({"status": "pending_payment"}),
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"booking_id": "bk_abc123456"})),
        )
        .mount(&backend)
        .await;

    let api = api(&backend.uri());

    let mut wizard = BookingWizard::new(service());
    wizard.proceed_to_payment("2025-03-10", "14:00", None).unwrap();
    wizard.select_method(PaymentMethod::BankTransfer).unwrap();

    let confirmation = wizard
        .pay_by_bank_transfer(&api)
        .await
        .expect("bank transfer cannot fail client-side");
    assert_eq!(confirmation.payment_status, BookingStatus::PendingPayment);
    assert_eq!(confirmation.reference.as_deref(), Some("JR123456"));
    assert_eq!(wizard.step(), WizardStep::Confirmation);

    // Confirmation is terminal.
    assert!(wizard.back().is_err());
    assert!(wizard.proceed_to_payment("2025-03-11", "15:00", None).is_err());
}
