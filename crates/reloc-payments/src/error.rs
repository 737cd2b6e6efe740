use thiserror::Error;

use crate::wizard::WizardError;

#[derive(Debug, Error)]
pub enum PaymentError {
    /// Network or TLS failure talking to the payment API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The card was declined or the payment API rejected the confirmation.
    /// The message is the provider's own text, shown inline to the user.
    #[error("{0}")]
    Card(String),

    /// A backend call (intent creation, booking creation) failed.
    #[error(transparent)]
    Api(#[from] reloc_api::ApiError),

    /// The wizard was driven out of order or with invalid input.
    #[error(transparent)]
    Wizard(#[from] WizardError),

    /// The payment API answered with something unparseable.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
