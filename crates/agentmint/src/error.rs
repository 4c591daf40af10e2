#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response from {url}: HTTP {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Invalid {kind} catalog: {message}")]
    InvalidCatalog { kind: String, message: String },

    #[error("Invalid docs file {path}: {message}")]
    InvalidDocs { path: String, message: String },

    #[error("No docs section with id '{0}'")]
    SectionNotFound(String),
}
