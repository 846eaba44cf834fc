/// Error type for alert persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The credentials file could not be read.
    #[error("Failed to read credentials file {path}: {source}")]
    CredentialsIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The credentials file is not a usable service-account key.
    #[error("Invalid credentials: {0}")]
    Credentials(String),

    /// The token assertion could not be signed.
    #[error("Failed to sign token assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// The token endpoint did not hand out an access token.
    #[error("Token exchange failed: {0}")]
    Token(String),

    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend rejected the write.
    #[error("Firestore returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}
