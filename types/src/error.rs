use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Invalid API base url: {0}")]
    InvalidBaseUrl(String),
    #[error("Request failed with status {0}")]
    RequestFailed(u16),
    #[error("Unknown error")]
    Unknown,
}

impl Error {
    /// Message shown to the user for a transport failure, falling back to
    /// [`Error::Unknown`] when the underlying error has nothing to say.
    pub fn describe(message: impl ToString) -> String {
        let message = message.to_string();
        if message.trim().is_empty() {
            Error::Unknown.to_string()
        } else {
            message
        }
    }
}
