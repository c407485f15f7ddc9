use thiserror::Error;

/// Why a fetch did not produce a usable question list. The variants exist for
/// diagnostics only; the UI collapses all of them into one failure message.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("stack exchange error {error_id}: {message}")]
    Api { error_id: u32, message: String },

    /// The API answered cleanly but returned zero items, which is how a
    /// nonexistent user (or an empty user ID) presents.
    #[error("no questions found for this user")]
    NoQuestions,

    /// The fetch worker went away without delivering a result.
    #[error("fetch aborted before completing")]
    Aborted,
}
