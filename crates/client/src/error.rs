use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// No live session. The server answered 401.
    #[error("not logged in")]
    Unauthorized,

    /// The server rejected the request with a JSON `{"message"}` body.
    #[error("{message} (status {status})")]
    Api { status: StatusCode, message: String },
}
