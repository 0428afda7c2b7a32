/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request was rejected by the provider (bad credential,
    /// malformed payload, etc.).
    InvalidRequest,
    /// The model provider is rate limited.
    RateLimitExceeded,
    /// Any other errors.
    Other,
}
