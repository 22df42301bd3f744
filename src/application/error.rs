#[derive(Debug)]
pub enum ApplicationError {
    InvalidInput(String),
    PayloadTooLarge,
    CompressionFailed(String),
    MetadataEditFailed(String),
    InternalError(String),
}
