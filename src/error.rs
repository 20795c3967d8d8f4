use thiserror::Error;

#[derive(Error, Debug)]
pub enum TomatoDoctorError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Weather API key is not set. Configure it with `tomato-doctor config --set-api-key YOUR_KEY`")]
    MissingApiKey,

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("No images found in: {0}")]
    NoImagesFound(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TomatoDoctorError>;
