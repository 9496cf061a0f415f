use coloredmanga_util::http::HttpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request return error: {0}")]
    Http(#[from] HttpError),
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yml::Error),
}
