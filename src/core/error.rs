use std::path::PathBuf;

pub type GridResult<T> = Result<T, GridError>;

#[derive(thiserror::Error, Debug)]
pub enum GridError {
    #[error("invalid grid parameters: {0}")]
    InvalidParams(String),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image error at {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("frame generation failed for ca={ca:.2}, cb={cb:.2}: {message}")]
    Generation { ca: f64, cb: f64, message: String },
}

impl GridError {
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }
}
