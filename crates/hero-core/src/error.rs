use thiserror::Error;

/// Reasons the subject model can fail to arrive.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadError {
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("HTTP {status} {status_text}")]
    Http { status: u16, status_text: String },
    #[error("invalid glTF: {0}")]
    Parse(String),
    #[error("glTF has no scene")]
    NoScene,
    #[error("glTF contains no mesh primitives")]
    NoMeshes,
}

impl From<gltf::Error> for LoadError {
    fn from(e: gltf::Error) -> Self {
        LoadError::Parse(e.to_string())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("viewport has zero area ({width}x{height})")]
    EmptyViewport { width: f64, height: f64 },
    #[error("subject already loaded")]
    AlreadyLoaded,
}
