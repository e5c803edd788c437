use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("invalid render parameters: {0}")]
    InvalidRenderParameters(String),
}
