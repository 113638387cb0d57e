use crate::abs::ShaderStage;

/// Failures while setting up GPU resources.
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("{stage} shader failed to compile:\n{log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("shader program failed to link:\n{0}")]
    ProgramLink(String),
    #[error("failed to allocate GPU object: {0}")]
    Allocation(String),
}
