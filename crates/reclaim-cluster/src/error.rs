use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl ClusterError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClusterError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, ClusterError>;
