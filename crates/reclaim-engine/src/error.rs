use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Cluster(#[from] reclaim_cluster::ClusterError),

    #[error("malformed last user mutation timestamp {value:?} on deployment {deployment}: {source}")]
    MalformedTimestamp {
        deployment: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
