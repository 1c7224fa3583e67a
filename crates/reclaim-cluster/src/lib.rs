mod client;
pub mod crd;
mod error;
mod kube_client;
mod model;
pub mod namespace;

pub use client::ClusterClient;
pub use error::{ClusterError, Result};
pub use kube_client::KubeClusterClient;
pub use model::{
    ApplicationDefinition, Component, Deployment, DeploymentCondition, Job, Registration,
};
