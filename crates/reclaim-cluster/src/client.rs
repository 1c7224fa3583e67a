use crate::Result;
use crate::model::{ApplicationDefinition, Deployment, Job, Registration};
use async_trait::async_trait;

#[async_trait]
pub trait ClusterClient: Send + Sync {
    async fn list_registrations(&self) -> Result<Vec<Registration>>;

    /// Returns [`crate::ClusterError::NotFound`] when the application has no
    /// definition yet.
    async fn get_application_definition(&self, app_name: &str) -> Result<ApplicationDefinition>;

    async fn list_deployments(&self, namespace: &str) -> Result<Vec<Deployment>>;

    async fn list_jobs(&self, namespace: &str) -> Result<Vec<Job>>;

    async fn delete_registration(&self, name: &str) -> Result<()>;

    async fn update_deployment(&self, deployment: &Deployment) -> Result<()>;
}
