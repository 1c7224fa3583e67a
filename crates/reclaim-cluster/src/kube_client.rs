use crate::client::ClusterClient;
use crate::crd::{RadixApplication, RadixDeployment, RadixJob, RadixRegistration};
use crate::model::{ApplicationDefinition, Deployment, Job, Registration};
use crate::namespace::app_namespace;
use crate::{ClusterError, Result};
use async_trait::async_trait;
use kube::{
    Client,
    api::{Api, DeleteParams, ListParams, PostParams},
};
use tracing::{debug, info};

pub struct KubeClusterClient {
    client: Client,
}

impl KubeClusterClient {
    /// Connects using `KUBECONFIG` or `~/.kube/config`, falling back to the
    /// in-cluster service account.
    pub async fn try_default() -> Result<Self> {
        let config = kube::Config::infer()
            .await
            .map_err(|e| ClusterError::Other(e.into()))?;
        let cluster_url = config.cluster_url.clone();
        let client = Client::try_from(config)?;
        info!("Constructed Kubernetes client for API server {}", cluster_url);
        Ok(Self::new(client))
    }

    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn deployments(&self, namespace: &str) -> Api<RadixDeployment> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl ClusterClient for KubeClusterClient {
    async fn list_registrations(&self) -> Result<Vec<Registration>> {
        let api: Api<RadixRegistration> = Api::all(self.client.clone());
        let list = api.list(&ListParams::default()).await?;
        debug!("Listed {} registrations", list.items.len());
        Ok(list.items.iter().map(|rr| rr.to_registration()).collect())
    }

    async fn get_application_definition(&self, app_name: &str) -> Result<ApplicationDefinition> {
        let api: Api<RadixApplication> =
            Api::namespaced(self.client.clone(), &app_namespace(app_name));
        match api.get(app_name).await {
            Ok(ra) => Ok(ra.to_definition()),
            Err(kube::Error::Api(err)) if err.code == 404 => Err(ClusterError::NotFound {
                kind: "RadixApplication",
                name: app_name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_deployments(&self, namespace: &str) -> Result<Vec<Deployment>> {
        let list = self.deployments(namespace).list(&ListParams::default()).await?;
        Ok(list.items.iter().map(|rd| rd.to_deployment()).collect())
    }

    async fn list_jobs(&self, namespace: &str) -> Result<Vec<Job>> {
        let api: Api<RadixJob> = Api::namespaced(self.client.clone(), namespace);
        let list = api.list(&ListParams::default()).await?;
        Ok(list.items.iter().map(|rj| rj.to_job()).collect())
    }

    async fn delete_registration(&self, name: &str) -> Result<()> {
        let api: Api<RadixRegistration> = Api::all(self.client.clone());
        match api.delete(name, &DeleteParams::default()).await {
            Ok(_) => Ok(()),
            Err(kube::Error::Api(err)) if err.code == 404 => Err(ClusterError::NotFound {
                kind: "RadixRegistration",
                name: name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_deployment(&self, deployment: &Deployment) -> Result<()> {
        let api = self.deployments(&deployment.namespace);

        // Fields outside the domain view must survive the write.
        let mut current = match api.get(&deployment.name).await {
            Ok(rd) => rd,
            Err(kube::Error::Api(err)) if err.code == 404 => {
                return Err(ClusterError::NotFound {
                    kind: "RadixDeployment",
                    name: format!("{}/{}", deployment.namespace, deployment.name),
                });
            }
            Err(e) => return Err(e.into()),
        };
        current.apply_replica_overrides(deployment);

        api.replace(&deployment.name, &PostParams::default(), &current)
            .await?;
        Ok(())
    }
}
