//! Typed views of the platform custom resources. Unmodelled fields are kept
//! in flattened `extra` maps and written back untouched.

use crate::model::{
    ApplicationDefinition, Component, Deployment, DeploymentCondition, Job, Registration,
};
use chrono::{DateTime, Utc};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use kube::{CustomResource, ResourceExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const LAST_USER_MUTATION_ANNOTATION: &str = "radix.equinor.com/last-user-mutation";

const ACTIVE_CONDITION: &str = "Active";

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug)]
#[kube(
    group = "radix.equinor.com",
    version = "v1",
    kind = "RadixRegistration",
    plural = "radixregistrations",
    schema = "disabled"
)]
pub struct RadixRegistrationSpec {
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug)]
#[kube(
    group = "radix.equinor.com",
    version = "v1",
    kind = "RadixApplication",
    plural = "radixapplications",
    namespaced,
    schema = "disabled"
)]
pub struct RadixApplicationSpec {
    #[serde(default)]
    pub environments: Vec<ApplicationEnvironment>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApplicationEnvironment {
    pub name: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug)]
#[kube(
    group = "radix.equinor.com",
    version = "v1",
    kind = "RadixDeployment",
    plural = "radixdeployments",
    namespaced,
    status = "RadixDeploymentStatus",
    schema = "disabled"
)]
pub struct RadixDeploymentSpec {
    #[serde(default)]
    pub components: Vec<DeployComponent>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeployComponent {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas_override: Option<i32>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RadixDeploymentStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_from: Option<Time>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug)]
#[kube(
    group = "radix.equinor.com",
    version = "v1",
    kind = "RadixJob",
    plural = "radixjobs",
    namespaced,
    status = "RadixJobStatus",
    schema = "disabled"
)]
pub struct RadixJobSpec {
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct RadixJobStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Time>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn time_or_epoch(time: Option<&Time>) -> DateTime<Utc> {
    time.map(|t| t.0).unwrap_or(DateTime::UNIX_EPOCH)
}

impl RadixRegistration {
    pub fn to_registration(&self) -> Registration {
        Registration {
            name: self.name_any(),
            created_at: time_or_epoch(self.metadata.creation_timestamp.as_ref()),
        }
    }
}

impl RadixApplication {
    pub fn to_definition(&self) -> ApplicationDefinition {
        ApplicationDefinition {
            name: self.name_any(),
            environments: self
                .spec
                .environments
                .iter()
                .map(|env| env.name.clone())
                .collect(),
        }
    }
}

impl RadixDeployment {
    pub fn to_deployment(&self) -> Deployment {
        let status = self.status.as_ref();
        let condition = match status.and_then(|s| s.condition.as_deref()) {
            Some(ACTIVE_CONDITION) => DeploymentCondition::Active,
            _ => DeploymentCondition::Inactive,
        };

        Deployment {
            name: self.name_any(),
            namespace: self.namespace().unwrap_or_default(),
            condition,
            active_from: time_or_epoch(status.and_then(|s| s.active_from.as_ref())),
            components: self
                .spec
                .components
                .iter()
                .map(|c| Component {
                    name: c.name.clone(),
                    replicas_override: c.replicas_override,
                })
                .collect(),
            last_user_mutation: self
                .annotations()
                .get(LAST_USER_MUTATION_ANNOTATION)
                .cloned(),
        }
    }

    /// Copies the replica overrides of `deployment` onto the matching
    /// components by name. Components missing from `deployment` are untouched.
    pub fn apply_replica_overrides(&mut self, deployment: &Deployment) {
        for component in &mut self.spec.components {
            if let Some(source) = deployment
                .components
                .iter()
                .find(|c| c.name == component.name)
            {
                component.replicas_override = source.replicas_override;
            }
        }
    }
}

impl RadixJob {
    pub fn to_job(&self) -> Job {
        Job {
            name: self.name_any(),
            created_at: time_or_epoch(self.metadata.creation_timestamp.as_ref()),
            status_created: self
                .status
                .as_ref()
                .and_then(|s| s.created.as_ref())
                .map(|t| t.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_deployment() -> RadixDeployment {
        serde_json::from_value(serde_json::json!({
            "apiVersion": "radix.equinor.com/v1",
            "kind": "RadixDeployment",
            "metadata": {
                "name": "web-abc123",
                "namespace": "shop-prod",
                "annotations": {
                    "radix.equinor.com/last-user-mutation": "2024-03-01T10:00:00Z"
                }
            },
            "spec": {
                "appname": "shop",
                "environment": "prod",
                "components": [
                    { "name": "frontend", "image": "shop/frontend:1", "replicas": 2 },
                    { "name": "api", "image": "shop/api:1", "replicasOverride": 3 }
                ]
            },
            "status": {
                "condition": "Active",
                "activeFrom": "2024-02-20T08:30:00Z",
                "reconciled": "2024-02-20T08:31:00Z"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_to_deployment() {
        let deployment = sample_deployment().to_deployment();

        assert_eq!(deployment.name, "web-abc123");
        assert_eq!(deployment.namespace, "shop-prod");
        assert_eq!(deployment.condition, DeploymentCondition::Active);
        assert_eq!(
            deployment.active_from,
            Utc.with_ymd_and_hms(2024, 2, 20, 8, 30, 0).unwrap()
        );
        assert_eq!(deployment.components.len(), 2);
        assert_eq!(deployment.components[0].replicas_override, None);
        assert_eq!(deployment.components[1].replicas_override, Some(3));
        assert_eq!(
            deployment.last_user_mutation.as_deref(),
            Some("2024-03-01T10:00:00Z")
        );
    }

    #[test]
    fn test_unknown_condition_is_inactive() {
        let mut rd = sample_deployment();
        rd.status.as_mut().unwrap().condition = Some("Pending".to_string());
        assert_eq!(rd.to_deployment().condition, DeploymentCondition::Inactive);

        rd.status = None;
        let deployment = rd.to_deployment();
        assert_eq!(deployment.condition, DeploymentCondition::Inactive);
        assert_eq!(deployment.active_from, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_apply_replica_overrides_preserves_unknown_fields() {
        let mut rd = sample_deployment();
        let mut deployment = rd.to_deployment();
        for component in &mut deployment.components {
            component.replicas_override = Some(0);
        }

        rd.apply_replica_overrides(&deployment);
        let written = serde_json::to_value(&rd).unwrap();

        assert_eq!(written["spec"]["appname"], "shop");
        assert_eq!(written["spec"]["components"][0]["image"], "shop/frontend:1");
        assert_eq!(written["spec"]["components"][0]["replicas"], 2);
        assert_eq!(written["spec"]["components"][0]["replicasOverride"], 0);
        assert_eq!(written["spec"]["components"][1]["replicasOverride"], 0);
        assert_eq!(written["status"]["reconciled"], "2024-02-20T08:31:00Z");
    }

    #[test]
    fn test_to_job_without_status() {
        let rj: RadixJob = serde_json::from_value(serde_json::json!({
            "apiVersion": "radix.equinor.com/v1",
            "kind": "RadixJob",
            "metadata": {
                "name": "build-1",
                "namespace": "shop-app",
                "creationTimestamp": "2024-02-19T12:00:00Z"
            },
            "spec": { "appName": "shop" }
        }))
        .unwrap();

        let job = rj.to_job();
        assert_eq!(job.name, "build-1");
        assert_eq!(
            job.created_at,
            Utc.with_ymd_and_hms(2024, 2, 19, 12, 0, 0).unwrap()
        );
        assert_eq!(job.status_created, None);
    }

    #[test]
    fn test_to_definition() {
        let ra: RadixApplication = serde_json::from_value(serde_json::json!({
            "apiVersion": "radix.equinor.com/v1",
            "kind": "RadixApplication",
            "metadata": { "name": "shop", "namespace": "shop-app" },
            "spec": {
                "environments": [
                    { "name": "qa", "build": { "from": "main" } },
                    { "name": "prod" }
                ]
            }
        }))
        .unwrap();

        let definition = ra.to_definition();
        assert_eq!(definition.name, "shop");
        assert_eq!(definition.environments, vec!["qa", "prod"]);
    }
}
