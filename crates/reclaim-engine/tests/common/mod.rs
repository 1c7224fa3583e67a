#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use reclaim_cluster::namespace::{app_namespace, environment_namespace};
use reclaim_cluster::{
    ApplicationDefinition, ClusterClient, ClusterError, Component, Deployment,
    DeploymentCondition, Job, Registration, Result,
};
use reclaim_config::Thresholds;
use reclaim_engine::{EngineContext, Event, FixedClock, Observer, Whitelist};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct ClusterState {
    registrations: Vec<Registration>,
    definitions: HashMap<String, ApplicationDefinition>,
    deployments: HashMap<String, Vec<Deployment>>,
    jobs: HashMap<String, Vec<Job>>,
    deleted: Vec<String>,
    updated: Vec<Deployment>,
    broken_definitions: HashSet<String>,
    broken_namespaces: HashSet<String>,
    broken_deletes: HashSet<String>,
    definition_lookups: Vec<String>,
}

#[derive(Default)]
pub struct FakeCluster {
    state: Mutex<ClusterState>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_app(&self, name: &str, created_at: DateTime<Utc>, environments: &[&str]) {
        let mut state = self.state.lock().unwrap();
        state.registrations.push(Registration {
            name: name.to_string(),
            created_at,
        });
        state.definitions.insert(
            name.to_string(),
            ApplicationDefinition {
                name: name.to_string(),
                environments: environments.iter().map(|e| e.to_string()).collect(),
            },
        );
    }

    pub fn add_registration_only(&self, name: &str, created_at: DateTime<Utc>) {
        self.state.lock().unwrap().registrations.push(Registration {
            name: name.to_string(),
            created_at,
        });
    }

    pub fn add_deployment(&self, deployment: Deployment) {
        self.state
            .lock()
            .unwrap()
            .deployments
            .entry(deployment.namespace.clone())
            .or_default()
            .push(deployment);
    }

    pub fn add_job(&self, app: &str, job: Job) {
        self.state
            .lock()
            .unwrap()
            .jobs
            .entry(app_namespace(app))
            .or_default()
            .push(job);
    }

    pub fn set_deployments(&self, namespace: &str, deployments: Vec<Deployment>) {
        self.state
            .lock()
            .unwrap()
            .deployments
            .insert(namespace.to_string(), deployments);
    }

    pub fn break_definition(&self, app: &str) {
        self.state
            .lock()
            .unwrap()
            .broken_definitions
            .insert(app.to_string());
    }

    pub fn break_namespace(&self, namespace: &str) {
        self.state
            .lock()
            .unwrap()
            .broken_namespaces
            .insert(namespace.to_string());
    }

    pub fn break_delete(&self, name: &str) {
        self.state
            .lock()
            .unwrap()
            .broken_deletes
            .insert(name.to_string());
    }

    pub fn deleted(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted.clone()
    }

    pub fn updated(&self) -> Vec<Deployment> {
        self.state.lock().unwrap().updated.clone()
    }

    pub fn definition_lookups(&self) -> Vec<String> {
        self.state.lock().unwrap().definition_lookups.clone()
    }
}

fn unavailable(what: &str) -> ClusterError {
    ClusterError::Other(anyhow::anyhow!("{} unavailable", what))
}

#[async_trait]
impl ClusterClient for FakeCluster {
    async fn list_registrations(&self) -> Result<Vec<Registration>> {
        Ok(self.state.lock().unwrap().registrations.clone())
    }

    async fn get_application_definition(&self, app_name: &str) -> Result<ApplicationDefinition> {
        let mut state = self.state.lock().unwrap();
        state.definition_lookups.push(app_name.to_string());
        if state.broken_definitions.contains(app_name) {
            return Err(unavailable(app_name));
        }
        state
            .definitions
            .get(app_name)
            .cloned()
            .ok_or_else(|| ClusterError::NotFound {
                kind: "RadixApplication",
                name: app_name.to_string(),
            })
    }

    async fn list_deployments(&self, namespace: &str) -> Result<Vec<Deployment>> {
        let state = self.state.lock().unwrap();
        if state.broken_namespaces.contains(namespace) {
            return Err(unavailable(namespace));
        }
        Ok(state.deployments.get(namespace).cloned().unwrap_or_default())
    }

    async fn list_jobs(&self, namespace: &str) -> Result<Vec<Job>> {
        let state = self.state.lock().unwrap();
        if state.broken_namespaces.contains(namespace) {
            return Err(unavailable(namespace));
        }
        Ok(state.jobs.get(namespace).cloned().unwrap_or_default())
    }

    async fn delete_registration(&self, name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.broken_deletes.contains(name) {
            return Err(unavailable(name));
        }
        state.registrations.retain(|r| r.name != name);
        state.definitions.remove(name);
        state.deleted.push(name.to_string());
        Ok(())
    }

    async fn update_deployment(&self, deployment: &Deployment) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.broken_namespaces.contains(&deployment.namespace) {
            return Err(unavailable(&deployment.namespace));
        }
        if let Some(stored) = state
            .deployments
            .get_mut(&deployment.namespace)
            .and_then(|list| list.iter_mut().find(|d| d.name == deployment.name))
        {
            *stored = deployment.clone();
        }
        state.updated.push(deployment.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn events_for(&self, app: &str) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| e.app() == app)
            .collect()
    }
}

impl Observer for RecordingObserver {
    fn observe(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn days(n: i64) -> TimeDelta {
    TimeDelta::days(n)
}

pub fn deployment(
    app: &str,
    env: &str,
    name: &str,
    condition: DeploymentCondition,
    active_from: DateTime<Utc>,
) -> Deployment {
    Deployment {
        name: name.to_string(),
        namespace: environment_namespace(app, env),
        condition,
        active_from,
        components: vec![
            Component {
                name: "web".to_string(),
                replicas_override: None,
            },
            Component {
                name: "worker".to_string(),
                replicas_override: Some(2),
            },
        ],
        last_user_mutation: None,
    }
}

pub fn job(name: &str, created_at: DateTime<Utc>) -> Job {
    Job {
        name: name.to_string(),
        created_at,
        status_created: Some(created_at),
    }
}

/// Context evaluated at `now` with the default thresholds: 7 days before
/// stop, 28 before deletion.
pub fn context(
    cluster: Arc<FakeCluster>,
    observer: Arc<RecordingObserver>,
    now: DateTime<Utc>,
    whitelist: Whitelist,
) -> EngineContext {
    EngineContext {
        client: cluster,
        whitelist: Arc::new(whitelist),
        thresholds: Thresholds {
            deletion: days(28),
            stop: days(7),
        },
        clock: Arc::new(FixedClock(now)),
        observer,
        dry_run: false,
    }
}
