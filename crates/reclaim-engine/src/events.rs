use crate::Action;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Whitelisted {
        app: String,
    },
    DefinitionMissing {
        app: String,
    },
    ResourcesResolved {
        app: String,
        namespaces: Vec<String>,
        deployments: usize,
        jobs: usize,
    },
    RegistrationTooRecent {
        app: String,
        created_at: DateTime<Utc>,
    },
    NoDeployments {
        app: String,
    },
    LatestDeployment {
        app: String,
        deployment: String,
        active_from: DateTime<Utc>,
    },
    LatestJob {
        app: String,
        job: String,
        created_at: DateTime<Utc>,
    },
    UserMutation {
        app: String,
        at: DateTime<Utc>,
    },
    LastActivity {
        app: String,
        at: DateTime<Utc>,
        inactive: bool,
        action: Action,
    },
    Candidate {
        app: String,
        action: Action,
    },
    RegistrationDeleted {
        app: String,
        dry_run: bool,
    },
    DeploymentStopped {
        app: String,
        namespace: String,
        deployment: String,
        components: Vec<String>,
        dry_run: bool,
    },
}

impl Event {
    pub fn app(&self) -> &str {
        match self {
            Event::Whitelisted { app }
            | Event::DefinitionMissing { app }
            | Event::ResourcesResolved { app, .. }
            | Event::RegistrationTooRecent { app, .. }
            | Event::NoDeployments { app }
            | Event::LatestDeployment { app, .. }
            | Event::LatestJob { app, .. }
            | Event::UserMutation { app, .. }
            | Event::LastActivity { app, .. }
            | Event::Candidate { app, .. }
            | Event::RegistrationDeleted { app, .. }
            | Event::DeploymentStopped { app, .. } => app,
        }
    }
}

pub trait Observer: Send + Sync {
    fn observe(&self, event: Event);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&self, event: Event) {
        match event {
            Event::Whitelisted { app } => {
                debug!(app = %app, "Registration is whitelisted, skipping");
            }
            Event::DefinitionMissing { app } => {
                debug!(app = %app, "Could not find application definition, continuing");
            }
            Event::ResourcesResolved {
                app,
                namespaces,
                deployments,
                jobs,
            } => {
                debug!(
                    app = %app,
                    "Found namespaces {} with {} deployment(s) and {} job(s)",
                    namespaces.join(", "),
                    deployments,
                    jobs
                );
            }
            Event::RegistrationTooRecent { app, created_at } => {
                debug!(
                    app = %app,
                    "Registration created {} is newer than the inactivity limit, assuming active",
                    created_at.to_rfc3339()
                );
            }
            Event::NoDeployments { app } => {
                debug!(app = %app, "No deployments found, assuming registration is inactive");
            }
            Event::LatestDeployment {
                app,
                deployment,
                active_from,
            } => {
                debug!(
                    app = %app,
                    "Most recent deployment is {}, active from {}",
                    deployment,
                    active_from.to_rfc3339()
                );
            }
            Event::LatestJob {
                app,
                job,
                created_at,
            } => {
                debug!(
                    app = %app,
                    "Most recent job is {}, created {}",
                    job,
                    created_at.to_rfc3339()
                );
            }
            Event::UserMutation { app, at } => {
                debug!(app = %app, "Most recent manual user activity was {}", at.to_rfc3339());
            }
            Event::LastActivity {
                app,
                at,
                inactive,
                action,
            } => {
                if inactive {
                    debug!(
                        app = %app,
                        "Last activity was {}, marking for {}",
                        at.to_rfc3339(),
                        action
                    );
                } else {
                    debug!(
                        app = %app,
                        "Last activity was {}, not marking for {}",
                        at.to_rfc3339(),
                        action
                    );
                }
            }
            Event::Candidate { app, action } => {
                info!(app = %app, "Registration marked for {}", action);
            }
            Event::RegistrationDeleted { app, dry_run } => {
                if dry_run {
                    info!(app = %app, "Would delete registration (dry run)");
                } else {
                    info!(app = %app, "Deleted registration");
                }
            }
            Event::DeploymentStopped {
                app,
                namespace,
                deployment,
                components,
                dry_run,
            } => {
                if dry_run {
                    info!(
                        app = %app,
                        "Would scale components {} of {}/{} to 0 replicas (dry run)",
                        components.join(", "),
                        namespace,
                        deployment
                    );
                } else {
                    info!(
                        app = %app,
                        "Scaled components {} of {}/{} to 0 replicas",
                        components.join(", "),
                        namespace,
                        deployment
                    );
                }
            }
        }
    }
}
