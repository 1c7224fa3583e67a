use crate::error::{EngineError, Result};
use crate::events::{Event, Observer};
use crate::Action;
use chrono::{DateTime, TimeDelta, Utc};
use reclaim_cluster::{Deployment, Job, Registration};
use std::borrow::Borrow;

pub fn sort_deployments_by_active_from<D: Borrow<Deployment>>(deployments: &mut [D]) {
    deployments.sort_by_key(|d| d.borrow().active_from);
}

pub fn sort_jobs_by_creation<J: Borrow<Job>>(jobs: &mut [J]) {
    jobs.sort_by_key(|j| j.borrow().created_at);
}

/// The deployment that became active last. Of several with the same instant,
/// the one listed last wins.
pub fn latest_deployment(deployments: &[Deployment]) -> Option<&Deployment> {
    let mut sorted: Vec<&Deployment> = deployments.iter().collect();
    sort_deployments_by_active_from(&mut sorted);
    sorted.last().copied()
}

pub fn latest_job(jobs: &[Job]) -> Option<&Job> {
    let mut sorted: Vec<&Job> = jobs.iter().collect();
    sort_jobs_by_creation(&mut sorted);
    sorted.last().copied()
}

/// Parses the last user mutation annotation. Absent means no mutation; an
/// unparseable value is an error.
pub fn last_user_mutation(deployment: &Deployment) -> Result<Option<DateTime<Utc>>> {
    deployment
        .last_user_mutation
        .as_deref()
        .map(|value| {
            DateTime::parse_from_rfc3339(value)
                .map(|at| at.with_timezone(&Utc))
                .map_err(|source| EngineError::MalformedTimestamp {
                    deployment: deployment.name.clone(),
                    value: value.to_string(),
                    source,
                })
        })
        .transpose()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivitySignals {
    pub registration_created: DateTime<Utc>,
    pub deployment_active_from: DateTime<Utc>,
    pub user_mutation: DateTime<Utc>,
    pub job_created: DateTime<Utc>,
}

impl ActivitySignals {
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.registration_created
            .max(self.deployment_active_from)
            .max(self.user_mutation)
            .max(self.job_created)
    }
}

/// Whether `last_activity` lies further back than `threshold` from `now`,
/// compared at whole-second resolution.
pub fn exceeds_threshold(
    last_activity: DateTime<Utc>,
    threshold: TimeDelta,
    now: DateTime<Utc>,
) -> bool {
    match now.checked_sub_signed(threshold) {
        Some(limit) => last_activity.timestamp() < limit.timestamp(),
        None => false,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InactivityPolicy {
    pub threshold: TimeDelta,
    pub action: Action,
    pub now: DateTime<Utc>,
}

impl InactivityPolicy {
    pub fn new(threshold: TimeDelta, action: Action, now: DateTime<Utc>) -> Self {
        Self {
            threshold,
            action,
            now,
        }
    }

    /// A registration younger than the threshold is always active. An older
    /// one without any deployment is always inactive.
    pub fn is_inactive(
        &self,
        registration: &Registration,
        deployments: &[Deployment],
        jobs: &[Job],
        observer: &dyn Observer,
    ) -> Result<bool> {
        let app = registration.name.as_str();

        let still_in_grace_period = registration
            .created_at
            .checked_add_signed(self.threshold)
            .is_none_or(|limit| limit > self.now);
        if still_in_grace_period {
            observer.observe(Event::RegistrationTooRecent {
                app: app.to_string(),
                created_at: registration.created_at,
            });
            return Ok(false);
        }

        let Some(deployment) = latest_deployment(deployments) else {
            observer.observe(Event::NoDeployments {
                app: app.to_string(),
            });
            return Ok(true);
        };
        observer.observe(Event::LatestDeployment {
            app: app.to_string(),
            deployment: deployment.name.clone(),
            active_from: deployment.active_from,
        });

        let job_created = match latest_job(jobs) {
            Some(job) => {
                let created_at = job.status_created.unwrap_or(job.created_at);
                observer.observe(Event::LatestJob {
                    app: app.to_string(),
                    job: job.name.clone(),
                    created_at,
                });
                created_at
            }
            None => DateTime::UNIX_EPOCH,
        };

        let user_mutation = last_user_mutation(deployment)?.unwrap_or(DateTime::UNIX_EPOCH);
        observer.observe(Event::UserMutation {
            app: app.to_string(),
            at: user_mutation,
        });

        let signals = ActivitySignals {
            registration_created: registration.created_at,
            deployment_active_from: deployment.active_from,
            user_mutation,
            job_created,
        };
        let last_activity = signals.last_activity();
        let inactive = exceeds_threshold(last_activity, self.threshold, self.now);
        observer.observe(Event::LastActivity {
            app: app.to_string(),
            at: last_activity,
            inactive,
            action: self.action,
        });

        Ok(inactive)
    }
}
