use crate::error::Result;
use crate::events::Event;
use crate::scanner::{find_inactive_registrations, list_deployments_in_namespaces};
use crate::{Action, EngineContext};
use reclaim_cluster::namespace::runtime_namespaces;
use reclaim_cluster::{Deployment, Registration};
use tracing::info;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActionSummary {
    pub candidates: usize,
    pub registrations_deleted: usize,
    pub deployments_stopped: usize,
}

impl ActionSummary {
    pub fn merge(self, other: ActionSummary) -> ActionSummary {
        ActionSummary {
            candidates: self.candidates + other.candidates,
            registrations_deleted: self.registrations_deleted + other.registrations_deleted,
            deployments_stopped: self.deployments_stopped + other.deployments_stopped,
        }
    }
}

pub async fn list_candidates(ctx: &EngineContext, action: Action) -> Result<Vec<Registration>> {
    find_inactive_registrations(ctx, action.threshold(&ctx.thresholds), action).await
}

/// Deletes every registration inactive past the deletion threshold. Stops at
/// the first failed deletion.
pub async fn delete_inactive(ctx: &EngineContext) -> Result<ActionSummary> {
    let candidates = list_candidates(ctx, Action::Deletion).await?;
    let mut summary = ActionSummary {
        candidates: candidates.len(),
        ..Default::default()
    };

    for registration in &candidates {
        delete_registration(ctx, registration).await?;
        summary.registrations_deleted += 1;
    }

    if ctx.dry_run {
        info!(
            "Would delete {} of {} inactive registration(s) (dry run)",
            summary.registrations_deleted, summary.candidates
        );
    } else {
        info!(
            "Deleted {} of {} inactive registration(s)",
            summary.registrations_deleted, summary.candidates
        );
    }
    Ok(summary)
}

async fn delete_registration(ctx: &EngineContext, registration: &Registration) -> Result<()> {
    if !ctx.dry_run {
        ctx.client.delete_registration(&registration.name).await?;
    }
    ctx.observer.observe(Event::RegistrationDeleted {
        app: registration.name.clone(),
        dry_run: ctx.dry_run,
    });
    Ok(())
}

pub async fn stop_inactive(ctx: &EngineContext) -> Result<ActionSummary> {
    let candidates = list_candidates(ctx, Action::Stop).await?;
    let mut summary = ActionSummary {
        candidates: candidates.len(),
        ..Default::default()
    };

    for registration in &candidates {
        summary.deployments_stopped += stop_registration(ctx, registration).await?;
    }

    if ctx.dry_run {
        info!(
            "Would stop {} deployment(s) across {} inactive registration(s) (dry run)",
            summary.deployments_stopped, summary.candidates
        );
    } else {
        info!(
            "Stopped {} deployment(s) across {} inactive registration(s)",
            summary.deployments_stopped, summary.candidates
        );
    }
    Ok(summary)
}

pub async fn stop_registration(ctx: &EngineContext, registration: &Registration) -> Result<usize> {
    let client = ctx.client.as_ref();

    let definition = client
        .get_application_definition(&registration.name)
        .await?;
    let namespaces = runtime_namespaces(&definition);
    let deployments = list_deployments_in_namespaces(client, &namespaces).await?;

    let mut stopped = 0;
    for deployment in deployments.iter().filter(|d| d.is_active()) {
        let scaled = scale_to_zero(deployment);
        if !ctx.dry_run {
            client.update_deployment(&scaled).await?;
        }
        ctx.observer.observe(Event::DeploymentStopped {
            app: registration.name.clone(),
            namespace: scaled.namespace.clone(),
            deployment: scaled.name.clone(),
            components: scaled.components.iter().map(|c| c.name.clone()).collect(),
            dry_run: ctx.dry_run,
        });
        stopped += 1;
    }

    Ok(stopped)
}

pub fn scale_to_zero(deployment: &Deployment) -> Deployment {
    let mut scaled = deployment.clone();
    for component in &mut scaled.components {
        component.replicas_override = Some(0);
    }
    scaled
}

/// Stops, then deletes. The deletion scan runs after every stop has been
/// written.
pub async fn stop_and_delete_inactive(ctx: &EngineContext) -> Result<ActionSummary> {
    let stopped = stop_inactive(ctx).await?;
    let deleted = delete_inactive(ctx).await?;
    Ok(stopped.merge(deleted))
}
