use crate::activity::InactivityPolicy;
use crate::error::Result;
use crate::events::Event;
use crate::whitelist::is_whitelisted;
use crate::{Action, EngineContext};
use chrono::TimeDelta;
use reclaim_cluster::namespace::{app_namespace, runtime_namespaces};
use reclaim_cluster::{ClusterClient, Deployment, Registration};

pub async fn list_deployments_in_namespaces(
    client: &dyn ClusterClient,
    namespaces: &[String],
) -> Result<Vec<Deployment>> {
    let mut deployments = Vec::new();
    for namespace in namespaces {
        deployments.extend(client.list_deployments(namespace).await?);
    }
    Ok(deployments)
}

/// Registrations without an application definition are skipped. Any other
/// cluster error aborts the scan.
pub async fn find_inactive_registrations(
    ctx: &EngineContext,
    threshold: TimeDelta,
    action: Action,
) -> Result<Vec<Registration>> {
    let client = ctx.client.as_ref();
    let observer = ctx.observer.as_ref();

    let registrations = client.list_registrations().await?;
    let mut candidates = Vec::new();

    for registration in registrations {
        let app = registration.name.clone();

        if is_whitelisted(&app, &ctx.whitelist) {
            observer.observe(Event::Whitelisted { app });
            continue;
        }

        let definition = match client.get_application_definition(&app).await {
            Ok(definition) => definition,
            Err(e) if e.is_not_found() => {
                observer.observe(Event::DefinitionMissing { app });
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let namespaces = runtime_namespaces(&definition);
        let deployments = list_deployments_in_namespaces(client, &namespaces).await?;
        let jobs = client.list_jobs(&app_namespace(&app)).await?;
        observer.observe(Event::ResourcesResolved {
            app: app.clone(),
            namespaces,
            deployments: deployments.len(),
            jobs: jobs.len(),
        });

        let policy = InactivityPolicy::new(threshold, action, ctx.clock.now());
        if policy.is_inactive(&registration, &deployments, &jobs, observer)? {
            observer.observe(Event::Candidate { app, action });
            candidates.push(registration);
        }
    }

    Ok(candidates)
}
