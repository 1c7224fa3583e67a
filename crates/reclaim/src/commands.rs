use reclaim_engine::{
    Action, ActionSummary, EngineContext, delete_inactive, list_candidates,
    stop_and_delete_inactive, stop_inactive,
};
use std::fmt;
use std::io::Write;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListForDeletion,
    ListForStop,
    ListForStopAndDeletion,
    Delete,
    Stop,
    StopAndDelete,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListForDeletion => "list-for-deletion",
            Operation::ListForStop => "list-for-stop",
            Operation::ListForStopAndDeletion => "list-for-stop-and-deletion",
            Operation::Delete => "delete",
            Operation::Stop => "stop",
            Operation::StopAndDelete => "stop-and-delete",
        }
    }

    fn listed_actions(&self) -> &'static [Action] {
        match self {
            Operation::ListForDeletion => &[Action::Deletion],
            Operation::ListForStop => &[Action::Stop],
            Operation::ListForStopAndDeletion => &[Action::Stop, Action::Deletion],
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Candidates(Vec<String>),
    Summary { summary: ActionSummary, dry_run: bool },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Candidates(names) => {
                for name in names {
                    writeln!(f, "{}", name)?;
                }
                Ok(())
            }
            Report::Summary {
                summary,
                dry_run: false,
            } => writeln!(
                f,
                "candidates: {}, deployments stopped: {}, registrations deleted: {}",
                summary.candidates, summary.deployments_stopped, summary.registrations_deleted
            ),
            Report::Summary {
                summary,
                dry_run: true,
            } => writeln!(
                f,
                "candidates: {}, deployments that would be stopped: {}, registrations that would be deleted: {} (dry run)",
                summary.candidates, summary.deployments_stopped, summary.registrations_deleted
            ),
        }
    }
}

/// Runs `operation` and writes its report to `out`. Each candidate list is
/// written as soon as its scan completes.
pub async fn execute<W: Write>(
    operation: Operation,
    ctx: &EngineContext,
    out: &mut W,
) -> anyhow::Result<()> {
    info!("Running {}", operation.name());

    let summary = match operation {
        Operation::Delete => delete_inactive(ctx).await?,
        Operation::Stop => stop_inactive(ctx).await?,
        Operation::StopAndDelete => stop_and_delete_inactive(ctx).await?,
        listing => {
            for action in listing.listed_actions() {
                let candidates = list_candidates(ctx, *action).await?;
                info!("Found {} candidate(s) for {}", candidates.len(), action);
                let names = candidates.into_iter().map(|r| r.name).collect();
                write!(out, "{}", Report::Candidates(names))?;
                out.flush()?;
            }
            return Ok(());
        }
    };

    let report = Report::Summary {
        summary,
        dry_run: ctx.dry_run,
    };
    write!(out, "{}", report)?;
    Ok(())
}
