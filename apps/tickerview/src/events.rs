use crate::cache::SeriesCache;
use crate::dashboard::{Dashboard, DashboardError};
use crate::source::DailySource;
use tickerview_chart::ChartSpec;
use tickerview_shared_models::ChartRequest;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{Receiver, Sender};

/// Turns every non-blank input line into a request message. Lines that are
/// not a JSON `ChartRequest` are logged and skipped. Returns when the input
/// ends or the receiving side is gone.
pub async fn read_requests<R>(reader: R, tx: Sender<ChartRequest>) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<ChartRequest>(&line) {
            Ok(request) => {
                if tx.send(request).await.is_err() {
                    break;
                }
            }
            Err(e) => tracing::warn!("Ignoring malformed request {line:?}: {e}"),
        }
    }

    Ok(())
}

/// Runs one render cycle per message, strictly in arrival order, and hands
/// each outcome to `on_outcome`.
pub async fn dispatch<S, C, F>(
    dashboard: &Dashboard<S, C>,
    mut rx: Receiver<ChartRequest>,
    mut on_outcome: F,
) where
    S: DailySource,
    C: SeriesCache,
    F: FnMut(&ChartRequest, Result<ChartSpec, DashboardError>),
{
    while let Some(request) = rx.recv().await {
        tracing::debug!(?request, "render cycle");
        let outcome = dashboard.handle(&request).await;
        on_outcome(&request, outcome);
    }
}
