use std::sync::Arc;

use tokio::{
    select,
    sync::mpsc,
    time::{Duration, sleep},
};

use crate::net::{ChartApi, SearchRequest};
use crate::state::{QueryInput, SearchOutcome};

/// What: Spawn background worker for location queries.
///
/// Inputs:
/// - `query_rx`: Channel receiver for location queries
/// - `search_tx`: Channel sender for tagged search answers
/// - `api`: Service client
/// - `limit`: Suggestions requested per search
/// - `debounce`: Quiet period a query must survive before it is sent
///
/// Details:
/// - Coalesces bursts: only the newest query of a burst reaches the service
/// - A burst ending in a cancel marker sends nothing
/// - Each request runs in its own task so a slow answer never delays the next debounce
/// - Answers carry the query id; the handler drops superseded ones
pub fn spawn_search_worker(
    mut query_rx: mpsc::UnboundedReceiver<QueryInput>,
    search_tx: mpsc::UnboundedSender<SearchOutcome>,
    api: Arc<dyn ChartApi>,
    limit: u32,
    debounce: Duration,
) {
    tokio::spawn(async move {
        loop {
            let Some(mut latest) = query_rx.recv().await else {
                break;
            };
            loop {
                select! { Some(new_q) = query_rx.recv() => { latest = new_q; } () = sleep(debounce) => { break; } }
            }
            if latest.is_cancel() {
                tracing::debug!(id = latest.id, "pending location search dropped");
                continue;
            }
            tracing::debug!(id = latest.id, query = %latest.text, "location search dispatched");
            let tx = search_tx.clone();
            let api = api.clone();
            tokio::spawn(async move {
                let req = SearchRequest {
                    query: latest.text,
                    limit,
                };
                let result = api.search(&req).await;
                let _ = tx.send(SearchOutcome {
                    id: latest.id,
                    result,
                });
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::SEARCH_PATH;
    use crate::net::fake::{Scripted, ScriptedApi, helsinki, place};

    #[tokio::test]
    /// What: A burst of keystrokes produces exactly one request for the newest text.
    ///
    /// Inputs:
    /// - Three queries sent back to back within the debounce window
    ///
    /// Output:
    /// - One search call; the single answer carries the last id
    async fn burst_is_coalesced_to_newest_query() {
        let mut api = ScriptedApi::default();
        api.search
            .insert("Hels".into(), Scripted::now(Ok(vec![helsinki()])));
        let api = Arc::new(api);
        let (qtx, qrx) = mpsc::unbounded_channel();
        let (rtx, mut rrx) = mpsc::unbounded_channel();
        spawn_search_worker(qrx, rtx, api.clone(), 8, Duration::from_millis(40));

        for (id, text) in [(1, "H"), (2, "Hel"), (3, "Hels")] {
            qtx.send(QueryInput {
                id,
                text: text.into(),
            })
            .expect("worker alive");
        }
        let out = tokio::time::timeout(Duration::from_secs(2), rrx.recv())
            .await
            .ok()
            .flatten()
            .expect("answer");
        assert_eq!(out.id, 3);
        assert_eq!(out.result.expect("ok")[0].city, "Helsinki");
        sleep(Duration::from_millis(80)).await;
        assert!(rrx.try_recv().is_err());
        assert_eq!(api.count(SEARCH_PATH), 1);
    }

    #[tokio::test]
    /// What: Clearing the field inside the debounce window withdraws the pending search.
    ///
    /// Inputs:
    /// - Query `"H"` followed by a cancel marker before the window closes
    ///
    /// Output:
    /// - No search call and no answer once the window has long passed
    async fn cancel_drops_pending_query() {
        let api = Arc::new(ScriptedApi::default());
        let (qtx, qrx) = mpsc::unbounded_channel();
        let (rtx, mut rrx) = mpsc::unbounded_channel();
        spawn_search_worker(qrx, rtx, api.clone(), 8, Duration::from_millis(40));

        qtx.send(QueryInput {
            id: 1,
            text: "H".into(),
        })
        .expect("worker alive");
        qtx.send(QueryInput::cancel(2)).expect("worker alive");
        sleep(Duration::from_millis(150)).await;
        assert!(rrx.try_recv().is_err());
        assert_eq!(api.count(SEARCH_PATH), 0);

        qtx.send(QueryInput {
            id: 3,
            text: "Hels".into(),
        })
        .expect("worker alive");
        let out = tokio::time::timeout(Duration::from_secs(2), rrx.recv())
            .await
            .ok()
            .flatten()
            .expect("answer after cancel");
        assert_eq!(out.id, 3);
        assert_eq!(api.count(SEARCH_PATH), 1);
    }

    #[tokio::test]
    /// What: Answers of separate bursts may arrive out of order; both carry their own id.
    ///
    /// Inputs:
    /// - A slow answer for query 1 and a fast answer for query 2 sent after the window
    ///
    /// Output:
    /// - Query 2 answers first; query 1 still arrives tagged with id 1
    async fn slow_answers_keep_their_id() {
        let mut api = ScriptedApi::default();
        api.search
            .insert("Hel".into(), Scripted::after(200, Ok(vec![place("Helena", "USA")])));
        api.search
            .insert("Hels".into(), Scripted::now(Ok(vec![helsinki()])));
        let (qtx, qrx) = mpsc::unbounded_channel();
        let (rtx, mut rrx) = mpsc::unbounded_channel();
        spawn_search_worker(qrx, rtx, Arc::new(api), 8, Duration::from_millis(20));

        qtx.send(QueryInput {
            id: 1,
            text: "Hel".into(),
        })
        .expect("worker alive");
        sleep(Duration::from_millis(60)).await;
        qtx.send(QueryInput {
            id: 2,
            text: "Hels".into(),
        })
        .expect("worker alive");

        let first = tokio::time::timeout(Duration::from_secs(2), rrx.recv())
            .await
            .ok()
            .flatten()
            .expect("first answer");
        let second = tokio::time::timeout(Duration::from_secs(2), rrx.recv())
            .await
            .ok()
            .flatten()
            .expect("second answer");
        assert_eq!(first.id, 2);
        assert_eq!(second.id, 1);
    }
}
