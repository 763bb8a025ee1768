use tokio::sync::mpsc;

use crate::state::QueryInput;

/// What: Forward a resolver query to the debounce worker.
///
/// Inputs:
/// - `query`: Query produced by an edit, or `None` when the key changed no text
/// - `query_tx`: Channel to the search worker
///
/// Output:
/// - `true` when a query was handed off
///
/// Details:
/// - The id was already assigned by the resolver so the UI can discard stale results.
/// - Cancel markers are forwarded too; the worker drops its pending search on them.
pub fn send_query(query: Option<QueryInput>, query_tx: &mpsc::UnboundedSender<QueryInput>) -> bool {
    let Some(q) = query else {
        return false;
    };
    if q.is_cancel() {
        tracing::debug!(id = q.id, "pending location search cancelled");
    } else {
        tracing::debug!(id = q.id, query = %q.text, "location query queued");
    }
    query_tx.send(q).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LocationResolver;

    #[tokio::test]
    /// What: Ensure `send_query` forwards the resolver's query with its generation id.
    ///
    /// Inputs:
    /// - Resolver fed `"Hel"`, then a blank edit
    ///
    /// Output:
    /// - The channel receives a query matching `latest_query_id`; the blank edit sends a cancel
    async fn send_query_forwards_latest_generation() {
        let mut resolver = LocationResolver::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        assert!(send_query(resolver.on_input("Hel".into()), &tx));
        let q = tokio::time::timeout(std::time::Duration::from_millis(50), rx.recv())
            .await
            .ok()
            .flatten()
            .expect("query sent");
        assert_eq!(q.id, resolver.latest_query_id());
        assert_eq!(q.text, "Hel");

        assert!(send_query(resolver.on_input(String::new()), &tx));
        let cancel = rx.try_recv().expect("cancel sent");
        assert!(cancel.is_cancel());
        assert_eq!(cancel.id, resolver.latest_query_id());
        assert!(!send_query(None, &tx));
    }
}
