//! Mail source abstraction and the per-run analysis loop

use crate::error::Result;
use crate::features::extract_features_with;
use crate::sentiment::TextScorer;
use crate::types::ResultSet;
use tracing::{info, warn};

/// Where raw messages come from
pub trait MailSource {
    /// Ids of the most recent inbox messages, newest first
    fn list_recent_message_ids(&self, limit: u32) -> Result<Vec<String>>;

    /// Full raw RFC 2822 text of one message
    fn fetch_raw_message(&self, id: &str) -> Result<String>;
}

/// Fetch and analyze the first `limit` inbox messages.
///
/// Failing to list messages fails the run. A message that cannot be
/// fetched is logged and skipped.
pub fn analyze_messages(
    source: &dyn MailSource,
    scorer: &dyn TextScorer,
    limit: u32,
) -> Result<ResultSet> {
    let ids = source.list_recent_message_ids(limit)?;
    let mut results = ResultSet::default();

    for id in &ids {
        let raw = match source.fetch_raw_message(id) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(message_id = %id, "Error fetching email, skipping: {e}");
                continue;
            }
        };

        let table = extract_features_with(&raw, scorer)
            .to_metric_table()
            .with_message_id(id.as_str());
        results.tables.push(table);
    }

    info!(
        listed = ids.len(),
        analyzed = results.len(),
        "Finished analyzing inbox"
    );
    Ok(results)
}
