//! Expansion of a series' `royalty` object into royalty share records.

use serde_json::Value;

use crate::decoding::fields::whole_number;
use crate::transformations::records::Royalty;

/// One share per `account -> amount` entry, in document order, keyed
/// `<series_id>-<index>`. Entries whose amount is not a JSON integer are
/// skipped but still consume their index.
pub fn expand_royalties(series_id: &str, royalty: &Value) -> Vec<Royalty> {
    let Some(entries) = royalty.as_object() else {
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, (account, value))| {
            let Some(amount) = whole_number(value) else {
                tracing::debug!(
                    series_id,
                    account = %account,
                    "royalty amount is not an integer, share skipped"
                );
                return None;
            };
            Some(Royalty {
                id: format!("{}-{}", series_id, index),
                account: account.clone(),
                amount,
            })
        })
        .collect()
}
