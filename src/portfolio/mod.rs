//! Per-collection aggregation.
//!
//! Two single-pass folds over the raw API records: one turns the holdings
//! list into per-collection balance counts, the other turns the transaction
//! list into a per-collection activity log via the classifier. Both keep
//! first-seen collection order, and the activity log keeps input order
//! within each collection (the API returns transfers chronologically).

use crate::activity::{classify, Action};
use crate::api::{NftHolding, TransferRecord};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::warn;

/// Composite grouping key for activity: two collections can share a name,
/// so the contract address stays part of the key until rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionKey {
    pub address: String,
    pub name: String,
}

/// How many holding records the wallet has in one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionBalance {
    pub name: String,
    pub balance: u64,
}

/// One classified transfer, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub date: DateTime<Utc>,
    /// Number of tokens moved in this transfer.
    pub amount: usize,
    pub action: Action,
}

/// The activity log for one collection, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionActivity {
    pub key: CollectionKey,
    pub entries: Vec<ActivityEntry>,
}

/// Fold the holdings list into per-collection balances.
///
/// Counts holding records, not token ids. Records for the same address are
/// expected to agree on the collection name; the last one seen wins.
pub fn balances_by_collection(holdings: &[NftHolding]) -> Vec<CollectionBalance> {
    let mut balances: Vec<CollectionBalance> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for holding in holdings {
        match index.get(&holding.collection_address).copied() {
            Some(i) => {
                balances[i].name = holding.collection_name.clone();
                balances[i].balance += 1;
            }
            None => {
                index.insert(holding.collection_address.clone(), balances.len());
                balances.push(CollectionBalance {
                    name: holding.collection_name.clone(),
                    balance: 1,
                });
            }
        }
    }

    balances
}

/// Fold the transaction list into per-collection activity logs.
pub fn activity_by_collection(
    wallet: &str,
    transfers: &[TransferRecord],
) -> Vec<CollectionActivity> {
    let mut groups: Vec<CollectionActivity> = Vec::new();
    let mut index: HashMap<CollectionKey, usize> = HashMap::new();

    for record in transfers {
        let action = classify(wallet, record);
        if let Action::Unattributed { from, to } = &action {
            warn!(
                collection = %record.collection_name,
                from = %from,
                to = %to,
                "transfer touches neither side of the wallet"
            );
        }

        let entry = ActivityEntry {
            date: record.date,
            amount: record.token_ids.len(),
            action,
        };

        let key = CollectionKey {
            address: record.collection_address.clone(),
            name: record.collection_name.clone(),
        };

        match index.get(&key).copied() {
            Some(i) => groups[i].entries.push(entry),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(CollectionActivity {
                    key,
                    entries: vec![entry],
                });
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const WALLET: &str = "0x1111111111111111111111111111111111111111";
    const OTHER: &str = "0x2222222222222222222222222222222222222222";

    fn holding(address: &str, name: &str) -> NftHolding {
        NftHolding {
            collection_address: address.to_string(),
            collection_name: name.to_string(),
            token_ids: vec!["1".to_string(), "2".to_string()],
        }
    }

    fn transfer(address: &str, name: &str, from: &str, to: &str, value: f64) -> TransferRecord {
        TransferRecord {
            collection_address: address.to_string(),
            collection_name: name.to_string(),
            date: Utc.with_ymd_and_hms(2023, 5, 1, 9, 5, 0).unwrap(),
            token_ids: vec!["7".to_string()],
            address_from: from.to_string(),
            address_to: to.to_string(),
            value,
        }
    }

    #[test]
    fn test_balance_counts_records_not_tokens() {
        // Each holding carries two token ids but counts once
        let holdings = vec![holding("0xa", "Foo"), holding("0xa", "Foo")];
        let balances = balances_by_collection(&holdings);
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].balance, 2);
    }

    #[test]
    fn test_balance_groups_sum_to_input_length() {
        let holdings = vec![
            holding("0xa", "Foo"),
            holding("0xb", "Bar"),
            holding("0xa", "Foo"),
            holding("0xc", "Baz"),
            holding("0xb", "Bar"),
        ];
        let balances = balances_by_collection(&holdings);
        assert_eq!(balances.len(), 3);
        let total: u64 = balances.iter().map(|b| b.balance).sum();
        assert_eq!(total, holdings.len() as u64);
    }

    #[test]
    fn test_balance_keeps_first_seen_order_and_last_seen_name() {
        let holdings = vec![
            holding("0xa", "Foo"),
            holding("0xb", "Bar"),
            holding("0xa", "Foo (renamed)"),
        ];
        let balances = balances_by_collection(&holdings);
        assert_eq!(balances[0].name, "Foo (renamed)");
        assert_eq!(balances[0].balance, 2);
        assert_eq!(balances[1].name, "Bar");
    }

    #[test]
    fn test_activity_groups_preserve_order() {
        let transfers = vec![
            transfer("0xa", "Foo", OTHER, WALLET, 0.0),
            transfer("0xb", "Bar", OTHER, WALLET, 1.0),
            transfer("0xa", "Foo", WALLET, OTHER, 2.0),
        ];
        let groups = activity_by_collection(WALLET, &transfers);

        // First-seen order across groups
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key.name, "Foo");
        assert_eq!(groups[1].key.name, "Bar");

        // Input order within a group
        assert_eq!(groups[0].entries.len(), 2);
        assert_eq!(
            groups[0].entries[0].action,
            Action::Received {
                from: OTHER.to_string()
            }
        );
        assert_eq!(
            groups[0].entries[1].action,
            Action::Sold {
                to: OTHER.to_string(),
                value: 2.0
            }
        );
    }

    #[test]
    fn test_same_name_different_address_stays_split() {
        let transfers = vec![
            transfer("0xa", "Foo", OTHER, WALLET, 0.0),
            transfer("0xb", "Foo", OTHER, WALLET, 0.0),
        ];
        let groups = activity_by_collection(WALLET, &transfers);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_entry_amount_is_token_count() {
        let mut record = transfer("0xa", "Foo", OTHER, WALLET, 0.0);
        record.token_ids = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        let groups = activity_by_collection(WALLET, &[record]);
        assert_eq!(groups[0].entries[0].amount, 3);
    }

    #[test]
    fn test_empty_inputs_produce_empty_folds() {
        assert!(balances_by_collection(&[]).is_empty());
        assert!(activity_by_collection(WALLET, &[]).is_empty());
    }
}
