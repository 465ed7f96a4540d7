//! Transfer classification.
//!
//! Given the reporting wallet and one transfer record, decide what the
//! wallet actually did: minted, received, bought, burned, sent, or sold.
//! The rules are not mutually exclusive in general, so they are checked in
//! a fixed priority order and the first match wins.

use crate::api::TransferRecord;

/// The all-zero sentinel: a transfer from here is a mint (no prior owner).
pub const MINT_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// A transfer to either sentinel destroys the token permanently.
pub const BURN_ADDRESSES: [&str; 2] = [
    MINT_ADDRESS,
    "0x000000000000000000000000000000000000dead",
];

/// What a single transfer meant from the wallet's point of view.
///
/// `Unattributed` covers records where the wallet appears on neither side
/// of the transfer. The API shouldn't return those, but when it does we
/// report them as what they are instead of inventing a sale.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Minted,
    Received { from: String },
    Bought { from: String, value: f64 },
    Burned,
    Sent { to: String },
    Sold { to: String, value: f64 },
    Unattributed { from: String, to: String },
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Minted => "Minted",
            Action::Received { .. } => "Received",
            Action::Bought { .. } => "Bought",
            Action::Burned => "Burned",
            Action::Sent { .. } => "Sent",
            Action::Sold { .. } => "Sold",
            Action::Unattributed { .. } => "Unattributed",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Hex addresses arrive with inconsistent checksum casing across APIs.
fn same_address(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Classify one transfer record relative to `wallet`.
///
/// Priority order, first match wins:
/// mint origin, received gratis, bought, burn destination, sent gratis,
/// sold. Anything the wallet touches on neither side is `Unattributed`.
pub fn classify(wallet: &str, record: &TransferRecord) -> Action {
    let from = &record.address_from;
    let to = &record.address_to;
    let value = record.value;

    if same_address(from, MINT_ADDRESS) {
        return Action::Minted;
    }
    if same_address(to, wallet) && value == 0.0 {
        return Action::Received { from: from.clone() };
    }
    if same_address(to, wallet) && value > 0.0 {
        return Action::Bought {
            from: from.clone(),
            value,
        };
    }
    if BURN_ADDRESSES.iter().any(|b| same_address(to, b)) {
        return Action::Burned;
    }
    if same_address(from, wallet) && value == 0.0 {
        return Action::Sent { to: to.clone() };
    }
    if same_address(from, wallet) {
        return Action::Sold {
            to: to.clone(),
            value,
        };
    }

    Action::Unattributed {
        from: from.clone(),
        to: to.clone(),
    }
}
