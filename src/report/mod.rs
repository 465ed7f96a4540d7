//! Console report rendering.
//!
//! Builds the final human-readable report: wallet banner, per-collection
//! balances, then the per-collection activity log. Line builders are pure
//! functions over the fold output; printing is a thin wrapper so the exact
//! formatting rules stay testable.

use crate::activity::Action;
use crate::portfolio::{ActivityEntry, CollectionActivity, CollectionBalance};
use chrono::{DateTime, Local, Utc};

/// Shorten an address for display: first 5 characters, `..`, then the tail
/// from index 38. Assumes the standard 42-character hex-prefixed form; a
/// shorter input just yields a shorter display.
pub fn format_address(address: &str) -> String {
    let head = &address[..address.len().min(5)];
    let tail = if address.len() > 38 {
        &address[38..]
    } else {
        ""
    };
    format!("{}..{}", head, tail)
}

/// Display a transfer timestamp as `YYYY-MM-DD HH:MM` in local time.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn balance_line(balance: &CollectionBalance) -> String {
    format!("\t{}: {}", balance.balance, balance.name)
}

/// One activity log line: date, action, token count, then the optional
/// price and counterparty suffixes in that order.
pub fn activity_line(entry: &ActivityEntry) -> String {
    let mut line = format!(
        "\t\t{} -> {} {}",
        format_date(&entry.date),
        entry.action.label(),
        entry.amount
    );

    let (value, from, to) = match &entry.action {
        Action::Minted | Action::Burned => (None, None, None),
        Action::Received { from } => (None, Some(from), None),
        Action::Bought { from, value } => (Some(*value), Some(from), None),
        Action::Sent { to } => (None, None, Some(to)),
        Action::Sold { to, value } => (Some(*value), None, Some(to)),
        Action::Unattributed { from, to } => (None, Some(from), Some(to)),
    };

    if let Some(value) = value {
        if value != 0.0 {
            line.push_str(&format!(" for {} ETH", value));
        }
    }
    if let Some(from) = from {
        line.push_str(&format!(" from {}", format_address(from)));
    }
    if let Some(to) = to {
        line.push_str(&format!(" to {}", format_address(to)));
    }

    line
}

/// Render the whole report. An empty balances or activity slice renders as
/// an empty section, which is also what a failed fetch degrades to.
pub fn render_report(
    wallet: &str,
    balances: &[CollectionBalance],
    activity: &[CollectionActivity],
) -> String {
    let mut out = String::new();

    out.push_str("\n=== WALLET ===\n\n");
    out.push_str(&format!("\t{}\n", wallet));

    out.push_str("\n\n=== NFT BLOCKFOLIO ===\n\n");
    for balance in balances {
        out.push_str(&balance_line(balance));
        out.push('\n');
    }

    out.push_str("\n\n=== NFT ACTIVITY ===\n");
    for group in activity {
        out.push_str(&format!("\n\t{}\n", group.key.name));
        for entry in &group.entries {
            out.push_str(&activity_line(entry));
            out.push('\n');
        }
    }

    out
}

pub fn print_report(
    wallet: &str,
    balances: &[CollectionBalance],
    activity: &[CollectionActivity],
) {
    print!("{}", render_report(wallet, balances, activity));
}
