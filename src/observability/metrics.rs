//! Metrics collection.
//!
//! # Metrics
//! - `sc2_broadcasts_total` (counter): broadcast attempts by response status
//! - `sc2_dropped_operations_total` (counter): undecodable operations, `reason`
//!   is `missing` (no discriminant) or `unknown` (unregistered discriminant)
//! - `sc2_token_exchanges_total` (counter): code exchanges by outcome
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the embedding application
//!   installs whichever exporter it wants
//! - Without an installed recorder every call is a no-op

use metrics::counter;

/// Count a broadcast that got an HTTP response with `status`.
pub fn record_broadcast(status: u16) {
    counter!("sc2_broadcasts_total", "status" => status.to_string()).increment(1);
}

/// Count an operation dropped while decoding a transaction.
///
/// Discriminants come from the server, so only the drop reason is a label.
pub fn record_dropped_operation(name: Option<&str>) {
    counter!("sc2_dropped_operations_total", "reason" => drop_reason(name)).increment(1);
}

fn drop_reason(name: Option<&str>) -> &'static str {
    match name {
        None | Some("") => "missing",
        Some(_) => "unknown",
    }
}

pub fn record_token_exchange(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!("sc2_token_exchanges_total", "outcome" => outcome).increment(1);
}
