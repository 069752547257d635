//! One trait per computational role.
//!
//! # Failure Semantics
//!
//! Only [`Applicative`] and [`Publisher`] carry an error channel. The other
//! roles have none, so an implementation that cannot produce a correct answer
//! must escalate (panic with a typed payload) rather than return a wrong one.
//!
//! # Thread Safety
//!
//! Every role must be `Send + Sync`; hosts call the same plugin from many
//! threads at once.

use sl_error::{Cancelled, Result};
use sl_types::{Packet, Record};
use std::cmp::Ordering;
use tokio_util::sync::CancellationToken;

/// Data source polled for batches of records.
pub trait Subscription: Send + Sync {
    /// Produces the next batch.
    ///
    /// Returns [`Cancelled`] if `cancel` fires before the batch is complete;
    /// a partially produced batch is never returned.
    fn read(&self, cancel: &CancellationToken) -> std::result::Result<Vec<Record>, Cancelled>;

    /// Releases any resources held by the source.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Per-record transform.
pub trait Applicative: Send + Sync {
    /// Rewrites `record` in place.
    fn apply(&self, record: &mut Record) -> Result<()>;
}

/// Two-record comparator.
pub trait Comparator: Send + Sync {
    /// Returns negative, zero or positive.
    fn compare(&self, a: &Record, b: &Record) -> i64;

    /// Maps [`compare`](Comparator::compare) onto [`Ordering`] for `sort_by`.
    fn ordering(&self, a: &Record, b: &Record) -> Ordering {
        self.compare(a, b).cmp(&0)
    }
}

/// Two-record reducer.
pub trait Fold: Send + Sync {
    /// Combines the running aggregate with the next record.
    fn fold(&self, aggregate: &Record, next: &Record) -> Record;
}

/// Binary splitter over packets.
pub trait Fork: Send + Sync {
    /// Splits `payload` into a left and right sequence.
    fn fork(&self, payload: Vec<Packet>) -> (Vec<Packet>, Vec<Packet>);
}

/// Split predicate.
pub trait ForkRule: Send + Sync {
    /// Returns true if `record` belongs to the left branch.
    fn evaluate(&self, record: &Record) -> bool;
}

/// Deletion predicate.
pub trait Remover: Send + Sync {
    /// Returns true if the record at `index` should be removed.
    fn remove(&self, index: usize, record: &Record) -> bool;
}

/// Sink for batches of records.
pub trait Publisher: Send + Sync {
    /// Sends a batch.
    fn send(&self, records: &[Record]) -> Result<()>;
}
