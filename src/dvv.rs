//! Dotted version vector set: the clock and its merge algorithms.
//!
//! A [`DvvSet`] tracks the full causal history of one key together with the
//! values still live at each causal position. Reads hand the client a
//! compact context ([`join`](DvvSet::join)) plus the sibling values
//! ([`values`](DvvSet::values)); writes fold a client clock into the stored
//! clock, discarding values the writer had seen and keeping the ones it had
//! not.
//!
//! # Example
//!
//! ```
//! use dvv_kit::prelude::*;
//!
//! // First write of "v1", coordinated by replica "n1".
//! let mut stored = DvvSet::new("v1");
//! stored.update("n1");
//!
//! // A client read returns the context and the siblings.
//! let context = stored.join();
//! assert_eq!(stored.values(), vec![&"v1"]);
//!
//! // The client writes "v2" carrying that context: "v1" is superseded.
//! let mut write = DvvSet::with_context(&context, "v2").unwrap();
//! write.update_with(&stored, "n1").unwrap();
//! assert_eq!(write.values(), vec![&"v2"]);
//!
//! // A context-free write is concurrent: both values become siblings.
//! let mut blind = DvvSet::new("v3");
//! blind.update_with(&write, "n1").unwrap();
//! assert_eq!(blind.values(), vec![&"v3", &"v2"]);
//! ```

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::dot::Dot;
use crate::entry::Entry;
use crate::error::DvvError;

/// A dotted version vector set for a single key.
///
/// Holds a list of per-replica [`Entry`] records, sorted by ascending
/// replica id with no duplicates, plus a list of *anonymous* values: values
/// written by a client but not yet attributed ("dotted") to a replica.
/// Clocks built by [`new`](Self::new) or [`with_context`](Self::with_context)
/// carry exactly one anonymous value; a merge of concurrent clocks can carry
/// several.
///
/// The id type needs a total order; the value type only needs equality, for
/// de-duplicating concurrent anonymous values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DvvSet<I, V> {
    entries: Vec<Entry<I, V>>,
    values: Vec<V>,
}

impl<I: Ord + Clone, V: Clone + PartialEq> DvvSet<I, V> {
    /// Create a clock holding one anonymous value and no causal history.
    ///
    /// This is the clock a client builds for its first write of a key.
    pub fn new(value: V) -> Self {
        let mut values = Vec::with_capacity(1);
        values.push(value);
        Self {
            entries: Vec::new(),
            values,
        }
    }

    /// Create a clock holding one anonymous value, seeded with the causal
    /// history of a previously read context.
    ///
    /// `context` should be the output of a prior [`join`](Self::join). Each
    /// dot becomes an entry with an empty value window. The context must be
    /// strictly ascending by id; an out-of-order or duplicated id yields
    /// [`DvvError::InvalidContext`] rather than a clock that would break the
    /// sort invariant downstream.
    pub fn with_context(context: &[Dot<I>], value: V) -> Result<Self, DvvError> {
        for (index, pair) in context.windows(2).enumerate() {
            if pair[0].id >= pair[1].id {
                return Err(DvvError::InvalidContext { index: index + 1 });
            }
        }

        let mut values = Vec::with_capacity(1);
        values.push(value);
        Ok(Self {
            entries: context
                .iter()
                .map(|dot| Entry {
                    id: dot.id.clone(),
                    counter: dot.counter,
                    values: Vec::new(),
                })
                .collect(),
            values,
        })
    }

    /// The causal context of this clock: every entry's id and counter,
    /// stripped of values, in ascending-id order.
    ///
    /// This is what a read hands back to the client alongside
    /// [`values`](Self::values).
    #[must_use]
    pub fn join(&self) -> Vec<Dot<I>> {
        self.entries
            .iter()
            .map(|entry| Dot {
                id: entry.id.clone(),
                counter: entry.counter,
            })
            .collect()
    }

    /// All live values: anonymous values first (in stored order), then each
    /// entry's window in ascending-id order, most recent first within an
    /// entry.
    ///
    /// More than one value means the key has concurrent siblings the caller
    /// must reconcile.
    #[must_use]
    pub fn values(&self) -> Vec<&V> {
        self.values
            .iter()
            .chain(self.entries.iter().flat_map(|entry| entry.values.iter()))
            .collect()
    }

    /// Dot the pending anonymous value into the entries under `id`.
    ///
    /// Used when a write has nothing to synchronize against (a first write).
    /// The anonymous list is cleared. A clock without a pending value (not
    /// produced by [`new`](Self::new)/[`with_context`](Self::with_context))
    /// leaves the entries untouched.
    pub fn update(&mut self, id: I) {
        if self.values.is_empty() {
            return;
        }
        let value = self.values.remove(0);
        self.values.clear();
        event(&mut self.entries, id, value);
    }

    /// Synchronize with the server's stored clock, then dot the pending
    /// anonymous value under `id`.
    ///
    /// This is the standard server-side write path: `self` is the client
    /// clock (context plus one pending value), `server` is the clock stored
    /// for the key. The result is causally newer than both. The client's
    /// pending value is excluded from the sync, so values it supersedes are
    /// dropped while `server`'s surviving anonymous values are retained.
    ///
    /// Fails without modifying `self` if either clock violates the
    /// window/counter invariant.
    pub fn update_with(&mut self, server: &Self, id: I) -> Result<(), DvvError> {
        check_windows(&self.entries)?;
        check_windows(&server.entries)?;

        let history = Self {
            entries: core::mem::take(&mut self.entries),
            values: Vec::new(),
        };
        let synced = history.merge_unchecked(server);
        let pending = core::mem::replace(&mut self.values, synced.values);
        self.entries = synced.entries;

        if let Some(value) = pending.into_iter().next() {
            event(&mut self.entries, id, value);
        }
        Ok(())
    }

    /// Merge two clocks pairwise.
    ///
    /// The causally dominated side's anonymous values are discarded; if
    /// neither side dominates, the union is kept, de-duplicated by equality
    /// preserving first-seen order. Entries are merged id-wise: ids known to
    /// one side pass through, ids known to both are reconciled per entry.
    pub fn merge(&self, other: &Self) -> Result<Self, DvvError> {
        check_windows(&self.entries)?;
        check_windows(&other.entries)?;
        Ok(self.merge_unchecked(other))
    }

    /// Merge any number of clocks, discarding causally outdated values.
    ///
    /// Folds [`merge`](Self::merge) over the list starting from the empty
    /// clock. The result is independent of input order and grouping, which
    /// is what makes it safe for replicas that sync in different orders.
    pub fn sync(clocks: &[Self]) -> Result<Self, DvvError> {
        for clock in clocks {
            check_windows(&clock.entries)?;
        }
        let mut acc = Self {
            entries: Vec::new(),
            values: Vec::new(),
        };
        for clock in clocks {
            acc = clock.merge_unchecked(&acc);
        }
        Ok(acc)
    }

    /// Returns `true` if `self` is causally older than `other`, i.e. every
    /// value in `self` is outdated by `other`.
    ///
    /// Equal and concurrent clocks compare `false` in both directions; only
    /// a strict ancestor is `less` than its descendant.
    #[must_use]
    pub fn less(&self, other: &Self) -> bool {
        dominates(&other.entries, &self.entries, false)
    }

    /// The per-replica causal records, in ascending-id order.
    #[must_use]
    pub fn entries(&self) -> &[Entry<I, V>] {
        &self.entries
    }

    /// The replica ids this clock has history for, in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &I> {
        self.entries.iter().map(|entry| &entry.id)
    }

    /// Total number of live values, anonymous and dotted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() + self.entries.iter().map(|e| e.values.len()).sum::<usize>()
    }

    /// Returns `true` if the clock holds no live values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the clock holds more than one live value, meaning
    /// the key has concurrent siblings awaiting reconciliation.
    #[must_use]
    pub fn is_conflicted(&self) -> bool {
        self.len() > 1
    }

    /// Check the structural invariants on a clock received from an external
    /// serialization layer: entries strictly ascending by id, and every
    /// value window no longer than its counter.
    pub fn validate(&self) -> Result<(), DvvError> {
        for (index, pair) in self.entries.windows(2).enumerate() {
            if pair[0].id >= pair[1].id {
                return Err(DvvError::InvalidContext { index: index + 1 });
            }
        }
        check_windows(&self.entries)
    }

    fn merge_unchecked(&self, other: &Self) -> Self {
        let values = if self.less(other) {
            other.values.clone()
        } else if other.less(self) {
            self.values.clone()
        } else {
            unique(self.values.iter().chain(other.values.iter()))
        };

        Self {
            entries: sync_entries(&self.entries, &other.entries),
            values,
        }
    }
}

/// Insert a value under `id`, preserving the ascending-id sort.
///
/// A known id gets its counter bumped and the value prepended to its window;
/// an unknown id gets a fresh entry with counter 1.
fn event<I: Ord + Clone, V>(entries: &mut Vec<Entry<I, V>>, id: I, value: V) {
    match entries.binary_search_by(|entry| entry.id.cmp(&id)) {
        Ok(found) => {
            entries[found].counter += 1;
            entries[found].values.insert(0, value);
        }
        Err(slot) => {
            let mut values = Vec::with_capacity(1);
            values.push(value);
            entries.insert(
                slot,
                Entry {
                    id,
                    counter: 1,
                    values,
                },
            );
        }
    }
}

/// Does entry list `a` causally dominate `b`?
///
/// Lockstep walk over the two sorted lists. `strict` starts false and flips
/// to true once `a` provably knows a write `b` does not (a higher counter,
/// or an id `b` lacks); it is the final answer when both lists run out
/// together. Any id or counter `b` has over `a` refutes dominance outright.
fn dominates<I: Ord, V>(a: &[Entry<I, V>], b: &[Entry<I, V>], mut strict: bool) -> bool {
    let (mut i, mut j) = (0, 0);
    loop {
        match (a.get(i), b.get(j)) {
            (None, None) => return strict,
            (Some(_), None) => return true,
            (None, Some(_)) => return false,
            (Some(x), Some(y)) => match x.id.cmp(&y.id) {
                Ordering::Equal => {
                    match x.counter.cmp(&y.counter) {
                        Ordering::Less => return false,
                        Ordering::Greater => strict = true,
                        Ordering::Equal => {}
                    }
                    i += 1;
                    j += 1;
                }
                Ordering::Less => {
                    strict = true;
                    i += 1;
                }
                Ordering::Greater => return false,
            },
        }
    }
}

/// Id-wise merge of two sorted entry lists.
///
/// An id present on one side only passes through unchanged; an id present on
/// both is reconciled per entry. The result stays sorted with unique ids.
fn sync_entries<I: Ord + Clone, V: Clone>(
    a: &[Entry<I, V>],
    b: &[Entry<I, V>],
) -> Vec<Entry<I, V>> {
    let mut merged = Vec::with_capacity(a.len().max(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].id.cmp(&b[j].id) {
            Ordering::Less => {
                merged.push(a[i].clone());
                i += 1;
            }
            Ordering::Greater => {
                merged.push(b[j].clone());
                j += 1;
            }
            Ordering::Equal => {
                merged.push(a[i].reconcile(&b[j]));
                i += 1;
                j += 1;
            }
        }
    }
    merged.extend(a[i..].iter().cloned());
    merged.extend(b[j..].iter().cloned());
    merged
}

/// De-duplicate by equality, keeping first-seen order.
fn unique<'a, V: Clone + PartialEq + 'a>(values: impl Iterator<Item = &'a V>) -> Vec<V> {
    let mut out: Vec<V> = Vec::new();
    for value in values {
        if !out.contains(value) {
            out.push(value.clone());
        }
    }
    out
}

fn check_windows<I, V>(entries: &[Entry<I, V>]) -> Result<(), DvvError> {
    for entry in entries {
        if entry.values.len() as u64 > entry.counter {
            return Err(DvvError::InvariantViolation {
                counter: entry.counter,
                window: entry.values.len(),
            });
        }
    }
    Ok(())
}
