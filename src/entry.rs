use alloc::vec::Vec;

/// One replica's causal record within a [`DvvSet`](crate::DvvSet).
///
/// Holds the replica id, the total number of writes the replica has issued
/// for this key, and the window of values from those writes that are still
/// live. Values are ordered most-recent-first: with counter `n` and window
/// length `k`, the window covers writes `n, n-1, …, n-k+1`. The window never
/// exceeds the counter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry<I, V> {
    pub(crate) id: I,
    pub(crate) counter: u64,
    pub(crate) values: Vec<V>,
}

impl<I, V> Entry<I, V> {
    /// The replica id this entry records writes for.
    #[must_use]
    pub fn id(&self) -> &I {
        &self.id
    }

    /// Total number of writes this replica has issued for the key.
    #[must_use]
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// The live values for this replica, most recent first.
    #[must_use]
    pub fn values(&self) -> &[V] {
        &self.values
    }
}

impl<I: Clone, V: Clone> Entry<I, V> {
    /// Reconcile two entries for the same replica id.
    ///
    /// The higher counter wins. The winner keeps its whole window when that
    /// window already reaches back to every write the loser could still
    /// hold; otherwise it is truncated to cover exactly the gap between the
    /// two counters plus the loser's window. Truncating prevents values the
    /// loser has already discarded from being resurrected, while never
    /// dropping a value still live on either side.
    ///
    /// Both entries must satisfy `values.len() <= counter`; callers validate
    /// that before reconciling.
    pub(crate) fn reconcile(&self, other: &Self) -> Self {
        let (winner, loser) = if self.counter >= other.counter {
            (self, other)
        } else {
            (other, self)
        };

        let window = winner.values.len() as u64;
        let reach = loser.counter - loser.values.len() as u64;
        let values = if winner.counter - window >= reach {
            winner.values.clone()
        } else {
            // In range: the condition above guarantees this is shorter
            // than the winner's current window.
            let keep = (winner.counter - loser.counter) as usize + loser.values.len();
            winner.values[..keep].to_vec()
        };

        Entry {
            id: winner.id.clone(),
            counter: winner.counter,
            values,
        }
    }
}
