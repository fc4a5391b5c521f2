/// A single causal-context pair: a replica id and its write counter.
///
/// A `Dot` is a [`DvvSet`](crate::DvvSet) entry stripped of its values. A
/// list of dots is what a read hands back to the client (via
/// [`join`](crate::DvvSet::join)) and what the client carries into its next
/// write (via [`with_context`](crate::DvvSet::with_context)). It is the only
/// part of the causal history that ever crosses the wire back to a client.
///
/// # Example
///
/// ```
/// use dvv_kit::prelude::*;
///
/// let mut clock = DvvSet::new("v1");
/// clock.update("n1");
///
/// let context = clock.join();
/// assert_eq!(context, vec![Dot { id: "n1", counter: 1 }]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dot<I> {
    /// The replica that issued the writes.
    pub id: I,
    /// Number of writes this replica has issued for the key.
    pub counter: u64,
}

impl<I> Dot<I> {
    /// Create a dot from a replica id and counter.
    pub fn new(id: I, counter: u64) -> Self {
        Self { id, counter }
    }
}
