//! # dvv-kit
//!
//! Dotted version vectors with sibling tracking for distributed key-value
//! stores.
//!
//! A [`DvvSet`] tracks the causal history of a single key so a storage node
//! can tell whether one version of a value supersedes another, and can merge
//! concurrently written ("sibling") values without silently discarding data.
//! A client reads a key and receives a compact causal context plus the
//! current siblings; it writes a new value tagged with that context; the
//! node folds the write into the stored clock, dropping every value the
//! writer had already seen and keeping the ones it had not.
//!
//! Transport, persistence, and sibling reconciliation policy are the
//! caller's business: this crate is the causality algorithm only.
//!
//! ## `no_std` Support
//!
//! This crate supports `no_std` environments with the `alloc` crate.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dvv-kit = { version = "0.1", default-features = false }
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use dvv_kit::prelude::*;
//!
//! // First write of a key, coordinated by replica "n1".
//! let mut stored = DvvSet::new("shopping list v1");
//! stored.update("n1");
//!
//! // A read returns the causal context and the sibling values.
//! let context = stored.join();
//! assert_eq!(stored.values(), vec![&"shopping list v1"]);
//!
//! // A write carrying that context supersedes what the client saw...
//! let mut write = DvvSet::with_context(&context, "shopping list v2")?;
//! write.update_with(&stored, "n1")?;
//! assert_eq!(write.values(), vec![&"shopping list v2"]);
//!
//! // ...while a write with no context is concurrent: both survive.
//! let mut blind = DvvSet::new("conflicting list");
//! blind.update_with(&write, "n1")?;
//! assert!(blind.is_conflicted());
//! # Ok::<(), dvv_kit::DvvError>(())
//! ```
//!
//! ## Replica ids and values
//!
//! The replica id type only needs a total order ([`Ord`]); the value type
//! only needs equality ([`PartialEq`]), used to de-duplicate concurrent
//! anonymous values. A replica id must have a single writer at a time per
//! key; serializing same-id writers is the surrounding storage layer's
//! responsibility.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod dot;
mod dvv;
mod entry;
mod error;

pub mod prelude;

pub use dot::Dot;
pub use dvv::DvvSet;
pub use entry::Entry;
pub use error::DvvError;
