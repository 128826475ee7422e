//! Graphics resource accounting.
//!
//! Every geometry buffer, material or shader program a scene creates is
//! registered in the surface's `ResourceLedger` and represented by an owned
//! `ResourceHandle`. Dropping the handle releases the entry, so "the scene
//! released everything it allocated" reduces to "the ledger is empty again".

mod ledger;

pub use ledger::{ResourceEntry, ResourceHandle, ResourceKind, ResourceLedger};
