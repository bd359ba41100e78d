//! An order-statistic red-black tree for Rust.
//!
//! This crate provides [`OSRBTree`], an ordered multiset that augments a
//! classic red-black tree with subtree sizes, giving O(log n)
//! order-statistic operations on top of the usual search-tree surface:
//!
//! - [`rank`](OSRBTree::rank) - The sorted position a key holds (or would hold)
//! - [`find_kth`](OSRBTree::find_kth) - The node at a given sorted position
//! - [`lower_bound`](OSRBTree::lower_bound) / [`upper_bound`](OSRBTree::upper_bound) -
//!   Bound navigation
//! - [`successor`](OSRBTree::successor) / [`predecessor`](OSRBTree::predecessor) -
//!   In-order neighbors of a node
//!
//! # Example
//!
//! ```
//! use osrb_tree::OSRBTree;
//!
//! let mut latencies = OSRBTree::new();
//! latencies.insert(12);
//! latencies.insert(7);
//! latencies.insert(31);
//! latencies.insert(12);
//!
//! // Duplicates are kept; the tree is a multiset.
//! assert_eq!(latencies.len(), 4);
//!
//! // Order-statistic operations (O(log n)).
//! let p50 = latencies.find_kth(2).unwrap();
//! assert_eq!(latencies.key(p50), &12);
//! assert_eq!(latencies.rank(&31), 4);
//!
//! // Bound navigation.
//! let node = latencies.upper_bound(&12).unwrap();
//! assert_eq!(latencies.key(node), &31);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Multiset semantics** - Duplicate keys are permitted and kept in insertion order
//! - **O(log n) rank operations** - Subtree-size augmentation maintained across every
//!   rotation and recoloring
//! - **Bounded height** - The red-black invariants keep the height at most
//!   2·log2(n+1)
//!
//! # Implementation
//!
//! Nodes live in a slot arena and refer to each other by niche-optimized
//! integer handles; a reserved sentinel handle stands in for every missing
//! child and the root's parent, so the rebalancing code never branches on
//! `Option`. Deleting a node with two children swaps its key with the
//! in-order successor's before splicing, which is why node identity is not
//! preserved across such removals (see [`OSRBTree::remove`]).

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod node_ref;
mod raw;

pub mod osrb_tree;

pub use node_ref::NodeRef;
pub use osrb_tree::OSRBTree;
