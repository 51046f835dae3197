// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Note reconciliation against AnkiConnect.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Coordinator │────►│ AnkiClient  │────►│  Transport  │────► AnkiConnect
//! │  (batches)  │◄────│   (typed)   │◄────│   (trait)   │◄────
//! └─────────────┘     └─────────────┘     └─────────────┘
//!    │       │
//!    ▼       ▼
//! ┌────────┐ ┌─────────────┐
//! │Resolver│ │ Suspension  │  (optional, end of run)
//! └────────┘ └─────────────┘
//! ```
//!
//! # Features
//!
//! - Existing notes are detected with `canAddNotes` and matched on a key field
//! - Fields and tags converge on the input; re-running is idempotent
//! - Bounded round trips: a handful of multi calls per batch
//! - Injectable transport trait for testing

mod client;
mod coordinator;
mod report;
mod resolver;
mod suspend;
mod transport;

pub use client::{AnkiClient, SyncError, SyncResult};
pub use coordinator::{synchronize, Accumulator, BatchStage, SyncOptions, DEFAULT_BATCH_SIZE};
pub use report::{SkipReason, Skipped, SyncReport};
pub use resolver::{Classification, IdentityResolver, PendingNote, Resolved};
pub use suspend::{collect_cards, suspend_all};
pub use transport::{HttpTransport, Transport, TransportError};
