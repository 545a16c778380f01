//! # notify-gateway
//!
//! REST API gateway for managing short-lived user-facing notifications:
//! announcements scoped to client platforms and roles, visible inside a
//! validity window, moving through a `Draft → Published → Unpublished`
//! lifecycle.
//!
//! The lifecycle state machine is enforced entirely in-process by the store
//! layer; the backing PostgreSQL document collection only ever sees whole
//! documents and an optimistic-concurrency version token.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers + validation (api/)
//!     │
//!     ├── NotificationStore (store/)
//!     │     ├── PostgresStore (JSONB documents, CAS saves)
//!     │     └── MemoryStore   (tests, persistence-disabled runs)
//!     │
//!     └── Notification entity + state machine (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod store;
