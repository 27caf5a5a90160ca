//! Fault-tolerant request gate for auth token-refresh calls.
//!
//! Wraps an injected HTTP transport with a circuit breaker so a
//! failing session-refresh dependency fails fast instead of hanging
//! the application: each refresh attempt is capped by a timeout,
//! repeated failures within a window open the breaker for a cooldown,
//! and a trip evicts cached session tokens and notifies observers.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌────────────────────────────────────────────┐
//!                  │                REFRESH GATE                 │
//!  Outbound        │  ┌──────────┐     ┌─────────────────────┐  │
//!  request ────────┼─▶│ classify │────▶│ breaker open?        │  │
//!                  │  └────┬─────┘     │  yes → synthetic 503 │  │
//!                  │       │ not a     │  no  → timeout race  │──┼──▶ transport
//!                  │       │ refresh   └──────────┬──────────┘  │
//!                  │       ▼                      ▼             │
//!                  │   transport           outcome → policy     │
//!                  │   (untouched)      ┌────────────────────┐  │
//!                  │                    │ breaker (policy +  │  │
//!                  │                    │ persistent state)  │  │
//!                  │                    └────┬──────────┬────┘  │
//!                  │              on trip:   ▼          ▼       │
//!                  │                    session      notify     │
//!                  │                    evictor      hub        │
//!                  └────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use auth_refresh_gate::{AuthBreaker, GateConfig, HyperTransport, MemoryStorage, RefreshGate};
//!
//! let config = GateConfig::default();
//! let storage = Arc::new(MemoryStorage::new());
//! let breaker = Arc::new(AuthBreaker::new(&config, storage));
//! let gate = RefreshGate::new(Arc::new(HyperTransport::new()), breaker.clone(), config.refresh);
//!
//! // After a successful credential sign-in:
//! breaker.reset();
//! ```

// Core subsystems
pub mod breaker;
pub mod gate;
pub mod storage;
pub mod transport;

// Trip side effects
pub mod notify;
pub mod session;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod observability;

pub use breaker::AuthBreaker;
pub use config::GateConfig;
pub use error::{ConfigError, TransportError};
pub use gate::RefreshGate;
pub use notify::Subscription;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use transport::{HyperTransport, Transport};
