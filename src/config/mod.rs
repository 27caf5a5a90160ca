//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GateConfig (validated, immutable)
//!     → shared with breaker and gate at construction
//! ```
//!
//! # Design Decisions
//! - All fields have defaults carrying the stock constants, so a
//!   missing or minimal config file yields the documented behavior
//! - Config is immutable once loaded
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::load_config;
pub use schema::GateConfig;
pub use schema::PolicyConfig;
pub use schema::RefreshConfig;
pub use schema::SessionConfig;
pub use validation::{validate_config, ValidationError};
