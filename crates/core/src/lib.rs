//! # Rotaboard Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The rota projection engine and its presentation post-filters
//! - Port/adapter interfaces (traits)
//! - The board use-case service
//!
//! ## Architecture Principles
//! - Only depends on `rotaboard-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod projection;

// Re-export specific items to avoid ambiguity
pub use projection::engine::{project_window, projection_window};
pub use projection::filters::{political_for_iso_week, technical_for_day};
pub use projection::ports::{Clock, RotaRecordRepository};
pub use projection::service::{BoardService, BoardSnapshot};
