//! Use-case services over the repository layer.
//!
//! # Responsibility
//! - Orchestrate session lifecycle, credential checks, template registry
//!   and minutes generation/history.
//!
//! # Invariants
//! - Services never bypass repository persistence contracts.
//! - Every mutation that must survive reload is flushed before returning.

pub mod credential_service;
pub mod minutes_service;
pub mod session_service;
pub mod template_service;
