//! Gymdesk - Gym Membership Management Backend
//!
//! This crate implements the membership lifecycle engine, billing ledger,
//! payment reconciliation and attendance recording for a gym deployment,
//! with best-effort notification dispatch at the edges.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
