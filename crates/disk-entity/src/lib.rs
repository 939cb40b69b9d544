//! # disk-entity
//!
//! Domain entity models for Disk. Every struct in this crate represents a
//! database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`.

pub mod history;
pub mod unit;
