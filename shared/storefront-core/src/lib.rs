//! Storefront Core - Shared service infrastructure
//!
//! This crate provides:
//! - Standard service trait the storefront services implement
//! - Error handling utilities
//! - Base configuration management

pub mod config;
pub mod error;
pub mod service;

pub use config::ServiceConfig;
pub use error::{Result, StorefrontError};
pub use service::{DependencyStatus, HealthStatus, MicroserviceRuntime, ReadinessStatus, StorefrontService};
