//! # Structural Design Patterns in Rust
//!
//! One module per pattern, each with a small toy scenario:
//!
//! ## Adapter
//! - An XML-only service made usable by a JSON-only client
//! - Composition instead of inheriting from both sides
//!
//! ## Bridge
//! - One authentication abstraction over cloud and external APIs
//!
//! ## Composite
//! - Load nodes and load clusters behind one `Loader` trait
//! - Child management only on the types that have children
//!
//! ## Decorator
//! - Charging-session reporters wrapped in shadow and MQTT decorators
//!
//! ## Facade
//! - A single call that initializes a charger across AWS subsystems
//!
//! ## Flyweight
//! - A police vehicle database sharing one object per car model
//!
//! Run a demo with: `cargo run --bin <pattern>`

pub mod adapter;
pub mod bridge;
pub mod composite;
pub mod decorator;
pub mod error;
pub mod facade;
pub mod flyweight;
pub mod logging;

pub use error::{PatternError, Result};
