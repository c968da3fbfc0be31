//! Core ECS Integration Tests
//!
//! Tests for fundamental ECS operations including:
//! - Entity lifecycle management
//! - Component add/set/get/remove through the world and entity handles
//! - World state consistency

pub mod component_lifecycle;
pub mod entity_lifecycle;
pub mod world_operations;
