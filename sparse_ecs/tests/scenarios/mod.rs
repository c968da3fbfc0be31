//! Scenario Tests
//!
//! End-to-end simulations combining entities, filters and systems.
