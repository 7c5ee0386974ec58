//! # Unit Components
//!
//! This module organizes the unit tests by component: the shared types, the
//! configuration, the MMU, the SoC devices and dispatcher, the loader, and the
//! bus façade that ties them together.
