// tablemirror-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// What a target store must offer (Connector).
pub mod ports;

// 2. Domain
// Document model, vocabularies, validation, type mapping, dialects.
// Depends on nothing but itself.
pub mod domain;

// 3. Infrastructure (Adapters)
// Document loading, DuckDB / PostgreSQL stores, report files.
pub mod infrastructure;

// 4. Application (Use Cases)
// Schema synthesis and the run orchestrator.
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::MirrorError;
