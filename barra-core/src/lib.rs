//! Barra Core: scoring and ranking engine for powerlifting meets.
//!
//! This crate holds the pure computation:
//! - Domain types (entries, attempts, movements, modalities, athlete attributes)
//! - Attempt evaluation, disqualification and totals per modality
//! - Point-score and record-lookup contracts (implemented elsewhere)
//! - Category rankings, Best Lifter standings and team standings
//!
//! Nothing here performs I/O or keeps state between calls. Every function
//! takes an immutable snapshot and returns fresh values.

pub mod domain;
pub mod ranking;
pub mod records;
pub mod scoring;
