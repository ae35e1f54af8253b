//! CareCompass — clinical trial eligibility scoring and ranking.
//!
//! The crate is organised around a pure scoring engine ([`matching`]) that
//! converts a patient profile and a set of trial criteria into ranked,
//! explainable compatibility scores. The [`catalog`] module loads and shares
//! the trial set; [`config`], [`telemetry`], and [`error`] carry the service
//! plumbing.

pub mod catalog;
pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
