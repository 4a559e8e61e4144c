//! Acumen - Conversational AI-Competency Assessment Backend
//!
//! This crate runs scripted multi-turn dialogues with a model provider to
//! classify a business leader's AI competency level, persisting conversation
//! and assessment state in PostgreSQL.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
