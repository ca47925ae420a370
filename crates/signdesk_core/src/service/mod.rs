//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Parse raw tenant and id input before touching storage.
//! - Keep transport layers decoupled from storage details.

pub mod contract_management_service;
pub mod contract_service;
pub mod document_service;
pub mod settings_service;
