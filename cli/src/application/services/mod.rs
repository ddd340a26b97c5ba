//! Application services: use-case orchestration.
//!
//! Each service module implements a single page or modal by composing domain
//! logic with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`: never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod agents;
pub mod auth;
pub mod config_service;
pub mod credential_crud;
pub mod credential_modal;
pub mod explore;
pub mod team_assembly;
