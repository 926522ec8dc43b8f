//! Submit / poll / resolve machinery shared by every media kind.

pub mod delivery;
pub mod dto;
pub mod error;
pub mod extract;
pub mod model;
pub mod poller;
pub mod service;
pub mod submit;
