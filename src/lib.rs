//! Chanakya study assistant library.
//!
//! The binary (`main.rs`) and the integration tests under `tests/` both use
//! the modules exported here.

pub mod catalog;
pub mod chat;
pub mod error;
pub mod flashcards;
pub mod mentors;
pub mod profile;
pub mod question_bank;
pub mod quiz;
pub mod routes;
pub mod settings;
pub mod storage;
pub mod summary;
pub mod views;

pub use error::StudyError;
