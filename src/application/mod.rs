// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions for the archive backend
//! - [`pipeline`]: Date-range fetch-and-render state
//! - [`gallery`]: Record to gallery item mapping
//! - [`modal`]: Detail view state machine
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer drives the state objects from `App::update`

pub mod gallery;
pub mod modal;
pub mod pipeline;
pub mod port;

pub use gallery::GalleryItem;
pub use modal::{ModalController, ModalState};
pub use pipeline::{Completion, Pipeline, RequestId, ViewState};
