// SPDX-License-Identifier: MPL-2.0
//! `iced_apod` browses NASA's Astronomy Picture of the Day archive with the
//! Iced GUI framework.
//!
//! A date range is fetched in a single request, image records are shown as a
//! thumbnail grid and a selected record opens in a detail modal.

#![doc(html_root_url = "https://docs.rs/iced_apod/0.1.0")]

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod media;
pub mod ui;
