// SPDX-License-Identifier: MPL-2.0
//! `keepsake` is a wedding-invitation kiosk built with the Iced GUI framework.
//!
//! It presents a live countdown to the ceremony, an auto-advancing photo
//! slider, a thumbnail gallery with a full-screen lightbox, and a
//! background-music playlist.

#![doc(html_root_url = "https://docs.rs/keepsake/0.2.0")]

pub mod app;
pub mod assets;
pub mod audio;
pub mod config;
pub mod countdown;
pub mod error;
pub mod gallery;
pub mod playlist;
