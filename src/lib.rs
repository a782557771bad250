//! Fitz - fitness tracking front-end
//!
//! Workouts, dietary plans, workout playlists and a profile, shown behind a
//! session gate.
//!
//! This library provides:
//! - A session gate that picks the signed-in or signed-out screen stack
//! - A per-screen fetch controller with cancellation on unmount
//! - Firebase Identity Toolkit and Firestore REST clients, plus offline
//!   in-memory equivalents
//! - The Dioxus UI (router, tab layout, pages)

pub mod app;
pub mod auth;
pub mod config;
pub mod gate;
pub mod nav;
pub mod placeholder;
pub mod screens;
pub mod services;
pub mod store;
pub mod view_state;
