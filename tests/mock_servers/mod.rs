//! Mock servers for integration testing
//!
//! These mock servers simulate the remote services (Firebase Identity Toolkit,
//! Secure Token and Firestore REST) so auth and document flows run without a
//! real project.

pub mod firebase;

pub use firebase::MockFirebase;
