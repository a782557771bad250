//! Page components, one per route.
//!
//! Tab pages render inside `Layout`; the auth pages render bare.

mod dietary_plan;
mod home;
mod login;
mod not_found;
mod playlists;
mod profile;
mod signup;
mod workouts;

pub use dietary_plan::DietaryPlan;
pub use home::Home;
pub use login::Login;
pub use not_found::NotFound;
pub use playlists::Playlists;
pub use profile::Profile;
pub use signup::Signup;
pub use workouts::Workouts;
