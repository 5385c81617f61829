//! Domain models for the dashboard.
//!
//! Records are stored as JSON arrays, so every model here derives serde with
//! the exact field names used on the wire.

pub mod content;
pub mod ec_site;
pub mod profile;
pub mod session;

pub use content::GeneratedContent;
pub use ec_site::{EcSite, EcSiteInput};
pub use profile::Profile;
pub use session::{CurrentUser, keys as session_keys};
