//! Configuration structures for the release pipeline.
//!
//! Settings are assembled by [`SettingsBuilder`] from built-in defaults, an
//! optional `release.toml` and command line overrides, then handed to the
//! pipeline as an immutable [`Settings`] value.

mod builder;
mod bundle;
mod core;
mod docs;
mod file;
mod sources;

pub use builder::SettingsBuilder;
pub use bundle::{ArchiveFormat, BundleSettings};
pub use self::core::Settings;
pub use docs::DocSettings;
pub use file::{CONFIG_FILE_NAME, ConfigFile};
pub use sources::SourceSettings;
