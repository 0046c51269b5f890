//! Source module settings.

use std::path::PathBuf;

/// Where plugin modules live and which two lead the artifact.
///
/// # Examples
///
/// ```
/// use plugin_release::release::SourceSettings;
///
/// let sources = SourceSettings {
///     head_b: "core.js".into(),
///     ..Default::default()
/// };
/// assert_eq!(sources.head_a, "plugin.js");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    /// Directory holding the modules, relative to the project root.
    ///
    /// Default: `src`
    pub dir: PathBuf,

    /// File name of the module written first.
    ///
    /// Default: `plugin.js`
    pub head_a: String,

    /// File name of the module written second.
    ///
    /// Default: `sprite.js`
    pub head_b: String,

    /// Extension (without the dot) a file needs to count as a module.
    ///
    /// Default: `js`
    pub extension: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("src"),
            head_a: "plugin.js".into(),
            head_b: "sprite.js".into(),
            extension: "js".into(),
        }
    }
}

impl SourceSettings {
    /// Whether `file_name` carries the module extension.
    pub fn is_module_name(&self, file_name: &str) -> bool {
        file_name
            .strip_suffix(self.extension.as_str())
            .is_some_and(|stem| stem.ends_with('.'))
    }

    /// Whether `file_name` is one of the two head modules.
    pub fn is_head(&self, file_name: &str) -> bool {
        file_name == self.head_a || file_name == self.head_b
    }
}
