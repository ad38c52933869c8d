//! Output formats.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Serialization format of the output document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    /// JSON for a `.json` extension, YAML for anything else.
    pub fn from_path(path: &Path) -> Self {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json { Self::Json } else { Self::Yaml }
    }

    /// Upper-case label used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("out/model.yml")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_path(Path::new("out/model.yaml")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_path(Path::new("out/model.JSON")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path(Path::new("model")), OutputFormat::Yaml);
    }
}
