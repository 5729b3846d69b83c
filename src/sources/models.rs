use serde::Deserialize;
use std::collections::HashMap;

/// Name of the optional parameter holding a link substring to skip.
pub const EXCLUDE_PARAMETER: &str = "exclude";

/// One remote directory and the local file its records end up in.
#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    pub(crate) name: String,
    pub(crate) url: String,
    pub(crate) output: String,
    #[serde(default, rename = "parameters")]
    pub(crate) other_parameters: Option<HashMap<String, String>>,
}

impl Source {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory page listing one JSON file per entry.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// File name, relative to the output directory.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Link substring whose entries are known bad and never fetched.
    pub fn exclude(&self) -> Option<&str> {
        self.other_parameters
            .as_ref()
            .and_then(|params| params.get(EXCLUDE_PARAMETER))
            .map(String::as_str)
            .filter(|needle| !needle.is_empty())
    }
}
