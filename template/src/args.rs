use std::{fs, path::Path};

use indexmap::IndexMap;
use log::{debug, trace};

use crate::TemplateError;

/// The variables a template is rendered with.
pub type TemplateArgs = IndexMap<String, serde_yaml::Value>;

/// Loads template arguments from a yaml file.
///
/// An empty file yields no arguments.
///
/// # Errors
/// Errors if the file can't be read or isn't a yaml mapping.
pub fn load_argument_file(path: &Path) -> Result<TemplateArgs, TemplateError> {
    trace!("load_argument_file({})", path.display());

    let contents = fs::read_to_string(path).map_err(|source| TemplateError::ReadArgFile {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        debug!("Argument file {} is empty", path.display());
        return Ok(TemplateArgs::new());
    }

    serde_yaml::from_str::<Option<TemplateArgs>>(&contents)
        .map(Option::unwrap_or_default)
        .map_err(|source| TemplateError::ParseArgFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Layers `overrides` on top of `args`.
///
/// Keys in `overrides` replace the values already in `args`.
#[must_use]
pub fn merge_args<I, K, V>(mut args: TemplateArgs, overrides: I) -> TemplateArgs
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    for (key, value) in overrides {
        let key = key.into();
        let value = value.into();
        trace!("Setting template arg {key}={value}");
        args.insert(key, serde_yaml::Value::String(value));
    }
    args
}
