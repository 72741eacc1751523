use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::PartialSettings;
use crate::core::errors::ConfigError;

pub const CONFIG_FILE_NAME: &str = ".pkgdmp.toml";

pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parses config file contents. Unknown keys are errors.
pub fn parse_config(contents: &str, path: &Path) -> Result<PartialSettings, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the config layer.
///
/// An explicit path must exist. Otherwise `.pkgdmp.toml` in `dir` is used
/// when present; an unreadable default file is logged and ignored.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<PartialSettings, ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (dir.join(CONFIG_FILE_NAME), false),
    };

    let contents = match read_config_file(&path) {
        Ok(contents) => contents,
        Err(source) if required => return Err(ConfigError::Read { path, source }),
        Err(e) => {
            handle_read_error(&path, &e);
            return Ok(PartialSettings::default());
        }
    };

    let settings = parse_config(&contents, &path)?;
    debug!(path = %path.display(), "loaded config");
    Ok(settings)
}

/// Only log actual errors, not "file not found".
fn handle_read_error(path: &PathBuf, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        warn!(path = %path.display(), %error, "failed to read config file");
    }
}
