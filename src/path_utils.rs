use std::path::{Path, PathBuf};

/// Expands a leading `~` to the home directory. Other paths are returned as given.
pub fn get_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
