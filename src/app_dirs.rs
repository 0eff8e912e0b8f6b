use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("typetest");
            Some(state_dir.join("typetest.log"))
        } else {
            ProjectDirs::from("", "", "typetest")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("typetest.log"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_is_named_after_app() {
        if let Some(path) = AppDirs::log_path() {
            assert!(path.ends_with("typetest/typetest.log"));
        }
    }
}
