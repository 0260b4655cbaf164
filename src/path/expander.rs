use crate::core::env::EnvStore;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct HomeDirNotFound;

impl std::fmt::Display for HomeDirNotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HOME not set")
    }
}

/// Tilde expansion against the session's `HOME`, falling back to the
/// account's home directory when the variable is unset.
pub struct PathExpander<'a> {
    env: &'a EnvStore,
}

impl<'a> PathExpander<'a> {
    pub fn new(env: &'a EnvStore) -> Self {
        Self { env }
    }

    pub fn expand(&self, path: &str) -> Result<PathBuf, HomeDirNotFound> {
        if path.starts_with('~') {
            self.expand_tilde(path)
        } else {
            Ok(Path::new(path).to_path_buf())
        }
    }

    fn expand_tilde(&self, path: &str) -> Result<PathBuf, HomeDirNotFound> {
        let without_tilde = &path[1..];
        if without_tilde.is_empty() {
            return self.home_dir();
        }

        match without_tilde.strip_prefix('/') {
            Some(stripped) => {
                let mut home_path = self.home_dir()?;
                for part in stripped.split('/').filter(|part| !part.is_empty()) {
                    home_path.push(part);
                }
                Ok(home_path)
            }
            // ~user is left alone
            None => Ok(Path::new(path).to_path_buf()),
        }
    }

    pub fn home_dir(&self) -> Result<PathBuf, HomeDirNotFound> {
        match self.env.get("HOME") {
            Some(home) if !home.is_empty() => Ok(PathBuf::from(home)),
            _ => dirs::home_dir().ok_or(HomeDirNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> EnvStore {
        [("HOME", "/home/test")].into_iter().collect()
    }

    #[test]
    fn test_plain_path_untouched() {
        let env = env();
        let expander = PathExpander::new(&env);
        assert_eq!(expander.expand("/tmp").unwrap(), PathBuf::from("/tmp"));
        assert_eq!(expander.expand("a~b").unwrap(), PathBuf::from("a~b"));
    }

    #[test]
    fn test_tilde_forms() {
        let env = env();
        let expander = PathExpander::new(&env);
        assert_eq!(expander.expand("~").unwrap(), PathBuf::from("/home/test"));
        assert_eq!(
            expander.expand("~/src//hsh").unwrap(),
            PathBuf::from("/home/test/src/hsh")
        );
        assert_eq!(expander.expand("~root").unwrap(), PathBuf::from("~root"));
    }
}
