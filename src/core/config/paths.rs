use std::path::PathBuf;

const RC_FILE: &str = ".hshrc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub rc_path: Option<PathBuf>,
    /// An explicit `--rc` file must exist; the default one is optional.
    pub required: bool,
}

impl ConfigPaths {
    /// `explicit` wins; otherwise interactive sessions look for `~/.hshrc`.
    pub fn new(explicit: Option<&str>, interactive: bool) -> Self {
        match explicit {
            Some(path) => Self {
                rc_path: Some(PathBuf::from(path)),
                required: true,
            },
            None => Self {
                rc_path: interactive
                    .then(dirs::home_dir)
                    .flatten()
                    .map(|home| home.join(RC_FILE)),
                required: false,
            },
        }
    }
}
