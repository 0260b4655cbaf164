use super::EnvError;
use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;

/// Session copy of the environment. Changes stay in the shell's own table and
/// reach children only through the snapshot handed to the spawner.
#[derive(Clone, Debug, Default)]
pub struct EnvStore {
    vars: BTreeMap<String, String>,
}

impl EnvStore {
    /// Seeds the store from the inherited process environment. Entries that are
    /// not valid UTF-8 are skipped, so children started by the shell do not
    /// see them either.
    pub fn inherit() -> Self {
        Self::from_os_vars(env::vars_os())
    }

    fn from_os_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        let mut store = Self::default();
        for (key, value) in vars {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) if !key.is_empty() => {
                    store.vars.insert(key, value);
                }
                (key, _) => {
                    tracing::debug!(?key, "skipping non-unicode environment entry");
                }
            }
        }
        store
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        if name.is_empty() {
            return Err(EnvError::EmptyName);
        }
        if name.contains(['=', '\0']) {
            return Err(EnvError::InvalidName(name.to_string()));
        }

        self.vars.insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Returns whether the variable was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.vars.remove(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(k, _)| !k.is_empty())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() -> Result<(), EnvError> {
        let mut store = EnvStore::default();
        store.set("TEST_VAR", "test value")?;
        assert_eq!(store.get("TEST_VAR"), Some("test value"));

        store.set("TEST_VAR", "other")?;
        assert_eq!(store.get("TEST_VAR"), Some("other"));
        assert_eq!(store.len(), 1);
        Ok(())
    }

    #[test]
    fn test_invalid_var_name() {
        let mut store = EnvStore::default();
        assert!(matches!(store.set("", "value"), Err(EnvError::EmptyName)));
        assert!(matches!(
            store.set("A=B", "value"),
            Err(EnvError::InvalidName(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut store: EnvStore = [("FOO", "bar")].into_iter().collect();
        assert!(store.remove("FOO"));
        assert!(!store.remove("FOO"));
        assert_eq!(store.get("FOO"), None);
    }

    #[test]
    fn test_inherit_sees_process_environment() {
        let store = EnvStore::inherit();
        if let Ok(path) = env::var("PATH") {
            assert_eq!(store.get("PATH"), Some(path.as_str()));
        }
    }

    #[test]
    fn test_non_unicode_entries_are_dropped() {
        use std::os::unix::ffi::OsStringExt;

        let store = EnvStore::from_os_vars([
            (OsString::from("GOOD"), OsString::from("yes")),
            (OsString::from("BAD_VALUE"), OsString::from_vec(vec![0xff, 0xfe])),
            (OsString::from_vec(vec![b'K', 0xff]), OsString::from("v")),
        ]);
        assert_eq!(store.get("GOOD"), Some("yes"));
        assert_eq!(store.get("BAD_VALUE"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_iter_is_sorted() {
        let store: EnvStore = [("B", "2"), ("A", "1")].into_iter().collect();
        let keys: Vec<&str> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["A", "B"]);
    }
}
