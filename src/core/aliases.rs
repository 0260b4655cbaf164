use std::collections::BTreeMap;

#[derive(Debug)]
pub struct InvalidAliasName(pub String);

impl std::fmt::Display for InvalidAliasName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid alias name: '{}'", self.0)
    }
}

impl std::error::Error for InvalidAliasName {}

#[derive(Clone, Debug, Default)]
pub struct AliasStore {
    aliases: BTreeMap<Box<str>, Box<str>>,
}

impl AliasStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, command: &str) -> Result<(), InvalidAliasName> {
        if name.is_empty() || name.contains(|c: char| c == '=' || c.is_whitespace()) {
            return Err(InvalidAliasName(name.to_string()));
        }
        self.aliases.insert(name.into(), command.into());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(|s| &**s)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.aliases.remove(name).is_some()
    }

    /// All aliases in name order.
    pub fn list(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (&**k, &**v))
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
