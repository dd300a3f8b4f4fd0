use crate::error::{LpaError, LpaResult};
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Default)]
pub struct Configuration {
    config: HashMap<String, String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self {
            config: HashMap::new(),
        }
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.config.insert(key.into(), value.into());
    }

    /// Parses a `key=value` pair and stores it.
    pub fn put_pair(&mut self, pair: &str) -> LpaResult<()> {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            LpaError::InvalidArgument(format!("expected key=value, got {pair:?}"))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(LpaError::InvalidArgument(format!(
                "empty configuration key in {pair:?}"
            )));
        }
        self.put(key, value.trim());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.config.get(key)
    }

    pub fn get_string(&self, key: &str, default_value: &str) -> String {
        self.config
            .get(key)
            .cloned()
            .unwrap_or_else(|| default_value.to_string())
    }

    pub fn get_u64(&self, key: &str) -> LpaResult<Option<u64>> {
        self.get_parsed(key)
    }

    pub fn get_usize(&self, key: &str) -> LpaResult<Option<usize>> {
        self.get_parsed(key)
    }

    fn get_parsed<T>(&self, key: &str) -> LpaResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.config
            .get(key)
            .map(|raw| {
                raw.parse::<T>()
                    .map_err(|e| LpaError::InvalidArgument(format!("config {key}={raw}: {e}")))
            })
            .transpose()
    }
}
