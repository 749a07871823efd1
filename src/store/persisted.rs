//! Typed JSON value bound to a store key.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::kv::{KeyValueStore, StoreError, StoreResult};

/// Suffix of the key a corrupt value is moved to under
/// [`CorruptPolicy::Quarantine`]. If `<key>.corrupt` is taken, `.1`, `.2`
/// and so on are appended until a free key is found.
pub const QUARANTINE_SUFFIX: &str = ".corrupt";

/// What to do when the stored value under a key cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptPolicy {
    /// Fail the load with [`StoreError::Corrupt`].
    #[default]
    Fail,
    /// Move the raw value to the first free `<key>.corrupt[.N]` key, log a
    /// warning and start from the default value.
    Quarantine,
}

/// A value of type `V` held in memory and mirrored as JSON under one key.
///
/// Every write serializes the whole value; there are no partial updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Persisted<V> {
    key: String,
    value: V,
}

impl<V> Persisted<V>
where
    V: Serialize + DeserializeOwned,
{
    /// Loads the value at `key`.
    ///
    /// An absent key yields `default`. A present value is parsed as JSON;
    /// how a parse failure is handled depends on `policy`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if the value cannot be parsed and
    /// `policy` is [`CorruptPolicy::Fail`], or any error the store reports.
    pub fn load<S: KeyValueStore + ?Sized>(
        store: &mut S,
        key: &str,
        default: V,
        policy: CorruptPolicy,
    ) -> StoreResult<Self> {
        let value = match store.get(key)? {
            None => {
                debug!(key, "no stored value, starting from default");
                default
            }
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(source) => match policy {
                    CorruptPolicy::Fail => {
                        return Err(StoreError::Corrupt {
                            key: key.to_string(),
                            source,
                        });
                    }
                    CorruptPolicy::Quarantine => {
                        let quarantine_key = free_quarantine_key(store, key)?;
                        store.set(&quarantine_key, &raw)?;
                        store.remove(key)?;
                        warn!(
                            key,
                            quarantine_key = %quarantine_key,
                            error = %source,
                            "stored value is corrupt; moved aside and starting from default"
                        );
                        default
                    }
                },
            },
        };

        Ok(Self {
            key: key.to_string(),
            value,
        })
    }

    /// Returns the key this value is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the in-memory value.
    pub fn get(&self) -> &V {
        &self.value
    }

    /// Writes the current value to the store.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> StoreResult<()> {
        write_json(store, &self.key, &self.value)
    }

    /// Writes `value` to the store, then makes it the in-memory value.
    ///
    /// If the write fails the in-memory value is left unchanged.
    pub fn replace<S>(&mut self, store: &mut S, value: V) -> StoreResult<()>
    where
        S: KeyValueStore + ?Sized,
    {
        write_json(store, &self.key, &value)?;
        self.value = value;
        Ok(())
    }

    /// Computes the next value from the current one and writes it through.
    pub fn update<S, F>(&mut self, store: &mut S, f: F) -> StoreResult<()>
    where
        S: KeyValueStore + ?Sized,
        F: FnOnce(&V) -> V,
    {
        let next = f(&self.value);
        self.replace(store, next)
    }
}

/// Returns the first quarantine key for `key` that holds no value, so an
/// earlier quarantined value is never overwritten.
fn free_quarantine_key<S>(store: &S, key: &str) -> StoreResult<String>
where
    S: KeyValueStore + ?Sized,
{
    let base = format!("{key}{QUARANTINE_SUFFIX}");
    if store.get(&base)?.is_none() {
        return Ok(base);
    }
    let mut n = 1u32;
    loop {
        let candidate = format!("{base}.{n}");
        if store.get(&candidate)?.is_none() {
            return Ok(candidate);
        }
        n += 1;
    }
}

fn write_json<S, V>(store: &mut S, key: &str, value: &V) -> StoreResult<()>
where
    S: KeyValueStore + ?Sized,
    V: Serialize,
{
    let json = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)?;
    debug!(key, bytes = json.len(), "wrote through");
    Ok(())
}
