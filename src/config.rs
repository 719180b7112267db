//! Hierarchical configuration, addressed with dotted keys like `render.width`.
//!
//! ```json
//! {
//!     "render": { "width": 800, "height": 600, "vsync": true },
//!     "kansai": { "caption": "Sketch" }
//! }
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    value: Value,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            value: Value::Object(Map::new()),
        }
    }
}

impl FromStr for Configuration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        if !value.is_object() {
            return Err(Error::Config("the root must be an object.".to_owned()));
        }

        Ok(Configuration { value })
    }
}

impl Configuration {
    pub fn new() -> Self {
        Configuration::default()
    }

    /// Loads a utf-8 encoded json file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        text.parse()
    }

    /// Collects `--key value` pairs. Values are parsed as json scalars when
    /// possible and kept as strings otherwise. A trailing key without a
    /// value is set to `true`.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Configuration::new();
        let mut key: Option<String> = None;

        for arg in args {
            let arg = arg.as_ref();
            if arg.starts_with("--") {
                if let Some(flag) = key.take() {
                    config.set(&flag, true);
                }

                key = Some(arg[2..].to_owned());
            } else if let Some(k) = key.take() {
                let v = serde_json::from_str::<Value>(arg)
                    .ok()
                    .filter(|v| !v.is_object() && !v.is_array())
                    .unwrap_or_else(|| Value::String(arg.to_owned()));

                config.set(&k, v);
            }
        }

        if let Some(flag) = key {
            config.set(&flag, true);
        }

        config
    }

    /// Sets the value at `key`, creating intermediate tables as needed.
    pub fn set<V: Into<Value>>(&mut self, key: &str, value: V) {
        let mut cursor = &mut self.value;
        let mut components = key.split('.').peekable();

        while let Some(name) = components.next() {
            if !cursor.is_object() {
                *cursor = Value::Object(Map::new());
            }

            let table = match cursor.as_object_mut() {
                Some(table) => table,
                None => return,
            };

            if components.peek().is_none() {
                table.insert(name.to_owned(), value.into());
                return;
            }

            cursor = table
                .entry(name.to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
        }
    }

    /// Copies every leaf of `other` over this configuration.
    pub fn merge(&mut self, other: &Configuration) {
        fn walk(prefix: &str, value: &Value, into: &mut Configuration) {
            match value {
                Value::Object(table) => {
                    for (k, v) in table {
                        let key = if prefix.is_empty() {
                            k.clone()
                        } else {
                            format!("{}.{}", prefix, k)
                        };

                        walk(&key, v, into);
                    }
                }
                _ => into.set(prefix, value.clone()),
            }
        }

        walk("", &other.value, self);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        key.split('.')
            .try_fold(&self.value, |value, name| value.get(name))
    }

    /// Deserializes the value at `key`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.lookup(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(v) => Some(v),
            Err(err) => {
                warn!("Configuration `{}` is malformed: {}.", key, err);
                None
            }
        }
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        let value = self.lookup(key)?;
        let v = value.as_i64();
        if v.is_none() {
            warn!("Configuration `{}` should be an integer, found {}.", key, value);
        }

        v
    }

    /// Integers are accepted too, with zero meaning `false`.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        let value = self.lookup(key)?;
        let v = value
            .as_bool()
            .or_else(|| value.as_i64().map(|v| v != 0));

        if v.is_none() {
            warn!("Configuration `{}` should be a boolean, found {}.", key, value);
        }

        v
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        let value = self.lookup(key)?;
        let v = value.as_str();
        if v.is_none() {
            warn!("Configuration `{}` should be a string, found {}.", key, value);
        }

        v
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dotted_lookup() {
        let config: Configuration = r#"{
            "render": { "width": 800, "fullscreen": 1, "vsync": false },
            "kansai": { "caption": "Sketch" }
        }"#
        .parse()
        .unwrap();

        assert_eq!(config.get_i64("render.width"), Some(800));
        assert_eq!(config.get_bool("render.fullscreen"), Some(true));
        assert_eq!(config.get_bool("render.vsync"), Some(false));
        assert_eq!(config.get_str("kansai.caption"), Some("Sketch"));
        assert_eq!(config.get_i64("render.height"), None);
        assert_eq!(config.get_i64("kansai.caption"), None);
        assert_eq!(config.get::<u32>("render.width"), Some(800));
    }

    #[test]
    fn rejects_non_object() {
        assert!("[1, 2]".parse::<Configuration>().is_err());
        assert!("{ broken".parse::<Configuration>().is_err());
    }

    #[test]
    fn args() {
        let args = vec![
            "--render.width",
            "1024",
            "--kansai.caption",
            "hello world",
            "--render.fullscreen",
        ];

        let config = Configuration::from_args(args);
        assert_eq!(config.get_i64("render.width"), Some(1024));
        assert_eq!(config.get_str("kansai.caption"), Some("hello world"));
        assert_eq!(config.get_bool("render.fullscreen"), Some(true));
    }

    #[test]
    fn set_and_merge() {
        let mut a = Configuration::new();
        a.set("render.width", 320);
        a.set("render.height", 200);

        let mut b = Configuration::new();
        b.set("render.height", 240);
        b.set("kansai.caption", "merged");

        a.merge(&b);
        assert_eq!(a.get_i64("render.width"), Some(320));
        assert_eq!(a.get_i64("render.height"), Some(240));
        assert_eq!(a.get_str("kansai.caption"), Some("merged"));
        assert!(a.contains("kansai"));
        assert!(!a.contains("audio"));
    }
}
