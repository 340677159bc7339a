// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;

use crate::env::Env;
use crate::setting::Rule;
use crate::setting::Value;
use crate::setting::evaluate;
use crate::setting::parse;
use crate::utils::lock;

/// The name of the setting that follows the `debug` enable-string syntax.
pub const DEBUG: &str = "debug";
/// The name of the setting holding logger levels.
pub const LEVEL: &str = "level";
/// The name of the setting holding logger outputs.
pub const OUTPUT: &str = "output";
/// The name of the setting holding logger formats.
pub const FORMAT: &str = "format";

type Hook = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
struct Setting {
    raw: Option<String>,
    // derived from `raw`, dropped whenever `raw` is replaced
    rules: Option<Vec<Rule>>,
    cache: HashMap<String, Option<Value>>,
}

impl Setting {
    fn new(raw: Option<String>) -> Self {
        Setting {
            raw,
            rules: None,
            cache: HashMap::new(),
        }
    }
}

/// Holds the raw setting strings and resolves them per logger name.
///
/// Parsed rules and resolved values are memoized on the setting they were
/// derived from and discarded when that setting is [set](SettingStore::set).
/// Every mutation is reported to the hooks registered with
/// [`subscribe`](SettingStore::subscribe) before `set` returns.
///
/// # Examples
///
/// ```
/// use ulog::env::MemoryEnv;
/// use ulog::setting::SettingStore;
///
/// let env = MemoryEnv::default();
/// env.insert("log", "warn; libA=debug");
///
/// let store = SettingStore::new().with_env(env).with_default("level", "info");
/// store.load(None);
///
/// assert_eq!(store.get("level").as_deref(), Some("warn; libA=debug"));
/// assert_eq!(store.resolve("level", "libA").unwrap().as_str(), Some("debug"));
/// ```
pub struct SettingStore {
    settings: Mutex<HashMap<String, Setting>>,
    defaults: HashMap<String, Value>,
    options: BTreeSet<String>,
    env: Option<Box<dyn Env>>,
    hooks: Mutex<Vec<Hook>>,
}

impl fmt::Debug for SettingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingStore")
            .field("settings", &self.settings())
            .field("defaults", &self.defaults)
            .field("env", &self.env)
            .finish_non_exhaustive()
    }
}

impl Default for SettingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingStore {
    /// Create an empty store without an environment binding.
    pub fn new() -> Self {
        SettingStore {
            settings: Mutex::new(HashMap::new()),
            defaults: HashMap::new(),
            options: BTreeSet::new(),
            env: None,
            hooks: Mutex::new(vec![]),
        }
    }

    /// Use `env` to [load](SettingStore::load) and persist settings.
    pub fn with_env(mut self, env: impl Into<Box<dyn Env>>) -> Self {
        self.env = Some(env.into());
        self
    }

    /// Set the fallback value for `name`, returned when no rule matches.
    ///
    /// The setting also becomes known to [`load`](SettingStore::load).
    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        self.options.insert(name.clone());
        self.defaults.insert(name, value.into());
        self
    }

    /// Make `name` known to [`load`](SettingStore::load) without a fallback value.
    pub fn with_option(mut self, name: impl Into<String>) -> Self {
        self.options.insert(name.into());
        self
    }

    /// The fallback value of setting `name`.
    pub fn default_value(&self, name: &str) -> Option<&Value> {
        self.defaults.get(name)
    }

    /// Register a hook called with the setting name after every change.
    pub fn subscribe(&self, hook: impl Fn(&str) + Send + Sync + 'static) {
        lock(&self.hooks).push(Arc::new(hook));
    }

    /// Replace the raw string of setting `name`.
    ///
    /// `None` unsets the setting. With `persist`, the value is also written
    /// to the environment binding. A binding may ignore writes:
    /// [`ProcessEnv`](crate::env::ProcessEnv) does, because changing
    /// environment variables is `unsafe` while other threads may read them.
    pub fn set(&self, name: &str, value: Option<&str>, persist: bool) {
        let setting = Setting::new(value.map(str::to_string));
        lock(&self.settings).insert(name.to_string(), setting);

        if persist {
            if let Some(env) = &self.env {
                env.set(name, value);
            }
        }

        // hooks may read the store again, so they run outside the settings lock
        let hooks = lock(&self.hooks).clone();
        for hook in hooks {
            hook(name);
        }
    }

    /// The raw string of setting `name`.
    pub fn get(&self, name: &str) -> Option<String> {
        lock(&self.settings)
            .entry(name.to_string())
            .or_default()
            .raw
            .clone()
    }

    /// The value of setting `name` that applies to the logger `logger`.
    ///
    /// Falls back to the setting's default when no rule matches and returns
    /// `None` when there is no default either. An empty logger name resolves
    /// the global value.
    pub fn resolve(&self, name: &str, logger: &str) -> Option<Value> {
        let mut settings = lock(&self.settings);
        let Setting { raw, rules, cache } = settings.entry(name.to_string()).or_default();

        if let Some(value) = cache.get(logger) {
            return value.clone();
        }

        let rules =
            rules.get_or_insert_with(|| parse(raw.as_deref().unwrap_or_default(), name == DEBUG));
        let value = evaluate(rules, logger, self.defaults.get(name)).cloned();
        cache.insert(logger.to_string(), value.clone());
        value
    }

    /// The parsed rules of setting `name`.
    pub fn rules(&self, name: &str) -> Vec<Rule> {
        let mut settings = lock(&self.settings);
        let Setting { raw, rules, .. } = settings.entry(name.to_string()).or_default();
        rules
            .get_or_insert_with(|| parse(raw.as_deref().unwrap_or_default(), name == DEBUG))
            .clone()
    }

    /// A snapshot of every setting that currently has a raw string.
    pub fn settings(&self) -> BTreeMap<String, String> {
        lock(&self.settings)
            .iter()
            .filter_map(|(name, setting)| Some((name.clone(), setting.raw.clone()?)))
            .collect()
    }

    /// Reload settings from the environment binding.
    ///
    /// Loads only `name` if given, otherwise every known setting and
    /// [`DEBUG`]. Loaded values are not written back. Does nothing without an
    /// environment binding.
    pub fn load(&self, name: Option<&str>) {
        let Some(env) = &self.env else {
            return;
        };

        match name {
            Some(name) => self.set(name, env.get(name).as_deref(), false),
            None => {
                let names = self
                    .options
                    .iter()
                    .map(String::as_str)
                    .chain((!self.options.contains(DEBUG)).then_some(DEBUG));
                for name in names {
                    self.set(name, env.get(name).as_deref(), false);
                }
            }
        }
    }

    /// Enable debug output for the loggers matching `expression`.
    ///
    /// This replaces the previous expression:
    ///
    /// ```
    /// use ulog::setting::SettingStore;
    ///
    /// let store = SettingStore::new();
    /// store.enable("libA");
    /// store.enable("libB");
    /// assert!(!store.enabled("libA"));
    /// assert!(store.enabled("libB"));
    ///
    /// store.enable("libA,libB");
    /// assert!(store.enabled("libA"));
    /// assert!(store.enabled("libB"));
    /// ```
    pub fn enable(&self, expression: &str) {
        self.set(DEBUG, Some(expression), false);
    }

    /// Disable debug output for all loggers.
    pub fn disable(&self) {
        self.set(DEBUG, Some(""), false);
    }

    /// Whether debug output is enabled for `logger`.
    pub fn enabled(&self, logger: &str) -> bool {
        self.resolve(DEBUG, logger).is_some()
    }
}
