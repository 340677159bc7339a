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
use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::Weak;

use crate::Level;
use crate::Logger;
use crate::env::Env;
use crate::env::ProcessEnv;
use crate::format::Columns;
use crate::format::Format;
use crate::format::FormatFactory;
use crate::format::Plain;
use crate::logger::resolve_level;
use crate::output::Console;
use crate::output::Output;
use crate::output::Stderr;
use crate::output::Stdout;
use crate::output::Testing;
use crate::setting::DEBUG;
use crate::setting::FORMAT;
use crate::setting::LEVEL;
use crate::setting::OUTPUT;
use crate::setting::SettingStore;
use crate::setting::Value;
use crate::trap::DefaultTrap;
use crate::trap::Trap;
use crate::utils::lock;

type Loggers = Mutex<BTreeMap<String, Arc<Logger>>>;

/// Shared by a registry and all of its loggers.
pub(crate) struct Context {
    pub(crate) store: SettingStore,
    pub(crate) outputs: BTreeMap<String, Arc<dyn Output>>,
    pub(crate) formats: BTreeMap<String, FormatFactory>,
    pub(crate) trap: Box<dyn Trap>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("store", &self.store)
            .field("outputs", &self.outputs)
            .field("formats", &self.formats.keys().collect::<Vec<_>>())
            .field("trap", &self.trap)
            .finish()
    }
}

/// Create a new [`RegistryBuilder`] with the built-in outputs and formats.
///
/// # Examples
///
/// ```
/// let registry = ulog::builder().build();
/// registry.logger("libA").warn(format_args!("disk almost full"));
/// ```
pub fn builder() -> RegistryBuilder {
    RegistryBuilder::new()
}

/// A registry of named loggers sharing one [`SettingStore`].
///
/// Cloning a registry is cheap; clones share the store and the loggers.
#[derive(Clone)]
pub struct Registry {
    context: Arc<Context>,
    loggers: Arc<Loggers>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("context", &self.context)
            .field("loggers", &lock(&self.loggers).keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Registry {
    /// Create a new [`RegistryBuilder`].
    pub fn builder() -> RegistryBuilder {
        builder()
    }

    /// The logger named `name`, created on first use.
    pub fn logger(&self, name: &str) -> Arc<Logger> {
        let mut loggers = lock(&self.loggers);
        if let Some(logger) = loggers.get(name) {
            return logger.clone();
        }

        let logger = Arc::new(Logger::new(name, self.context.clone()));
        loggers.insert(name.to_string(), logger.clone());
        logger
    }

    /// The logger named `name`, if it was created already.
    pub fn find(&self, name: &str) -> Option<Arc<Logger>> {
        lock(&self.loggers).get(name).cloned()
    }

    /// The effective level of the logger `name` without creating it.
    pub fn level(&self, name: &str) -> Level {
        match self.find(name) {
            Some(logger) => logger.level(),
            None => resolve_level(&self.context.store, name, None),
        }
    }

    /// Every logger created so far, ordered by name.
    pub fn loggers(&self) -> Vec<Arc<Logger>> {
        lock(&self.loggers).values().cloned().collect()
    }

    /// The settings of this registry.
    pub fn store(&self) -> &SettingStore {
        &self.context.store
    }

    /// Replace the raw string of setting `name` and refresh every logger.
    ///
    /// See [`SettingStore::set`].
    pub fn set(&self, name: &str, value: Option<&str>, persist: bool) {
        self.context.store.set(name, value, persist);
    }

    /// The raw string of setting `name`.
    pub fn get(&self, name: &str) -> Option<String> {
        self.context.store.get(name)
    }

    /// The value of setting `name` that applies to the logger `logger`.
    pub fn resolve(&self, name: &str, logger: &str) -> Option<Value> {
        self.context.store.resolve(name, logger)
    }

    /// Reload settings from the environment binding.
    ///
    /// See [`SettingStore::load`].
    pub fn load(&self, name: Option<&str>) {
        self.context.store.load(name);
    }

    /// Enable debug output for the loggers matching `expression`.
    pub fn enable(&self, expression: &str) {
        self.context.store.enable(expression);
    }

    /// Disable debug output for all loggers.
    pub fn disable(&self) {
        self.context.store.disable();
    }

    /// Whether debug output is enabled for `logger`.
    pub fn enabled(&self, logger: &str) -> bool {
        self.context.store.enabled(logger)
    }

    /// Flush every logger.
    pub fn flush(&self) {
        for logger in self.loggers() {
            logger.flush();
        }
    }

    /// Set up this registry as the global logger of the [`log`] crate.
    ///
    /// The target of a `log` record selects the logger, so
    /// `log::info!(target: "libA", "..")` is written by `libA`.
    ///
    /// # Errors
    ///
    /// Return an error if a global logger has already been set.
    pub fn try_apply(&self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self.clone()))?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }

    /// Set up this registry as the global logger of the [`log`] crate.
    ///
    /// # Panics
    ///
    /// Panic if the global logger has already been set.
    pub fn apply(&self) {
        self.try_apply()
            .expect("Registry::apply must be called before the global logger initialized");
    }
}

/// A builder for configuring a [`Registry`].
///
/// # Examples
///
/// ```
/// use ulog::env::MemoryEnv;
/// use ulog::output::Stderr;
///
/// let env = MemoryEnv::default();
/// env.insert("log", "warn; libA=debug");
///
/// let registry = ulog::builder()
///     .env(env)
///     .output("errors", Stderr::default())
///     .default_setting("output", "errors")
///     .build();
///
/// assert_eq!(registry.logger("libA").level(), ulog::Level::DEBUG);
/// assert_eq!(registry.logger("libB").level(), ulog::Level::WARN);
/// ```
#[must_use = "call `build` to construct a registry"]
pub struct RegistryBuilder {
    env: Option<Box<dyn Env>>,
    defaults: BTreeMap<String, Value>,
    outputs: BTreeMap<String, Arc<dyn Output>>,
    formats: BTreeMap<String, FormatFactory>,
    trap: Box<dyn Trap>,
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("env", &self.env)
            .field("defaults", &self.defaults)
            .field("outputs", &self.outputs)
            .field("formats", &self.formats.keys().collect::<Vec<_>>())
            .field("trap", &self.trap)
            .finish()
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Create a builder reading the process environment.
    ///
    /// The process environment is never written: [`ProcessEnv`] ignores
    /// writes because changing environment variables is `unsafe` while other
    /// threads may read them. Settings set with `persist` then only change in
    /// memory. Use [`env`](RegistryBuilder::env) with a
    /// [`MemoryEnv`](crate::env::MemoryEnv) or another [`Env`] to keep them.
    ///
    /// The defaults are `level=info` and `output=console`. The outputs
    /// `console`, `stdout`, `stderr` and `testing` and the formats `plain`
    /// and `columns` are registered.
    pub fn new() -> Self {
        RegistryBuilder {
            env: Some(ProcessEnv::default().into()),
            defaults: BTreeMap::new(),
            outputs: BTreeMap::new(),
            formats: BTreeMap::new(),
            trap: DefaultTrap::default().into(),
        }
        .default_setting(LEVEL, "info")
        .default_setting(OUTPUT, "console")
        .output("console", Console::default())
        .output("stdout", Stdout::default())
        .output("stderr", Stderr::default())
        .output("testing", Testing::default())
        .format("plain", |_| Plain::default())
        .format("columns", Columns::new)
    }

    /// Load and persist settings with `env` instead of the process environment.
    pub fn env(mut self, env: impl Into<Box<dyn Env>>) -> Self {
        self.env = Some(env.into());
        self
    }

    /// Do not bind the settings to any environment.
    pub fn no_env(mut self) -> Self {
        self.env = None;
        self
    }

    /// Set the fallback value of setting `name`.
    pub fn default_setting(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    /// Register `output` under `name`, replacing any output of that name.
    pub fn output(mut self, name: impl Into<String>, output: impl Output) -> Self {
        self.outputs.insert(name.into(), Arc::new(output));
        self
    }

    /// Register a format factory under `name`.
    ///
    /// The factory receives the configuration written in parentheses after
    /// the name, or an empty string.
    pub fn format<F, T>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&str) -> T + Send + Sync + 'static,
        T: Format,
    {
        let factory: FormatFactory =
            Arc::new(move |config: &str| -> Box<dyn Format> { Box::new(factory(config)) });
        self.formats.insert(name.into(), factory);
        self
    }

    /// Set the trap receiving errors raised by outputs.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Build the registry and load every setting from the environment.
    pub fn build(self) -> Registry {
        let mut store = SettingStore::new()
            .with_option(DEBUG)
            .with_option(FORMAT);
        if let Some(env) = self.env {
            store = store.with_env(env);
        }
        for (name, value) in self.defaults {
            store = store.with_default(name, value);
        }

        let context = Arc::new(Context {
            store,
            outputs: self.outputs,
            formats: self.formats,
            trap: self.trap,
        });
        let loggers = Arc::new(Loggers::default());

        let weak = Arc::downgrade(&loggers);
        context.store.subscribe(move |_| refresh_all(&weak));

        let registry = Registry { context, loggers };
        registry.load(None);
        registry
    }
}

fn refresh_all(loggers: &Weak<Loggers>) {
    let Some(loggers) = loggers.upgrade() else {
        return;
    };
    // refreshing reads the store, so the map is released first
    let loggers = lock(&loggers).values().cloned().collect::<Vec<_>>();
    for logger in loggers {
        logger.refresh();
    }
}
