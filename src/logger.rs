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

use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;

use crate::Level;
use crate::format;
use crate::format::Format;
use crate::output;
use crate::output::Output;
use crate::record::Record;
use crate::registry::Context;
use crate::setting::FORMAT;
use crate::setting::LEVEL;
use crate::setting::OUTPUT;
use crate::setting::SettingStore;
use crate::setting::Value;
use crate::utils::lock;
use crate::utils::parse_components;

/// A named logger.
///
/// Loggers are created by [`Registry::logger`](crate::Registry::logger) and
/// read their level, outputs and formats from the registry's settings. The
/// resolved options are kept in an active state that is refreshed whenever a
/// setting changes, so a logging call only compares levels and writes.
///
/// # Examples
///
/// ```
/// let registry = ulog::builder()
///     .no_env()
///     .default_setting("output", "")
///     .build();
/// let logger = registry.logger("libA");
///
/// logger.info(format_args!("hello {}", "world"));
/// assert!(logger.enabled(ulog::Level::WARN));
/// assert!(!logger.enabled(ulog::Level::DEBUG));
/// ```
pub struct Logger {
    name: String,
    context: Arc<Context>,
    overrides: Mutex<Overrides>,
    // held from reading the settings until the new active state is stored
    refreshing: Mutex<()>,
    active: Mutex<Arc<Active>>,
}

#[derive(Debug, Default)]
struct Overrides {
    level: Option<Level>,
    output: Option<String>,
    format: Option<String>,
}

#[derive(Debug)]
struct Active {
    level: Level,
    outputs: Vec<(String, Arc<dyn Output>)>,
    formats: Vec<Box<dyn Format>>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = self.active();
        let outputs = active.outputs.iter().map(|(name, _)| name).collect::<Vec<_>>();
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &active.level)
            .field("outputs", &outputs)
            .field("formats", &active.formats)
            .finish_non_exhaustive()
    }
}

impl Logger {
    pub(crate) fn new(name: impl Into<String>, context: Arc<Context>) -> Self {
        let logger = Logger {
            name: name.into(),
            context,
            overrides: Mutex::new(Overrides::default()),
            refreshing: Mutex::new(()),
            active: Mutex::new(Arc::new(Active {
                level: Level::NONE,
                outputs: vec![],
                formats: vec![],
            })),
        };
        logger.refresh();
        logger
    }

    /// The name of this logger.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The effective level of this logger.
    ///
    /// This is the level override if set, else the `level` setting, raised
    /// to at least [`Level::DEBUG`] while the `debug` setting enables this
    /// logger. A level that cannot be parsed falls back to the default
    /// `level` setting, then to [`Level::INFO`].
    pub fn level(&self) -> Level {
        let level = lock(&self.overrides).level;
        resolve_level(&self.context.store, &self.name, level)
    }

    /// The output components of this logger, like `console|stderr`.
    pub fn output(&self) -> Option<String> {
        self.option(OUTPUT, |overrides| overrides.output.clone())
    }

    /// The format components of this logger, like `columns(time msg)`.
    pub fn format(&self) -> Option<String> {
        self.option(FORMAT, |overrides| overrides.format.clone())
    }

    fn option(&self, name: &str, get: impl Fn(&Overrides) -> Option<String>) -> Option<String> {
        let value = get(&lock(&self.overrides));
        value.or_else(|| {
            self.context
                .store
                .resolve(name, &self.name)
                .map(|value| value.to_string())
        })
    }

    /// Override the level of this logger. `None` restores the setting.
    ///
    /// Overrides are kept when settings change.
    pub fn set_level(&self, level: Option<Level>) {
        lock(&self.overrides).level = level;
        self.refresh();
    }

    /// Override the outputs of this logger. `None` restores the setting.
    pub fn set_output(&self, output: Option<&str>) {
        lock(&self.overrides).output = output.map(str::to_string);
        self.refresh();
    }

    /// Override the formats of this logger. `None` restores the setting.
    pub fn set_format(&self, format: Option<&str>) {
        lock(&self.overrides).format = format.map(str::to_string);
        self.refresh();
    }

    /// Recompute the active level, outputs and formats from the settings.
    ///
    /// Concurrent refreshes of the same logger run one after another, so the
    /// last one to finish has read the latest settings.
    pub fn refresh(&self) {
        let _refreshing = lock(&self.refreshing);
        let level = self.level();

        let outputs = self
            .output()
            .map(|value| parse_components(&value))
            .unwrap_or_default()
            .into_iter()
            .filter_map(|component| {
                let output = self.context.outputs.get(&component.name)?;
                Some((component.name, output.clone()))
            })
            .collect();

        let formats = self
            .format()
            .map(|value| parse_components(&value))
            .unwrap_or_default()
            .into_iter()
            .filter_map(|component| {
                let factory = self.context.formats.get(&component.name)?;
                Some(factory(&component.config))
            })
            .collect();

        *lock(&self.active) = Arc::new(Active {
            level,
            outputs,
            formats,
        });
    }

    fn active(&self) -> Arc<Active> {
        lock(&self.active).clone()
    }

    /// Whether a line at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        level != Level::NONE && level <= self.active().level
    }

    /// Write a line at `level` to every output of this logger.
    ///
    /// Output errors are handed to the registry's trap.
    pub fn emit(&self, level: Level, args: fmt::Arguments) {
        let active = self.active();
        if level == Level::NONE || level > active.level {
            return;
        }

        let record = Record::new(level, &self.name, args.to_string());
        let line = format::render(&active.formats, &record);
        for (name, output) in &active.outputs {
            if let Err(err) = output::write(output.as_ref(), &record, &line) {
                let err = err.with_context("output", name).with_context("logger", &self.name);
                self.context.trap.trap(&err);
            }
        }
    }

    /// Write an [`ERROR`](Level::ERROR) line.
    pub fn error(&self, args: fmt::Arguments) {
        self.emit(Level::ERROR, args);
    }

    /// Write a [`WARN`](Level::WARN) line.
    pub fn warn(&self, args: fmt::Arguments) {
        self.emit(Level::WARN, args);
    }

    /// Write an [`INFO`](Level::INFO) line.
    pub fn info(&self, args: fmt::Arguments) {
        self.emit(Level::INFO, args);
    }

    /// Write a [`LOG`](Level::LOG) line.
    pub fn log(&self, args: fmt::Arguments) {
        self.emit(Level::LOG, args);
    }

    /// Write a [`DEBUG`](Level::DEBUG) line.
    pub fn debug(&self, args: fmt::Arguments) {
        self.emit(Level::DEBUG, args);
    }

    /// Write a [`TRACE`](Level::TRACE) line.
    pub fn trace(&self, args: fmt::Arguments) {
        self.emit(Level::TRACE, args);
    }

    /// Flush every output of this logger.
    pub fn flush(&self) {
        for (name, output) in &self.active().outputs {
            if let Err(err) = output.flush() {
                let err = err.with_context("output", name).with_context("logger", &self.name);
                self.context.trap.trap(&err);
            }
        }
    }
}

/// The effective level of the logger `name`, given its level override.
pub(crate) fn resolve_level(store: &SettingStore, name: &str, level: Option<Level>) -> Level {
    let level = level.unwrap_or_else(|| {
        store
            .resolve(LEVEL, name)
            .and_then(|value| value.to_level())
            .or_else(|| store.default_value(LEVEL).and_then(Value::to_level))
            .unwrap_or(Level::INFO)
    });

    if store.enabled(name) {
        level.max(Level::DEBUG)
    } else {
        level
    }
}
