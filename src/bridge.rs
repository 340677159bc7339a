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

//! Bridge from the [`log`] crate facade.
//!
//! A [`Registry`] installed with [`Registry::apply`] receives every `log`
//! record. The record target names the logger, so
//! `log::warn!(target: "libA", "..")` follows the settings of `libA`.

use crate::Level;
use crate::Registry;

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::ERROR,
            log::Level::Warn => Level::WARN,
            log::Level::Info => Level::INFO,
            log::Level::Debug => Level::DEBUG,
            log::Level::Trace => Level::TRACE,
        }
    }
}

impl log::Log for Registry {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        // checks alone do not create loggers
        let level = Level::from(metadata.level());
        match self.find(metadata.target()) {
            Some(logger) => logger.enabled(level),
            None => level <= self.level(metadata.target()),
        }
    }

    fn log(&self, record: &log::Record) {
        self.logger(record.target())
            .emit(record.level().into(), *record.args());
    }

    fn flush(&self) {
        Registry::flush(self);
    }
}

#[cfg(test)]
mod tests {
    use log::Log;

    use super::*;
    use crate::env::MemoryEnv;

    #[test]
    fn level_mapping() {
        assert_eq!(Level::from(log::Level::Error), Level::ERROR);
        assert_eq!(Level::from(log::Level::Info), Level::INFO);
        assert_eq!(Level::from(log::Level::Trace), Level::TRACE);
    }

    fn debug(target: &str) -> log::Metadata<'_> {
        log::MetadataBuilder::new()
            .level(log::Level::Debug)
            .target(target)
            .build()
    }

    #[test]
    fn target_selects_logger() {
        let env = MemoryEnv::default();
        env.insert("log", "warn; libA=debug");
        let registry = crate::builder()
            .env(env)
            .default_setting("output", "")
            .build();

        assert!(Log::enabled(&registry, &debug("libA")));
        assert!(!Log::enabled(&registry, &debug("libB")));
        assert!(registry.loggers().is_empty());

        let lib_b = registry.logger("libB");
        lib_b.set_level(Some(Level::DEBUG));
        assert!(Log::enabled(&registry, &debug("libB")));
        assert_eq!(registry.loggers().len(), 1);

        registry.log(
            &log::Record::builder()
                .level(log::Level::Warn)
                .target("libC")
                .args(format_args!("bridged"))
                .build(),
        );
        assert!(registry.find("libC").is_some());
        assert_eq!(registry.loggers().len(), 2);
    }
}
