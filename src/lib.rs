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

//! A small pluggable logging facade with rule-based per-logger settings.
//!
//! Libraries log through named [`Logger`]s. Hosts decide what is written, where
//! and how through settings, plain strings of rules that target loggers by
//! name:
//!
//! ```text
//! LOG="info; lib*,-libC=warn"
//! LOG_OUTPUT="console; libA=console|stderr"
//! LOG_FORMAT="columns(time level name:>16 msg)"
//! DEBUG="libA,libB"
//! ```
//!
//! Settings are read from an [environment binding](env) when a [`Registry`]
//! is built and may be changed at any time. Every change refreshes the loggers
//! of the registry before the call returns.
//!
//! # Examples
//!
//! ```
//! use ulog::env::MemoryEnv;
//! use ulog::Level;
//!
//! let env = MemoryEnv::default();
//! env.insert("log", "warn; libA=info");
//!
//! let registry = ulog::builder().env(env).build();
//! let logger = registry.logger("libA");
//! logger.info(format_args!("visible"));
//! assert_eq!(logger.level(), Level::INFO);
//!
//! registry.enable("libA");
//! assert_eq!(logger.level(), Level::DEBUG);
//! logger.debug(format_args!("visible as well"));
//! ```
//!
//! Records of the [`log`] crate flow through a registry installed with
//! [`Registry::apply`]:
//!
//! ```
//! ulog::builder().build().apply();
//!
//! log::warn!(target: "libA", "written by the libA logger");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod env;
pub mod format;
pub mod output;
pub mod record;
pub mod setting;
pub mod trap;

mod bridge;
mod error;
mod level;
mod logger;
mod registry;
mod utils;

pub use self::error::Error;
pub use self::format::Format;
pub use self::level::Level;
pub use self::level::ParseLevelError;
pub use self::logger::Logger;
pub use self::output::Output;
pub use self::record::Record;
pub use self::registry::Registry;
pub use self::registry::RegistryBuilder;
pub use self::registry::builder;
pub use self::setting::SettingStore;
pub use self::trap::Trap;
