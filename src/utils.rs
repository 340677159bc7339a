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

use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

/// Components configured by `output` and `format` values.
///
/// A value is a pipe-separated list of `name` or `name(config)` items, e.g.
/// `console|columns(time level msg)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Component {
    pub(crate) name: String,
    pub(crate) config: String,
}

pub(crate) fn parse_components(value: &str) -> Vec<Component> {
    value
        .split('|')
        .filter_map(|item| {
            let item = item.trim();
            let (name, config) = match (item.find('('), item.rfind(')')) {
                (Some(start), Some(end)) if start < end => (&item[..start], &item[start + 1..end]),
                _ => (item, ""),
            };
            let name = name.trim();
            (!name.is_empty()).then(|| Component {
                name: name.to_string(),
                config: config.trim().to_string(),
            })
        })
        .collect()
}

// poisoning is ignored, every critical section leaves its data consistent
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
