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

use std::sync::Arc;
use std::sync::Mutex;

use ulog::Error;
use ulog::Output;
use ulog::Record;
use ulog::env::MemoryEnv;

#[derive(Debug, Clone, Default)]
struct Capture(Arc<Mutex<Vec<String>>>);

impl Output for Capture {
    fn log(&self, record: &Record, line: &str) -> Result<(), Error> {
        self.0
            .lock()
            .unwrap()
            .push(format!("{} {}", record.name(), line));
        Ok(())
    }
}

// logging while a message is being formatted must not deadlock
#[test]
fn log_records_follow_target_settings() {
    let env = MemoryEnv::default();
    env.insert("log", "warn; libA=debug");
    let capture = Capture::default();
    let registry = ulog::builder()
        .env(env)
        .output("capture", capture.clone())
        .default_setting("output", "capture")
        .build();
    registry.apply();

    struct Thing<'a>(&'a str);

    impl std::fmt::Display for Thing<'_> {
        fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            log::warn!(target: "libB", "formatting ({})", self.0);
            f.write_str(self.0)
        }
    }

    log::debug!(target: "libA", "debugging {}", Thing("aha"));
    log::info!(target: "libB", "dropped");

    registry.set("level", Some("info"), false);
    log::info!(target: "libB", "kept");
    log::logger().flush();

    let lines = capture.0.lock().unwrap().clone();
    assert_eq!(
        lines,
        ["libB formatting (aha)", "libA debugging aha", "libB kept"]
    );
}
