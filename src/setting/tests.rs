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
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use super::*;
use crate::env::Env;
use crate::env::MemoryEnv;

fn render(rules: &[Rule]) -> String {
    rules
        .iter()
        .map(|rule| rule.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn text(store: &SettingStore, name: &str, logger: &str) -> Option<String> {
    store.resolve(name, logger).map(|value| value.to_string())
}

#[test]
fn parse_targeted_and_implied() {
    let rules = parse("info; libA=warn; libB=error", false);

    assert_eq!(rules.len(), 3);
    assert_eq!(rules[0].value(), &Value::from("warn"));
    assert_eq!(rules[0].include()[0].glob(), "libA");
    assert!(!rules[0].is_implied());
    assert_eq!(rules[1].value(), &Value::from("error"));
    assert_eq!(rules[2].value(), &Value::from("info"));
    assert_eq!(rules[2].include()[0].glob(), "*");
    assert!(rules[2].is_implied());
}

#[test]
fn parse_implied_rules_go_last() {
    let a = parse("warn; libA=error", false);
    let b = parse("libA=error; warn", false);

    insta::assert_snapshot!(render(&a), @"libA=error; warn");
    assert_eq!(render(&a), render(&b));
}

#[test]
fn parse_multiple_implied_rules_keep_their_order() {
    let rules = parse("warn; libA=error; info", false);
    insta::assert_snapshot!(render(&rules), @"libA=error; warn; info");

    assert_eq!(evaluate(&rules, "other", None), Some(&Value::from("warn")));
}

#[test]
fn parse_escaped_semicolon() {
    let rules = parse("a\\;b=warn", false);

    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].include().len(), 1);
    assert_eq!(rules[0].include()[0].glob(), "a;b");
    assert_eq!(rules[0].value(), &Value::from("warn"));
}

#[test]
fn parse_escaped_semicolon_in_value() {
    let rules = parse("libA=one\\;two; three", false);

    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].value(), &Value::from("one;two"));
    assert_eq!(rules[1].value(), &Value::from("three"));
}

#[test]
fn parse_expression_lists() {
    let rules = parse("lib*,-libC=error; a b,, c=warn", false);

    assert_eq!(rules.len(), 2);
    let globs = |patterns: &[Pattern]| {
        patterns
            .iter()
            .map(|p| p.glob().to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(globs(rules[0].include()), ["lib*"]);
    assert_eq!(globs(rules[0].exclude()), ["libC"]);
    assert_eq!(globs(rules[1].include()), ["a", "b", "c"]);
    assert!(rules[1].exclude().is_empty());
}

#[test]
fn parse_splits_on_first_equals_only() {
    let rules = parse("libA=key=value", false);

    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].include()[0].glob(), "libA");
    assert_eq!(rules[0].value(), &Value::from("key=value"));
}

#[test]
fn parse_is_lenient() {
    assert!(parse("", false).is_empty());
    assert!(parse("  ;; ; ", false).is_empty());

    // empty value keeps its expressions
    let rules = parse("libA=", false);
    assert_eq!(rules.len(), 1);
    assert!(!rules[0].is_implied());
    assert_eq!(rules[0].value(), &Value::from(""));

    // missing expressions make the rule implied
    let rules = parse("=warn", false);
    assert_eq!(rules.len(), 1);
    assert!(rules[0].is_implied());
    assert_eq!(rules[0].value(), &Value::from("warn"));
}

#[test]
fn parse_legacy_enable_string() {
    let rules = parse("libA,libB -libB:x*", true);

    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].value(), &Value::Level(Level::DEBUG));
    assert!(rules[0].matches("libA"));
    assert!(rules[0].matches("libB"));
    assert!(!rules[0].matches("libB:xyz"));
    assert!(!rules[0].matches("libC"));
}

#[test]
fn parse_legacy_accepts_explicit_values() {
    let rules = parse("libA=trace", true);

    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].value(), &Value::from("trace"));
}

#[test]
fn scenario_targeted_levels() {
    let store = SettingStore::new();
    store.set("level", Some("info; libA=warn; libB=error"), false);

    assert_eq!(text(&store, "level", "libA").as_deref(), Some("warn"));
    assert_eq!(text(&store, "level", "libB").as_deref(), Some("error"));
    assert_eq!(text(&store, "level", "libC").as_deref(), Some("info"));
    assert_eq!(text(&store, "level", "").as_deref(), Some("info"));
    assert_eq!(
        store.get("level").as_deref(),
        Some("info; libA=warn; libB=error")
    );
}

#[test]
fn scenario_exclusion_falls_through() {
    let store = SettingStore::new().with_default("level", "fallback");
    store.set("level", Some("lib*,-libC=error; libC=warn"), false);

    assert_eq!(text(&store, "level", "libC").as_deref(), Some("warn"));
    assert_eq!(text(&store, "level", "libX").as_deref(), Some("error"));
    assert_eq!(text(&store, "level", "other").as_deref(), Some("fallback"));
}

#[test]
fn scenario_unset_setting_returns_fallback() {
    let store = SettingStore::new().with_default("level", "info");

    for logger in ["", "libA", "libB"] {
        assert_eq!(text(&store, "level", logger).as_deref(), Some("info"));
    }
    assert!(store.rules("level").is_empty());

    store.set("level", Some(""), false);
    assert_eq!(text(&store, "level", "libA").as_deref(), Some("info"));
    assert!(store.rules("level").is_empty());

    store.set("level", None, false);
    assert_eq!(store.get("level"), None);
    assert_eq!(text(&store, "level", "libA").as_deref(), Some("info"));
}

#[test]
fn unknown_setting_resolves_to_nothing() {
    let store = SettingStore::new();
    assert_eq!(store.resolve("colour", "libA"), None);
    assert_eq!(store.get("colour"), None);
}

#[test]
fn set_invalidates_cached_values() {
    let store = SettingStore::new();
    store.set("level", Some("warn"), false);
    assert_eq!(text(&store, "level", "libA").as_deref(), Some("warn"));

    store.set("level", Some("libA=error; info"), false);
    assert_eq!(text(&store, "level", "libA").as_deref(), Some("error"));
    assert_eq!(text(&store, "level", "libB").as_deref(), Some("info"));

    // other settings keep their cache
    store.set("output", Some("console"), false);
    assert_eq!(text(&store, "level", "libA").as_deref(), Some("error"));
}

#[test]
fn resolve_is_repeatable() {
    let store = SettingStore::new();
    store.set("level", Some("lib*=debug; warn"), false);

    let first = store.resolve("level", "libA");
    for _ in 0..5 {
        assert_eq!(store.resolve("level", "libA"), first);
    }
    assert_eq!(store.get("level").as_deref(), Some("lib*=debug; warn"));
}

#[test]
fn set_notifies_hooks_synchronously() {
    let store = Arc::new(SettingStore::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::new(std::sync::Mutex::new(vec![]));

    {
        let calls = calls.clone();
        let seen = seen.clone();
        let weak = Arc::downgrade(&store);
        store.subscribe(move |name| {
            calls.fetch_add(1, Ordering::SeqCst);
            // hooks can read the store back
            let resolved = weak
                .upgrade()
                .and_then(|store| store.resolve(name, "libA"))
                .map(|value| value.to_string());
            seen.lock().unwrap().push((name.to_string(), resolved));
        });
    }

    store.set("level", Some("libA=warn"), false);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    store.enable("libA");
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0], ("level".to_string(), Some("warn".to_string())));
    assert_eq!(seen[1], ("debug".to_string(), Some("50".to_string())));
}

#[test]
fn settings_snapshot() {
    let store = SettingStore::new();
    store.set("level", Some("warn"), false);
    store.set("output", Some("console"), false);
    store.set("format", None, false);

    let settings = store.settings();
    assert_eq!(settings.len(), 2);
    assert_eq!(settings["level"], "warn");
    assert_eq!(settings["output"], "console");
}

#[test]
fn load_reads_known_settings_from_env() {
    let env = MemoryEnv::default();
    env.insert("log", "warn; libA=debug");
    env.insert("log_output", "stderr");
    env.insert("debug", "libB");
    env.insert("log_unknown", "ignored");

    let store = SettingStore::new()
        .with_env(env.clone())
        .with_default("level", "info")
        .with_default("output", "console");
    store.load(None);

    assert_eq!(store.get("level").as_deref(), Some("warn; libA=debug"));
    assert_eq!(store.get("output").as_deref(), Some("stderr"));
    assert_eq!(store.get("unknown"), None);
    assert!(store.enabled("libB"));
    assert!(!store.enabled("libA"));

    env.insert("log", "error");
    store.load(Some("level"));
    assert_eq!(text(&store, "level", "libA").as_deref(), Some("error"));

    // a missing value unsets the setting
    env.set("level", None);
    store.load(Some("level"));
    assert_eq!(store.get("level"), None);
    assert_eq!(text(&store, "level", "libA").as_deref(), Some("info"));
}

#[test]
fn load_without_env_keeps_settings() {
    let store = SettingStore::new().with_option("level");
    store.set("level", Some("warn"), false);
    store.load(None);
    assert_eq!(store.get("level").as_deref(), Some("warn"));
}

#[test]
fn persist_writes_to_env() {
    let env = MemoryEnv::default();
    let store = SettingStore::new().with_env(env.clone());

    store.set("level", Some("debug"), false);
    assert_eq!(env.get("level"), None);

    store.set("level", Some("warn"), true);
    assert_eq!(env.raw("log").as_deref(), Some("warn"));

    store.set("level", None, true);
    assert_eq!(env.raw("log"), None);
}

#[test]
fn enable_replaces_previous_expression() {
    let store = SettingStore::new();
    assert!(!store.enabled("libA"));

    store.enable("libA");
    store.enable("libB");
    assert!(!store.enabled("libA"));
    assert!(store.enabled("libB"));

    store.enable("lib*,-libC");
    assert!(store.enabled("libA"));
    assert!(!store.enabled("libC"));
    assert_eq!(store.get(DEBUG).as_deref(), Some("lib*,-libC"));

    store.disable();
    assert!(!store.enabled("libA"));
}
