// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

pub mod api;
pub mod commands;
pub mod config;
pub mod controller;
pub mod daemon;
pub mod document;
pub mod error;
pub mod field;
pub mod inventory;
pub mod kind;
pub mod render;
pub mod request;
pub mod selector;
pub mod test_env;

/// Gets the inventory service URL used when `--server` is not given.
pub fn default_server() -> Option<String> {
    std::env::var("STACK_SERVER").ok()
}

pub const FALLBACK_SERVER: &str = "http://localhost:8080";

pub fn default_config_path() -> (String, bool) {
    match std::env::var("STACK_CONFIG") {
        Ok(conf) => (conf, true),
        Err(_) => ("/etc/stack/stack.conf".to_string(), false),
    }
}

pub fn default_listen() -> String {
    match std::env::var("STACKD_LISTEN") {
        Ok(addr) => addr,
        Err(_) => "0.0.0.0:8080".to_string(),
    }
}

/// The zone to use when `--zone` is omitted, if the environment provides one.
pub fn zone_from_env() -> Option<String> {
    std::env::var("STACK_ZONE").ok().filter(|z| !z.is_empty())
}
