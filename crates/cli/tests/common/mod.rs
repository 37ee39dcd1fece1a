// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory with its own item log
pub struct TestEnv {
    pub temp: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn state_path(&self) -> PathBuf {
        self.temp.path().join("state/items.wal")
    }

    /// `dw` bound to this environment
    pub fn dw(&self) -> Command {
        let mut cmd = Command::cargo_bin("dw").expect("dw binary should build");
        cmd.current_dir(self.temp.path())
            .env("DW_STATE", self.state_path())
            .env_remove("DW_CONFIG")
            .env("RUST_LOG", "warn");
        cmd
    }

    /// Add an item with an explicit id
    pub fn add(&self, id: &str, tenant: &str, priority: i32) {
        self.dw()
            .args(["add", tenant, "weekly digest", "https://example.com/d"])
            .args(["--id", id, "--priority", &priority.to_string()])
            .assert()
            .success();
    }

    /// Parsed `dw list -o json`, optionally with extra filters
    pub fn list_json(&self, extra: &[&str]) -> Vec<serde_json::Value> {
        let output = self
            .dw()
            .args(["list", "-o", "json"])
            .args(extra)
            .output()
            .expect("dw list should run");
        assert!(output.status.success(), "dw list failed: {:?}", output);
        serde_json::from_slice(&output.stdout).expect("list output should be JSON")
    }

    /// Parsed `dw tick -o json` report
    pub fn tick_json(&self, extra: &[&str]) -> serde_json::Value {
        let output = self
            .dw()
            .args(["tick", "-o", "json"])
            .args(extra)
            .output()
            .expect("dw tick should run");
        assert!(output.status.success(), "dw tick failed: {:?}", output);
        serde_json::from_slice(&output.stdout).expect("tick output should be JSON")
    }

    /// Status and delivery count of one item
    pub fn item_state(&self, id: &str) -> (String, u64) {
        let item = self
            .list_json(&[])
            .into_iter()
            .find(|item| item["id"] == id)
            .unwrap_or_else(|| panic!("item {id} not listed"));
        (
            item["status"].as_str().unwrap_or_default().to_string(),
            item["delivery_count"].as_u64().unwrap_or_default(),
        )
    }
}
