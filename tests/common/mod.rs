#![allow(dead_code)]

use {
    spoolog::Host,
    std::{
        fs,
        path::Path,
        sync::{Arc, Mutex},
    },
};

#[derive(Debug, Default)]
pub struct Captured {
    pub stdout: Vec<String>,
    pub diagnostics: Vec<String>,
    pub exits: Vec<i32>,
}

/// A host that records every side effect instead of performing it.
#[derive(Debug, Default, Clone)]
pub struct CaptureHost {
    captured: Arc<Mutex<Captured>>,
}

impl CaptureHost {
    pub fn printed(&self) -> Vec<String> {
        self.captured.lock().unwrap().stdout.clone()
    }

    pub fn diagnostics(&self) -> Vec<String> {
        self.captured.lock().unwrap().diagnostics.clone()
    }

    pub fn exits(&self) -> Vec<i32> {
        self.captured.lock().unwrap().exits.clone()
    }
}

impl Host for CaptureHost {
    fn stdout(&mut self, content: &str) {
        self.captured.lock().unwrap().stdout.push(content.to_string());
    }

    fn diagnostic(&mut self, message: &str) {
        self.captured.lock().unwrap().diagnostics.push(message.to_string());
    }

    fn terminate(&mut self, code: i32) {
        self.captured.lock().unwrap().exits.push(code);
    }
}

/// Names of the rotated files in `dir`, sorted.
pub fn rotated_files(dir: &Path, active: &str) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .flatten()
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_owned))
        .filter(|name| name != active)
        .collect();
    names.sort();
    names
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

/// Today's date the way rotated file names spell it, in UTC.
pub fn today_utc() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
