#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub use fcu_launcher_test_utils::{drain_events, init_tracing, with_timeout};

/// A connector folder (with `asw.csv`) and a model folder inside one temp dir.
pub struct InputFolders {
    pub root: TempDir,
    pub connector: PathBuf,
    pub model: PathBuf,
}

impl InputFolders {
    pub fn connector_str(&self) -> String {
        self.connector.to_string_lossy().into_owned()
    }

    pub fn model_str(&self) -> String {
        self.model.to_string_lossy().into_owned()
    }
}

pub fn input_folders() -> InputFolders {
    let root = tempfile::tempdir().expect("create temp dir");
    let connector = root.path().join("connector");
    let model = root.path().join("model");
    fs::create_dir_all(&connector).expect("create connector dir");
    fs::create_dir_all(&model).expect("create model dir");
    fs::write(connector.join("asw.csv"), "swc,port\n").expect("write asw.csv");
    InputFolders {
        root,
        connector,
        model,
    }
}

pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
