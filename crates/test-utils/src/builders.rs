#![allow(dead_code)]

use std::path::PathBuf;

use fcu_launcher::config::{BuildSection, ConfigFile, LauncherSection, RawConfigFile};
use fcu_launcher::types::DeploymentMode;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
    base_dir: Option<PathBuf>,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                launcher: LauncherSection::default(),
                build: BuildSection::default(),
            },
            base_dir: None,
        }
    }

    pub fn mode(mut self, mode: DeploymentMode) -> Self {
        self.config.launcher.mode = Some(mode);
        self
    }

    pub fn bundle_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.launcher.bundle_dir = Some(dir.into());
        self
    }

    pub fn app_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.launcher.app_dir = Some(dir.into());
        self
    }

    pub fn executable(mut self, name: &str) -> Self {
        self.config.launcher.executable = name.to_string();
        self
    }

    pub fn marker_file(mut self, name: &str) -> Self {
        self.config.launcher.marker_file = name.to_string();
        self
    }

    pub fn build_command(mut self, program: &str, args: &[&str]) -> Self {
        self.config.build.program = program.to_string();
        self.config.build.args = args.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        let base_dir = self.base_dir.clone();
        let config =
            ConfigFile::try_from(self.config).expect("Failed to build valid config from builder");
        match base_dir {
            Some(dir) => config.with_base_dir(dir),
            None => config,
        }
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a stand-in pipeline executable: a `/bin/sh` script that prints
/// fixed lines and exits with a fixed code.
pub struct PipelineScriptBuilder {
    body: Vec<String>,
    exit_code: i32,
}

impl PipelineScriptBuilder {
    pub fn new() -> Self {
        Self {
            body: Vec::new(),
            exit_code: 0,
        }
    }

    /// Print `line` on stdout.
    pub fn stdout(mut self, line: &str) -> Self {
        self.body.push(format!("printf '%s\\n' {}", shell_quote(line)));
        self
    }

    /// Print `line` on stderr.
    pub fn stderr(mut self, line: &str) -> Self {
        self.body.push(format!("printf '%s\\n' {} >&2", shell_quote(line)));
        self
    }

    /// Append a raw shell statement.
    pub fn raw(mut self, statement: &str) -> Self {
        self.body.push(statement.to_string());
        self
    }

    pub fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Write the script to `dir/name` and mark it executable.
    #[cfg(unix)]
    pub fn write_to(self, dir: &std::path::Path, name: &str) -> std::io::Result<PathBuf> {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        let mut script = String::from("#!/bin/sh\n");
        for statement in &self.body {
            script.push_str(statement);
            script.push('\n');
        }
        script.push_str(&format!("exit {}\n", self.exit_code));

        fs::write(&path, script)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(path)
    }
}

impl Default for PipelineScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}
