#![allow(dead_code)]

use std::path::{Path, PathBuf};

use age::secrecy::ExposeSecret;
use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::TempDir;
use assert_fs::prelude::*;

/// Shell stand-in for `age`: logs its argv to `calls.log` next to itself,
/// fails on inputs containing CORRUPT, otherwise copies the input to the
/// `-o` path with the `ENC:` prefix stripped.
const FAKE_AGE: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> "$(dirname "$0")/calls.log"
out=""
input=""
while [ $# -gt 0 ]; do
    case "$1" in
        -d|--decrypt) shift ;;
        -o|--output) out="$2"; shift 2 ;;
        -i|--identity|-r|--recipient) shift 2 ;;
        *) input="$1"; shift ;;
    esac
done
if grep -q CORRUPT "$input"; then
    echo "age: error: failed to read header: parsing age header: invalid" >&2
    exit 1
fi
sed 's/^ENC://' "$input" > "$out"
"#;

/// A throwaway dotfiles checkout with its own HOME and a fake `age` on PATH.
pub struct Sandbox {
    pub dir: TempDir,
    pub home: PathBuf,
    pub bin: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");
        let bin = dir.path().join("bin");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::create_dir_all(&bin).unwrap();

        let sandbox = Self { dir, home, bin };
        sandbox.install_tool("age");
        sandbox
    }

    /// Put another copy of the fake tool on PATH under `name`.
    pub fn install_tool(&self, name: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin.join(name);
        std::fs::write(&path, FAKE_AGE).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `dotage` running inside the sandbox.
    pub fn dotage(&self) -> Command {
        let path = format!(
            "{}:{}",
            self.bin.display(),
            std::env::var("PATH").unwrap_or_default()
        );
        let mut cmd = cargo_bin_cmd!("dotage");
        cmd.current_dir(self.path())
            .env("HOME", &self.home)
            .env("PATH", path)
            .env_remove("DOTAGE_CONFIG")
            .env_remove("DOTAGE_LOG")
            .arg("--no-color");
        cmd
    }

    pub fn write(&self, rel: &str, content: &str) {
        self.dir.child(rel).write_str(content).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path().join(rel)).unwrap()
    }

    /// Write a real age identity file at `rel` (relative to the sandbox).
    pub fn identity(&self, rel: &str) -> PathBuf {
        let identity = age::x25519::Identity::generate();
        let contents = format!(
            "# public key: {}\n{}\n",
            identity.to_public(),
            identity.to_string().expose_secret()
        );
        let path = self.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Argument lines the fake tool was called with, one per invocation.
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.bin.join("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
