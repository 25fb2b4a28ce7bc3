//! # Wrapped-program registry
//!
//! The composer wraps a fixed set of text-processing programs. Each entry
//! records the one piece of argument grammar the expression model needs:
//! whether the program wants an end-of-options `--` marker before its
//! positional argument (grep/sed/awk) or after it (jq/yq).

use std::path::{Path, PathBuf};

/// A wrapped external program and its argument grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramSpec {
    pub name: &'static str,
    /// True if the program expects `--` before its positional argument.
    pub uses_end_of_options_marker: bool,
}

pub const GREP: ProgramSpec = ProgramSpec {
    name: "grep",
    uses_end_of_options_marker: true,
};
pub const SED: ProgramSpec = ProgramSpec {
    name: "sed",
    uses_end_of_options_marker: true,
};
pub const AWK: ProgramSpec = ProgramSpec {
    name: "awk",
    uses_end_of_options_marker: true,
};
pub const JQ: ProgramSpec = ProgramSpec {
    name: "jq",
    uses_end_of_options_marker: false,
};
pub const YQ: ProgramSpec = ProgramSpec {
    name: "yq",
    uses_end_of_options_marker: false,
};

/// Every program the composer can wrap.
pub const PROGRAMS: [ProgramSpec; 5] = [GREP, SED, AWK, JQ, YQ];

pub fn lookup(name: &str) -> Option<ProgramSpec> {
    PROGRAMS.into_iter().find(|p| p.name == name)
}

/// Resolve `name` against the `PATH` environment variable, returning the
/// first matching executable. Used once at startup; a miss is a
/// configuration error.
pub fn find_on_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    find_in(std::env::split_paths(&path), name)
}

fn find_in(dirs: impl IntoIterator<Item = PathBuf>, name: &str) -> Option<PathBuf> {
    for dir in dirs {
        let candidate = dir.join(name);
        if is_executable(&candidate) {
            return Some(candidate);
        }
        #[cfg(windows)]
        {
            let with_exe = dir.join(format!("{name}.exe"));
            if with_exe.is_file() {
                return Some(with_exe);
            }
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
