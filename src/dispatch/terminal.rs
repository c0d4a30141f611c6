use std::path::{Path, PathBuf};

/// Finds the terminal emulator a command is launched in.
pub trait TerminalResolver {
    fn resolve(&self) -> Option<PathBuf>;

    /// Names shown to the user when nothing was found.
    fn describe(&self) -> String {
        super::DEFAULT_TERMINALS.join(" / ")
    }
}

/// Probes candidate program names on `PATH`, first hit wins.
///
/// Candidates containing a `/` are checked as paths directly.
#[derive(Debug, Clone)]
pub struct PathResolver {
    candidates: Vec<String>,
    search_path: Option<std::ffi::OsString>,
}

impl PathResolver {
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates,
            search_path: std::env::var_os("PATH"),
        }
    }

    /// Probe an explicit search path instead of the process `PATH`.
    #[cfg(test)]
    pub fn with_search_path(mut self, search_path: impl Into<std::ffi::OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    fn find(&self, name: &str) -> Option<PathBuf> {
        if name.contains('/') {
            let p = Path::new(name);
            return is_executable(p).then(|| p.to_path_buf());
        }
        let paths = self.search_path.as_ref()?;
        std::env::split_paths(paths)
            .map(|dir| dir.join(name))
            .find(|candidate| is_executable(candidate))
    }
}

impl TerminalResolver for PathResolver {
    fn resolve(&self) -> Option<PathBuf> {
        let found = self.candidates.iter().find_map(|name| self.find(name));
        match &found {
            Some(p) => tracing::debug!(terminal = %p.display(), "resolved terminal emulator"),
            None => tracing::warn!(candidates = ?self.candidates, "no terminal emulator on PATH"),
        }
        found
    }

    fn describe(&self) -> String {
        self.candidates.join(" / ")
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn make_program(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let p = dir.join(name);
        std::fs::write(&p, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&p, std::fs::Permissions::from_mode(mode)).unwrap();
        p
    }

    fn default_candidates() -> Vec<String> {
        vec!["x-terminal-emulator".into(), "gnome-terminal".into()]
    }

    #[test]
    fn first_candidate_wins() {
        let dir = TempDir::new().unwrap();
        let x = make_program(dir.path(), "x-terminal-emulator", 0o755);
        make_program(dir.path(), "gnome-terminal", 0o755);

        let r = PathResolver::new(default_candidates()).with_search_path(dir.path());
        assert_eq!(r.resolve(), Some(x));
    }

    #[test]
    fn falls_back_to_second_candidate() {
        let dir = TempDir::new().unwrap();
        let g = make_program(dir.path(), "gnome-terminal", 0o755);

        let r = PathResolver::new(default_candidates()).with_search_path(dir.path());
        assert_eq!(r.resolve(), Some(g));
    }

    #[test]
    fn searches_path_entries_in_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        make_program(second.path(), "gnome-terminal", 0o755);
        let expected = make_program(first.path(), "gnome-terminal", 0o755);

        let joined = std::env::join_paths([first.path(), second.path()]).unwrap();
        let r = PathResolver::new(default_candidates()).with_search_path(joined);
        assert_eq!(r.resolve(), Some(expected));
    }

    #[test]
    fn non_executable_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        make_program(dir.path(), "x-terminal-emulator", 0o644);

        let r = PathResolver::new(default_candidates()).with_search_path(dir.path());
        assert_eq!(r.resolve(), None);
    }

    #[test]
    fn absolute_candidate_is_checked_directly() {
        let dir = TempDir::new().unwrap();
        let kitty = make_program(dir.path(), "kitty", 0o755);

        let r = PathResolver::new(vec![kitty.display().to_string()]).with_search_path("");
        assert_eq!(r.resolve(), Some(kitty));
    }

    #[test]
    fn empty_search_path_finds_nothing() {
        let r = PathResolver::new(default_candidates()).with_search_path("");
        assert_eq!(r.resolve(), None);
    }
}
