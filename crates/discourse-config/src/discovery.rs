//! Configuration file discovery.
//!
//! Project settings live in `.discourse.toml` files anywhere above the working
//! directory; personal defaults live in `~/.discourse.toml`.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".discourse.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global
/// (`~/.discourse.toml`) last. Discovery stops at the first file that sets
/// `root = true`; the global file is skipped in that case.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let stops = is_root_config(&candidate);
        configs.push(candidate);
        if stops {
            return configs;
        }
    }

    if let Some(global) = global_config_path().filter(|g| g.is_file())
        && !configs.contains(&global)
    {
        configs.push(global);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.discourse.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::TestDir;

    /// Drops the global config (if the test machine has one) from a discovery result.
    fn local_only(configs: &[PathBuf]) -> Vec<&PathBuf> {
        configs.iter().filter(|p| !is_global_config(p)).collect()
    }

    #[test]
    fn test_discover_no_configs() {
        let test_dir = TestDir::new();
        let subdir = test_dir.dir("a/b/c");

        let configs = discover_config_files(&subdir);
        assert!(local_only(&configs).is_empty());
    }

    #[test]
    fn test_discover_precedence_order() {
        let test_dir = TestDir::new();
        let root_config = test_dir.config("", "[topics]\ncount = 3\n");
        let leaf_config = test_dir.config("reports/2019", "[graph]\nthreshold = 2\n");
        let working_dir = test_dir.dir("reports/2019/annex");

        let configs = discover_config_files(&working_dir);
        let local = local_only(&configs);

        assert_eq!(local.len(), 2);
        assert_eq!(local[0], &leaf_config);
        assert_eq!(local[1], &root_config);
    }

    #[test]
    fn test_discover_skips_directory_named_like_config() {
        let test_dir = TestDir::new();
        fs::create_dir_all(test_dir.path().join(CONFIG_FILENAME)).unwrap();
        let subdir = test_dir.dir("subdir");

        let configs = discover_config_files(&subdir);
        assert!(local_only(&configs).is_empty());
    }

    #[test]
    fn test_root_config_stops_discovery() {
        let test_dir = TestDir::new();
        test_dir.config("", "[topics]\ncount = 3\n");
        let root_config = test_dir.config("project", "root = true\n");
        let working_dir = test_dir.dir("project/corpus");

        let configs = discover_config_files(&working_dir);

        assert_eq!(configs, vec![root_config]);
    }

    #[test]
    fn test_root_false_does_not_stop_discovery() {
        let test_dir = TestDir::new();
        let parent_config = test_dir.config("", "[topics]\ncount = 3\n");
        let mid_config = test_dir.config("project", "root = false\n");
        let working_dir = test_dir.dir("project/src");

        let configs = discover_config_files(&working_dir);
        let local = local_only(&configs);

        assert_eq!(local, vec![&mid_config, &parent_config]);
    }

    #[test]
    fn test_global_config_path_has_filename() {
        let path = global_config_path().unwrap();
        assert!(path.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&path));
        assert!(!is_global_config(Path::new("/elsewhere/.discourse.toml")));
    }
}
