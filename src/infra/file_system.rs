use crate::domain::models::CollectorConfig;
use log::debug;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Component, Path};
use walkdir::{DirEntry, WalkDir};

/// Walker over `root` that never follows links and yields a directory's
/// files before its subdirectories, each group ordered by name.
pub fn source_walker(root: &Path) -> WalkDir {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by(files_first_by_name)
}

fn files_first_by_name(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Decides whether the walker may enter `entry`. Non-directories always pass.
/// Excluded names are pruned at any depth and checked first; below the root
/// only include-set directories are entered.
pub fn should_descend(entry: &DirEntry, config: &CollectorConfig) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }

    let name = entry.file_name().to_string_lossy();
    if is_excluded_dir(&name, &config.exclude_dirs) {
        debug!("Pruning excluded directory: {}", entry.path().display());
        return false;
    }

    if entry.depth() == 1 && !is_included_top_level(&name, &config.include_dirs) {
        debug!("Pruning directory outside include set: {}", entry.path().display());
        return false;
    }

    true
}

pub fn is_excluded_dir(name: &str, exclude_dirs: &[String]) -> bool {
    exclude_dirs.iter().any(|dir| dir == name)
}

pub fn is_included_top_level(name: &str, include_dirs: &[String]) -> bool {
    include_dirs.iter().any(|dir| dir == name)
}

/// A directory qualifies for file emission when it is the root (empty
/// relative path) or its first segment is in the include set.
pub fn directory_qualifies(relative_dir: &Path, include_dirs: &[String]) -> bool {
    match relative_dir.components().find(|c| !matches!(c, Component::CurDir)) {
        None => true,
        Some(Component::Normal(segment)) => {
            is_included_top_level(&segment.to_string_lossy(), include_dirs)
        }
        Some(_) => false,
    }
}

pub fn matches_extension(file_name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
}

/// Regular files, plus symlinks that do not point at a directory. Dangling
/// links pass so the read failure gets reported.
pub fn is_collectable_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir())
}

/// `path` relative to `root`, `/`-separated regardless of platform.
pub fn relative_display(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if segments.is_empty() {
        relative.display().to_string()
    } else {
        segments.join("/")
    }
}

pub fn read_file_contents(path: &Path) -> io::Result<String> {
    debug!("Reading file contents: {}", path.display());
    let contents = fs::read_to_string(path)?;
    debug!("Read {} bytes from file", contents.len());
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn touch(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = File::create(path).unwrap();
        write!(file, "{}", content).unwrap();
    }

    #[test]
    fn test_read_file_contents() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "test.ts", "export const x = 1;\n");

        let contents = read_file_contents(&temp_dir.path().join("test.ts")).unwrap();
        assert_eq!(contents, "export const x = 1;\n");
    }

    #[test]
    fn test_read_file_contents_rejects_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.js");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let err = read_file_contents(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_read_nonexistent_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.ts");

        let err = read_file_contents(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_matches_extension() {
        let extensions = names(&[".ts", ".tsx", ".css"]);

        assert!(matches_extension("page.tsx", &extensions));
        assert!(matches_extension("index.d.ts", &extensions));
        assert!(matches_extension("globals.css", &extensions));
        assert!(!matches_extension("readme.md", &extensions));
        assert!(!matches_extension("ts", &extensions));
        assert!(!matches_extension("anything.ts", &[]));
    }

    #[test]
    fn test_directory_qualifies() {
        let include = names(&["app", "lib"]);

        assert!(directory_qualifies(Path::new(""), &include));
        assert!(directory_qualifies(Path::new("."), &include));
        assert!(directory_qualifies(Path::new("app"), &include));
        assert!(directory_qualifies(Path::new("app/portfolio/[slug]"), &include));
        assert!(directory_qualifies(Path::new("./lib/three"), &include));
        assert!(!directory_qualifies(Path::new("src"), &include));
        assert!(!directory_qualifies(Path::new("src/app"), &include));
    }

    #[test]
    fn test_exclude_and_include_sets() {
        let exclude = names(&["node_modules", ".git"]);
        let include = names(&["components"]);

        assert!(is_excluded_dir("node_modules", &exclude));
        assert!(!is_excluded_dir("node_modules_backup", &exclude));
        assert!(is_included_top_level("components", &include));
        assert!(!is_included_top_level("component", &include));
    }

    #[test]
    fn test_relative_display() {
        let root = Path::new("/project");

        assert_eq!(relative_display(Path::new("/project/app/x.ts"), root), "app/x.ts");
        assert_eq!(relative_display(Path::new("./app/x.ts"), Path::new(".")), "app/x.ts");
        assert_eq!(relative_display(Path::new("/elsewhere/y.ts"), root), "elsewhere/y.ts");

        let nested: PathBuf = ["/project", "components", "ui", "Cursor.tsx"].iter().collect();
        assert_eq!(relative_display(&nested, root), "components/ui/Cursor.tsx");
    }

    #[test]
    fn test_walker_prunes_and_orders_entries() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "b.ts", "");
        touch(root, "a.ts", "");
        touch(root, "app/page.tsx", "");
        touch(root, "app/node_modules/dep.js", "");
        touch(root, "node_modules/y.js", "");
        touch(root, "scripts/build.js", "");

        let config = CollectorConfig {
            root: root.to_path_buf(),
            ..CollectorConfig::default()
        };

        let visited: Vec<String> = source_walker(root)
            .into_iter()
            .filter_entry(|e| should_descend(e, &config))
            .filter_map(Result::ok)
            .filter(|e| e.depth() > 0)
            .map(|e| relative_display(e.path(), root))
            .collect();

        assert_eq!(visited, vec!["a.ts", "b.ts", "app", "app/page.tsx"]);
    }
}
