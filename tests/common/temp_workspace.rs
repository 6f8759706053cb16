use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Represents a test fixture: a list of files and their contents.
#[derive(Debug)]
pub struct Fixture {
    /// files in fixture
    pub files: Vec<(PathBuf, String)>,
}

/// Parses a fixture where each file starts with a `//- path` line.
/// ## Panics
/// if content appears before the first `//- path` line
pub fn parse_fixture(input: &str) -> Fixture {
    let mut files = Vec::new();
    let mut current_path: Option<PathBuf> = None;
    let mut current_content = String::new();

    for line in input.lines() {
        if let Some(path) = line.strip_prefix("//- ") {
            if let Some(p) = current_path.take() {
                files.push((p, current_content.clone()));
                current_content.clear();
            }
            // Store relative path (trim leading slash)
            current_path = Some(PathBuf::from(path.trim().trim_start_matches('/')));
        } else {
            assert!(
                current_path.is_some() || line.trim().is_empty(),
                "fixture content before first //- path line: {line}"
            );
            current_content.push_str(line);
            current_content.push('\n');
        }
    }

    if let Some(p) = current_path {
        files.push((p, current_content));
    }

    Fixture { files }
}

/// A project tree written into a temporary directory.
pub struct TestWorkspace {
    /// Temporary folder for the workspace
    pub root: TempDir,
    /// fixture for the workspace
    pub fixture: Fixture,
    /// Absolute root path
    canonical_root: PathBuf,
}

impl TestWorkspace {
    /// creates new workspace from a fixture
    /// ## Panics
    pub fn new(fixture: &str) -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        let fixture = parse_fixture(fixture);

        for (path, content) in &fixture.files {
            let abs = root.path().join(path);
            std::fs::create_dir_all(abs.parent().unwrap()).unwrap();
            std::fs::write(&abs, content).unwrap();
        }

        let canonical_root = root
            .path()
            .canonicalize()
            .expect("Failed to canonicalize root");

        Self {
            root,
            fixture,
            canonical_root,
        }
    }

    /// Returns the canonicalized root path (resolves symlinks like /var -> /private/var on macOS)
    pub fn path(&self) -> &Path {
        &self.canonical_root
    }

    /// Converts a relative path to an absolute path
    pub fn apath(&self, path: &str) -> PathBuf {
        self.canonical_root.join(path)
    }

    /// Writes raw bytes to a file in the workspace
    pub fn write_bytes(&self, path: &str, bytes: &[u8]) -> PathBuf {
        let abs = self.apath(path);
        std::fs::create_dir_all(abs.parent().unwrap()).unwrap();
        std::fs::write(&abs, bytes).unwrap();
        abs
    }

    /// Returns `paths` relative to the root, `/`-separated and sorted
    pub fn relative(&self, paths: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = paths
            .iter()
            .map(|p| {
                p.strip_prefix(&self.canonical_root)
                    .unwrap_or_else(|_| panic!("{} is outside the workspace", p.display()))
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        names.sort();
        names
    }
}
