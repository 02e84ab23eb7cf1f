use relative_path::{RelativePath, RelativePathBuf};
use std::path::{Path, PathBuf};

/* 📖 # Why use RelativePathBuf for FilePath?

All data files live next to the working directory the program was started in.
Wrapping RelativePathBuf keeps every PAL path relative to the PAL's base directory,
so a RealPal rooted in a temp dir can never touch files outside it.
*/

/// Type-safe wrapper for file paths relative to PAL base directory.
///
/// # Examples
///
/// ```
/// use pantry_base::FilePath;
///
/// let path = FilePath::from("pantry_data.txt");
/// assert_eq!(path.to_string(), "pantry_data.txt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilePath(RelativePathBuf);

impl FilePath {
    /// Returns the underlying RelativePath.
    pub fn as_relative(&self) -> &RelativePath {
        &self.0
    }

    /// Converts to a regular Path for use with std::fs operations.
    /// This returns the relative path portion without a base directory.
    pub fn as_path(&self) -> &Path {
        Path::new(self.as_relative().as_str())
    }

    /// Resolves this path against `base`.
    pub fn to_path(&self, base: &Path) -> PathBuf {
        self.0.to_path(base)
    }
}

impl From<&str> for FilePath {
    fn from(s: &str) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<String> for FilePath {
    fn from(s: String) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<&RelativePath> for FilePath {
    fn from(p: &RelativePath) -> Self {
        Self(p.to_relative_path_buf())
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<RelativePath> for FilePath {
    fn as_ref(&self) -> &RelativePath {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path_from_str() {
        let path = FilePath::from("pantry_data.txt");
        assert_eq!(path.as_path(), Path::new("pantry_data.txt"));
    }

    #[test]
    fn test_file_path_from_relative_path() {
        let rp = RelativePath::new("exports/low_quantity_products.txt");
        let path = FilePath::from(rp);
        assert_eq!(
            path.as_path(),
            Path::new("exports/low_quantity_products.txt")
        );
    }

    #[test]
    fn test_file_path_resolves_against_base() {
        let path = FilePath::from("pantry_data.txt");
        assert_eq!(
            path.to_path(Path::new("/home/user")),
            PathBuf::from("/home/user/pantry_data.txt")
        );
    }

    #[test]
    fn test_file_path_equality() {
        assert_eq!(FilePath::from("a.txt"), FilePath::from(String::from("a.txt")));
        assert_ne!(FilePath::from("a.txt"), FilePath::from("b.txt"));
    }
}
