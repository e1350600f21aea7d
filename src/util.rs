use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

/// Opens `path`, naming the `kind` of file in the error context.
pub fn open(path: &Path, kind: &str) -> Result<File> {
    File::open(path).with_context(|| format!("Opening {} file `{}`", kind, path.display()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_open_missing_names_kind() {
        let err = open(Path::new("./testdata/nope.yaml"), "project").unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Opening project file `./testdata/nope.yaml`"));
    }
}
