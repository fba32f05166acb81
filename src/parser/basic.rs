// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Default [`Parser`] implementation.

use std::path::{Component, Path, PathBuf};

use globwalk::GlobWalkerBuilder;

use crate::error::SourceError;

use super::Parser;

/// Default [`Parser`], reading the file system.
///
/// A location may be:
/// - a single file;
/// - a directory, searched recursively for `*.feature` files, ignoring case;
/// - a glob pattern, like `tests/features/**/*.feature`.
///
/// A location matching nothing resolves to no files.
#[derive(Clone, Copy, Debug, Default)]
pub struct Basic;

impl Parser for Basic {
    fn locate(&self, location: &str) -> Result<Vec<PathBuf>, SourceError> {
        let path = Path::new(location);

        let mut files = if path.is_file() {
            vec![path.to_path_buf()]
        } else if path.is_dir() {
            walk(location, path, "*.feature", None, true)?
        } else {
            let (base, rest) = split_glob(path);
            if rest.is_empty() {
                return Ok(Vec::new());
            }
            let depth = (!rest.contains("**"))
                .then(|| Path::new(&rest).components().count());
            walk(location, &base, &rest, depth, false)?
        };
        files.sort();
        files.dedup();

        for f in &files {
            tracing::info!(file = %f.display(), "found feature file");
        }
        Ok(files)
    }

    fn parse(&self, path: &Path) -> Result<gherkin::Feature, SourceError> {
        let env = gherkin::GherkinEnv::default();
        gherkin::Feature::parse_path(path, env).map_err(SourceError::Parse)
    }
}

/// Splits a glob `path` into the longest leading part free of glob
/// metacharacters and the pattern left.
fn split_glob(path: &Path) -> (PathBuf, String) {
    let is_glob = |c: &Component<'_>| {
        c.as_os_str().to_string_lossy().contains(GLOB_META)
    };

    let base = path
        .components()
        .take_while(|c| !is_glob(c))
        .collect::<PathBuf>();
    let rest = path
        .components()
        .skip_while(|c| !is_glob(c))
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");

    let base = if base.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        base
    };
    (base, rest)
}

const GLOB_META: &[char] = &['*', '?', '[', '{'];

fn walk(
    location: &str,
    base: &Path,
    pattern: &str,
    max_depth: Option<usize>,
    case_insensitive: bool,
) -> Result<Vec<PathBuf>, SourceError> {
    if !base.is_dir() {
        return Ok(Vec::new());
    }

    let mut builder = GlobWalkerBuilder::new(base, pattern)
        .case_insensitive(case_insensitive);
    if let Some(depth) = max_depth {
        builder = builder.max_depth(depth);
    }
    let walker = builder.build().map_err(|e| SourceError::Glob {
        pattern: location.to_owned(),
        reason: e.to_string(),
    })?;

    walker
        .filter_map(|entry| match entry {
            Ok(e) => e.file_type().is_file().then(|| Ok(e.into_path())),
            Err(e) => Some(Err(SourceError::Walk {
                pattern: location.to_owned(),
                reason: e.to_string(),
            })),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::error::SourceError;

    use super::{split_glob, Basic, Parser as _};

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
        for file in [
            "a.feature",
            "B.FEATURE",
            "notes.txt",
            "nested/c.feature",
            "nested/deeper/d.feature",
        ] {
            fs::write(dir.path().join(file), "Feature: x\n").unwrap();
        }
        dir
    }

    fn names(dir: &TempDir, files: &[std::path::PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn splits_glob_base() {
        let (base, rest) = split_glob("features/**/*.feature".as_ref());
        assert_eq!(base, std::path::PathBuf::from("features"));
        assert_eq!(rest, "**/*.feature");

        let (base, rest) = split_glob("*.feature".as_ref());
        assert_eq!(base, std::path::PathBuf::from("."));
        assert_eq!(rest, "*.feature");
    }

    #[test]
    fn locates_a_single_file() {
        let dir = tree();
        let file = dir.path().join("notes.txt");
        let found = Basic.locate(file.to_str().unwrap()).unwrap();
        assert_eq!(found, [file]);
    }

    #[test]
    fn walks_directories_recursively() {
        let dir = tree();
        let found = Basic.locate(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(
            names(&dir, &found),
            [
                "B.FEATURE",
                "a.feature",
                "nested/c.feature",
                "nested/deeper/d.feature",
            ],
        );
    }

    #[test]
    fn honours_glob_depth() {
        let dir = tree();
        let root = dir.path().to_str().unwrap();

        let shallow = Basic.locate(&format!("{root}/*.feature")).unwrap();
        assert_eq!(names(&dir, &shallow), ["a.feature"]);

        let nested = Basic.locate(&format!("{root}/nested/*.feature")).unwrap();
        assert_eq!(names(&dir, &nested), ["nested/c.feature"]);

        let deep = Basic.locate(&format!("{root}/**/*.feature")).unwrap();
        assert_eq!(
            names(&dir, &deep),
            ["a.feature", "nested/c.feature", "nested/deeper/d.feature"],
        );
    }

    #[test]
    fn missing_location_is_empty() {
        let dir = tree();
        let root = dir.path().to_str().unwrap();

        for location in [
            format!("{root}/nope.feature"),
            format!("{root}/nope/*.feature"),
        ] {
            assert!(Basic.locate(&location).unwrap().is_empty());
        }
    }

    #[test]
    fn reports_unreadable_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.feature");

        let err = Basic.parse(&path).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }
}
