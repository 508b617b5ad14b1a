//! Lexical path handling.
//!
//! Nothing here touches the filesystem: symlinks are not followed and the
//! paths need not exist.

use std::path::{Component, Path, PathBuf};

/// Resolves `.`, `..` and redundant separators purely by looking at the path.
///
/// `..` at the root of an absolute path stays at the root. Leading `..` in a
/// relative path is kept. An empty result becomes `.`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        PathBuf::from(".")
    } else {
        out.iter().collect()
    }
}

/// Whether normalized `path` lies at or below normalized `base`.
///
/// Both arguments must already be normalized. After stripping the base's
/// components only plain names may remain, which rules out a leading `..`
/// or a root when the base is `.`.
pub fn is_within(base: &Path, path: &Path) -> bool {
    let mut rest = path.components().filter(not_cur_dir);
    for expected in base.components().filter(not_cur_dir) {
        if rest.next() != Some(expected) {
            return false;
        }
    }

    rest.all(|c| matches!(c, Component::Normal(_)))
}

fn not_cur_dir(component: &Component<'_>) -> bool {
    !matches!(component, Component::CurDir)
}
