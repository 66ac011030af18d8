// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Remote path helpers
//!
//! Remote paths are POSIX-style `/`-separated strings. Normalization
//! is deliberately shallow: backslashes become forward slashes and
//! empty segments are collapsed, nothing more.

/// Normalize a remote path: forward slashes only, no empty segments.
pub fn normalize(path: &str) -> String {
    let replaced = path.replace('\\', "/");
    let absolute = replaced.starts_with('/');
    let joined = replaced
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Full ancestor chain of a relative path, shallowest first:
/// `a/b/c` yields `a`, `a/b`, `a/b/c`.
///
/// Creating directories in this order guarantees each mkdir's parent
/// already exists.
pub fn ancestor_chain(path: &str) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = String::new();
    for segment in normalize(path).split('/').filter(|s| !s.is_empty()) {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(segment);
        chain.push(current.clone());
    }
    chain
}

/// Text after the final `/`, or the whole path when there is none.
pub fn trailing_segment(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_converts_backslashes() {
        assert_eq!(normalize("a\\b\\c"), "a/b/c");
        assert_eq!(normalize("a/b/c"), "a/b/c");
    }

    #[test]
    fn test_normalize_collapses_empty_segments() {
        assert_eq!(normalize("a//b/"), "a/b");
        assert_eq!(normalize("/data//tmp"), "/data/tmp");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("/"), "/");
    }

    #[test]
    fn test_ancestor_chain_root_to_leaf() {
        assert_eq!(ancestor_chain("a/b/c"), vec!["a", "a/b", "a/b/c"]);
        assert_eq!(ancestor_chain("single"), vec!["single"]);
        assert!(ancestor_chain("").is_empty());
    }

    #[test]
    fn test_ancestor_chain_normalizes_first() {
        assert_eq!(ancestor_chain("a\\b"), vec!["a", "a/b"]);
        assert_eq!(ancestor_chain("a//b"), vec!["a", "a/b"]);
    }

    #[test]
    fn test_trailing_segment() {
        assert_eq!(trailing_segment("tmp/work"), "work");
        assert_eq!(trailing_segment("a/b/c"), "c");
        assert_eq!(trailing_segment("leaf"), "leaf");
        assert_eq!(trailing_segment("trailing/"), "");
    }
}
