// src/repo/tree.rs
// =============================================================================
// This module turns the file listing into a list of file paths.
//
// The listing endpoint answers with nested JSON objects:
//
//   {
//       "file1": { "size": 12345 },
//       "directory1": {
//           "file2": { "size": 67890 }
//       }
//   }
//
// An object with an integer "size" is a file. Every other object is a
// directory. Anything that is not an object at all means the listing is broken.
//
// How it works:
// 1. FileTree::from_value classifies every entry once, up front
// 2. FileTree::paths walks the classified tree depth-first, in the order the
//    server listed the entries, and yields "directory1/file2"-style paths
//
// Rust concepts:
// - Enums: A node is either a File or a Directory, decided at parse time
// - Iterators: Paths are produced lazily with an explicit stack
// - Lifetimes: The iterator borrows the tree instead of copying it
// =============================================================================

use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{Error, Result};

/// A file entry in the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLeaf {
    /// Size in bytes as reported by the service
    pub size: u64,
}

/// One entry of the listing: a file, or a folder holding more entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File(FileLeaf),
    Directory(Directory),
}

/// Folder contents, kept in the order the server listed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    entries: Vec<(String, Node)>,
}

/// The whole repository listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTree {
    root: Directory,
}

impl FileTree {
    // Builds the tree from the parsed listing response
    //
    // Returns: Error::MalformedTree if the root, or any entry below it, is not
    // a JSON object. The error carries the path of the offending entry.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                root: parse_directory(map, None)?,
            }),
            other => Err(Error::MalformedTree {
                path: "/".to_string(),
                found: json_kind(&other),
            }),
        }
    }

    /// Lazily yields the path of every file, depth-first, in listing order
    pub fn paths(&self) -> impl Iterator<Item = String> + '_ {
        self.files().map(|(path, _)| path)
    }

    /// Like [`FileTree::paths`], but also hands out each file's leaf record
    pub fn files(&self) -> Files<'_> {
        Files {
            stack: vec![(None, self.root.entries.iter())],
        }
    }

    /// Number of files in the listing
    pub fn len(&self) -> usize {
        self.files().count()
    }

    pub fn is_empty(&self) -> bool {
        self.files().next().is_none()
    }

    /// Sum of all reported file sizes
    pub fn total_size(&self) -> u64 {
        self.files().map(|(_, leaf)| leaf.size).sum()
    }
}

// Classifies every entry of one JSON object
//
// Parameters:
//   map: the object to classify
//   prefix: path of the object itself (None for the root)
fn parse_directory(map: Map<String, Value>, prefix: Option<&str>) -> Result<Directory> {
    let mut entries = Vec::with_capacity(map.len());

    for (name, value) in map {
        let path = join_path(prefix, &name);

        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(Error::MalformedTree {
                    path,
                    found: json_kind(&other),
                })
            }
        };

        let node = match file_size(&object) {
            Some(size) => Node::File(FileLeaf { size }),
            None => Node::Directory(parse_directory(object, Some(&path))?),
        };
        trace!(path = %path, is_file = matches!(node, Node::File(_)), "classified listing entry");

        entries.push((name, node));
    }

    Ok(Directory { entries })
}

// Returns Some(size) when the object is a file, i.e. its "size" is an integer
//
// A string, float, bool or null "size" does not count, so such an object is
// treated as a directory. Negative sizes still mark a file; they clamp to 0.
fn file_size(object: &Map<String, Value>) -> Option<u64> {
    match object.get("size") {
        Some(Value::Number(n)) if n.is_u64() || n.is_i64() => Some(n.as_u64().unwrap_or(0)),
        _ => None,
    }
}

fn join_path(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}/{}", prefix, name),
        None => name.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Depth-first iterator over `(path, leaf)` pairs of a [`FileTree`]
pub struct Files<'a> {
    // One frame per directory being walked: its path and the entries left
    stack: Vec<(Option<String>, std::slice::Iter<'a, (String, Node)>)>,
}

impl<'a> Iterator for Files<'a> {
    type Item = (String, &'a FileLeaf);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (prefix, entries) = self.stack.last_mut()?;

            let Some((name, node)) = entries.next() else {
                self.stack.pop();
                continue;
            };

            let path = join_path(prefix.as_deref(), name);
            match node {
                Node::File(leaf) => return Some((path, leaf)),
                Node::Directory(dir) => self.stack.push((Some(path), dir.entries.iter())),
            }
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why classify up front instead of inspecting JSON while walking?
//    - The walk itself can then never fail, so paths() is a plain Iterator
//    - A broken listing is reported before any file is downloaded
//
// 2. Why an explicit stack instead of recursion?
//    - A recursive generator is not expressible in stable Rust
//    - The stack holds slice iterators, so nothing is cloned but the path
//
// 3. Where does the order come from?
//    - serde_json is built with 'preserve_order', so Map keeps keys in the
//      order they appeared in the response body
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: Value) -> FileTree {
        FileTree::from_value(value).unwrap()
    }

    #[test]
    fn test_flatten_nested_listing() {
        let tree = tree(json!({
            "a.txt": { "size": 10 },
            "sub": { "b.txt": { "size": 5 } }
        }));
        let paths: Vec<_> = tree.paths().collect();
        assert_eq!(paths, vec!["a.txt", "sub/b.txt"]);
    }

    #[test]
    fn test_listing_order_is_preserved() {
        let body = r#"{
            "zeta.md": {"size": 1},
            "alpha": {"z.rs": {"size": 2}, "a.rs": {"size": 3}},
            "beta.md": {"size": 4}
        }"#;
        let tree = tree(serde_json::from_str(body).unwrap());
        let paths: Vec<_> = tree.paths().collect();
        assert_eq!(paths, vec!["zeta.md", "alpha/z.rs", "alpha/a.rs", "beta.md"]);
    }

    #[test]
    fn test_repeated_walks_are_identical() {
        let tree = tree(json!({
            "src": { "main.rs": { "size": 1 }, "lib": { "mod.rs": { "size": 2 } } },
            "README.md": { "size": 3 }
        }));
        let first: Vec<_> = tree.paths().collect();
        let second: Vec<_> = tree.paths().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["src/main.rs", "src/lib/mod.rs", "README.md"]);
    }

    #[test]
    fn test_one_path_per_leaf() {
        let tree = tree(json!({
            "a": { "b": { "c": { "d.txt": { "size": 1 } } }, "e.txt": { "size": 2 } },
            "empty": {},
            "f.txt": { "size": 3, "sha": "abc" }
        }));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.total_size(), 6);

        // Every path is a chain of keys from the root down to a leaf
        let listing = json!({
            "a": { "b": { "c": { "d.txt": { "size": 1 } } }, "e.txt": { "size": 2 } },
            "empty": {},
            "f.txt": { "size": 3, "sha": "abc" }
        });
        for path in tree.paths() {
            let mut node = &listing;
            for part in path.split('/') {
                node = node.get(part).expect("path component exists");
            }
            assert!(node.get("size").and_then(Value::as_u64).is_some());
        }
    }

    #[test]
    fn test_empty_directories_yield_nothing() {
        let tree = tree(json!({ "empty": {}, "nested": { "also_empty": {} } }));
        assert!(tree.is_empty());
        assert_eq!(tree.paths().count(), 0);
    }

    #[test]
    fn test_non_integer_size_is_a_directory() {
        // "size" is a string, so "x" is a directory whose only entry is
        // "size": "bad", which is not an object
        let result = FileTree::from_value(json!({ "x": { "size": "bad" } }));
        match result {
            Err(Error::MalformedTree { path, found }) => {
                assert_eq!(path, "x/size");
                assert_eq!(found, "a string");
            }
            other => panic!("expected malformed tree, got {:?}", other),
        }
    }

    #[test]
    fn test_float_size_is_not_a_file() {
        let result = FileTree::from_value(json!({ "x": { "size": 1.5 } }));
        assert!(matches!(result, Err(Error::MalformedTree { .. })));
    }

    #[test]
    fn test_directory_named_size() {
        // A folder called "size" is fine as long as its value is an object
        let tree = tree(json!({ "size": { "inner.txt": { "size": 7 } } }));
        let paths: Vec<_> = tree.paths().collect();
        assert_eq!(paths, vec!["size/inner.txt"]);
    }

    #[test]
    fn test_root_must_be_object() {
        let result = FileTree::from_value(json!(["a.txt"]));
        assert!(matches!(
            result,
            Err(Error::MalformedTree { found: "an array", .. })
        ));
    }

    #[test]
    fn test_non_object_entry_is_malformed() {
        let result = FileTree::from_value(json!({ "ok.txt": { "size": 1 }, "bad": 3 }));
        match result {
            Err(Error::MalformedTree { path, .. }) => assert_eq!(path, "bad"),
            other => panic!("expected malformed tree, got {:?}", other),
        }
    }
}
