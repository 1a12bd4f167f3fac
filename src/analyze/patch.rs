//! Line-oriented helpers over unified diff text and file paths.

/// Added content lines, with the leading `+` stripped. `+++` headers are skipped.
pub fn added_lines(diff: &str) -> impl Iterator<Item = &str> {
    diff.lines().filter_map(added_content)
}

/// Added lines grouped by the `b/<path>` target of each `diff --git` section.
pub fn added_lines_by_file(diff: &str) -> Vec<(String, Vec<&str>)> {
    let mut blocks: Vec<(String, Vec<&str>)> = Vec::new();
    for line in diff.lines() {
        if line.starts_with("diff --git") {
            if let Some((_, target)) = line.split_once(" b/") {
                blocks.push((target.to_string(), Vec::new()));
            }
        } else if let Some(content) = added_content(line) {
            if let Some((_, lines)) = blocks.last_mut() {
                lines.push(content);
            }
        }
    }
    blocks
}

fn added_content(line: &str) -> Option<&str> {
    if line.starts_with("+++") {
        return None;
    }
    line.strip_prefix('+')
}

pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Extension of the final path component including the dot, or `""`.
///
/// Leading dots do not start an extension, so `.env` has none.
pub fn extension(path: &str) -> &str {
    let name = basename(path);
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(idx) => &name[stem_start + idx..],
        None => "",
    }
}

/// Portion of a path before its last `/`, if any.
pub fn parent_dir(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(dir, _)| dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIFF: &str = "\
diff --git a/src/lib.rs b/src/lib.rs
index 1111111..2222222 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -1,2 +1,3 @@
 fn keep() {}
-fn gone() {}
+fn added() {}
+++counter;
diff --git a/tests/lib_test.rs b/tests/lib_test.rs
new file mode 100644
--- /dev/null
+++ b/tests/lib_test.rs
@@ -0,0 +1 @@
+#[test]
";

    #[test]
    fn added_lines_skip_headers_and_removals() {
        let lines: Vec<_> = added_lines(DIFF).collect();
        assert_eq!(lines, vec!["fn added() {}", "#[test]"]);
    }

    #[test]
    fn added_lines_grouped_by_target_path() {
        let blocks = added_lines_by_file(DIFF);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].0, "src/lib.rs");
        assert_eq!(blocks[0].1, vec!["fn added() {}"]);
        assert_eq!(blocks[1].0, "tests/lib_test.rs");
        assert_eq!(blocks[1].1, vec!["#[test]"]);
    }

    #[test]
    fn added_lines_before_first_header_are_ignored_when_grouping() {
        let blocks = added_lines_by_file("+orphan\n");
        assert!(blocks.is_empty());
    }

    #[test]
    fn extension_follows_final_component() {
        assert_eq!(extension("src/main.py"), ".py");
        assert_eq!(extension("archive.tar.gz"), ".gz");
        assert_eq!(extension(".env"), "");
        assert_eq!(extension("config/.env.local"), ".local");
        assert_eq!(extension("v1.2/Makefile"), "");
        assert_eq!(extension(""), "");
    }

    #[test]
    fn basename_and_parent_dir() {
        assert_eq!(basename("a/b/c.txt"), "c.txt");
        assert_eq!(basename("c.txt"), "c.txt");
        assert_eq!(parent_dir("a/b/c.txt"), Some("a/b"));
        assert_eq!(parent_dir("c.txt"), None);
    }
}
