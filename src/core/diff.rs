/// Dry-run 模式輸出的 unified diff。
///
/// 改寫是逐行進行、不增減行數，所以舊新內容一定逐行對齊，
/// 直接比對同位置的行即可，不需要完整的 diff 演算法。
pub fn unified_diff(path: &str, old: &str, new: &str) -> String {
    let old_lines: Vec<&str> = old.split('\n').collect();
    let new_lines: Vec<&str> = new.split('\n').collect();

    let changed: Vec<usize> = old_lines
        .iter()
        .zip(new_lines.iter())
        .enumerate()
        .filter(|(_, (o, n))| o != n)
        .map(|(i, _)| i)
        .collect();

    if changed.is_empty() {
        return String::new();
    }

    // 連續的變更行合併為同一個 hunk
    let mut hunks: Vec<(usize, usize)> = Vec::new();
    let mut start = changed[0];
    let mut prev = changed[0];
    for &idx in &changed[1..] {
        if idx != prev + 1 {
            hunks.push((start, prev));
            start = idx;
        }
        prev = idx;
    }
    hunks.push((start, prev));

    let mut out = String::new();
    out.push_str(&format!("--- {}\n+++ {}\n", path, path));

    for (first, last) in hunks {
        let len = last - first + 1;
        out.push_str(&format!("@@ -{},{} +{},{} @@\n", first + 1, len, first + 1, len));
        for idx in first..=last {
            out.push_str(&format!("-{}\n", old_lines[idx]));
        }
        for idx in first..=last {
            out.push_str(&format!("+{}\n", new_lines[idx]));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_contents_produce_empty_diff() {
        assert_eq!(unified_diff("a.md", "same\n", "same\n"), "");
    }

    #[test]
    fn test_single_changed_line() {
        let diff = unified_diff("doc.md", "one\n[x](A.md)\nthree", "one\n[x](a.md)\nthree");
        assert!(diff.starts_with("--- doc.md\n+++ doc.md\n"));
        assert!(diff.contains("@@ -2,1 +2,1 @@\n"));
        assert!(diff.contains("-[x](A.md)\n"));
        assert!(diff.contains("+[x](a.md)\n"));
        // 未變更的行不出現在輸出中
        assert!(!diff.contains("one"));
        assert!(!diff.contains("three"));
    }

    #[test]
    fn test_consecutive_changes_share_a_hunk() {
        let old = "[a](A.md)\n[b](B.md)\nsame\n[c](C.md)";
        let new = "[a](a.md)\n[b](b.md)\nsame\n[c](c.md)";
        let diff = unified_diff("doc.md", old, new);

        assert!(diff.contains("@@ -1,2 +1,2 @@\n"));
        assert!(diff.contains("@@ -4,1 +4,1 @@\n"));
        assert_eq!(diff.matches("@@ -").count(), 2);
    }
}
