use crate::domain::model::LinkEdit;
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

#[derive(Debug, Clone)]
pub struct RewriteRules {
    /// 絕對 URL（http/https/mailto 等）不改寫，只處理相對連結
    pub skip_absolute_urls: bool,
}

impl Default for RewriteRules {
    fn default() -> Self {
        Self {
            skip_absolute_urls: true,
        }
    }
}

// 連結樣式：[text](target) 或 ![alt](target)，target 到第一個右括號為止
fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(!?\[[^\]]*\])\(([^)]+)\)").unwrap())
}

/// 改寫單一連結目標。標題（`path "Title"` 的引號部分）保留原樣，
/// 只有第一個空白前的路徑 token 會被處理。
pub fn rewrite_target(target: &str, rules: &RewriteRules) -> String {
    let (path, rest) = match target.find(char::is_whitespace) {
        Some(idx) => target.split_at(idx),
        None => (target, ""),
    };

    if path.is_empty() {
        return target.to_string();
    }

    // 相對路徑無法被解析為 URL，能解析的就是絕對連結
    if rules.skip_absolute_urls && Url::parse(path).is_ok() {
        return target.to_string();
    }

    // 兩段替換：先全部小寫，再把底線換成連字號
    let lowered = path.to_lowercase();
    let hyphenated = lowered.replace('_', "-");

    format!("{}{}", hyphenated, rest)
}

fn rewrite_line(
    line: &str,
    rules: &RewriteRules,
    line_no: usize,
    edits: &mut Vec<LinkEdit>,
) -> String {
    link_pattern()
        .replace_all(line, |caps: &regex::Captures| {
            let label = &caps[1];
            let target = &caps[2];
            let new_target = rewrite_target(target, rules);

            if new_target != *target {
                edits.push(LinkEdit {
                    line: line_no,
                    old_target: target.to_string(),
                    new_target: new_target.clone(),
                });
            }

            format!("{}({})", label, new_target)
        })
        .into_owned()
}

/// 改寫整份文件內容，回傳新內容與所有連結的改寫紀錄。
/// 逐行處理，行數不會增減。
pub fn rewrite_contents(contents: &str, rules: &RewriteRules) -> (String, Vec<LinkEdit>) {
    let mut edits = Vec::new();

    let rewritten: Vec<String> = contents
        .split('\n')
        .enumerate()
        .map(|(idx, line)| rewrite_line(line, rules, idx + 1, &mut edits))
        .collect();

    (rewritten.join("\n"), edits)
}
