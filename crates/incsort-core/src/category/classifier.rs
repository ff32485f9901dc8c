//! Include Classifier
//!
//! include行をビルトインカテゴリに振り分け、カテゴリごとに整列する。

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::builtin::{Category, HeaderRule, BUILTIN_CATEGORIES};

static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"#include\s+(<[^>]+>|"[^"]+")"#).expect("valid regex"));

/// コンパイル済みルール（BUILTIN_CATEGORIESと同順）
static COMPILED_RULES: Lazy<Vec<(Category, CompiledRule)>> = Lazy::new(|| {
    BUILTIN_CATEGORIES
        .iter()
        .map(|b| {
            let rule = match b.rule {
                HeaderRule::SelfHeader => CompiledRule::SelfHeader,
                HeaderRule::Pattern(p) => {
                    CompiledRule::Pattern(Regex::new(p).expect("valid builtin pattern"))
                }
                HeaderRule::Any => CompiledRule::Any,
            };
            (b.category, rule)
        })
        .collect()
});

enum CompiledRule {
    SelfHeader,
    Pattern(Regex),
    Any,
}

/// 分類済みのinclude行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeEntry {
    /// 元の行
    pub line: String,
    /// `<...>` または `"..."`（区切り文字込み）。抽出できなければ None
    pub header: Option<String>,
    pub category: Category,
}

/// Extract the delimited header token from an include line
pub fn extract_header(line: &str) -> Option<&str> {
    HEADER_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// `foo.cpp` → `"foo.h"`
pub fn self_header_token(file_name: &Path) -> String {
    let stem = file_name
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    format!("\"{}.h\"", stem)
}

/// include行の分類器
///
/// 自ヘッダの判定はファイル名に依存するため、ファイルごとに構築する。
#[derive(Debug, Clone)]
pub struct IncludeClassifier {
    self_header: String,
}

impl IncludeClassifier {
    pub fn new(file_name: impl AsRef<Path>) -> Self {
        Self {
            self_header: self_header_token(file_name.as_ref()),
        }
    }

    /// ヘッダトークンを分類（最初にマッチしたカテゴリを採用）
    pub fn classify_header(&self, header: &str) -> Category {
        for (category, rule) in COMPILED_RULES.iter() {
            let matched = match rule {
                CompiledRule::SelfHeader => header.eq_ignore_ascii_case(&self.self_header),
                CompiledRule::Pattern(re) => re.is_match(header),
                CompiledRule::Any => true,
            };
            if matched {
                return *category;
            }
        }
        Category::Other
    }

    /// 1行を分類。ヘッダを抽出できない行は Other
    pub fn classify(&self, line: &str) -> IncludeEntry {
        let header = extract_header(line);
        let category = header
            .map(|h| self.classify_header(h))
            .unwrap_or(Category::Other);

        IncludeEntry {
            line: line.to_string(),
            header: header.map(str::to_string),
            category,
        }
    }

    /// include行を分類・整列し、カテゴリごとに空行で区切って返す
    ///
    /// 入力中の空行は捨てる。各カテゴリ内は大文字小文字を無視した安定ソート。
    /// 空でないカテゴリの後には必ず空行が1つ入る（最後のカテゴリも含む）。
    pub fn sort_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        let mut groups: Vec<(Category, Vec<String>)> = BUILTIN_CATEGORIES
            .iter()
            .map(|b| (b.category, Vec::new()))
            .collect();

        for line in lines {
            let line: &str = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            let entry = self.classify(line);
            if let Some((_, bucket)) = groups.iter_mut().find(|(c, _)| *c == entry.category) {
                bucket.push(entry.line);
            }
        }

        let mut result = Vec::with_capacity(lines.len() + groups.len());
        for (_, mut bucket) in groups {
            if bucket.is_empty() {
                continue;
            }
            // sort_by_cached_key is stable
            bucket.sort_by_cached_key(|line| line.to_lowercase());
            result.extend(bucket);
            result.push(String::new());
        }

        result
    }
}

/// Group and sort include lines for the given file
pub fn sort_include_lines<S: AsRef<str>>(lines: &[S], file_name: impl AsRef<Path>) -> Vec<String> {
    IncludeClassifier::new(file_name).sort_lines(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category_of(file: &str, line: &str) -> Category {
        IncludeClassifier::new(file).classify(line).category
    }

    #[test]
    fn test_self_header_token() {
        assert_eq!(self_header_token(Path::new("src/Foo.cpp")), "\"Foo.h\"");
        assert_eq!(self_header_token(Path::new("Foo.CPP")), "\"Foo.h\"");
        assert_eq!(self_header_token(Path::new("widget.hpp")), "\"widget.h\"");
        assert_eq!(self_header_token(Path::new("a.b.c")), "\"a.b.h\"");
    }

    #[test]
    fn test_extract_header() {
        assert_eq!(extract_header("#include <vector>"), Some("<vector>"));
        assert_eq!(extract_header("#include \"a/b.h\" // x"), Some("\"a/b.h\""));
        assert_eq!(extract_header("#include SOME_MACRO"), None);
    }

    #[test]
    fn test_classify_keeps_line_and_header() {
        let classifier = IncludeClassifier::new("foo.cpp");

        let entry = classifier.classify("#include <sys/stat.h>  // stat");
        assert_eq!(entry.line, "#include <sys/stat.h>  // stat");
        assert_eq!(entry.header.as_deref(), Some("<sys/stat.h>"));
        assert_eq!(entry.category, Category::Nested);

        let entry = classifier.classify("#include SOME_MACRO");
        assert_eq!(entry.header, None);
        assert_eq!(entry.category, Category::Other);
    }

    #[test]
    fn test_classify_each_category() {
        assert_eq!(category_of("foo.cpp", "#include \"foo.h\""), Category::SelfHeader);
        assert_eq!(category_of("foo.cpp", "#include <vector>"), Category::System);
        assert_eq!(category_of("foo.cpp", "#include <stdio.h>"), Category::SystemHeader);
        assert_eq!(category_of("foo.cpp", "#include <sys/stat.h>"), Category::Nested);
        assert_eq!(category_of("foo.cpp", "#include \"bar.h\""), Category::Quoted);
        assert_eq!(category_of("foo.cpp", "#include SOME_MACRO"), Category::Other);
    }

    #[test]
    fn test_angle_headers_outside_named_rules_fall_through() {
        // Neither plain identifier, .h, nor nested
        assert_eq!(category_of("x.c", "#include <boost.hpp>"), Category::Other);
        assert_eq!(category_of("x.c", "#include <c++config>"), Category::Other);
    }

    #[test]
    fn test_first_match_wins_for_nested_self_header() {
        // "sub/foo.h" is quoted but not the self header token
        assert_eq!(category_of("foo.cpp", "#include \"sub/foo.h\""), Category::Quoted);
    }

    #[test]
    fn test_self_header_ignores_case() {
        assert_eq!(category_of("Foo.cpp", "#include \"foo.h\""), Category::SelfHeader);
        assert_eq!(category_of("foo.c", "#include \"FOO.H\""), Category::SelfHeader);
    }

    #[test]
    fn test_self_header_is_literal() {
        assert_eq!(category_of("a+b.cpp", "#include \"a+b.h\""), Category::SelfHeader);
        assert_eq!(category_of("a+b.cpp", "#include \"aab.h\""), Category::Quoted);
        assert_eq!(category_of("x.y.cpp", "#include \"xzy.h\""), Category::Quoted);
    }

    #[test]
    fn test_sort_example_file() {
        let lines = [
            "#include \"bar.h\"",
            "#include <vector>",
            "#include <stdio.h>",
            "#include \"foo.h\"",
            "#include <sys/stat.h>",
        ];
        let sorted = sort_include_lines(&lines, "Foo.cpp");
        assert_eq!(
            sorted,
            vec![
                "#include \"foo.h\"",
                "",
                "#include <vector>",
                "",
                "#include <stdio.h>",
                "",
                "#include <sys/stat.h>",
                "",
                "#include \"bar.h\"",
                "",
            ]
        );
    }

    #[test]
    fn test_sort_case_insensitive() {
        let lines = ["#include \"Zeta.h\"", "#include \"alpha.h\""];
        let sorted = sort_include_lines(&lines, "main.cpp");
        assert_eq!(sorted, vec!["#include \"alpha.h\"", "#include \"Zeta.h\"", ""]);
    }

    #[test]
    fn test_sort_is_stable_for_case_equal_lines() {
        let lines = ["#include <B.h>", "#include <a.h>", "#include <b.h>"];
        let sorted = sort_include_lines(&lines, "main.c");
        assert_eq!(
            sorted,
            vec!["#include <a.h>", "#include <B.h>", "#include <b.h>", ""]
        );

        let reversed = ["#include <b.h>", "#include <a.h>", "#include <B.h>"];
        let sorted = sort_include_lines(&reversed, "main.c");
        assert_eq!(
            sorted,
            vec!["#include <a.h>", "#include <b.h>", "#include <B.h>", ""]
        );
    }

    #[test]
    fn test_macro_include_kept_unchanged() {
        let lines = ["#include SOME_MACRO", "#include <map>"];
        let sorted = sort_include_lines(&lines, "m.cpp");
        assert_eq!(sorted, vec!["#include <map>", "", "#include SOME_MACRO", ""]);
    }

    #[test]
    fn test_blank_entries_dropped() {
        let lines = ["", "#include <map>", "   ", "#include <list>", "\r"];
        let sorted = sort_include_lines(&lines, "m.cpp");
        assert_eq!(sorted, vec!["#include <list>", "#include <map>", ""]);
    }

    #[test]
    fn test_empty_input() {
        let lines: [&str; 0] = [];
        assert!(sort_include_lines(&lines, "m.cpp").is_empty());
    }

    #[test]
    fn test_sort_is_idempotent() {
        let lines = [
            "#include <vector>",
            "#include \"Widget.h\"",
            "#include <sys/types.h>",
            "#include \"zeta.h\"",
            "#include \"Alpha.h\"",
            "#include <string.h>",
            "#include <algorithm>",
        ];
        let once = sort_include_lines(&lines, "widget.cpp");
        let twice = sort_include_lines(&once, "widget.cpp");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_output_respects_priority_order() {
        let lines = [
            "#include OTHER",
            "#include \"q.h\"",
            "#include <a/b.h>",
            "#include <c.h>",
            "#include <d>",
            "#include \"self.h\"",
        ];
        let classifier = IncludeClassifier::new("self.cc");
        let sorted = classifier.sort_lines(&lines);
        let priorities: Vec<u8> = sorted
            .iter()
            .filter(|l| !l.is_empty())
            .map(|l| classifier.classify(l).category.priority())
            .collect();
        assert_eq!(priorities, vec![0, 1, 2, 3, 5, 9]);
    }
}
