//! Builtin Category Definitions
//!
//! include行を分類するビルトインカテゴリ。
//! 定義順がそのまま判定順・出力順になる。

/// include行のカテゴリ
///
/// 優先度は 0, 1, 2, 3, 5, 9。4, 6, 7, 8 は予約済みの欠番。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// 編集中ファイル自身のヘッダ（`"foo.h"` for `foo.cpp`）
    SelfHeader,
    /// 拡張子なしの標準ヘッダ（`<vector>`）
    System,
    /// `.h` 付きのヘッダ（`<stdio.h>`）
    SystemHeader,
    /// パス区切りを含むヘッダ（`<sys/types.h>`）
    Nested,
    /// `""` で囲まれたヘッダ
    Quoted,
    /// その他（マクロinclude等）
    Other,
}

impl Category {
    /// 固定の優先度（小さいほど先に出力）
    pub const fn priority(self) -> u8 {
        match self {
            Self::SelfHeader => 0,
            Self::System => 1,
            Self::SystemHeader => 2,
            Self::Nested => 3,
            Self::Quoted => 5,
            Self::Other => 9,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::SelfHeader => "self",
            Self::System => "system",
            Self::SystemHeader => "system-header",
            Self::Nested => "nested",
            Self::Quoted => "quoted",
            Self::Other => "other",
        }
    }
}

/// ヘッダトークンの判定ルール
#[derive(Debug, Clone, Copy)]
pub enum HeaderRule {
    /// ファイル名から組み立てた `"<stem>.h"` との文字列比較
    SelfHeader,
    /// 正規表現（トークン全体に対して評価）
    Pattern(&'static str),
    /// 常にマッチ
    Any,
}

/// ビルトインカテゴリの静的定義
#[derive(Debug, Clone)]
pub struct BuiltinCategory {
    pub category: Category,
    pub description: &'static str,
    pub rule: HeaderRule,
}

/// ビルトインカテゴリ（優先度順）
pub const BUILTIN_CATEGORIES: &[BuiltinCategory] = &[
    BuiltinCategory {
        category: Category::SelfHeader,
        description: "Header matching the file being sorted",
        rule: HeaderRule::SelfHeader,
    },
    BuiltinCategory {
        category: Category::System,
        description: "Angle-bracket header without extension or path",
        rule: HeaderRule::Pattern(r"^<[a-zA-Z0-9_]+>$"),
    },
    BuiltinCategory {
        category: Category::SystemHeader,
        description: "Angle-bracket .h header without path",
        rule: HeaderRule::Pattern(r"^<[a-zA-Z0-9_]+\.h>$"),
    },
    BuiltinCategory {
        category: Category::Nested,
        description: "Angle-bracket header with a path separator",
        rule: HeaderRule::Pattern(r"^<.*/"),
    },
    BuiltinCategory {
        category: Category::Quoted,
        description: "Quoted project header",
        rule: HeaderRule::Pattern(r#"^".*"$"#),
    },
    BuiltinCategory {
        category: Category::Other,
        description: "Anything else",
        rule: HeaderRule::Any,
    },
];
