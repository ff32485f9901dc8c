//! # Category Module
//!
//! `#include` 行をカテゴリに分類し、カテゴリ順・カテゴリ内辞書順に並べ替える。
//!
//! ## カテゴリ（優先度順）
//!
//! - **0 self**: 編集中ファイル自身のヘッダ（`foo.cpp` なら `"foo.h"`）
//! - **1 system**: `<vector>` のような拡張子なしヘッダ
//! - **2 system-header**: `<stdio.h>` のような `.h` ヘッダ
//! - **3 nested**: `<sys/types.h>` のようなパス付きヘッダ
//! - **5 quoted**: `"myclass.h"` のような `""` ヘッダ
//! - **9 other**: 上記以外（`#include SOME_MACRO` 等）
//!
//! 4, 6, 7, 8 は欠番。判定は上から順に行い、最初にマッチしたカテゴリを採用する。
//!
//! ## モジュール構成
//!
//! - `builtin`: カテゴリ定義
//! - `classifier`: 分類器と整列
//!
//! ## 使用例
//!
//! ```rust
//! use incsort_core::category::{sort_include_lines, Category, IncludeClassifier};
//!
//! let classifier = IncludeClassifier::new("widget.cpp");
//! assert_eq!(
//!     classifier.classify("#include \"widget.h\"").category,
//!     Category::SelfHeader
//! );
//!
//! let sorted = sort_include_lines(&["#include <map>", "#include \"widget.h\""], "widget.cpp");
//! assert_eq!(sorted, vec!["#include \"widget.h\"", "", "#include <map>", ""]);
//! ```

mod builtin;
mod classifier;

// Re-exports
pub use builtin::{BuiltinCategory, Category, HeaderRule, BUILTIN_CATEGORIES};
pub use classifier::{
    extract_header, self_header_token, sort_include_lines, IncludeClassifier, IncludeEntry,
};
