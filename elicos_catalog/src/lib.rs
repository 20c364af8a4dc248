//! `elicos_catalog`：候选来源与词汇存储的具体实现。
//!
//! - `TsvImageCatalog`：从 TSV 文件加载的本地图片目录
//! - `SyntheticImageFetcher`：按 tag 生成占位图片（演示/测试用）
//! - `UnsplashImageFetcher`：在线图片搜索，access key 取自环境变量
//! - `JsonStore` + `vocabulary`：以 JSON 文件保存词汇与其配图
//! - `lesson`：课程的增删改查，同样落在 `JsonStore`
mod error;
pub mod lesson;
mod store;
mod synthetic;
mod tsv;
mod unsplash;
pub mod vocabulary;

pub use error::{CatalogError, StoreError};
pub use lesson::Lesson;
pub use store::JsonStore;
pub use synthetic::SyntheticImageFetcher;
pub use tsv::TsvImageCatalog;
pub use unsplash::{ACCESS_KEY_ENV, UNSPLASH_API_BASE_URL, UnsplashImageFetcher};
pub use vocabulary::VocabularyWord;

/// tag 归一化：去掉首尾空白、转小写、内部空白替换为 `_`（用于 id 与路径）。
pub fn tag_slug(tag: &str) -> String {
    tag.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::tag_slug;

    #[test]
    fn slug_trims_and_lowercases() {
        assert_eq!(tag_slug("  Red Apple "), "red_apple");
        assert_eq!(tag_slug("cat"), "cat");
        assert_eq!(tag_slug("   "), "");
    }
}
