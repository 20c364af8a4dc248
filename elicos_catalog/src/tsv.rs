use std::{collections::BTreeMap, fs, path::Path};

use async_trait::async_trait;
use elicos_pool::{FetchError, ImageItem, ItemFetcher};
use tracing::debug;

use crate::{error::CatalogError, tag_slug};

/// TSV 格式的本地图片目录：
///
/// - `tag<TAB>src<TAB>alt`
/// - alt 可省略，默认使用 tag 原文
/// - 允许 `#` 开头注释行与空行
///
/// tag 按 `tag_slug` 归一化后匹配；条目 id 为 `{slug}-{序号}`，序号按文件内出现顺序从 0 开始。
#[derive(Debug, Clone, Default)]
pub struct TsvImageCatalog {
    map: BTreeMap<String, Vec<ImageItem>>,
}

impl TsvImageCatalog {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_tsv_str(&s)
    }

    pub fn from_tsv_str(s: &str) -> Result<Self, CatalogError> {
        let mut map: BTreeMap<String, Vec<ImageItem>> = BTreeMap::new();

        for (idx, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut it = line.split('\t');
            let tag = it.next().unwrap_or("").trim();
            let src = it.next().unwrap_or("").trim();
            let slug = tag_slug(tag);
            if slug.is_empty() || src.is_empty() {
                return Err(CatalogError::MissingField { line: idx + 1 });
            }
            let alt = it
                .next()
                .map(str::trim)
                .filter(|x| !x.is_empty())
                .unwrap_or(tag);

            let entries = map.entry(slug.clone()).or_default();
            let id = format!("{slug}-{}", entries.len());
            entries.push(ImageItem::new(id, src, alt));
        }

        Ok(Self { map })
    }

    /// 目录中的全部 tag（已归一化，字典序）。
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// 某个 tag 下的图片总数。
    pub fn len_for(&self, tag: &str) -> usize {
        self.map.get(&tag_slug(tag)).map_or(0, Vec::len)
    }

    /// 第 `page` 页（从 1 开始）的图片；越界返回空。
    pub fn page(&self, tag: &str, page: u32, chunk_size: usize) -> Vec<ImageItem> {
        let Some(entries) = self.map.get(&tag_slug(tag)) else {
            return Vec::new();
        };
        if page == 0 || chunk_size == 0 {
            return Vec::new();
        }
        let start = (page as usize - 1).saturating_mul(chunk_size);
        entries.iter().skip(start).take(chunk_size).cloned().collect()
    }
}

#[async_trait]
impl ItemFetcher<ImageItem> for TsvImageCatalog {
    async fn fetch(
        &self,
        tag: &str,
        page: u32,
        chunk_size: usize,
    ) -> Result<Vec<ImageItem>, FetchError> {
        let items = self.page(tag, page, chunk_size);
        debug!(tag, page, chunk_size, found = items.len(), "catalog lookup");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# tag\tsrc\talt\n\
        cat\t/img/cat-a.jpg\ttabby cat\n\
        cat\t/img/cat-b.jpg\n\
        \n\
        Red Apple\t/img/apple.jpg\tan apple\n\
        cat\t/img/cat-c.jpg\tblack cat\n";

    #[test]
    fn parses_entries_per_tag() {
        let catalog = TsvImageCatalog::from_tsv_str(SAMPLE).unwrap();
        assert_eq!(catalog.tags().collect::<Vec<_>>(), ["cat", "red_apple"]);
        assert_eq!(catalog.len_for("CAT"), 3);
        assert_eq!(catalog.len_for(" red apple "), 1);
        assert_eq!(catalog.len_for("dog"), 0);
    }

    #[test]
    fn ids_follow_file_order_and_alt_defaults_to_tag() {
        let catalog = TsvImageCatalog::from_tsv_str(SAMPLE).unwrap();
        let cats = catalog.page("cat", 1, 10);
        assert_eq!(cats[0], ImageItem::new("cat-0", "/img/cat-a.jpg", "tabby cat"));
        assert_eq!(cats[1], ImageItem::new("cat-1", "/img/cat-b.jpg", "cat"));
        assert_eq!(cats[2].id, "cat-2");
    }

    #[test]
    fn pages_are_one_based() {
        let catalog = TsvImageCatalog::from_tsv_str(SAMPLE).unwrap();
        assert_eq!(catalog.page("cat", 1, 2).len(), 2);
        assert_eq!(catalog.page("cat", 2, 2)[0].id, "cat-2");
        assert!(catalog.page("cat", 3, 2).is_empty());
        assert!(catalog.page("cat", 0, 2).is_empty());
    }

    #[test]
    fn missing_src_reports_line() {
        let err = TsvImageCatalog::from_tsv_str("cat\t/a.jpg\ndog\n").unwrap_err();
        assert!(matches!(err, CatalogError::MissingField { line: 2 }));
    }
}
