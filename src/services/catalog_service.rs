use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::TemplateEntry;
use crate::models::template::validate_weight;

/// 内置奖品数据 (group, label, weight)，顺序即 order
const DEFAULT_TEMPLATE: [(&str, &str, f64); 8] = [
    ("Money Prizes", "$10", 1.0),
    ("Money Prizes", "$20", 1.0),
    ("Money Prizes", "$50", 1.0),
    ("Money Prizes", "$100", 1.0),
    ("Money Prizes", "$200", 1.0),
    ("Money Prizes", "$500", 1.0),
    ("Money Prizes", "$1,000", 1.0),
    ("Money Prizes", "Try Again", 1.0),
];

#[derive(Debug, Deserialize)]
struct CatalogFile {
    items: Vec<TemplateEntry>,
}

/// 奖品目录 (只读，按 order 排序)，clone 共享底层数据
#[derive(Debug, Clone)]
pub struct CatalogService {
    entries: Arc<[TemplateEntry]>,
}

impl Default for CatalogService {
    fn default() -> Self {
        let entries: Vec<TemplateEntry> = DEFAULT_TEMPLATE
            .iter()
            .zip(0u32..)
            .map(|(&(group, label, weight), order)| TemplateEntry::new(group, label, weight, order))
            .collect();
        Self {
            entries: entries.into(),
        }
    }
}

impl CatalogService {
    /// 内置奖品目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 由任意条目构建目录:
    /// - 按 order 排序后必须是 0..n，不允许重复或空缺
    /// - label / group 不能为空，weight 必须是有限非负数
    pub fn from_entries(mut entries: Vec<TemplateEntry>) -> AppResult<Self> {
        if entries.is_empty() {
            return Err(AppError::ValidationError(
                "catalog must contain at least one entry".into(),
            ));
        }

        entries.sort_by_key(|e| e.order);

        for (expected, entry) in (0u32..).zip(entries.iter()) {
            if entry.order != expected {
                return Err(AppError::ValidationError(format!(
                    "catalog order must be contiguous from 0: expected {expected}, found {} ({})",
                    entry.order, entry.label
                )));
            }
            if entry.label.trim().is_empty() {
                return Err(AppError::ValidationError(format!(
                    "entry at order {} has an empty label",
                    entry.order
                )));
            }
            if entry.group.trim().is_empty() {
                return Err(AppError::ValidationError(format!(
                    "entry '{}' has an empty group",
                    entry.label
                )));
            }
            validate_weight(entry.weight)?;
        }

        Ok(Self {
            entries: entries.into(),
        })
    }

    /// 解析由 `[[items]]` 表组成的目录数据
    pub fn from_toml_str(data: &str) -> AppResult<Self> {
        let file: CatalogFile = toml::from_str(data)?;
        Self::from_entries(file.items)
    }

    /// 从 TOML 文件加载目录 (部署时替换内置数据)
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&data)?;
        log::info!(
            "Loaded prize catalog from {} ({} entries)",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// 获取完整目录 (按 order 升序)，返回副本
    pub fn entries(&self) -> Vec<TemplateEntry> {
        self.entries.to_vec()
    }

    pub fn get(&self, order: u32) -> Option<TemplateEntry> {
        // order 从 0 连续，可直接作为下标
        self.entries.get(order as usize).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 去重后的分组标签 (按首次出现顺序)
    pub fn groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = Vec::new();
        for entry in self.entries.iter() {
            if !groups.contains(&entry.group) {
                groups.push(entry.group.clone());
            }
        }
        groups
    }
}
