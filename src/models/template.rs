use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// 奖品槽位模板
/// 说明:
/// - group: 分组标签 (转盘上的主题区块)
/// - label: 槽位显示文本 (金额或 "Try Again")
/// - weight: 相对权重，仅作为数据携带，如何影响抽取由选择方决定
/// - order: 从 0 开始的显示顺序，目录内唯一且连续
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub group: String,
    pub label: String,
    pub weight: f64,
    pub order: u32,
}

impl TemplateEntry {
    pub fn new(group: impl Into<String>, label: impl Into<String>, weight: f64, order: u32) -> Self {
        Self {
            group: group.into(),
            label: label.into(),
            weight,
            order,
        }
    }
}

/// 一次抽奖完成后交给历史记录的奖品 (label / group / weight)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinItem {
    pub label: String,
    pub group: String,
    pub weight: f64,
}

impl SpinItem {
    pub fn new(label: impl Into<String>, group: impl Into<String>, weight: f64) -> Self {
        Self {
            label: label.into(),
            group: group.into(),
            weight,
        }
    }

    /// 可选校验：label 非空，weight 为有限非负数
    /// `record_selection` 不会调用
    pub fn validate(&self) -> AppResult<()> {
        if self.label.trim().is_empty() {
            return Err(AppError::ValidationError("label must not be empty".into()));
        }
        validate_weight(self.weight)
    }
}

impl From<&TemplateEntry> for SpinItem {
    fn from(entry: &TemplateEntry) -> Self {
        SpinItem {
            label: entry.label.clone(),
            group: entry.group.clone(),
            weight: entry.weight,
        }
    }
}

pub(crate) fn validate_weight(weight: f64) -> AppResult<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(AppError::ValidationError(format!(
            "weight must be a finite non-negative number, got {weight}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_item_from_template_entry() {
        let entry = TemplateEntry::new("Money Prizes", "$50", 1.0, 2);
        let item = SpinItem::from(&entry);
        assert_eq!(item.label, "$50");
        assert_eq!(item.group, "Money Prizes");
        assert_eq!(item.weight, 1.0);
    }

    #[test]
    fn test_spin_item_validate() {
        assert!(SpinItem::new("$10", "Money Prizes", 1.0).validate().is_ok());
        assert!(SpinItem::new("$10", "Money Prizes", 0.0).validate().is_ok());
        assert!(SpinItem::new("  ", "Money Prizes", 1.0).validate().is_err());
        assert!(SpinItem::new("$10", "Money Prizes", -1.0).validate().is_err());
        assert!(SpinItem::new("$10", "Money Prizes", f64::NAN).validate().is_err());
    }

    #[test]
    fn test_template_entry_json_field_names() {
        let entry = TemplateEntry::new("Money Prizes", "Try Again", 1.0, 7);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["group"], "Money Prizes");
        assert_eq!(value["label"], "Try Again");
        assert_eq!(value["weight"], 1.0);
        assert_eq!(value["order"], 7);
    }
}
