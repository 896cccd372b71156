use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::SpinItem;

/// 抽奖历史记录
/// 说明:
/// - id 创建时分配，单调递增，与在日志中的位置无关
/// - label / group / weight 为抽中时的快照，不引用目录中的模板
/// - time 为 UTC RFC 3339 字符串 (毫秒精度, `Z` 结尾)，可直接按字典序排序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub label: String,
    pub group: String,
    pub weight: f64,
    pub time: String,
}

impl HistoryEntry {
    pub(crate) fn snapshot(id: u64, item: &SpinItem, at: DateTime<Utc>) -> Self {
        HistoryEntry {
            id,
            label: item.label.clone(),
            group: item.group.clone(),
            weight: item.weight,
            time: format_timestamp(at),
        }
    }

    /// 将 `time` 解析回时间点
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.time)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(at), "2026-10-18T09:30:00.000Z");
    }

    #[test]
    fn test_snapshot_copies_fields() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let mut item = SpinItem::new("$100", "Money Prizes", 1.0);
        let entry = HistoryEntry::snapshot(7, &item, at);

        item.label = "changed".into();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.label, "$100");
        assert_eq!(entry.group, "Money Prizes");
        assert_eq!(entry.recorded_at(), Some(at));
    }

    #[test]
    fn test_json_field_names() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let entry = HistoryEntry::snapshot(1, &SpinItem::new("$20", "Money Prizes", 1.0), at);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["label"], "$20");
        assert_eq!(value["group"], "Money Prizes");
        assert_eq!(value["weight"], 1.0);
        assert_eq!(value["time"], "2026-01-02T03:04:05.000Z");
    }
}
