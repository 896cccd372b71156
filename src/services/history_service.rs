use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::models::{HistoryEntry, PaginatedResponse, PaginationParams, SpinItem};

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Default)]
struct HistoryState {
    /// 最新在前
    entries: VecDeque<HistoryEntry>,
    counter: u64,
}

/// 抽奖历史 (有容量上限，最新在前)
///
/// clone 得到的是同一份历史的句柄；只能通过 [`HistoryService::record_selection`] 修改，
/// 读取返回副本。
#[derive(Debug, Clone)]
pub struct HistoryService {
    state: Arc<RwLock<HistoryState>>,
    capacity: usize,
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryService {
    /// 创建空的历史记录，容量至少为 1
    /// 预分配不超过默认容量，其余按需增长
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Arc::new(RwLock::new(HistoryState {
                entries: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
                counter: 0,
            })),
            capacity,
        }
    }

    /// 记录一次抽奖结果 (当前时间)
    pub fn record_selection(&self, item: &SpinItem) {
        self.record_selection_at(item, Utc::now());
    }

    /// 记录一次抽奖结果:
    /// 1. 计数器加一作为新 id
    /// 2. 复制 label / group / weight 并附上时间戳
    /// 3. 插入最前，超出容量时丢弃最旧的记录
    ///
    /// 三步在同一个写锁内完成。
    pub fn record_selection_at(&self, item: &SpinItem, at: DateTime<Utc>) {
        let mut state = self.state.write();
        state.counter += 1;
        let entry = HistoryEntry::snapshot(state.counter, item, at);
        log::debug!(
            "Recorded spin #{}: {} ({})",
            entry.id,
            entry.label,
            entry.group
        );
        state.entries.push_front(entry);
        state.entries.truncate(self.capacity);
    }

    /// 当前历史记录副本 (最新在前)
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.state.read().entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<HistoryEntry> {
        self.state.read().entries.front().cloned()
    }

    /// 分页获取历史记录 (最新在前)
    pub fn page(&self, params: &PaginationParams) -> PaginatedResponse<HistoryEntry> {
        let state = self.state.read();
        let total = state.entries.len();
        let data: Vec<HistoryEntry> = state
            .entries
            .iter()
            .skip(params.get_offset())
            .take(params.get_limit())
            .cloned()
            .collect();
        PaginatedResponse::new(data, params, total)
    }

    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
