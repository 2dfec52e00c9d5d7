use serde::{Serialize, Serializer};
use std::collections::HashMap;
use tracing::debug;
use utils_common::models::PostCollection;

/// 标签条目
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    /// 标签名
    pub name: String,
    /// 是否启用
    pub enabled: bool,
}

/// 标签状态 - 当前帖子集合中所有标签及其启用标记
///
/// 按首次出现的顺序保存，每个标签只有一个条目。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagState {
    entries: Vec<TagEntry>,
    positions: HashMap<String, usize>,
}

impl TagState {
    /// 从帖子集合构建标签状态
    ///
    /// 标签在 `pre_activated` 中出现时启用，否则禁用。
    pub fn build<S: AsRef<str>>(collection: &PostCollection, pre_activated: &[S]) -> Self {
        let mut state = Self::default();

        for post in &collection.posts {
            for tag in &post.tags {
                if state.positions.contains_key(tag) {
                    continue;
                }

                let enabled = pre_activated.iter().any(|p| p.as_ref() == tag.as_str());
                state.positions.insert(tag.clone(), state.entries.len());
                state.entries.push(TagEntry {
                    name: tag.clone(),
                    enabled,
                });
            }
        }

        debug!(
            tags = state.entries.len(),
            active = state.active_tags().len(),
            "标签状态已重建"
        );
        state
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.positions.contains_key(tag)
    }

    /// 标签的启用标记，未知标签返回 None
    pub fn get(&self, tag: &str) -> Option<bool> {
        self.positions.get(tag).map(|&i| self.entries[i].enabled)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagEntry> {
        self.entries.iter()
    }

    /// 设置已知标签的启用标记
    ///
    /// 未知标签不会被插入，返回 false。
    pub fn set_tag(&mut self, tag: &str, enabled: bool) -> bool {
        match self.positions.get(tag) {
            Some(&i) => {
                self.entries[i].enabled = enabled;
                true
            }
            None => {
                debug!(tag, "忽略未知标签");
                false
            }
        }
    }

    /// 禁用所有标签，保留条目
    pub fn clear_all(&mut self) {
        for entry in &mut self.entries {
            entry.enabled = false;
        }
    }

    /// 已启用的标签，按标签状态顺序
    pub fn active_tags(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.enabled)
            .map(|entry| entry.name.as_str())
            .collect()
    }
}

impl Serialize for TagState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}
