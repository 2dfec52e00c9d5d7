use serde::{Deserialize, Deserializer, Serialize};
use utils_common::models::Post;

/// 查询参数 - 页面地址中的 `search` 与 `filters`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// 搜索词 (可选，多个值时取第一个)
    #[serde(default, deserialize_with = "first_of_many", skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// 预先启用的标签 (可重复)
    #[serde(default, deserialize_with = "one_or_many")]
    pub filters: Vec<String>,
}

impl QueryParams {
    /// 非空的搜索词
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

/// 查询值可能是单个字符串，也可能是数组
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}

fn first_of_many<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(one_or_many(deserializer)?.into_iter().next())
}

/// 高亮片段 - 原文的一段，标记是否命中搜索词
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Segment<'a> {
    /// 普通文本
    Plain(&'a str),
    /// 命中搜索词的文本
    Matched(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Segment::Plain(text) | Segment::Matched(text) => text,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Segment::Matched(_))
    }
}

/// 页面视图 - 渲染层需要展示的状态
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageView<'a> {
    /// 请求进行中
    Loading,
    /// 请求失败或没有数据
    Error,
    /// 筛选后没有结果
    NoResults,
    /// 筛选后的帖子，以及接口报告的总数
    Posts { posts: Vec<&'a Post>, total: u64 },
}
