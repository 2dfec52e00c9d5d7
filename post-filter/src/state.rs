use crate::filter::compute_visible_posts;
use crate::models::{PageView, QueryParams};
use crate::tags::TagState;
use tracing::{debug, warn};
use utils_common::models::{Post, PostCollection};

/// 加载状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// 尚未发起请求
    #[default]
    Idle,
    /// 请求进行中
    Loading,
    /// 已收到帖子集合
    Loaded,
    /// 请求失败
    Failed,
}

/// 页面状态 - 由页面控制器独占，所有修改都通过下面的转换函数
#[derive(Debug, Clone, Default)]
pub struct PageState {
    status: LoadStatus,
    collection: Option<PostCollection>,
    /// 已提交的搜索词（参与筛选）
    search_term: String,
    /// 输入框回显，未经防抖
    search_input: String,
    tags: TagState,
    /// 重建标签状态时预先启用的标签，与地址中的 filters 保持一致
    preset_filters: Vec<String>,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用地址中的查询参数初始化
    pub fn from_query(params: &QueryParams) -> Self {
        let search = params.search_term().unwrap_or_default().to_string();
        Self {
            search_input: search.clone(),
            search_term: search,
            preset_filters: params.filters.clone(),
            ..Self::default()
        }
    }

    pub fn begin_loading(&mut self) {
        self.status = LoadStatus::Loading;
    }

    /// 收到新的帖子集合，重建标签状态
    pub fn receive_collection(&mut self, collection: PostCollection) {
        debug!(
            posts = collection.posts.len(),
            total = collection.total,
            "收到帖子集合"
        );
        self.tags = TagState::build(&collection, self.preset_filters.as_slice());
        self.collection = Some(collection);
        self.status = LoadStatus::Loaded;
    }

    /// 请求失败，清空数据
    pub fn receive_error(&mut self) {
        warn!("帖子加载失败");
        self.collection = None;
        self.tags = TagState::default();
        self.status = LoadStatus::Failed;
    }

    /// 更新输入框回显，不触发筛选
    pub fn set_search_input(&mut self, raw: impl Into<String>) {
        self.search_input = raw.into();
    }

    /// 提交搜索词，返回是否发生变化
    pub fn apply_search(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search_term {
            return false;
        }

        debug!(term = %term, "提交搜索词");
        self.search_term = term;
        true
    }

    /// 切换标签，未知标签返回 false
    pub fn toggle_tag(&mut self, tag: &str, enabled: bool) -> bool {
        if !self.tags.set_tag(tag, enabled) {
            return false;
        }

        self.sync_preset_filters();
        true
    }

    /// 禁用全部标签
    pub fn clear_all(&mut self) {
        self.tags.clear_all();
        self.preset_filters.clear();
    }

    fn sync_preset_filters(&mut self) {
        self.preset_filters = self
            .tags
            .active_tags()
            .into_iter()
            .map(String::from)
            .collect();
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn collection(&self) -> Option<&PostCollection> {
        self.collection.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn tags(&self) -> &TagState {
        &self.tags
    }

    pub fn active_tags(&self) -> Vec<&str> {
        self.tags.active_tags()
    }

    /// 当前可见的帖子
    pub fn visible_posts(&self) -> Vec<&Post> {
        match &self.collection {
            Some(collection) => compute_visible_posts(collection, &self.search_term, &self.tags),
            None => Vec::new(),
        }
    }

    /// 渲染层需要的视图
    pub fn view(&self) -> PageView<'_> {
        if self.status == LoadStatus::Loading {
            return PageView::Loading;
        }

        let Some(collection) = &self.collection else {
            return PageView::Error;
        };

        let posts = compute_visible_posts(collection, &self.search_term, &self.tags);
        if posts.is_empty() {
            PageView::NoResults
        } else {
            PageView::Posts {
                posts,
                total: collection.total,
            }
        }
    }

    /// 需要写回地址的查询参数
    pub fn query_params(&self) -> QueryParams {
        QueryParams {
            search: Some(self.search_term.clone()).filter(|s| !s.is_empty()),
            filters: self.preset_filters.clone(),
        }
    }
}
