use crate::debounce::Debouncer;
use crate::error::FetchError;
use crate::query::QueryStore;
use crate::source::PostSource;
use post_filter::{LoadStatus, PageState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use utils_common::models::PostCollection;

/// 页面事件 - 异步操作完成后回到控制器
#[derive(Debug)]
pub enum PageEvent {
    /// 防抖结束，提交搜索词
    SearchCommitted(String),
    /// 帖子请求结束
    Fetched(Result<PostCollection, FetchError>),
}

/// 页面控制器 - 唯一持有页面状态的一方
///
/// 所有状态修改都发生在控制器自己的方法里；请求和防抖定时器只通过
/// 事件通道把结果交回来。
pub struct PageController<Q: QueryStore> {
    state: PageState,
    query: Q,
    events_tx: UnboundedSender<PageEvent>,
    events_rx: UnboundedReceiver<PageEvent>,
    search: Debouncer<PageEvent>,
}

impl<Q: QueryStore> PageController<Q> {
    /// 用查询参数初始化页面状态
    pub fn new(query: Q, debounce: Duration) -> Self {
        let params = query.read();
        debug!(?params, "读取查询参数");

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let search = Debouncer::new(debounce, events_tx.clone());

        Self {
            state: PageState::from_query(&params),
            query,
            events_tx,
            events_rx,
            search,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    /// 发起一次帖子请求
    ///
    /// 返回的任务结果表示请求结果是否送达；控制器在请求结束前被销毁时
    /// 结果被丢弃。
    pub fn load(&mut self, source: Arc<dyn PostSource>) -> JoinHandle<bool> {
        self.state.begin_loading();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let result = source.fetch_posts().await;
            if tx.send(PageEvent::Fetched(result)).is_err() {
                debug!("页面已关闭，丢弃请求结果");
                return false;
            }
            true
        })
    }

    /// 输入框变化：立即回显，防抖后提交
    pub fn input(&mut self, raw: &str) {
        self.state.set_search_input(raw);
        self.search.push(PageEvent::SearchCommitted(raw.to_string()));
    }

    /// 切换标签并写回查询参数，未知标签返回 false
    pub fn toggle_tag(&mut self, tag: &str, enabled: bool) -> bool {
        if !self.state.toggle_tag(tag, enabled) {
            return false;
        }

        self.write_query();
        true
    }

    /// 清除所有标签筛选并写回查询参数
    pub fn clear_all(&mut self) {
        self.state.clear_all();
        self.write_query();
    }

    /// 等待下一个事件
    pub async fn next_event(&mut self) -> Option<PageEvent> {
        self.events_rx.recv().await
    }

    /// 取出已经到达的事件，不等待
    pub fn try_next_event(&mut self) -> Option<PageEvent> {
        self.events_rx.try_recv().ok()
    }

    /// 处理事件，返回可见帖子是否需要重新渲染
    pub fn handle(&mut self, event: PageEvent) -> bool {
        match event {
            PageEvent::SearchCommitted(term) => {
                let changed = self.state.apply_search(term);
                if changed {
                    self.write_query();
                }
                changed
            }
            PageEvent::Fetched(Ok(collection)) => {
                info!(posts = collection.posts.len(), "页面数据已更新");
                self.state.receive_collection(collection);
                true
            }
            PageEvent::Fetched(Err(e)) => {
                error!(error = %e, "获取帖子失败");
                self.state.receive_error();
                true
            }
        }
    }

    /// 等待进行中的请求结束，期间到达的其他事件照常处理
    pub async fn wait_loaded(&mut self) -> Result<(), FetchError> {
        while self.state.status() == LoadStatus::Loading {
            let Some(event) = self.events_rx.recv().await else {
                break;
            };

            match event {
                PageEvent::Fetched(Err(e)) => {
                    error!(error = %e, "获取帖子失败");
                    self.state.receive_error();
                    return Err(e);
                }
                other => {
                    self.handle(other);
                }
            }
        }

        Ok(())
    }

    fn write_query(&mut self) {
        let params = self.state.query_params();
        debug!(?params, "写回查询参数");
        self.query.write(&params);
    }
}
