//! 帖子客户端 - 获取帖子并驱动筛选引擎
//!
//! 包含 HTTP 帖子来源、基于 tokio 的搜索防抖、地址查询参数存储，
//! 以及持有页面状态的控制器。

pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod input;
pub mod query;
pub mod render;
pub mod source;

pub use config::FeedConfig;
pub use controller::{PageController, PageEvent};
pub use error::{ConfigError, FeedError, FetchError, Result};
pub use query::{QueryStore, UrlQueryStore};
pub use source::{FilePostSource, HttpPostSource, PostSource};
