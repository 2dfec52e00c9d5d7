use crate::config::FeedConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::path::PathBuf;
use tracing::{debug, info};
use utils_common::models::PostCollection;

/// 帖子来源 - 每次页面加载调用一次，不重试
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_posts(&self) -> Result<PostCollection, FetchError>;
}

/// 通过 HTTP GET 获取帖子
pub struct HttpPostSource {
    client: Client,
    endpoint: Url,
}

impl HttpPostSource {
    pub fn new(config: &FeedConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn fetch_posts(&self) -> Result<PostCollection, FetchError> {
        info!(endpoint = %self.endpoint, "开始获取帖子");

        let response = self.client.get(self.endpoint.clone()).send().await?;
        let status = response.status();
        debug!(%status, "收到响应");
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        let collection: PostCollection = serde_json::from_str(&body)?;

        info!(
            posts = collection.posts.len(),
            total = collection.total,
            "帖子获取完成"
        );
        Ok(collection)
    }
}

/// 从本地 JSON 文件读取帖子（格式与接口响应相同）
pub struct FilePostSource {
    path: PathBuf,
}

impl FilePostSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PostSource for FilePostSource {
    async fn fetch_posts(&self) -> Result<PostCollection, FetchError> {
        info!(path = %self.path.display(), "读取帖子文件");
        let body = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
