use thiserror::Error;

/// 获取帖子失败
///
/// 对页面状态而言只有“失败”一种结果，这里的细分仅用于日志。
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("请求失败: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("接口返回错误状态: {0}")]
    Status(reqwest::StatusCode),

    #[error("解析帖子数据失败: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("读取帖子文件失败: {0}")]
    Io(#[from] std::io::Error),
}

/// 配置无效
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("无效的地址 '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("不支持的协议: {0}")]
    UnsupportedScheme(String),

    #[error("{0} 必须大于 0")]
    Zero(&'static str),
}

/// 命令行运行时的错误
#[derive(Error, Debug)]
pub enum FeedError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("标准输入读取失败: {0}")]
    Input(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FeedError>;
