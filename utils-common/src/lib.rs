pub mod models;

// 重新导出常用类型，方便直接使用
pub use models::{Post, PostCollection};
