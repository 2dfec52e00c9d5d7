use serde::{Deserialize, Deserializer, Serialize};

/// 帖子 - 远程接口返回的单条内容
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Post {
    /// 帖子唯一标识符
    pub id: u64,
    /// 帖子标题，搜索时不区分大小写
    pub title: String,
    /// 帖子正文，仅用于展示
    #[serde(default)]
    pub body: String,
    /// 作者ID
    #[serde(rename = "userId", default)]
    pub user_id: u64,
    /// 标签列表，顺序只影响展示
    #[serde(default)]
    pub tags: Vec<String>,
    /// 互动数
    #[serde(default, deserialize_with = "deserialize_reactions")]
    pub reactions: u64,
}

impl Post {
    /// 帖子是否带有指定标签
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// 帖子集合 - 接口的完整响应
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PostCollection {
    /// 帖子列表（保持接口返回顺序）
    pub posts: Vec<Post>,
    /// 接口报告的帖子总数
    pub total: u64,
    /// 偏移量
    #[serde(default)]
    pub skip: u64,
    /// 每页条数
    #[serde(default)]
    pub limit: u64,
}

impl PostCollection {
    /// 用帖子列表构造集合，总数取列表长度
    pub fn from_posts(posts: Vec<Post>) -> Self {
        let total = posts.len() as u64;
        Self {
            posts,
            total,
            skip: 0,
            limit: total,
        }
    }
}

/// 互动数的两种线上格式：纯数字或点赞/点踩对象
#[derive(Deserialize)]
#[serde(untagged)]
enum ReactionsRepr {
    Count(u64),
    Votes {
        #[serde(default)]
        likes: u64,
        #[serde(default)]
        dislikes: u64,
    },
}

fn deserialize_reactions<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ReactionsRepr::deserialize(deserializer)? {
        ReactionsRepr::Count(count) => count,
        ReactionsRepr::Votes { likes, dislikes } => likes.saturating_add(dislikes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_integer_reactions() {
        let json = r#"{"id": 1, "title": "Hello", "body": "b", "userId": 9, "tags": ["x"], "reactions": 4}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.reactions, 4);
        assert_eq!(post.user_id, 9);
        assert!(post.has_tag("x"));
        assert!(!post.has_tag("y"));
    }

    #[test]
    fn decodes_vote_reactions() {
        let json = r#"{"id": 2, "title": "Hi", "tags": [], "reactions": {"likes": 192, "dislikes": 25}}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.reactions, 217);
        assert!(post.body.is_empty());
    }

    #[test]
    fn vote_reactions_saturate() {
        let json = r#"{"id": 3, "title": "Big", "reactions": {"likes": 18446744073709551615, "dislikes": 1}}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.reactions, u64::MAX);
    }

    #[test]
    fn decodes_collection_without_paging_fields() {
        let json = r#"{"posts": [{"id": 1, "title": "A", "tags": ["a"], "reactions": 0}], "total": 150}"#;
        let collection: PostCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.posts.len(), 1);
        assert_eq!(collection.total, 150);
        assert_eq!(collection.skip, 0);
        assert_eq!(collection.limit, 0);
    }

    #[test]
    fn from_posts_counts_total() {
        let collection = PostCollection::from_posts(Vec::new());
        assert_eq!(collection.total, 0);
        assert!(collection.posts.is_empty());
    }
}
