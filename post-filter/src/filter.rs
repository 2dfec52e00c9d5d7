use crate::highlight::{find_ignore_case, fold_case};
use crate::tags::TagState;
use utils_common::models::{Post, PostCollection};

/// 按标题搜索帖子
///
/// 搜索词为空时原样返回；否则保留标题包含搜索词（不区分大小写）的帖子，顺序不变。
pub fn filter_by_search<'a, I>(posts: I, term: &str) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    if term.is_empty() {
        return posts.into_iter().collect();
    }

    let needle = fold_case(term);
    posts
        .into_iter()
        .filter(|post| find_ignore_case(&post.title, &needle).is_some())
        .collect()
}

/// 按标签筛选帖子
///
/// 帖子必须带有全部启用的标签，多余的标签不影响结果。
pub fn filter_by_tags<'a, I, S>(posts: I, active_tags: &[S]) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
    S: AsRef<str>,
{
    if active_tags.is_empty() {
        return posts.into_iter().collect();
    }

    posts
        .into_iter()
        .filter(|post| active_tags.iter().all(|tag| post.has_tag(tag.as_ref())))
        .collect()
}

/// 计算可见帖子：先搜索，再按启用的标签筛选
pub fn compute_visible_posts<'a>(
    collection: &'a PostCollection,
    search_term: &str,
    tag_state: &TagState,
) -> Vec<&'a Post> {
    let searched = filter_by_search(&collection.posts, search_term);
    let active_tags = tag_state.active_tags();
    filter_by_tags(searched, active_tags.as_slice())
}
