use post_filter::{highlight_segments, render_marked, PageState, PageView};
use std::fmt::Write;

const SEPARATOR: &str = "--------------------------------------------------";

/// 将页面状态渲染为纯文本
pub fn render_page(state: &PageState) -> String {
    let mut out = String::new();

    match state.view() {
        PageView::Loading => out.push_str("Loading...\n"),
        PageView::Error => out.push_str("Something went wrong\n"),
        PageView::NoResults => {
            render_filters(state, &mut out);
            out.push_str("No results\n");
        }
        PageView::Posts { posts, total } => {
            render_filters(state, &mut out);
            let _ = writeln!(out, "POST LISTED: {}", total);
            out.push_str(SEPARATOR);
            out.push('\n');

            for post in posts {
                let title = render_marked(&highlight_segments(&post.title, state.search_term()));
                let _ = writeln!(out, "#{} {}", post.id, title);
                let _ = writeln!(out, "reactions: {}", post.reactions);
                let _ = writeln!(out, "tags: {}", post.tags.join(", "));
                out.push_str(SEPARATOR);
                out.push('\n');
            }
        }
    }

    out
}

/// 搜索框与标签勾选状态
fn render_filters(state: &PageState, out: &mut String) {
    let _ = writeln!(out, "Search: {}", state.search_input());
    out.push_str("Filters:\n");
    for entry in state.tags().iter() {
        let mark = if entry.enabled { 'x' } else { ' ' };
        let _ = writeln!(out, "  [{}] {}", mark, entry.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use utils_common::models::{Post, PostCollection};

    fn loaded_state() -> PageState {
        let mut state = PageState::new();
        state.receive_collection(PostCollection {
            posts: vec![
                Post {
                    id: 1,
                    title: "Banana bread".to_string(),
                    body: String::new(),
                    user_id: 3,
                    tags: vec!["food".to_string(), "baking".to_string()],
                    reactions: 7,
                },
                Post {
                    id: 2,
                    title: "Travel notes".to_string(),
                    body: String::new(),
                    user_id: 4,
                    tags: vec!["travel".to_string()],
                    reactions: 1,
                },
            ],
            total: 150,
            skip: 0,
            limit: 30,
        });
        state
    }

    #[test]
    fn renders_highlighted_posts() {
        let mut state = loaded_state();
        state.apply_search("an");
        state.toggle_tag("food", true);

        let text = render_page(&state);
        assert!(text.contains("POST LISTED: 150"));
        assert!(text.contains("#1 B<mark>an</mark><mark>an</mark>a bread"));
        assert!(text.contains("  [x] food"));
        assert!(text.contains("  [ ] travel"));
        assert!(!text.contains("Travel notes"));
    }

    #[test]
    fn renders_status_views() {
        let mut state = PageState::new();
        assert_eq!(render_page(&state), "Something went wrong\n");

        state.begin_loading();
        assert_eq!(render_page(&state), "Loading...\n");

        let mut state = loaded_state();
        state.apply_search("zzz");
        assert!(render_page(&state).ends_with("No results\n"));
    }
}
