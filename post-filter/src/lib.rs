use wasm_bindgen::prelude::*;
use web_sys::console;
use utils_common::models::PostCollection;

// 导出模块
pub mod debounce;
pub mod filter;
pub mod highlight;
pub mod models;
pub mod state;
pub mod tags;

pub use debounce::{DebounceGate, SEARCH_DEBOUNCE};
pub use filter::{compute_visible_posts, filter_by_search, filter_by_tags};
pub use highlight::{contains_ignore_case, highlight_segments, render_marked};
pub use models::{PageView, QueryParams, Segment};
pub use state::{LoadStatus, PageState};
pub use tags::{TagEntry, TagState};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// 初始化函数 - 设置错误处理
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// 高亮文本中的搜索词，返回片段数组
#[wasm_bindgen]
pub fn highlight(text: &str, term: &str) -> Result<JsValue, JsValue> {
    let segments = highlight_segments(text, term);
    serde_wasm_bindgen::to_value(&segments)
        .map_err(|e| JsValue::from_str(&format!("序列化高亮片段失败: {}", e)))
}

/// 帖子筛选器JS接口 - 每个实例独占一份页面状态
#[wasm_bindgen]
pub struct PostFilterJS {
    state: PageState,
    search_gate: DebounceGate<String>,
}

#[wasm_bindgen]
impl PostFilterJS {
    /// 用查询参数 JSON 创建筛选器，空字符串表示没有参数
    #[wasm_bindgen(constructor)]
    pub fn new(query_json: &str) -> Result<PostFilterJS, JsValue> {
        console_error_panic_hook::set_once();

        let params: QueryParams = if query_json.trim().is_empty() {
            QueryParams::default()
        } else {
            serde_json::from_str(query_json)
                .map_err(|e| JsValue::from_str(&format!("解析查询参数失败: {}", e)))?
        };

        Ok(PostFilterJS {
            state: PageState::from_query(&params),
            search_gate: DebounceGate::default(),
        })
    }

    /// 标记请求开始
    pub fn begin_loading(&mut self) {
        self.state.begin_loading();
    }

    /// 接收接口返回的 JSON，解析失败时进入错误状态
    pub fn receive_posts(&mut self, posts_json: &str) -> Result<(), JsValue> {
        self.apply_posts_json(posts_json).map_err(|e| {
            console::log_1(&JsValue::from_str(&format!("帖子数据解析失败: {}", e)));
            JsValue::from_str(&format!("解析帖子数据失败: {}", e))
        })
    }

    /// 请求失败
    pub fn receive_error(&mut self) {
        self.state.receive_error();
    }

    /// 输入框变化：立即回显，返回本次输入的防抖代号
    ///
    /// 宿主在 `debounce_ms()` 毫秒后用代号调用 `commit_search`。
    pub fn input(&mut self, value: &str) -> u32 {
        self.state.set_search_input(value);
        self.search_gate.push(value.to_string(), js_sys::Date::now() as u64)
    }

    /// 定时器到期，代号仍是最新时提交搜索词，返回筛选结果是否需要刷新
    pub fn commit_search(&mut self, generation: u32) -> bool {
        match self.search_gate.fire(generation) {
            Some(term) => self.state.apply_search(term),
            None => false,
        }
    }

    /// 按当前时间检查是否可以提交搜索词
    pub fn poll_search(&mut self) -> bool {
        match self.search_gate.poll(js_sys::Date::now() as u64) {
            Some(term) => self.state.apply_search(term),
            None => false,
        }
    }

    /// 防抖静默窗口（毫秒）
    pub fn debounce_ms(&self) -> u32 {
        self.search_gate.window().as_millis() as u32
    }

    pub fn search_input(&self) -> String {
        self.state.search_input().to_string()
    }

    pub fn search_term(&self) -> String {
        self.state.search_term().to_string()
    }

    /// 切换标签，未知标签返回 false
    pub fn set_tag(&mut self, tag: &str, enabled: bool) -> bool {
        self.state.toggle_tag(tag, enabled)
    }

    /// 清除所有标签筛选
    pub fn clear_all(&mut self) {
        self.state.clear_all();
    }

    /// 获取所有标签及其启用状态
    pub fn tags(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.state.tags())
            .map_err(|e| JsValue::from_str(&format!("序列化标签失败: {}", e)))
    }

    /// 获取页面视图
    pub fn view(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.state.view())
            .map_err(|e| JsValue::from_str(&format!("序列化视图失败: {}", e)))
    }

    /// 获取需要写回地址的查询参数
    pub fn query_params(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.state.query_params())
            .map_err(|e| JsValue::from_str(&format!("序列化查询参数失败: {}", e)))
    }
}

impl PostFilterJS {
    fn apply_posts_json(&mut self, posts_json: &str) -> Result<(), serde_json::Error> {
        match serde_json::from_str::<PostCollection>(posts_json) {
            Ok(collection) => {
                self.state.receive_collection(collection);
                Ok(())
            }
            Err(e) => {
                self.state.receive_error();
                Err(e)
            }
        }
    }
}
