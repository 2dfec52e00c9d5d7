use std::time::Duration;

/// 搜索输入的默认静默窗口
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// 等待提交的值
#[derive(Debug)]
struct Pending<T> {
    value: T,
    generation: u32,
    deadline_ms: u64,
}

/// 防抖闸门 - 不依赖具体时钟的防抖状态
///
/// 每次 `push` 都会作废之前等待中的值并分配新的代号。宿主的定时器到期后
/// 用代号调用 `fire`，过期的代号什么也不会提交；没有定时器的宿主可以用
/// `poll` 按截止时间提交。
#[derive(Debug)]
pub struct DebounceGate<T> {
    window: Duration,
    generation: u32,
    pending: Option<Pending<T>>,
}

impl<T> DebounceGate<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: 0,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// 记录新值并返回其代号，之前等待中的值被丢弃
    pub fn push(&mut self, value: T, now_ms: u64) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(Pending {
            value,
            generation: self.generation,
            deadline_ms: now_ms.saturating_add(self.window.as_millis() as u64),
        });
        self.generation
    }

    /// 定时器到期：代号仍是最新时取出等待中的值
    pub fn fire(&mut self, generation: u32) -> Option<T> {
        let current = matches!(&self.pending, Some(pending) if pending.generation == generation);
        if current {
            self.pending.take().map(|pending| pending.value)
        } else {
            None
        }
    }

    /// 截止时间已过时取出等待中的值
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        let due = matches!(&self.pending, Some(pending) if now_ms >= pending.deadline_ms);
        if due {
            self.pending.take().map(|pending| pending.value)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for DebounceGate<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
