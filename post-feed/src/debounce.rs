use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// 基于 tokio 定时器的防抖器
///
/// 每次 `push` 取消等待中的定时器并重新计时，静默窗口结束后把最新的值
/// 发送到通道。被取消的值直接丢弃，不会排队。
pub struct Debouncer<T> {
    window: Duration,
    tx: UnboundedSender<T>,
    pending: Option<CancellationToken>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(window: Duration, tx: UnboundedSender<T>) -> Self {
        Self {
            window,
            tx,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// 记录新值并重新计时，需要在 tokio 运行时中调用
    pub fn push(&mut self, value: T) {
        self.cancel();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let tx = self.tx.clone();
        let window = self.window;

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {
                    trace!("防抖定时器已取消");
                }
                _ = tokio::time::sleep(window) => {
                    // 接收端已关闭时丢弃
                    let _ = tx.send(value);
                }
            }
        });

        self.pending = Some(token);
    }

    /// 取消等待中的值
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn rapid_input_propagates_latest_value_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(500), tx);

        for value in ["a", "ab", "abc"] {
            debouncer.push(value.to_string());
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(rx.try_recv().ok(), Some("abc".to_string()));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_propagates_before_quiet_window() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(500), tx);

        debouncer.push(1);
        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().ok(), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn separated_inputs_each_propagate() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(500), tx);

        debouncer.push("first");
        tokio::time::sleep(Duration::from_millis(600)).await;
        debouncer.push("second");
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(rx.try_recv().ok(), Some("first"));
        assert_eq!(rx.try_recv().ok(), Some("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_debouncer_discards_pending_value() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(500), tx);

        debouncer.push("gone");
        drop(debouncer);
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(rx.recv().await.is_none());
    }
}
