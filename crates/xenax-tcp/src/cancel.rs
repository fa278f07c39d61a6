//! 协作式取消令牌
//!
//! 取消是协作式的：在轮询间隔检查一次，从不抢占进行中的 socket 读写。
//! 令牌可被克隆到任意线程，`cancel()` 对所有克隆可见。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 可克隆的取消令牌（`Arc<AtomicBool>` 封装）
///
/// # 示例
///
/// ```
/// use xenax_tcp::CancelToken;
///
/// let token = CancelToken::new();
/// let worker_token = token.clone();
///
/// assert!(!worker_token.is_cancelled());
/// token.cancel();
/// assert!(worker_token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// 创建未触发的令牌
    pub fn new() -> Self {
        Self::default()
    }

    /// 触发取消（对所有克隆可见，不可逆）
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// 是否已触发取消
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
