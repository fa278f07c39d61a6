//! # Xenax TCP Transport
//!
//! XENAX 伺服驱动器的 TCP 传输层。
//!
//! ## 职责
//!
//! - 独占持有到设备的 socket 连接
//! - 有界超时的阻塞 connect 与可取消的轮询式 connect
//! - 主动活性探测（零字节非阻塞发送）
//! - 按协议终止符 `>` 累积接收一个完整响应帧
//!
//! 传输层不理解命令语义；成帧与回显校验在 `xenax-protocol` 中。
//!
//! ## 限制
//!
//! - 协议是本地/局域网工业链路，socket 读写超时固定为短值（250 ms），
//!   不适用于 WAN 场景
//! - 一条连接同一时刻只能承载一个请求/响应回合，串行化由上层命令通道保证

mod cancel;
mod connection;

pub use cancel::CancelToken;
pub use connection::{CONNECT_POLL_INTERVAL, SOCKET_IO_TIMEOUT, XenaxConnection};

use thiserror::Error;

/// 传输层错误类型
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// 当前没有存活的连接
    #[error("not connected to device")]
    NotConnected,

    /// connect 在限定时间内未完成
    #[error("connection to {address} timed out after {timeout_ms} ms")]
    Timeout { address: String, timeout_ms: u64 },

    /// 调用方取消了 connect
    ///
    /// 取消时 socket 已被关闭，取消总是向上传播而不是被吞掉。
    #[error("connection attempt cancelled")]
    Cancelled,

    /// socket 发送/接收失败
    #[error("socket I/O error: {0}")]
    Io(#[from] std::io::Error),
}
