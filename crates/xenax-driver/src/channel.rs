//! 命令通道：互斥串行化的请求/响应回合
//!
//! 协议没有请求 ID，响应无法解复用，因此同一通道同一时刻最多
//! 只允许一条命令在途。互斥锁覆盖完整的"发送 + 收到终止符"回合，
//! 保证命令按提交顺序执行，禁止流水线。

use crate::DriverError;
use parking_lot::Mutex;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;
use tracing::trace;
use xenax_protocol::{frame_command, process_response};
use xenax_tcp::{CancelToken, ConnectionError, XenaxConnection};

/// 到一台设备的命令通道
///
/// 连接的生命周期由通道管理；所有调用者共享同一把回合锁。
///
/// # 示例
///
/// ```no_run
/// use std::net::Ipv4Addr;
/// use std::time::Duration;
/// use xenax_driver::CommandChannel;
///
/// let channel = CommandChannel::new(Ipv4Addr::new(192, 168, 2, 100), 10001);
/// channel.connect(Duration::from_millis(250))?;
/// let position = channel.execute("TP")?;
/// # Ok::<(), xenax_driver::DriverError>(())
/// ```
#[derive(Debug)]
pub struct CommandChannel {
    connection: Mutex<XenaxConnection>,
}

impl CommandChannel {
    /// 创建未连接的命令通道
    pub fn new(ip: Ipv4Addr, port: u16) -> Self {
        Self {
            connection: Mutex::new(XenaxConnection::new(ip, port)),
        }
    }

    /// 设备地址
    pub fn address(&self) -> SocketAddrV4 {
        self.connection.lock().address()
    }

    /// 阻塞连接
    pub fn connect(&self, timeout: Duration) -> Result<(), ConnectionError> {
        self.connection.lock().connect(timeout)
    }

    /// 可取消的轮询式连接
    pub fn connect_with_cancel(
        &self,
        timeout: Duration,
        token: &CancelToken,
    ) -> Result<(), ConnectionError> {
        self.connection.lock().connect_with_cancel(timeout, token)
    }

    /// 断开连接（幂等）
    pub fn disconnect(&self) {
        self.connection.lock().disconnect();
    }

    /// 活性探测
    pub fn is_connected(&self) -> bool {
        self.connection.lock().is_connected()
    }

    /// 执行一条命令并返回清洗后的载荷
    ///
    /// 完整回合（追加 CR 发送、累积接收到 `>`、回显校验、
    /// 错误标记分类）都在通道锁内完成。
    pub fn execute(&self, command: &str) -> Result<String, DriverError> {
        let framed = frame_command(command);

        let raw = {
            let mut connection = self.connection.lock();
            connection.send_and_await_terminator(&framed)?
        };

        let text = String::from_utf8_lossy(&raw);
        let payload = process_response(&text, command)?;
        trace!(command, payload, "command round trip");
        Ok(payload)
    }
}
