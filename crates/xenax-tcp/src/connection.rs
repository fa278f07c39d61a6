//! 设备连接实现
//!
//! 一个 [`XenaxConnection`] 独占持有到一台驱动器的 TCP socket。
//! 连接随 `connect()` 建立、随 `disconnect()` 或析构销毁；
//! `connected` 状态来自真实的 socket 活性探测，而不是"调用过 connect"。

use crate::{CancelToken, ConnectionError};
use std::io::{Read, Write};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, TcpStream};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};
use xenax_protocol::RESPONSE_TERMINATOR;

/// socket 发送/接收超时（本地工业链路，固定短值）
pub const SOCKET_IO_TIMEOUT: Duration = Duration::from_millis(250);

/// 可取消 connect 的完成轮询间隔
pub const CONNECT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// 单次接收的缓冲块大小
const RECV_CHUNK: usize = 256;

/// 到一台 XENAX 驱动器的 TCP 连接
///
/// # 示例
///
/// ```no_run
/// use std::net::Ipv4Addr;
/// use std::time::Duration;
/// use xenax_tcp::XenaxConnection;
///
/// let mut conn = XenaxConnection::new(Ipv4Addr::new(192, 168, 2, 100), 10001);
/// conn.connect(Duration::from_millis(250))?;
/// let raw = conn.send_and_await_terminator(b"TP\r")?;
/// conn.disconnect();
/// # Ok::<(), xenax_tcp::ConnectionError>(())
/// ```
#[derive(Debug)]
pub struct XenaxConnection {
    address: SocketAddrV4,
    stream: Option<TcpStream>,
}

impl XenaxConnection {
    /// 创建未连接的实例
    pub fn new(ip: Ipv4Addr, port: u16) -> Self {
        Self {
            address: SocketAddrV4::new(ip, port),
            stream: None,
        }
    }

    /// 设备地址
    pub fn address(&self) -> SocketAddrV4 {
        self.address
    }

    /// 阻塞连接，整个握手必须在 `timeout` 内完成
    ///
    /// 已存在的旧连接会先被拆除。超时的半开 socket 被关闭，
    /// 返回 [`ConnectionError::Timeout`]。
    pub fn connect(&mut self, timeout: Duration) -> Result<(), ConnectionError> {
        self.disconnect();

        let addr = SocketAddr::V4(self.address);
        let stream = TcpStream::connect_timeout(&addr, timeout).map_err(|e| {
            if matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            ) {
                ConnectionError::Timeout {
                    address: self.address.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                }
            } else {
                ConnectionError::Io(e)
            }
        })?;

        self.adopt_stream(stream)?;
        debug!(address = %self.address, "connected to device");
        Ok(())
    }

    /// 可取消的连接：后台发起连接，按固定间隔轮询完成状态
    ///
    /// 每个轮询间隔检查一次令牌；取消时 socket 被关闭，
    /// 取消作为 [`ConnectionError::Cancelled`] 向上传播，不被吞掉。
    pub fn connect_with_cancel(
        &mut self,
        timeout: Duration,
        token: &CancelToken,
    ) -> Result<(), ConnectionError> {
        self.disconnect();

        let addr = SocketAddr::V4(self.address);
        let (done_tx, done_rx) = crossbeam_channel::bounded::<std::io::Result<TcpStream>>(1);
        std::thread::spawn(move || {
            // 接收端先退出时 send 失败，stream 随之 drop 并关闭 socket
            let _ = done_tx.send(TcpStream::connect_timeout(&addr, timeout));
        });

        let started = Instant::now();
        loop {
            if token.is_cancelled() {
                debug!(address = %self.address, "connect cancelled by caller");
                return Err(ConnectionError::Cancelled);
            }

            match done_rx.try_recv() {
                Ok(Ok(stream)) => {
                    self.adopt_stream(stream)?;
                    debug!(address = %self.address, "connected to device");
                    return Ok(());
                }
                Ok(Err(e)) => {
                    return Err(if matches!(
                        e.kind(),
                        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
                    ) {
                        ConnectionError::Timeout {
                            address: self.address.to_string(),
                            timeout_ms: timeout.as_millis() as u64,
                        }
                    } else {
                        ConnectionError::Io(e)
                    });
                }
                Err(crossbeam_channel::TryRecvError::Empty) => {
                    if started.elapsed() > timeout {
                        return Err(ConnectionError::Timeout {
                            address: self.address.to_string(),
                            timeout_ms: timeout.as_millis() as u64,
                        });
                    }
                    spin_sleep::sleep(CONNECT_POLL_INTERVAL);
                }
                Err(crossbeam_channel::TryRecvError::Disconnected) => {
                    return Err(ConnectionError::Io(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        "connect worker exited without result",
                    )));
                }
            }
        }
    }

    /// 断开连接（幂等，从不失败）
    pub fn disconnect(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(std::net::Shutdown::Both);
            debug!(address = %self.address, "disconnected");
        }
    }

    /// 主动探测连接活性
    ///
    /// 发起一次零字节非阻塞发送：would-block 视为仍然连接，
    /// 其它 socket 错误视为链路已断。设备链路会静默掉线，
    /// 因此不能依赖历史 `connect()` 结果的缓存布尔值。
    pub fn is_connected(&self) -> bool {
        match &self.stream {
            Some(stream) => probe_liveness(stream),
            None => false,
        }
    }

    /// 发送完整缓冲区，随后累积接收直到出现终止符 `>`
    ///
    /// 返回累积到的全部字节（含回显与终止符）。未连接、
    /// 发送失败或接收失败（包括读超时）都返回错误。
    pub fn send_and_await_terminator(&mut self, bytes: &[u8]) -> Result<Vec<u8>, ConnectionError> {
        let stream = self.stream.as_mut().ok_or(ConnectionError::NotConnected)?;

        stream.write_all(bytes)?;

        let mut accumulated = Vec::with_capacity(RECV_CHUNK);
        let mut chunk = [0u8; RECV_CHUNK];
        loop {
            let received = stream.read(&mut chunk)?;
            if received == 0 {
                warn!(address = %self.address, "peer closed connection mid-frame");
                return Err(ConnectionError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "peer closed connection before response terminator",
                )));
            }
            accumulated.extend_from_slice(&chunk[..received]);
            if accumulated.contains(&RESPONSE_TERMINATOR) {
                break;
            }
        }

        trace!(
            sent = bytes.len(),
            received = accumulated.len(),
            "frame round trip complete"
        );
        Ok(accumulated)
    }

    fn adopt_stream(&mut self, stream: TcpStream) -> Result<(), ConnectionError> {
        stream.set_read_timeout(Some(SOCKET_IO_TIMEOUT))?;
        stream.set_write_timeout(Some(SOCKET_IO_TIMEOUT))?;
        stream.set_nodelay(true)?;
        self.stream = Some(stream);
        Ok(())
    }
}

impl Drop for XenaxConnection {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// 零字节 `MSG_DONTWAIT` 探测
#[cfg(unix)]
fn probe_liveness(stream: &TcpStream) -> bool {
    use std::os::unix::io::AsRawFd;

    let ret = unsafe {
        libc::send(
            stream.as_raw_fd(),
            std::ptr::null(),
            0,
            libc::MSG_DONTWAIT | libc::MSG_NOSIGNAL,
        )
    };
    if ret >= 0 {
        return true;
    }

    let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(0);
    errno == libc::EAGAIN || errno == libc::EWOULDBLOCK
}

#[cfg(not(unix))]
fn probe_liveness(stream: &TcpStream) -> bool {
    stream.peer_addr().is_ok()
}
