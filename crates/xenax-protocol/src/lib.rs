//! # Xenax Protocol
//!
//! XENAX 伺服驱动器 ASCII 协议定义（无硬件依赖）
//!
//! ## 模块
//!
//! - `response`: 命令成帧与回显响应处理
//! - `status`: 状态寄存器（TPSR）位语义
//! - `driver_status`: `#<code>` 故障码枚举
//!
//! ## 协议帧格式
//!
//! 每条命令以回车（CR）结尾发送；每条响应以 `>` 结尾接收。
//! 设备总是回显收到的命令，回显缺失视为帧损坏。
//! 响应内的错误标记：`?` = 命令无法识别，`#<digits>` = 设备忙/故障码。

pub mod driver_status;
pub mod response;
pub mod status;

// 重新导出常用类型
pub use driver_status::DriverStatus;
pub use response::{COMMAND_TERMINATOR, RESPONSE_TERMINATOR, frame_command, process_response};
pub use status::{AxisStatus, StatusRegister};

use thiserror::Error;

/// 协议层错误类型
///
/// 每个变体都携带足以定位问题的上下文（命令文本、原始回显），
/// 协议层从不自动重试。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// 回显校验失败：响应中不包含已发送的命令
    ///
    /// 协议没有请求 ID，回显是唯一的帧对应性校验手段。
    /// 回显缺失通常意味着帧错位或链路损坏。
    #[error("input command [{sent}] does not match echoed response [{received}]")]
    EchoMismatch { sent: String, received: String },

    /// 设备拒绝或无法解析命令（响应携带 `?` 标记）
    #[error("command [{command}] rejected by device (unknown or not executable)")]
    UnknownCommand { command: String },

    /// 设备当前无法接受命令（响应携带 `#<code>` 标记）
    #[error("command [{command}] refused, device status: {status:?}")]
    DeviceBusy {
        command: String,
        status: DriverStatus,
    },
}
