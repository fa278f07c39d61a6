//! 驱动层错误类型定义

use thiserror::Error;
use xenax_protocol::{AxisStatus, ProtocolError};
use xenax_tcp::ConnectionError;

/// 驱动层错误类型
///
/// 所有失败都原样向上传播：任何错误都意味着物理轴的状态不确定，
/// 重试与否由调用方决策。
#[derive(Error, Debug)]
pub enum DriverError {
    /// 传输层错误
    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// 协议层错误（回显失配、命令被拒、设备忙）
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// 设备载荷无法解析为期望的数值
    #[error("failed to parse response [{payload}] to command [{command}] as {expected}")]
    Parse {
        command: String,
        payload: String,
        expected: &'static str,
    },

    /// 硬故障：Error 标志置位且 Home 未置位
    ///
    /// 此时运动状态查询不返回布尔值，而是携带全部置位标志失败。
    #[error("axis {axis_id} hard fault, active flags: {active_flags:?}")]
    StatusFault {
        axis_id: u8,
        active_flags: Vec<AxisStatus>,
    },
}
