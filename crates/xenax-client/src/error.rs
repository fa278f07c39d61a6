//! 控制层错误类型定义

use thiserror::Error;
use xenax_driver::DriverError;

/// 控制层错误类型
///
/// 超时与取消都在触发安全停止之后才向上抛出；
/// 安全停止自身失败时两个错误一并报告，原始错误从不被掩盖。
#[derive(Error, Debug)]
pub enum ControllerError {
    /// 驱动层错误（连接、协议、解析、状态故障）
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    /// 运动/回零超出配置的时间窗口
    #[error("axis {axis_id} motion timed out after {elapsed_ms} ms (limit {timeout_ms} ms)")]
    Timeout {
        axis_id: u8,
        elapsed_ms: u64,
        timeout_ms: u64,
    },

    /// 调用方取消了等待
    #[error("axis {axis_id} motion cancelled by caller")]
    Cancelled { axis_id: u8 },

    /// 速度百分比超出 (0, 100] 区间
    #[error("speed percentage {value} out of range (0, 100]")]
    InvalidSpeedPercentage { value: f64 },

    /// 轴配置不满足换算前提（除数为零等）
    #[error("invalid axis configuration: {reason}")]
    InvalidConfiguration { reason: &'static str },

    /// 异常退出时的安全停止自身也失败了
    ///
    /// `original` 是触发停止的错误，`stop` 是停止命令的失败原因。
    #[error("safety stop failed ({stop}) while handling: {original}")]
    StopFailed {
        original: Box<ControllerError>,
        stop: Box<DriverError>,
    },
}
