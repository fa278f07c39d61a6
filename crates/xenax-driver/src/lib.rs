//! # Xenax Driver
//!
//! XENAX 伺服驱动器的设备驱动层，包括：
//! - 命令通道（互斥串行化的请求/响应回合）
//! - `AxisDriver` trait：脉冲原生的轴操作接口
//! - `XenaxAxisDriver`：XENAX 设备族的具体实现
//!
//! # 使用场景
//!
//! 适用于需要直接以脉冲为单位操作设备的场景。
//! 大多数用户应该使用 `xenax-client` 提供的单位感知接口（毫米/速度百分比）。

mod axis;
mod channel;
mod error;
mod xenax;

pub use axis::{AxisDriver, DetailedMovementParameter, Direction, StopMode};
pub use channel::CommandChannel;
pub use error::DriverError;
pub use xenax::XenaxAxisDriver;

// 重新导出下层常用类型
pub use xenax_protocol::{AxisStatus, DriverStatus, ProtocolError, StatusRegister};
pub use xenax_tcp::{CancelToken, ConnectionError};
