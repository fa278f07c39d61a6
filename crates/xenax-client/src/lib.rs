//! # Xenax Client
//!
//! XENAX 轴的单位感知控制层，包括：
//! - `AxisConfiguration`：机械/运动参数与脉冲↔毫米换算
//! - `AxisController` trait 与 `XenaxAxisController` 实现
//! - 运动完成轮询（超时、取消、异常退出时的安全停止）
//! - `DeviceRegistry`：命名的驱动/控制器登记表
//!
//! # 使用场景
//!
//! 这是大多数用户应该使用的模块：以毫米、方向和速度百分比表达运动，
//! 脉冲换算与协议细节被完全封装。需要脉冲级控制时使用 `xenax-driver`。

mod config;
mod controller;
mod error;
mod registry;
mod units;

pub use config::AxisConfiguration;
pub use controller::{AxisController, XenaxAxisController};
pub use error::ControllerError;
pub use registry::DeviceRegistry;

// 重新导出下层常用类型
pub use xenax_driver::{
    AxisDriver, AxisStatus, CancelToken, Direction, DriverError, StatusRegister, StopMode,
    XenaxAxisDriver,
};
