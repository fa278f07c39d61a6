//! # Xenax SDK
//!
//! XENAX 伺服轴 TCP 控制的统一入口，按层重新导出：
//!
//! - [`protocol`]：帧格式、回显校验、状态寄存器与驱动器状态码
//! - [`tcp`]：TCP 连接管理、活性探测与取消令牌
//! - [`driver`]：命令通道与脉冲原生的 `AxisDriver` 接口
//! - [`client`]：单位感知的 `AxisController` 与设备登记表
//!
//! # 示例
//!
//! ```no_run
//! use std::net::Ipv4Addr;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use xenax_sdk::prelude::*;
//!
//! let driver = Arc::new(XenaxAxisDriver::new(Ipv4Addr::new(192, 168, 2, 100), 10001));
//! driver.connect(Duration::from_millis(250))?;
//!
//! let controller =
//!     XenaxAxisController::new("x-axis", 0, driver, AxisConfiguration::default());
//! controller.initialize_wait(&CancelToken::new())?;
//! controller.move_abs_wait(10.0, 100.0, &CancelToken::new())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use xenax_client as client;
pub use xenax_driver as driver;
pub use xenax_protocol as protocol;
pub use xenax_tcp as tcp;

// 顶层直接导出最常用的类型
pub use xenax_client::{
    AxisConfiguration, AxisController, ControllerError, DeviceRegistry, XenaxAxisController,
};
pub use xenax_driver::{
    AxisDriver, AxisStatus, CancelToken, CommandChannel, DetailedMovementParameter, Direction,
    DriverError, DriverStatus, StatusRegister, StopMode, XenaxAxisDriver,
};
pub use xenax_tcp::ConnectionError;

/// 常用类型一揽子导入
pub mod prelude {
    pub use crate::{
        AxisConfiguration, AxisController, AxisDriver, AxisStatus, CancelToken, ControllerError,
        DeviceRegistry, Direction, DriverError, StatusRegister, StopMode, XenaxAxisController,
        XenaxAxisDriver,
    };
}

/// 初始化日志（`RUST_LOG` 环境变量控制过滤）
///
/// 同时桥接 `log` 宏到 `tracing`；重复调用返回 `Err`，可安全忽略。
pub fn init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_log::LogTracer::init()?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
