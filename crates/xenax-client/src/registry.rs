//! 设备登记表
//!
//! 按名字登记驱动与控制器，供上层按名取用；
//! 名字在表内唯一，重复登记会替换旧条目。

use crate::{AxisConfiguration, XenaxAxisController};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;
use xenax_driver::XenaxAxisDriver;

/// 命名的驱动/控制器登记表
///
/// 驱动以 `Arc` 共享（一台多轴设备可挂多个控制器），
/// 控制器按值持有（配置可变，归属明确）。
#[derive(Default)]
pub struct DeviceRegistry {
    drivers: BTreeMap<String, Arc<XenaxAxisDriver>>,
    controllers: BTreeMap<String, XenaxAxisController>,
}

impl DeviceRegistry {
    /// 创建空登记表
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记驱动，返回共享句柄
    pub fn register_driver(
        &mut self,
        name: impl Into<String>,
        driver: XenaxAxisDriver,
    ) -> Arc<XenaxAxisDriver> {
        let name = name.into();
        let driver = Arc::new(driver);
        info!(name = %name, driver = %driver.id(), "register driver");
        self.drivers.insert(name, driver.clone());
        driver
    }

    /// 按名取驱动
    pub fn driver(&self, name: &str) -> Option<&Arc<XenaxAxisDriver>> {
        self.drivers.get(name)
    }

    /// 登记的驱动数量
    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    /// 基于已登记的驱动创建并登记控制器
    ///
    /// 驱动名不存在时返回 `None`。
    pub fn register_controller(
        &mut self,
        name: impl Into<String>,
        driver_name: &str,
        axis_id: u8,
        config: AxisConfiguration,
    ) -> Option<&XenaxAxisController> {
        let name = name.into();
        let driver = self.drivers.get(driver_name)?.clone();
        info!(name = %name, driver = %driver_name, axis_id, "register controller");
        let controller = XenaxAxisController::new(name.clone(), axis_id, driver, config);
        self.controllers.insert(name.clone(), controller);
        self.controllers.get(&name)
    }

    /// 按名取控制器
    pub fn controller(&self, name: &str) -> Option<&XenaxAxisController> {
        self.controllers.get(name)
    }

    /// 按名取控制器（可变，用于调整配置）
    pub fn controller_mut(&mut self, name: &str) -> Option<&mut XenaxAxisController> {
        self.controllers.get_mut(name)
    }

    /// 移除控制器
    pub fn remove_controller(&mut self, name: &str) -> Option<XenaxAxisController> {
        self.controllers.remove(name)
    }

    /// 移除驱动（已创建的控制器仍持有共享句柄，不受影响）
    pub fn remove_driver(&mut self, name: &str) -> Option<Arc<XenaxAxisDriver>> {
        self.drivers.remove(name)
    }
}
