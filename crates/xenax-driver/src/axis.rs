//! 轴驱动接口与共用值类型
//!
//! `AxisDriver` 定义脉冲原生的设备操作；调用方只依赖此 trait，
//! 每个设备族提供一个具体实现。

use crate::DriverError;

/// 运动方向（符号语义：Negative = -1，Positive = +1）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i8)]
pub enum Direction {
    Negative = -1,
    Positive = 1,
}

impl Direction {
    /// 方向符号（-1 或 +1）
    #[inline]
    pub const fn sign(self) -> i8 {
        self as i8
    }

    /// 两个方向的符号积（用于把逻辑方向折算到设备方向）
    pub const fn combine(self, other: Direction) -> Direction {
        if self.sign() * other.sign() > 0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }
}

/// 停止方式
///
/// XENAX 协议只有立即停止命令（`SM`），减速停在此设备族上
/// 同样映射为立即停止；接口保留枚举以对齐其它设备族。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopMode {
    #[default]
    Immediate,
    Decelerate,
}

/// 六参数（详细）运动参数
///
/// XENAX 没有对应的独立设备命令，此结构仅为接口一致性而存在：
/// 驱动实现接受它但不下发硬件命令，调用方不得假设其生效。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetailedMovementParameter {
    pub initial_speed: i32,
    pub final_speed: i32,
    pub acceleration_duration_ms: i32,
    pub deceleration_duration_ms: i32,
    pub scurve_acceleration_percentage: i32,
    pub scurve_deceleration_percentage: i32,
}

/// 脉冲原生的轴驱动操作
///
/// 每个操作对应一条或多条协议命令。位置、速度、限位一律以
/// 设备脉冲为单位；单位换算在控制器层完成。
pub trait AxisDriver: Send + Sync {
    /// 轴是否已回零（Home 标志）
    fn is_initialized(&self, axis_id: u8) -> Result<bool, DriverError>;

    /// 轴是否在运动中（InMotion 标志）
    ///
    /// 硬故障（Error 置位且 Home 未置位）时不返回布尔值，
    /// 而是以 [`DriverError::StatusFault`] 失败并枚举全部置位标志。
    fn is_in_motion(&self, axis_id: u8) -> Result<bool, DriverError>;

    /// 回零（`REF`）
    fn initialize(&self, axis_id: u8, direction: Direction) -> Result<(), DriverError>;

    /// 点动（`JN` / `JP`）
    fn jog(&self, axis_id: u8, direction: Direction) -> Result<(), DriverError>;

    /// 移动到绝对脉冲位置（`G<pulse>`）
    fn move_abs(&self, axis_id: u8, pulse: i32) -> Result<(), DriverError>;

    /// 相对移动（两步：`WA<delta>` 暂存偏移，`GW` 执行）
    fn move_rel(&self, axis_id: u8, pulse_delta: i32) -> Result<(), DriverError>;

    /// 停止（`SM`）
    fn stop(&self, axis_id: u8, mode: StopMode) -> Result<(), DriverError>;

    /// 设置三参数运动曲线（`SP` / `AC` / `SCRV`）
    fn set_movement_parameter(
        &self,
        axis_id: u8,
        speed: i32,
        acceleration: i32,
        scurve_percentage: i32,
    ) -> Result<(), DriverError>;

    /// 设置六参数运动曲线（接口一致性，不下发硬件命令）
    fn set_movement_parameter_detailed(
        &self,
        axis_id: u8,
        parameter: &DetailedMovementParameter,
    ) -> Result<(), DriverError>;

    /// 设置软件限位（`SLPN` / `SLPP`，两条命令）
    fn set_software_limit(
        &self,
        axis_id: u8,
        negative_limit: i32,
        positive_limit: i32,
    ) -> Result<(), DriverError>;

    /// 写入绝对位置寄存器（此设备族为空操作）
    fn set_abs_position(&self, axis_id: u8, pulse: i32) -> Result<(), DriverError>;

    /// 查询绝对脉冲位置（`TP`，十进制）
    fn abs_position(&self, axis_id: u8) -> Result<i32, DriverError>;

    /// 查询原始状态字（`TPSR`，十六进制），每次查询重新读取
    fn axis_status(&self, axis_id: u8) -> Result<crate::StatusRegister, DriverError>;

    /// 设置报警逻辑电平（此设备族为空操作，不转发到硬件）
    fn set_alarm_logic_level(&self, axis_id: u8, active: bool) -> Result<(), DriverError>;

    /// 设置伺服使能状态（此设备族为空操作，不转发到硬件）
    fn set_servo_state(&self, axis_id: u8, enabled: bool) -> Result<(), DriverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试方向符号与符号积
    #[test]
    fn test_direction_sign_and_combine() {
        assert_eq!(Direction::Positive.sign(), 1);
        assert_eq!(Direction::Negative.sign(), -1);

        assert_eq!(
            Direction::Positive.combine(Direction::Negative),
            Direction::Negative
        );
        assert_eq!(
            Direction::Negative.combine(Direction::Negative),
            Direction::Positive
        );
        assert_eq!(
            Direction::Positive.combine(Direction::Positive),
            Direction::Positive
        );
    }
}
