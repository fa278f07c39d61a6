//! 轴配置
//!
//! 构造时给出设备族默认值，运动命令下发前允许调用方修改；
//! 运动进行中修改配置不是线程安全的（见并发模型）。

use crate::ControllerError;
use std::time::Duration;
use xenax_driver::Direction;

/// 一根轴的机械与运动参数
///
/// 速度/加速度以设备脉冲率为单位（inc/s、inc/s²），
/// 位置与限位以设备脉冲为单位，位移常数以毫米为单位。
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisConfiguration {
    /// 每转位移 [mm]（换算除数，必须 > 0）
    pub displacement_per_rev: f64,
    /// 每转脉冲数（换算除数，必须 > 0）
    pub pulse_per_rev: i32,
    /// 轴的安装方向符号
    pub direction: Direction,
    /// 世界坐标系偏移 [mm]
    pub absolute_offset_mm: f64,
    /// 原点脉冲位置（`move_origin` 的目标）
    pub origin_pulse: i32,
    /// 负向软件限位 [pulse]
    pub negative_limit: i32,
    /// 正向软件限位 [pulse]
    pub positive_limit: i32,
    /// 初始速度 [inc/s]（六参数曲线用）
    pub initial_speed: i32,
    /// 最终速度 [inc/s]，速度百分比的基准
    pub final_speed: i32,
    /// 加速度 [inc/s²]
    pub acceleration: i32,
    /// 加速段时长 [ms]（六参数曲线用）
    pub acceleration_duration_ms: i32,
    /// 减速段时长 [ms]（六参数曲线用）
    pub deceleration_duration_ms: i32,
    /// S 曲线百分比
    pub scurve_percentage: i32,
    /// 减速段 S 曲线百分比（六参数曲线用）
    pub scurve_deceleration_percentage: i32,
    /// 回零方向
    pub initialize_direction: Direction,
    /// 运动/回零的完成等待窗口
    pub timeout: Duration,
    /// 运动完成轮询间隔
    pub move_poll_interval: Duration,
    /// 回零完成轮询间隔
    pub init_poll_interval: Duration,
}

impl Default for AxisConfiguration {
    /// XENAX 设备族默认参数
    fn default() -> Self {
        Self {
            displacement_per_rev: 1.0,
            pulse_per_rev: 1000,
            direction: Direction::Positive,
            absolute_offset_mm: 0.0,
            origin_pulse: 0,
            negative_limit: 0,
            positive_limit: 800_000,
            initial_speed: 0,
            final_speed: 100_000,
            acceleration: 1_000_000,
            acceleration_duration_ms: 0,
            deceleration_duration_ms: 0,
            scurve_percentage: 100,
            scurve_deceleration_percentage: 100,
            initialize_direction: Direction::Positive,
            timeout: Duration::from_millis(15_000),
            move_poll_interval: Duration::from_millis(50),
            init_poll_interval: Duration::from_millis(10),
        }
    }
}

impl AxisConfiguration {
    /// 校验换算前提（两个除数都必须为正）
    pub fn validate(&self) -> Result<(), ControllerError> {
        if self.pulse_per_rev <= 0 {
            return Err(ControllerError::InvalidConfiguration {
                reason: "pulse_per_rev must be positive",
            });
        }
        if self.displacement_per_rev <= 0.0 {
            return Err(ControllerError::InvalidConfiguration {
                reason: "displacement_per_rev must be positive",
            });
        }
        Ok(())
    }
}
