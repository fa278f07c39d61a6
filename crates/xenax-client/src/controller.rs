//! 单位感知的轴控制器
//!
//! 一次运动请求的状态机：
//!
//! ```text
//! Idle → Commanded → Polling → {Completed | TimedOut | Cancelled | Faulted}
//! ```
//!
//! - `Idle → Commanded`：下发运动曲线、软件限位与运动命令
//! - `Commanded → Polling`：启动单调计时，按固定间隔查询运动/回零状态，
//!   每个间隔让出控制权（这是系统里唯一的阻塞点）
//! - 任何异常退出（超时、取消、故障）都先尽力下发一次立即停止，
//!   再携带原始错误向上抛出；停止自身失败时两个错误一并报告
//!
//! 命令下发形式（不等待）与 `_wait` 形式（完整状态机）共享同一套
//! 换算与校验逻辑；需要异步运行时的调用方可将 `_wait` 形式包进
//! `spawn_blocking` 等适配层。

use crate::{AxisConfiguration, ControllerError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use xenax_driver::{AxisDriver, CancelToken, DetailedMovementParameter, Direction, StopMode};

/// 单位感知的轴控制操作
///
/// 以毫米、方向和速度百分比表达运动；脉冲换算对调用方透明。
/// 每个运动操作都有命令下发形式与阻塞等待（`_wait`）形式，
/// 点动是持续运动、没有完成条件，因此没有等待形式。
pub trait AxisController {
    /// 轴是否在运动中
    fn is_in_motion(&self) -> Result<bool, ControllerError>;

    /// 轴是否已回零
    fn is_initialized(&self) -> Result<bool, ControllerError>;

    /// 下发回零命令（清零软件限位后 `REF`）
    fn initialize(&self) -> Result<(), ControllerError>;

    /// 回零并等待完成
    fn initialize_wait(&self, token: &CancelToken) -> Result<(), ControllerError>;

    /// 沿方向点动（方向与配置符号叠加）
    fn move_dir(&self, direction: Direction, speed_percentage: f64) -> Result<(), ControllerError>;

    /// 移动到世界坐标绝对位置 [mm]
    fn move_abs(&self, millimetre: f64, speed_percentage: f64) -> Result<(), ControllerError>;

    /// 移动到世界坐标绝对位置并等待完成
    fn move_abs_wait(
        &self,
        millimetre: f64,
        speed_percentage: f64,
        token: &CancelToken,
    ) -> Result<(), ControllerError>;

    /// 相对移动 [mm]（脉冲增量乘以配置的方向符号）
    fn move_rel(&self, millimetre: f64, speed_percentage: f64) -> Result<(), ControllerError>;

    /// 相对移动并等待完成
    fn move_rel_wait(
        &self,
        millimetre: f64,
        speed_percentage: f64,
        token: &CancelToken,
    ) -> Result<(), ControllerError>;

    /// 移动到配置的原点脉冲位置
    fn move_origin(&self, speed_percentage: f64) -> Result<(), ControllerError>;

    /// 移动到原点并等待完成
    fn move_origin_wait(
        &self,
        speed_percentage: f64,
        token: &CancelToken,
    ) -> Result<(), ControllerError>;

    /// 停止运动
    fn stop(&self, mode: StopMode) -> Result<(), ControllerError>;

    /// 停止并等待轴静止
    fn stop_wait(&self, mode: StopMode, token: &CancelToken) -> Result<(), ControllerError>;

    /// 世界坐标位置 [mm]
    fn position(&self) -> Result<f64, ControllerError>;

    /// 设备原生绝对位置 [pulse]
    fn abs_position(&self) -> Result<i32, ControllerError>;
}

/// XENAX 轴控制器
///
/// 持有驱动接口与轴配置；配置在构造时给出设备族默认值，
/// 下发运动命令之前可由调用方调整。
///
/// # 示例
///
/// ```no_run
/// use std::net::Ipv4Addr;
/// use std::sync::Arc;
/// use std::time::Duration;
/// use xenax_client::{AxisConfiguration, AxisController, CancelToken, XenaxAxisController};
/// use xenax_client::XenaxAxisDriver;
///
/// let driver = Arc::new(XenaxAxisDriver::new(Ipv4Addr::new(192, 168, 2, 100), 10001));
/// driver.connect(Duration::from_millis(250))?;
///
/// let controller = XenaxAxisController::new("x-axis", 0, driver, AxisConfiguration::default());
/// controller.move_abs_wait(10.0, 100.0, &CancelToken::new())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct XenaxAxisController {
    id: String,
    axis_id: u8,
    driver: Arc<dyn AxisDriver>,
    config: AxisConfiguration,
}

impl XenaxAxisController {
    /// 创建控制器
    pub fn new(
        id: impl Into<String>,
        axis_id: u8,
        driver: Arc<dyn AxisDriver>,
        config: AxisConfiguration,
    ) -> Self {
        Self {
            id: id.into(),
            axis_id,
            driver,
            config,
        }
    }

    /// 控制器标识
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 轴号
    pub fn axis_id(&self) -> u8 {
        self.axis_id
    }

    /// 轴配置
    pub fn config(&self) -> &AxisConfiguration {
        &self.config
    }

    /// 轴配置（可变，不得与在途运动并发修改）
    pub fn config_mut(&mut self) -> &mut AxisConfiguration {
        &mut self.config
    }

    /// 下层驱动接口
    pub fn driver(&self) -> &Arc<dyn AxisDriver> {
        &self.driver
    }

    /// 运动前置：校验配置与速度百分比，下发两种运动曲线与软件限位
    ///
    /// 返回派生后的最终速度 [inc/s]（`final_speed × pct / 100`，截断取整）。
    fn prepare_motion(&self, speed_percentage: f64) -> Result<i32, ControllerError> {
        self.config.validate()?;
        if !(speed_percentage > 0.0 && speed_percentage <= 100.0) {
            return Err(ControllerError::InvalidSpeedPercentage {
                value: speed_percentage,
            });
        }

        let adjusted_speed =
            (self.config.final_speed as f64 * (speed_percentage / 100.0)) as i32;

        self.driver.set_movement_parameter(
            self.axis_id,
            adjusted_speed,
            self.config.acceleration,
            self.config.scurve_percentage,
        )?;
        self.driver.set_movement_parameter_detailed(
            self.axis_id,
            &DetailedMovementParameter {
                initial_speed: self.config.initial_speed,
                final_speed: adjusted_speed,
                acceleration_duration_ms: self.config.acceleration_duration_ms,
                deceleration_duration_ms: self.config.deceleration_duration_ms,
                scurve_acceleration_percentage: self.config.scurve_percentage,
                scurve_deceleration_percentage: self.config.scurve_deceleration_percentage,
            },
        )?;
        self.driver.set_software_limit(
            self.axis_id,
            self.config.negative_limit,
            self.config.positive_limit,
        )?;

        Ok(adjusted_speed)
    }

    /// 异常退出前的安全停止
    ///
    /// 停止成功时返回原始错误；停止失败时两个错误一并报告，
    /// 原始错误不被掩盖。
    fn stop_then(&self, original: ControllerError) -> ControllerError {
        warn!(axis = %self.id, error = %original, "abnormal exit, issuing safety stop");
        match self.driver.stop(self.axis_id, StopMode::Immediate) {
            Ok(()) => original,
            Err(stop) => ControllerError::StopFailed {
                original: Box::new(original),
                stop: Box::new(stop),
            },
        }
    }

    /// 完成轮询：按固定间隔评估完成条件，直至完成/超时/取消/故障
    ///
    /// 检查顺序固定为 条件 → 取消 → 超时，保证取消永远不会被
    /// 同时到期的超时遮蔽。
    fn poll_until<F>(
        &self,
        interval: Duration,
        token: &CancelToken,
        mut done: F,
    ) -> Result<(), ControllerError>
    where
        F: FnMut() -> Result<bool, ControllerError>,
    {
        let started = Instant::now();
        loop {
            match done() {
                Ok(true) => {
                    debug!(axis = %self.id, elapsed_ms = started.elapsed().as_millis() as u64, "motion complete");
                    return Ok(());
                }
                Ok(false) => {}
                Err(e) => return Err(self.stop_then(e)),
            }

            if token.is_cancelled() {
                return Err(self.stop_then(ControllerError::Cancelled {
                    axis_id: self.axis_id,
                }));
            }

            let elapsed = started.elapsed();
            if elapsed > self.config.timeout {
                return Err(self.stop_then(ControllerError::Timeout {
                    axis_id: self.axis_id,
                    elapsed_ms: elapsed.as_millis() as u64,
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }));
            }

            spin_sleep::sleep(interval);
        }
    }

    /// 等待"不在运动中"
    fn wait_motion_done(&self, token: &CancelToken) -> Result<(), ControllerError> {
        self.poll_until(self.config.move_poll_interval, token, || {
            Ok(!self.driver.is_in_motion(self.axis_id)?)
        })
    }
}

impl AxisController for XenaxAxisController {
    fn is_in_motion(&self) -> Result<bool, ControllerError> {
        Ok(self.driver.is_in_motion(self.axis_id)?)
    }

    fn is_initialized(&self) -> Result<bool, ControllerError> {
        Ok(self.driver.is_initialized(self.axis_id)?)
    }

    fn initialize(&self) -> Result<(), ControllerError> {
        info!(axis = %self.id, "initialize");
        // 回零前清零软件限位，否则 REF 可能被限位拒绝
        self.driver.set_software_limit(self.axis_id, 0, 0)?;
        self.driver
            .initialize(self.axis_id, self.config.initialize_direction)?;
        Ok(())
    }

    fn initialize_wait(&self, token: &CancelToken) -> Result<(), ControllerError> {
        self.initialize().map_err(|e| self.stop_then(e))?;
        self.poll_until(self.config.init_poll_interval, token, || {
            Ok(self.driver.is_initialized(self.axis_id)?)
        })
    }

    fn move_dir(&self, direction: Direction, speed_percentage: f64) -> Result<(), ControllerError> {
        info!(axis = %self.id, ?direction, speed_percentage, "jog");
        self.prepare_motion(speed_percentage)?;
        let device_direction = direction.combine(self.config.direction);
        self.driver.jog(self.axis_id, device_direction)?;
        Ok(())
    }

    fn move_abs(&self, millimetre: f64, speed_percentage: f64) -> Result<(), ControllerError> {
        info!(axis = %self.id, millimetre, speed_percentage, "move absolute");
        self.prepare_motion(speed_percentage)?;
        let pulse = self.config.to_adjusted_pulse(millimetre);
        self.driver.move_abs(self.axis_id, pulse)?;
        Ok(())
    }

    fn move_abs_wait(
        &self,
        millimetre: f64,
        speed_percentage: f64,
        token: &CancelToken,
    ) -> Result<(), ControllerError> {
        self.move_abs(millimetre, speed_percentage)
            .map_err(|e| self.stop_then(e))?;
        self.wait_motion_done(token)
    }

    fn move_rel(&self, millimetre: f64, speed_percentage: f64) -> Result<(), ControllerError> {
        info!(axis = %self.id, millimetre, speed_percentage, "move relative");
        self.prepare_motion(speed_percentage)?;
        let pulse = self.config.millimetre_to_pulse(millimetre);
        // 脉冲增量乘以配置方向符号；符号约定需在实机上复核
        let delta = pulse * self.config.direction.sign() as i32;
        self.driver.move_rel(self.axis_id, delta)?;
        Ok(())
    }

    fn move_rel_wait(
        &self,
        millimetre: f64,
        speed_percentage: f64,
        token: &CancelToken,
    ) -> Result<(), ControllerError> {
        self.move_rel(millimetre, speed_percentage)
            .map_err(|e| self.stop_then(e))?;
        self.wait_motion_done(token)
    }

    fn move_origin(&self, speed_percentage: f64) -> Result<(), ControllerError> {
        info!(axis = %self.id, origin_pulse = self.config.origin_pulse, speed_percentage, "move to origin");
        self.prepare_motion(speed_percentage)?;
        self.driver.move_abs(self.axis_id, self.config.origin_pulse)?;
        Ok(())
    }

    fn move_origin_wait(
        &self,
        speed_percentage: f64,
        token: &CancelToken,
    ) -> Result<(), ControllerError> {
        self.move_origin(speed_percentage)
            .map_err(|e| self.stop_then(e))?;
        self.wait_motion_done(token)
    }

    fn stop(&self, mode: StopMode) -> Result<(), ControllerError> {
        info!(axis = %self.id, ?mode, "stop");
        self.driver.stop(self.axis_id, mode)?;
        Ok(())
    }

    fn stop_wait(&self, mode: StopMode, token: &CancelToken) -> Result<(), ControllerError> {
        self.stop(mode)?;
        self.wait_motion_done(token)
    }

    fn position(&self) -> Result<f64, ControllerError> {
        self.config.validate()?;
        let pulse = self.driver.abs_position(self.axis_id)?;
        Ok(self.config.to_adjusted_millimetre(pulse))
    }

    fn abs_position(&self) -> Result<i32, ControllerError> {
        Ok(self.driver.abs_position(self.axis_id)?)
    }
}
