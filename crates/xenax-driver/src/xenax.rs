//! XENAX 设备族的 `AxisDriver` 实现
//!
//! 所有操作都展开为固定模板的 ASCII 命令，经命令通道串行执行。
//! XENAX 是单轴设备，`axis_id` 仅用于错误上下文与多设备日志区分。

use crate::axis::{AxisDriver, DetailedMovementParameter, Direction, StopMode};
use crate::channel::CommandChannel;
use crate::error::DriverError;
use std::net::Ipv4Addr;
use std::time::Duration;
use tracing::{debug, trace};
use xenax_protocol::StatusRegister;
use xenax_tcp::{CancelToken, ConnectionError};

/// XENAX 轴驱动
///
/// # 示例
///
/// ```no_run
/// use std::net::Ipv4Addr;
/// use std::time::Duration;
/// use xenax_driver::{AxisDriver, XenaxAxisDriver};
///
/// let driver = XenaxAxisDriver::new(Ipv4Addr::new(192, 168, 2, 100), 10001);
/// driver.connect(Duration::from_millis(250))?;
/// driver.move_abs(0, 10_000)?;
/// # Ok::<(), xenax_driver::DriverError>(())
/// ```
#[derive(Debug)]
pub struct XenaxAxisDriver {
    id: String,
    channel: CommandChannel,
}

impl XenaxAxisDriver {
    /// 创建未连接的驱动实例
    pub fn new(ip: Ipv4Addr, port: u16) -> Self {
        Self {
            id: format!("XenaxAxisDriver[{ip}:{port}]"),
            channel: CommandChannel::new(ip, port),
        }
    }

    /// 驱动标识（`XenaxAxisDriver[ip:port]`）
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 底层命令通道（用于诊断或透传任意命令）
    pub fn channel(&self) -> &CommandChannel {
        &self.channel
    }

    /// 阻塞连接
    pub fn connect(&self, timeout: Duration) -> Result<(), ConnectionError> {
        self.channel.connect(timeout)
    }

    /// 可取消的轮询式连接
    pub fn connect_with_cancel(
        &self,
        timeout: Duration,
        token: &CancelToken,
    ) -> Result<(), ConnectionError> {
        self.channel.connect_with_cancel(timeout, token)
    }

    /// 断开连接（幂等）
    pub fn disconnect(&self) {
        self.channel.disconnect();
    }

    /// 活性探测
    pub fn is_connected(&self) -> bool {
        self.channel.is_connected()
    }

    /// 查询设备错误码（legacy `TE`）
    pub fn error_code(&self) -> Result<i32, DriverError> {
        let payload = self.channel.execute("TE")?;
        parse_decimal("TE", &payload)
    }

    /// 查询设备错误文本（legacy `TES`）
    pub fn error_message(&self) -> Result<String, DriverError> {
        self.channel.execute("TES")
    }

    fn query_status(&self, axis_id: u8) -> Result<StatusRegister, DriverError> {
        let payload = self.channel.execute("TPSR")?;
        let word =
            u32::from_str_radix(payload.trim(), 16).map_err(|_| DriverError::Parse {
                command: "TPSR".to_string(),
                payload: payload.clone(),
                expected: "hexadecimal status word",
            })?;
        trace!(axis_id, word = format_args!("{word:#x}"), "status word");
        Ok(StatusRegister::from_raw(word))
    }
}

fn parse_decimal(command: &str, payload: &str) -> Result<i32, DriverError> {
    payload.trim().parse::<i32>().map_err(|_| DriverError::Parse {
        command: command.to_string(),
        payload: payload.to_string(),
        expected: "decimal integer",
    })
}

impl AxisDriver for XenaxAxisDriver {
    fn is_initialized(&self, axis_id: u8) -> Result<bool, DriverError> {
        let status = self.query_status(axis_id)?;
        Ok(status.is_set(crate::AxisStatus::Home))
    }

    fn is_in_motion(&self, axis_id: u8) -> Result<bool, DriverError> {
        let status = self.query_status(axis_id)?;
        if status.is_hard_fault() {
            return Err(DriverError::StatusFault {
                axis_id,
                active_flags: status.active_flags(),
            });
        }
        Ok(status.is_set(crate::AxisStatus::InMotion))
    }

    fn initialize(&self, axis_id: u8, _direction: Direction) -> Result<(), DriverError> {
        debug!(axis_id, driver = %self.id, "initialize (home)");
        self.channel.execute("REF")?;
        Ok(())
    }

    fn jog(&self, axis_id: u8, direction: Direction) -> Result<(), DriverError> {
        let command = match direction {
            Direction::Negative => "JN",
            Direction::Positive => "JP",
        };
        debug!(axis_id, command, driver = %self.id, "jog");
        self.channel.execute(command)?;
        Ok(())
    }

    fn move_abs(&self, axis_id: u8, pulse: i32) -> Result<(), DriverError> {
        debug!(axis_id, pulse, driver = %self.id, "move absolute");
        self.channel.execute(&format!("G{pulse}"))?;
        Ok(())
    }

    fn move_rel(&self, axis_id: u8, pulse_delta: i32) -> Result<(), DriverError> {
        debug!(axis_id, pulse_delta, driver = %self.id, "move relative");
        self.channel.execute(&format!("WA{pulse_delta}"))?;
        self.channel.execute("GW")?;
        Ok(())
    }

    fn stop(&self, axis_id: u8, _mode: StopMode) -> Result<(), DriverError> {
        // 协议只有立即停止，所有 StopMode 都映射为 SM
        debug!(axis_id, driver = %self.id, "stop");
        self.channel.execute("SM")?;
        Ok(())
    }

    fn set_movement_parameter(
        &self,
        axis_id: u8,
        speed: i32,
        acceleration: i32,
        scurve_percentage: i32,
    ) -> Result<(), DriverError> {
        trace!(axis_id, speed, acceleration, scurve_percentage, "set movement parameter");
        self.channel.execute(&format!("SP{speed}"))?;
        self.channel.execute(&format!("AC{acceleration}"))?;
        self.channel.execute(&format!("SCRV{scurve_percentage}"))?;
        Ok(())
    }

    fn set_movement_parameter_detailed(
        &self,
        axis_id: u8,
        parameter: &DetailedMovementParameter,
    ) -> Result<(), DriverError> {
        // 没有对应的设备命令；接受但不下发
        trace!(axis_id, ?parameter, "detailed movement parameter accepted (no device command)");
        Ok(())
    }

    fn set_software_limit(
        &self,
        axis_id: u8,
        negative_limit: i32,
        positive_limit: i32,
    ) -> Result<(), DriverError> {
        trace!(axis_id, negative_limit, positive_limit, "set software limits");
        self.channel.execute(&format!("SLPN{negative_limit}"))?;
        self.channel.execute(&format!("SLPP{positive_limit}"))?;
        Ok(())
    }

    fn set_abs_position(&self, _axis_id: u8, _pulse: i32) -> Result<(), DriverError> {
        // 位置寄存器不可写；接受但不下发
        Ok(())
    }

    fn abs_position(&self, axis_id: u8) -> Result<i32, DriverError> {
        let payload = self.channel.execute("TP")?;
        let pulse = parse_decimal("TP", &payload)?;
        trace!(axis_id, pulse, "absolute position");
        Ok(pulse)
    }

    fn axis_status(&self, axis_id: u8) -> Result<StatusRegister, DriverError> {
        self.query_status(axis_id)
    }

    fn set_alarm_logic_level(&self, axis_id: u8, active: bool) -> Result<(), DriverError> {
        // 此设备族没有报警电平命令；接受但不下发
        trace!(axis_id, active, "alarm logic level accepted (no device command)");
        Ok(())
    }

    fn set_servo_state(&self, axis_id: u8, enabled: bool) -> Result<(), DriverError> {
        // 伺服使能由设备自身管理；接受但不下发
        trace!(axis_id, enabled, "servo state accepted (no device command)");
        Ok(())
    }
}
