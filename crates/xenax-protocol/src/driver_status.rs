//! 设备忙/故障码（响应中 `#<code>` 的数字部分）
//!
//! 码值由设备固件固定，枚举值必须与固件文档一致。

use num_enum::FromPrimitive;

/// `#<code>` 错误标记对应的设备状态
///
/// 无法识别的码一律映射为 [`DriverStatus::UnknownError`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i64)]
pub enum DriverStatus {
    /// 未知错误（所有未列出的码的兜底值）
    #[num_enum(default)]
    UnknownError = 0,
    /// 错误队列非空
    ErrorInQueue = 1,
    /// 驱动正在执行运动
    DriveIsActive = 3,
    /// 设备内部程序正在执行
    ProgramIsActive = 5,
    Ee1InQueue = 13,
    EeInQueue = 14,
    ForceCalibrationActive = 15,
    RotaryReferenceActive = 34,
    GantryReferenceActive = 36,
    /// 回零（REF）进行中
    ReferenceActive = 38,
    CommandAtActiveBusModuleNotAllowed = 40,
    FaultReactionActive = 47,
    ValueOfParameterNotValid = 65,
    CommandNotCompletedCorrectly = 66,
}

impl DriverStatus {
    /// 从设备报告的数字码映射
    pub fn from_code(code: i64) -> Self {
        Self::from_primitive(code)
    }
}
