//! 状态寄存器（`TPSR`）位语义
//!
//! 设备以十六进制返回一个 32 位状态字，每一位对应一个命名状态标志。
//! 位序由固件固定，必须与下表完全一致。
//!
//! 状态字是只读快照：每次查询重新读取，上层不得跨调用缓存。

/// 状态字的命名标志位（26 个位置，位 0 起）
///
/// 枚举判别值即位号：`Error = 0` 表示第 0 位。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AxisStatus {
    Error = 0,
    Home = 1,
    InMotion = 2,
    InPosition = 3,
    EndOfProgram = 4,
    InForce = 5,
    InSector = 6,
    ForceInSector = 7,
    InverterVoltage = 8,
    EndOfGantryInit = 9,
    LimitSwitchLeft = 10,
    LimitSwitchRight = 11,
    EmergencyExit1RemainPowerOn = 12,
    EmergencyExtPowerOff = 13,
    CoggingReferenceDriveActive = 14,
    IForceLimitReached = 15,
    StoPrimedOrHit = 16,
    Ss1PrimedOrHit = 17,
    Ss2Primed = 18,
    Ss2Hit = 19,
    SlsPrimed = 20,
    SlsSpeedHit = 21,
    SlsPositionHit = 22,
    Warning = 23,
    Information = 24,
    PhasingDone = 25,
}

impl AxisStatus {
    /// 全部标志位，按位号升序
    pub const ALL: [AxisStatus; 26] = [
        AxisStatus::Error,
        AxisStatus::Home,
        AxisStatus::InMotion,
        AxisStatus::InPosition,
        AxisStatus::EndOfProgram,
        AxisStatus::InForce,
        AxisStatus::InSector,
        AxisStatus::ForceInSector,
        AxisStatus::InverterVoltage,
        AxisStatus::EndOfGantryInit,
        AxisStatus::LimitSwitchLeft,
        AxisStatus::LimitSwitchRight,
        AxisStatus::EmergencyExit1RemainPowerOn,
        AxisStatus::EmergencyExtPowerOff,
        AxisStatus::CoggingReferenceDriveActive,
        AxisStatus::IForceLimitReached,
        AxisStatus::StoPrimedOrHit,
        AxisStatus::Ss1PrimedOrHit,
        AxisStatus::Ss2Primed,
        AxisStatus::Ss2Hit,
        AxisStatus::SlsPrimed,
        AxisStatus::SlsSpeedHit,
        AxisStatus::SlsPositionHit,
        AxisStatus::Warning,
        AxisStatus::Information,
        AxisStatus::PhasingDone,
    ];

    /// 此标志对应的位号
    #[inline]
    pub const fn bit(self) -> u32 {
        self as u32
    }
}

/// 32 位状态字的值类型封装
///
/// 纯位测试，无任何副作用。`Copy` 语义，适合在日志与错误中直接携带。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusRegister(u32);

impl StatusRegister {
    /// 从原始状态字构造
    #[inline]
    pub const fn from_raw(word: u32) -> Self {
        StatusRegister(word)
    }

    /// 原始状态字
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// 标志位是否置位：`(word & (1 << n)) != 0`
    #[inline]
    pub const fn is_set(self, flag: AxisStatus) -> bool {
        self.0 & (1 << flag.bit()) != 0
    }

    /// 当前置位的全部标志，按位号升序
    pub fn active_flags(self) -> Vec<AxisStatus> {
        AxisStatus::ALL
            .into_iter()
            .filter(|flag| self.is_set(*flag))
            .collect()
    }

    /// 硬故障判定：Error 置位且 Home 未置位
    ///
    /// 回零完成前的 Error 位表示驱动器处于故障反应状态，
    /// 此时任何运动状态查询都不应返回布尔值。
    #[inline]
    pub const fn is_hard_fault(self) -> bool {
        self.is_set(AxisStatus::Error) && !self.is_set(AxisStatus::Home)
    }
}

impl From<u32> for StatusRegister {
    fn from(word: u32) -> Self {
        StatusRegister::from_raw(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试 0b110：Home 与 InMotion 置位，Error 未置位
    #[test]
    fn test_bit_semantics() {
        let reg = StatusRegister::from_raw(0b110);
        assert!(reg.is_set(AxisStatus::Home));
        assert!(reg.is_set(AxisStatus::InMotion));
        assert!(!reg.is_set(AxisStatus::Error));
        assert!(!reg.is_hard_fault());
    }

    /// 测试 0b01：Error 置位且 Home 未置位 ⇒ 硬故障
    #[test]
    fn test_hard_fault_detection() {
        let reg = StatusRegister::from_raw(0b01);
        assert!(reg.is_hard_fault());
        assert_eq!(reg.active_flags(), vec![AxisStatus::Error]);

        // Error + Home 同时置位不是硬故障（回零后的可恢复错误）
        let reg = StatusRegister::from_raw(0b11);
        assert!(!reg.is_hard_fault());
    }

    /// 测试 active_flags 的枚举顺序与完整性
    #[test]
    fn test_active_flags_enumeration() {
        let reg = StatusRegister::from_raw((1 << 25) | (1 << 2) | 1);
        assert_eq!(
            reg.active_flags(),
            vec![
                AxisStatus::Error,
                AxisStatus::InMotion,
                AxisStatus::PhasingDone
            ]
        );

        assert!(StatusRegister::from_raw(0).active_flags().is_empty());
        assert_eq!(StatusRegister::from_raw(u32::MAX).active_flags().len(), 26);
    }

    /// 测试位号与 ALL 表的一致性
    #[test]
    fn test_bit_positions_match_all_table() {
        for (index, flag) in AxisStatus::ALL.iter().enumerate() {
            assert_eq!(flag.bit() as usize, index);
        }
    }
}
