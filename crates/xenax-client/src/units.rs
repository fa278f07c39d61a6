//! 脉冲↔毫米换算
//!
//! 换算公式（全系统唯一出处）：
//!
//! - `pulse = round(mm × pulse_per_rev / displacement_per_rev)`
//! - `mm = pulse × displacement_per_rev / pulse_per_rev`
//!
//! 世界坐标（adjusted）换算在此基础上折算方向符号与绝对偏移：
//!
//! - `adjusted_mm = raw_mm / direction + absolute_offset`
//! - `adjusted_pulse = to_pulse((target_mm − absolute_offset) × direction)`
//!
//! 取整只在毫米→脉冲方向发生一次，避免反复换算累计漂移。

use crate::AxisConfiguration;

impl AxisConfiguration {
    /// 脉冲 → 毫米（精确，无取整）
    pub fn pulse_to_millimetre(&self, pulse: i32) -> f64 {
        let millimetre_per_pulse = self.displacement_per_rev / self.pulse_per_rev as f64;
        pulse as f64 * millimetre_per_pulse
    }

    /// 毫米 → 脉冲（四舍五入到最近脉冲）
    pub fn millimetre_to_pulse(&self, millimetre: f64) -> i32 {
        let pulse_per_millimetre = self.pulse_per_rev as f64 / self.displacement_per_rev;
        (millimetre * pulse_per_millimetre).round() as i32
    }

    /// 设备脉冲 → 世界坐标毫米（折算方向符号与绝对偏移）
    pub fn to_adjusted_millimetre(&self, pulse: i32) -> f64 {
        let millimetre = self.pulse_to_millimetre(pulse);
        millimetre / self.direction.sign() as f64 + self.absolute_offset_mm
    }

    /// 世界坐标毫米 → 设备脉冲
    pub fn to_adjusted_pulse(&self, millimetre: f64) -> i32 {
        let adjusted = (millimetre - self.absolute_offset_mm) * self.direction.sign() as f64;
        self.millimetre_to_pulse(adjusted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use xenax_driver::Direction;

    fn canonical() -> AxisConfiguration {
        AxisConfiguration {
            displacement_per_rev: 1.0,
            pulse_per_rev: 1000,
            direction: Direction::Positive,
            absolute_offset_mm: 0.0,
            ..AxisConfiguration::default()
        }
    }

    /// 测试规范场景：10.0 mm ⇒ 10000 脉冲
    #[test]
    fn test_canonical_conversion() {
        let config = canonical();
        assert_eq!(config.millimetre_to_pulse(10.0), 10_000);
        assert_eq!(config.pulse_to_millimetre(10_000), 10.0);
        assert_eq!(config.to_adjusted_pulse(10.0), 10_000);
    }

    /// 测试方向符号与偏移的折算
    #[test]
    fn test_adjusted_conversion_with_sign_and_offset() {
        let config = AxisConfiguration {
            direction: Direction::Negative,
            absolute_offset_mm: 5.0,
            ..canonical()
        };

        // (12.5 - 5.0) * -1 = -7.5 mm => -7500 pulses
        assert_eq!(config.to_adjusted_pulse(12.5), -7500);
        // -7500 pulses => -7.5 / -1 + 5.0 = 12.5 mm
        let back = config.to_adjusted_millimetre(-7500);
        assert!((back - 12.5).abs() < 1e-9);
    }

    /// 测试四舍五入到最近脉冲（不截断）
    #[test]
    fn test_rounding_to_nearest_pulse() {
        let config = canonical();
        assert_eq!(config.millimetre_to_pulse(0.0004), 0);
        assert_eq!(config.millimetre_to_pulse(0.0006), 1);
        assert_eq!(config.millimetre_to_pulse(-0.0006), -1);
    }

    proptest! {
        /// 性质：脉冲 → 毫米 → 脉冲在 ±1 脉冲内闭环
        #[test]
        fn prop_roundtrip_within_one_pulse(
            pulse in -1_000_000i32..1_000_000i32,
            ppr in 1i32..100_000i32,
            dpr in 0.001f64..100.0f64,
        ) {
            let config = AxisConfiguration {
                displacement_per_rev: dpr,
                pulse_per_rev: ppr,
                ..canonical()
            };
            let back = config.millimetre_to_pulse(config.pulse_to_millimetre(pulse));
            prop_assert!((back - pulse).abs() <= 1);
        }

        /// 性质：世界坐标换算在一个脉冲对应的毫米数内闭环
        #[test]
        fn prop_adjusted_roundtrip(
            millimetre in -500.0f64..500.0f64,
            offset in -100.0f64..100.0f64,
            negative in proptest::bool::ANY,
        ) {
            let config = AxisConfiguration {
                direction: if negative { Direction::Negative } else { Direction::Positive },
                absolute_offset_mm: offset,
                ..canonical()
            };
            let one_pulse_mm = config.displacement_per_rev / config.pulse_per_rev as f64;
            let back = config.to_adjusted_millimetre(config.to_adjusted_pulse(millimetre));
            prop_assert!((back - millimetre).abs() <= one_pulse_mm);
        }
    }
}
