//! 电能质量状态分级
//!
//! 电压、频率、稳定度的分级阈值只在这里定义一次，
//! 页面徽章、区域预警文本、读数预警、统计汇总都从同一张表取值。

use serde::Serialize;

/// 分级阈值表
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// 低于此值为危险低压 (V)
    pub voltage_dangerous_below: f64,
    /// 正常电压下限 (V)
    pub voltage_normal_min: f64,
    /// 正常电压上限 (V)
    pub voltage_normal_max: f64,
    /// 高于此值为危险高压 (V)
    pub voltage_dangerous_above: f64,
    /// 稳定频率下限 (Hz)
    pub frequency_min: f64,
    /// 稳定频率上限 (Hz)
    pub frequency_max: f64,
    /// 稳定度优秀下限 (%)
    pub stability_excellent_min: f64,
    /// 稳定度良好下限 (%)
    pub stability_good_min: f64,
}

/// 全局唯一阈值表
pub const THRESHOLDS: Thresholds = Thresholds {
    voltage_dangerous_below: 200.0,
    voltage_normal_min: 220.0,
    voltage_normal_max: 240.0,
    voltage_dangerous_above: 250.0,
    frequency_min: 49.0,
    frequency_max: 51.0,
    stability_excellent_min: 90.0,
    stability_good_min: 70.0,
};

/// 页面徽章样式
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Default,
    Secondary,
    Destructive,
}

/// 偏离方向
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Deviation {
    Low,
    High,
}

/// 电压等级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoltageStatus {
    Dangerous(Deviation),
    Low,
    Normal,
    High,
}

/// 频率等级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyStatus {
    Stable,
    Unstable,
}

/// 稳定度等级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilityStatus {
    Excellent,
    Good,
    Poor,
}

/// 展示用的分级结果
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusBadge {
    pub status: &'static str,
    pub color: Badge,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation: Option<Deviation>,
}

impl Thresholds {
    pub fn classify_voltage(&self, voltage: f64) -> VoltageStatus {
        if voltage < self.voltage_dangerous_below {
            VoltageStatus::Dangerous(Deviation::Low)
        } else if voltage < self.voltage_normal_min {
            VoltageStatus::Low
        } else if voltage > self.voltage_dangerous_above {
            VoltageStatus::Dangerous(Deviation::High)
        } else if voltage > self.voltage_normal_max {
            VoltageStatus::High
        } else {
            VoltageStatus::Normal
        }
    }

    pub fn classify_frequency(&self, frequency: f64) -> FrequencyStatus {
        if frequency < self.frequency_min || frequency > self.frequency_max {
            FrequencyStatus::Unstable
        } else {
            FrequencyStatus::Stable
        }
    }

    pub fn classify_stability(&self, stability: f64) -> StabilityStatus {
        if stability >= self.stability_excellent_min {
            StabilityStatus::Excellent
        } else if stability >= self.stability_good_min {
            StabilityStatus::Good
        } else {
            StabilityStatus::Poor
        }
    }
}

impl VoltageStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VoltageStatus::Dangerous(_) => "Dangerous",
            VoltageStatus::Low => "Low",
            VoltageStatus::Normal => "Normal",
            VoltageStatus::High => "High",
        }
    }

    pub fn badge(&self) -> StatusBadge {
        let (color, deviation) = match self {
            VoltageStatus::Dangerous(d) => (Badge::Destructive, Some(*d)),
            VoltageStatus::Low => (Badge::Secondary, Some(Deviation::Low)),
            VoltageStatus::High => (Badge::Secondary, Some(Deviation::High)),
            VoltageStatus::Normal => (Badge::Default, None),
        };
        StatusBadge {
            status: self.label(),
            color,
            deviation,
        }
    }
}

impl FrequencyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FrequencyStatus::Stable => "Stable",
            FrequencyStatus::Unstable => "Unstable",
        }
    }

    pub fn badge(&self) -> StatusBadge {
        StatusBadge {
            status: self.label(),
            color: match self {
                FrequencyStatus::Stable => Badge::Default,
                FrequencyStatus::Unstable => Badge::Destructive,
            },
            deviation: None,
        }
    }
}

impl StabilityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StabilityStatus::Excellent => "Excellent",
            StabilityStatus::Good => "Good",
            StabilityStatus::Poor => "Poor",
        }
    }

    pub fn badge(&self) -> StatusBadge {
        StatusBadge {
            status: self.label(),
            color: match self {
                StabilityStatus::Excellent => Badge::Default,
                StabilityStatus::Good => Badge::Secondary,
                StabilityStatus::Poor => Badge::Destructive,
            },
            deviation: None,
        }
    }
}

/// 一个区域三项读数的分级
#[derive(Debug, Clone, Serialize)]
pub struct RegionStatus {
    pub voltage: StatusBadge,
    pub frequency: StatusBadge,
    pub stability: StatusBadge,
}

impl RegionStatus {
    pub fn classify(voltage: f64, frequency: f64, stability: f64) -> Self {
        Self {
            voltage: THRESHOLDS.classify_voltage(voltage).badge(),
            frequency: THRESHOLDS.classify_frequency(frequency).badge(),
            stability: THRESHOLDS.classify_stability(stability).badge(),
        }
    }
}
