// ==========================================
// 出口物流报价系统 - 物流费用占比预警
// ==========================================
// 指标: 单件物流费 / 单件 FOB 成本
// 超过阈值 → WARNING, 建议提高起订量或改用模块化包装
// ==========================================

use crate::domain::economics::LogisticsAlert;
use crate::domain::types::LogisticsRiskLevel;
use serde_json::json;

pub struct LogisticsRiskEngine {
    threshold: f64,
}

impl LogisticsRiskEngine {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// 评估物流费用占比
    ///
    /// # 参数
    /// - logistics_total: 所选运输方式总费用 (整票)
    /// - fob_seller_total: FOB 术语下卖方合计 (整票)
    pub fn assess(&self, logistics_total: f64, fob_seller_total: f64) -> LogisticsAlert {
        // 数量在分子分母中约去
        let logistics_ratio = if fob_seller_total > 0.0 {
            logistics_total / fob_seller_total
        } else {
            0.0
        };

        let level = if logistics_ratio > self.threshold {
            LogisticsRiskLevel::Warning
        } else {
            LogisticsRiskLevel::Stable
        };

        let message = match level {
            LogisticsRiskLevel::Warning => json!({
                "level": level.to_string(),
                "primary_reason": "LOGISTICS_RATIO_EXCEEDED",
                "suggestions": ["INCREASE_ORDER_QUANTITY", "USE_MODULAR_PACKING"],
                "details": {
                    "logistics_ratio": logistics_ratio,
                    "threshold": self.threshold,
                }
            }),
            LogisticsRiskLevel::Stable => json!({
                "level": level.to_string(),
                "primary_reason": "WITHIN_THRESHOLD",
                "details": {
                    "logistics_ratio": logistics_ratio,
                    "threshold": self.threshold,
                }
            }),
        };

        LogisticsAlert {
            level,
            logistics_ratio,
            threshold: self.threshold,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_above_threshold() {
        let alert = LogisticsRiskEngine::new(0.2).assess(30_000.0, 100_000.0);
        assert_eq!(alert.level, LogisticsRiskLevel::Warning);
        assert!((alert.logistics_ratio - 0.3).abs() < 1e-12);
        assert!(alert.message.contains("USE_MODULAR_PACKING"));
    }

    #[test]
    fn test_threshold_itself_is_stable() {
        let alert = LogisticsRiskEngine::new(0.2).assess(20_000.0, 100_000.0);
        assert_eq!(alert.level, LogisticsRiskLevel::Stable);
    }

    #[test]
    fn test_zero_fob_total() {
        let alert = LogisticsRiskEngine::new(0.2).assess(20_000.0, 0.0);
        assert_eq!(alert.logistics_ratio, 0.0);
        assert_eq!(alert.level, LogisticsRiskLevel::Stable);
    }
}
