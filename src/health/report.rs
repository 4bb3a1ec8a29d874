//! 调试报告模块
//!
//! 汇总一次即时探测与诊断信息，生成 /debug 端点的文档

use crate::health::Prober;
use serde_json::json;
use std::sync::Arc;

/// 调试报告生成器
pub struct DebugReporter {
    /// 探测器
    prober: Arc<dyn Prober>,
}

impl DebugReporter {
    /// 创建新的调试报告生成器
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self { prober }
    }

    /// 生成调试文档
    ///
    /// 执行一次即时探测并收集诊断信息。探测层面的异常以文档字段呈现，
    /// 文档本身总是生成成功。
    pub async fn report(&self) -> serde_json::Value {
        let result = self.prober.probe().await;
        let survey = self.prober.survey().await;

        json!({
            "target": self.prober.target(),
            "is_running": result.is_up(),
            "checked_at": result.checked_at,
            "detail": result.detail,
            "survey": survey,
        })
    }
}
