// ==========================================
// 出口物流报价系统 - API 层
// ==========================================
// 职责: 对外接口 (目录查找 + 报价单生成)
// ==========================================

pub mod error;
pub mod quote_api;

pub use error::{ApiError, ApiResult};
pub use quote_api::{QuoteApi, QuoteDocument, QuoteRequest, QuoteSummary};
