use serde::{Deserialize, Serialize};

/// 顾客评价 (嵌入在商家记录的 reviews 数组中)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    /// 评分 1-5，部分渠道同步过来的评价没有评分
    pub rating: Option<f64>,
    #[serde(default)]
    pub text: String,
    pub reply: Option<ReviewReply>,
    pub created_at: i64,
}

/// 商家回复，每条评价最多一条
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReply {
    pub text: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewCreate {
    pub author: String,
    pub rating: Option<f64>,
    #[serde(default)]
    pub text: String,
    pub created_at: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewReplyCreate {
    pub text: String,
}
