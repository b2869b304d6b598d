use crate::{models::UserSummary, services::gateway::ProfileDataGateway};
use std::sync::Arc;
use tracing::{debug, error};

/// 顶栏的用户搜索：拉取全部用户后在本地过滤
#[derive(Clone)]
pub struct UserSearch {
    gateway: Arc<dyn ProfileDataGateway>,
    result_limit: usize,
}

impl UserSearch {
    pub fn new(gateway: Arc<dyn ProfileDataGateway>, result_limit: usize) -> Self {
        Self {
            gateway,
            result_limit,
        }
    }

    /// 空查询不发请求；失败时返回空结果
    pub async fn search(&self, query: &str) -> Vec<UserSummary> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let users = match self.gateway.list_users().await {
            Ok(users) => users,
            Err(e) => {
                error!("Search failed: {}", e);
                return Vec::new();
            }
        };

        let needle = query.to_lowercase();
        let results: Vec<UserSummary> = users
            .into_iter()
            .filter(|user| user.matches_search(&needle))
            .take(self.result_limit)
            .collect();

        debug!("Search for {:?} matched {} users", query, results.len());
        results
    }
}
