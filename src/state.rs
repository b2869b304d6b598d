use crate::{
    config::Config,
    error::Result,
    models::{FollowListKind, UserId},
    services::{
        FollowListQuery, HeaderState, HttpGateway, ProfileDataGateway, ProfileSessionController,
        UserSearch,
    },
    utils::media::MediaResolver,
};
use std::sync::Arc;

/// 应用程序的共享状态
/// 每个资料页、列表或顶栏都从这里创建自己的控制器
#[derive(Clone)]
pub struct AppState {
    /// 应用配置
    pub config: Config,

    /// 远程 API
    pub gateway: Arc<dyn ProfileDataGateway>,

    /// 媒体地址解析
    pub media: MediaResolver,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let gateway = Arc::new(HttpGateway::new(&config)?);
        Ok(Self::with_gateway(config, gateway))
    }

    pub fn with_gateway(config: Config, gateway: Arc<dyn ProfileDataGateway>) -> Self {
        let media = MediaResolver::from_config(&config);
        Self {
            config,
            gateway,
            media,
        }
    }

    /// 新的资料页会话；切换到其他用户时复用同一个控制器即可
    pub fn profile_session(&self) -> ProfileSessionController {
        ProfileSessionController::new(self.gateway.clone())
    }

    pub fn user_search(&self) -> UserSearch {
        UserSearch::new(self.gateway.clone(), self.config.search_result_limit)
    }

    pub fn header(&self) -> HeaderState {
        HeaderState::new()
    }

    pub async fn follow_list(&self, subject_id: UserId, kind: FollowListKind) -> FollowListQuery {
        FollowListQuery::fetch(self.gateway.as_ref(), subject_id, kind).await
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.config.is_production()
    }
}
