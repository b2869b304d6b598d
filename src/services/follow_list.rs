use crate::{
    models::{FollowListKind, UserId, UserSummary},
    services::gateway::ProfileDataGateway,
};
use tracing::{debug, error};

/// 关注者 / 正在关注列表。获取一次，之后只在本地按用户名过滤
#[derive(Debug, Clone)]
pub struct FollowListQuery {
    subject_id: UserId,
    kind: FollowListKind,
    users: Vec<UserSummary>,
}

impl FollowListQuery {
    pub fn new(subject_id: UserId, kind: FollowListKind, users: Vec<UserSummary>) -> Self {
        Self {
            subject_id,
            kind,
            users,
        }
    }

    /// 获取失败时记录日志并返回空列表
    pub async fn fetch(
        gateway: &dyn ProfileDataGateway,
        subject_id: UserId,
        kind: FollowListKind,
    ) -> Self {
        let users = match gateway.list_follows(subject_id, kind).await {
            Ok(users) => {
                debug!("Fetched {} {} for user {}", users.len(), kind, subject_id);
                users
            }
            Err(e) => {
                error!("Failed to fetch {} for user {}: {}", kind, subject_id, e);
                Vec::new()
            }
        };
        Self::new(subject_id, kind, users)
    }

    pub fn subject_id(&self) -> UserId {
        self.subject_id
    }

    pub fn kind(&self) -> FollowListKind {
        self.kind
    }

    pub fn users(&self) -> &[UserSummary] {
        &self.users
    }

    /// 按用户名做大小写不敏感的子串匹配，不修改已获取的列表
    pub fn filter(&self, query: &str) -> Vec<&UserSummary> {
        let needle = query.to_lowercase();
        self.users
            .iter()
            .filter(|user| user.handle_contains(&needle))
            .collect()
    }

    /// 过滤结果为空时展示的文案
    pub fn empty_message(&self, query: &str) -> String {
        if query.is_empty() {
            format!("No {} yet", self.kind)
        } else {
            "No users found".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, services::gateway::MockProfileDataGateway};

    fn user(id: i64, username: &str) -> UserSummary {
        UserSummary {
            id,
            username: username.to_string(),
            first_name: None,
            last_name: None,
            profile_pic: None,
        }
    }

    #[test]
    fn test_filter_is_case_insensitive_and_non_destructive() {
        let list = FollowListQuery::new(
            5,
            FollowListKind::Followers,
            vec![user(1, "Alice"), user(2, "bob"), user(3, "malice")],
        );

        let ids: Vec<i64> = list.filter("ALI").iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(list.filter("zzz").is_empty());
        assert_eq!(list.filter("").len(), 3);
        assert_eq!(list.users().len(), 3);
    }

    #[test]
    fn test_empty_message() {
        let list = FollowListQuery::new(5, FollowListKind::Following, Vec::new());
        assert_eq!(list.empty_message(""), "No following yet");
        assert_eq!(list.empty_message("bob"), "No users found");
    }

    #[tokio::test]
    async fn test_fetch_uses_requested_kind() {
        let mut gateway = MockProfileDataGateway::new();
        gateway
            .expect_list_follows()
            .withf(|subject_id: &i64, kind: &FollowListKind| {
                *subject_id == 5 && *kind == FollowListKind::Following
            })
            .times(1)
            .returning(|_, _| Ok(vec![user(9, "carol")]));

        let list = FollowListQuery::fetch(&gateway, 5, FollowListKind::Following).await;
        assert_eq!(list.subject_id(), 5);
        assert_eq!(list.kind(), FollowListKind::Following);
        assert_eq!(list.users().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_empty_list() {
        let mut gateway = MockProfileDataGateway::new();
        gateway
            .expect_list_follows()
            .returning(|_, _| Err(AppError::internal("boom")));

        let list = FollowListQuery::fetch(&gateway, 5, FollowListKind::Followers).await;
        assert!(list.users().is_empty());
        assert_eq!(list.empty_message(""), "No followers yet");
    }
}
