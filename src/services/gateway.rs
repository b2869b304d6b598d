use crate::{
    config::Config,
    error::{AppError, Result},
    models::{
        ErrorResponse, FollowCounts, FollowListKind, FollowStatus, PhotoId, ProfilePayload,
        UserId, UserSummary,
    },
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

/// 资料页所依赖的远程 API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileDataGateway: Send + Sync {
    /// 资料和照片一次返回；用户不存在时返回 `AppError::NotFound`
    async fn get_profile(&self, handle: &str) -> Result<ProfilePayload>;

    async fn get_follow_status(&self, subject_id: UserId) -> Result<bool>;

    async fn get_follow_counts(&self, subject_id: UserId) -> Result<FollowCounts>;

    async fn follow(&self, subject_id: UserId) -> Result<()>;

    /// 成功时服务端可能返回 204 No Content
    async fn unfollow(&self, subject_id: UserId) -> Result<()>;

    async fn list_follows(&self, subject_id: UserId, kind: FollowListKind)
        -> Result<Vec<UserSummary>>;

    /// 成功时服务端可能返回 204 No Content
    async fn delete_photo(&self, photo_id: PhotoId) -> Result<()>;

    async fn list_users(&self) -> Result<Vec<UserSummary>>;
}

#[derive(Clone)]
pub struct HttpGateway {
    http_client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpGateway {
    pub fn new(config: &Config) -> Result<Self> {
        Url::parse(&config.api_base_url)?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let request = match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            error!("Request to profile API failed: {}", e);
            AppError::Request(e)
        })?;

        let status = response.status();
        // 2xx 均视为成功，包括没有响应体的 204
        if status.is_success() {
            return Ok(response);
        }

        // 响应体缺失或不是 JSON 时两个字段都为空
        let body = response.json::<ErrorResponse>().await.unwrap_or_default();
        let error = body.error_text();
        let message = body.describe();

        if status == StatusCode::NOT_FOUND {
            debug!("Profile API returned 404: {:?}", message);
            return Err(AppError::NotFound {
                message: message.unwrap_or_else(|| "Resource not found".to_string()),
                error,
            });
        }

        warn!("Profile API returned error status {}: {:?}", status, message);
        Err(AppError::ExternalService {
            status: status.as_u16(),
            message,
            error,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(self.http_client.get(self.url(path))).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ProfileDataGateway for HttpGateway {
    async fn get_profile(&self, handle: &str) -> Result<ProfilePayload> {
        debug!("Fetching profile for {}", handle);
        let path = format!("/api/users/profile/{}/", urlencoding::encode(handle));
        self.get_json(&path).await
    }

    async fn get_follow_status(&self, subject_id: UserId) -> Result<bool> {
        let status: FollowStatus = self
            .get_json(&format!("/api/users/{}/follow-status/", subject_id))
            .await?;
        Ok(status.is_following)
    }

    async fn get_follow_counts(&self, subject_id: UserId) -> Result<FollowCounts> {
        self.get_json(&format!("/api/users/{}/follow-counts/", subject_id))
            .await
    }

    async fn follow(&self, subject_id: UserId) -> Result<()> {
        debug!("Following user {}", subject_id);
        let url = self.url(&format!("/api/users/{}/follow/", subject_id));
        self.execute(self.http_client.post(url)).await?;
        Ok(())
    }

    async fn unfollow(&self, subject_id: UserId) -> Result<()> {
        debug!("Unfollowing user {}", subject_id);
        let url = self.url(&format!("/api/users/{}/follow/", subject_id));
        self.execute(self.http_client.delete(url)).await?;
        Ok(())
    }

    async fn list_follows(
        &self,
        subject_id: UserId,
        kind: FollowListKind,
    ) -> Result<Vec<UserSummary>> {
        self.get_json(&format!("/api/users/{}/{}/", subject_id, kind))
            .await
    }

    async fn delete_photo(&self, photo_id: PhotoId) -> Result<()> {
        debug!("Deleting photo {}", photo_id);
        let url = self.url(&format!("/api/photos/{}/", photo_id));
        self.execute(self.http_client.delete(url)).await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>> {
        self.get_json("/api/users/").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = Config {
            api_base_url: "::not-a-url".to_string(),
            ..Config::default()
        };
        assert!(matches!(HttpGateway::new(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = Config {
            api_base_url: "http://api.example.com/".to_string(),
            ..Config::default()
        };
        let gateway = HttpGateway::new(&config).unwrap();
        assert_eq!(
            gateway.url("/api/users/"),
            "http://api.example.com/api/users/"
        );
    }
}
