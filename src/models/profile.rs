use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{
    follow::{FollowCounts, FollowRelationship},
    photo::{Photo, PhotoId},
    user::{SubjectUser, UserId},
};

/// `GET /api/users/profile/{handle}/` 的响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePayload {
    pub user: SubjectUser,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadState {
    Loading,
    Loaded,
    NotFound,
}

/// 单个资料页的视图模型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
    pub handle: String,
    pub subject_user: Option<SubjectUser>,
    pub photos: Vec<Photo>,
    pub viewer_relationship: FollowRelationship,
    pub follower_count: u64,
    pub following_count: u64,
    pub load_state: LoadState,
}

impl ProfileView {
    pub fn loading(handle: &str) -> Self {
        Self {
            handle: handle.to_string(),
            subject_user: None,
            photos: Vec::new(),
            viewer_relationship: FollowRelationship::Unknown,
            follower_count: 0,
            following_count: 0,
            load_state: LoadState::Loading,
        }
    }

    /// 未找到时清空除 handle 以外的所有字段
    pub fn not_found(handle: &str) -> Self {
        Self {
            load_state: LoadState::NotFound,
            ..Self::loading(handle)
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.load_state == LoadState::Loaded
    }

    pub fn subject_id(&self) -> Option<UserId> {
        self.subject_user.as_ref().map(|user| user.id)
    }

    pub fn post_count(&self) -> usize {
        self.photos.len()
    }

    pub fn apply_payload(&mut self, payload: ProfilePayload) {
        self.subject_user = Some(payload.user);
        self.photos = dedupe_photos(payload.photos);
    }

    pub fn apply_counts(&mut self, counts: FollowCounts) {
        self.follower_count = counts.followers_count;
        self.following_count = counts.following_count;
    }

    /// 按 id 移除照片；不存在的 id 不做任何处理。返回是否有照片被移除
    pub fn remove_photo(&mut self, photo_id: PhotoId) -> bool {
        let before = self.photos.len();
        self.photos.retain(|photo| photo.id != photo_id);
        self.photos.len() != before
    }
}

/// 保持服务端顺序，重复的 id 只保留第一次出现
fn dedupe_photos(photos: Vec<Photo>) -> Vec<Photo> {
    let mut seen = HashSet::with_capacity(photos.len());
    photos
        .into_iter()
        .filter(|photo| seen.insert(photo.id))
        .collect()
}
