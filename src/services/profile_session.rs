use crate::{
    error::Result,
    models::{FollowMutation, FollowRelationship, LoadState, PhotoId, ProfileView, UserId},
    services::gateway::ProfileDataGateway,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// `load` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    NotFound,
    /// 有更新的 `load` 已经开始，本次结果被丢弃
    Superseded,
}

/// `toggle_follow` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// 资料未加载完成或正在查看自己的资料
    Rejected,
    Committed(FollowRelationship),
    RolledBack(FollowRelationship),
    /// 请求失败时视图已被新的 `load` 替换，不再回滚
    Superseded,
}

/// 一次进行中的关注/取关请求，保存切换前的快照用于回滚
#[derive(Debug, Clone, Copy)]
struct FollowToggleIntent {
    generation: u64,
    subject_id: UserId,
    relationship: FollowRelationship,
    follower_count: u64,
}

impl FollowToggleIntent {
    fn mutation(&self) -> FollowMutation {
        FollowMutation::for_relationship(self.relationship)
    }
}

struct SessionState {
    generation: u64,
    viewer_id: Option<UserId>,
    view: ProfileView,
}

/// 管理单个资料页的客户端视图：加载、关注切换以及照片移除
#[derive(Clone)]
pub struct ProfileSessionController {
    gateway: Arc<dyn ProfileDataGateway>,
    state: Arc<RwLock<SessionState>>,
}

impl ProfileSessionController {
    pub fn new(gateway: Arc<dyn ProfileDataGateway>) -> Self {
        Self {
            gateway,
            state: Arc::new(RwLock::new(SessionState {
                generation: 0,
                viewer_id: None,
                view: ProfileView::loading(""),
            })),
        }
    }

    /// 当前视图的快照
    pub fn view(&self) -> ProfileView {
        self.state.read().view.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.state.read().view.load_state
    }

    pub fn viewer_id(&self) -> Option<UserId> {
        self.state.read().viewer_id
    }

    pub fn is_own_profile(&self) -> bool {
        let state = self.state.read();
        match (state.view.subject_id(), state.viewer_id) {
            (Some(subject_id), Some(viewer_id)) => subject_id == viewer_id,
            _ => false,
        }
    }

    pub async fn load(&self, handle: &str, viewer_id: Option<UserId>) -> LoadOutcome {
        let generation = {
            let mut state = self.state.write();
            state.generation += 1;
            state.viewer_id = viewer_id;
            state.view = ProfileView::loading(handle);
            state.generation
        };
        debug!("Loading profile {} (generation {})", handle, generation);

        let payload = match self.gateway.get_profile(handle).await {
            Ok(payload) => payload,
            Err(e) => {
                // 不区分用户不存在和网络错误
                warn!("Failed to fetch profile {}: {}", handle, e);
                let committed = self.commit(generation, |view| {
                    *view = ProfileView::not_found(handle);
                });
                return if committed {
                    LoadOutcome::NotFound
                } else {
                    LoadOutcome::Superseded
                };
            }
        };

        let subject_id = payload.user.id;
        let is_own_profile = viewer_id == Some(subject_id);

        if !self.commit(generation, |view| view.apply_payload(payload)) {
            debug!("Discarding stale profile response for {}", handle);
            return LoadOutcome::Superseded;
        }

        let gateway = &self.gateway;
        let follow_status = async {
            if is_own_profile {
                return None;
            }
            match gateway.get_follow_status(subject_id).await {
                Ok(is_following) => Some(is_following),
                Err(e) => {
                    warn!("Failed to fetch follow status for user {}: {}", subject_id, e);
                    None
                }
            }
        };
        let follow_counts = async {
            match gateway.get_follow_counts(subject_id).await {
                Ok(counts) => Some(counts),
                Err(e) => {
                    warn!("Failed to fetch follow counts for user {}: {}", subject_id, e);
                    None
                }
            }
        };

        let (follow_status, follow_counts) = futures::join!(follow_status, follow_counts);

        let committed = self.commit(generation, |view| {
            if let Some(is_following) = follow_status {
                view.viewer_relationship = FollowRelationship::from_is_following(is_following);
            }
            if let Some(counts) = follow_counts {
                view.apply_counts(counts);
            }
            view.load_state = LoadState::Loaded;
        });

        if committed {
            info!("Profile {} loaded", handle);
            LoadOutcome::Loaded
        } else {
            debug!("Discarding stale follow data for {}", handle);
            LoadOutcome::Superseded
        }
    }

    /// 用当前的 handle 和 viewer 重新加载
    pub async fn refresh(&self) -> LoadOutcome {
        let (handle, viewer_id) = {
            let state = self.state.read();
            (state.view.handle.clone(), state.viewer_id)
        };
        self.load(&handle, viewer_id).await
    }

    /// 乐观更新：先切换关系和关注者数量，请求失败时恢复到切换前的快照
    pub async fn toggle_follow(&self) -> ToggleOutcome {
        let intent = {
            let mut state = self.state.write();
            let SessionState {
                generation,
                viewer_id,
                view,
            } = &mut *state;

            if !view.is_loaded() {
                debug!("Ignoring follow toggle, profile is not loaded");
                return ToggleOutcome::Rejected;
            }
            let subject_id = match view.subject_id() {
                Some(id) if Some(id) != *viewer_id => id,
                _ => {
                    debug!("Ignoring follow toggle on own profile");
                    return ToggleOutcome::Rejected;
                }
            };

            let intent = FollowToggleIntent {
                generation: *generation,
                subject_id,
                relationship: view.viewer_relationship,
                follower_count: view.follower_count,
            };

            view.viewer_relationship = intent.relationship.toggled();
            view.follower_count = match intent.mutation() {
                FollowMutation::Follow => intent.follower_count + 1,
                FollowMutation::Unfollow => intent.follower_count.saturating_sub(1),
            };
            intent
        };

        let result = match intent.mutation() {
            FollowMutation::Follow => self.gateway.follow(intent.subject_id).await,
            FollowMutation::Unfollow => self.gateway.unfollow(intent.subject_id).await,
        };

        match result {
            Ok(()) => {
                info!("Follow toggle for user {} succeeded", intent.subject_id);
                ToggleOutcome::Committed(intent.relationship.toggled())
            }
            Err(e) => {
                error!("Error toggling follow for user {}: {}", intent.subject_id, e);
                let rolled_back = self.commit(intent.generation, |view| {
                    view.viewer_relationship = intent.relationship;
                    view.follower_count = intent.follower_count;
                });
                if rolled_back {
                    ToggleOutcome::RolledBack(intent.relationship)
                } else {
                    ToggleOutcome::Superseded
                }
            }
        }
    }

    /// 从本地照片列表中移除，重复调用无副作用
    pub fn remove_photo(&self, photo_id: PhotoId) -> bool {
        self.state.write().view.remove_photo(photo_id)
    }

    /// 删除照片，成功（包括 204）后再从本地移除；失败时照片保持不变
    pub async fn delete_photo(&self, photo_id: PhotoId) -> Result<()> {
        if let Err(e) = self.gateway.delete_photo(photo_id).await {
            error!("Failed to delete photo {}: {}", photo_id, e);
            return Err(e);
        }

        self.remove_photo(photo_id);
        info!("Photo {} deleted", photo_id);
        Ok(())
    }

    /// 仅当 generation 仍是最新时才修改视图
    fn commit<F>(&self, generation: u64, apply: F) -> bool
    where
        F: FnOnce(&mut ProfileView),
    {
        let mut state = self.state.write();
        if state.generation != generation {
            return false;
        }
        apply(&mut state.view);
        true
    }
}
