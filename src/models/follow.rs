use serde::{Deserialize, Serialize};
use std::fmt;

/// 当前用户（viewer）与被查看用户之间的关注关系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FollowRelationship {
    #[default]
    Unknown,
    Following,
    NotFollowing,
}

impl FollowRelationship {
    pub fn from_is_following(is_following: bool) -> Self {
        if is_following {
            Self::Following
        } else {
            Self::NotFollowing
        }
    }

    pub fn is_following(&self) -> bool {
        matches!(self, Self::Following)
    }

    /// 切换后的关系；Unknown 按未关注处理
    pub fn toggled(&self) -> Self {
        match self {
            Self::Following => Self::NotFollowing,
            Self::NotFollowing | Self::Unknown => Self::Following,
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            Self::Following => "Following",
            Self::NotFollowing | Self::Unknown => "Follow",
        }
    }
}

/// 关注或取消关注，对应 POST / DELETE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowMutation {
    Follow,
    Unfollow,
}

impl FollowMutation {
    /// 根据切换前的关系选择请求
    pub fn for_relationship(before: FollowRelationship) -> Self {
        if before.is_following() {
            Self::Unfollow
        } else {
            Self::Follow
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowStatus {
    pub is_following: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FollowCounts {
    pub followers_count: u64,
    pub following_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowListKind {
    Followers,
    Following,
}

impl FollowListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Followers => "followers",
            Self::Following => "following",
        }
    }
}

impl fmt::Display for FollowListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
