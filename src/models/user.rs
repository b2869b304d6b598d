use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// 被查看的用户（subject）的身份快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectUser {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

/// 列表和搜索结果中的用户摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

impl SubjectUser {
    pub fn full_name(&self) -> Option<String> {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }

    pub fn to_summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            profile_pic: self.profile_pic.clone(),
        }
    }
}

impl UserSummary {
    /// 仅在名和姓都存在时才显示全名
    pub fn full_name(&self) -> Option<String> {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }

    pub fn handle_contains(&self, needle_lower: &str) -> bool {
        self.username.to_lowercase().contains(needle_lower)
    }

    /// 匹配用户名、名或姓（大小写不敏感）
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        let field_matches = |field: &Option<String>| {
            field
                .as_deref()
                .map(|value| value.to_lowercase().contains(needle_lower))
                .unwrap_or(false)
        };

        self.handle_contains(needle_lower)
            || field_matches(&self.first_name)
            || field_matches(&self.last_name)
    }
}

fn join_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    match (first, last) {
        (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
            Some(format!("{} {}", first, last))
        }
        _ => None,
    }
}
