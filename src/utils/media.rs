use crate::{
    config::Config,
    models::{Photo, SubjectUser, UserSummary},
};

/// 图片加载失败时使用的内联 SVG 占位图
pub const PHOTO_FALLBACK_SVG: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='400' height='400'%3E%3Crect width='400' height='400' fill='%23f3f4f6'/%3E%3Ctext x='50%25' y='50%25' dominant-baseline='middle' text-anchor='middle' font-family='sans-serif' font-size='24' fill='%239ca3af'%3EImage%3C/text%3E%3C/svg%3E";

/// 默认头像尺寸
pub const PROFILE_AVATAR_SIZE: u32 = 150;
pub const LIST_AVATAR_SIZE: u32 = 48;
pub const SEARCH_AVATAR_SIZE: u32 = 40;

/// 占位头像的参数格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarStyle {
    /// 个人主页大头像，字母加粗
    Bold,
    /// 列表和搜索结果
    Compact,
}

const PLACEHOLDER_BACKGROUND: &str = "556B2F";
const PLACEHOLDER_COLOR: &str = "fff";
const PLACEHOLDER_NAME: &str = "User";

/// 把服务端返回的媒体路径转换成可直接访问的地址
#[derive(Debug, Clone)]
pub struct MediaResolver {
    media_origin: String,
    placeholder_base: String,
}

impl MediaResolver {
    pub fn new(media_origin: &str, placeholder_base: &str) -> Self {
        Self {
            media_origin: media_origin.trim_end_matches('/').to_string(),
            placeholder_base: placeholder_base.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.media_origin, &config.avatar_placeholder_url)
    }

    /// - 空引用返回 `None`
    /// - 以 `http` 开头的地址原样返回
    /// - 其余视为相对路径，拼接到媒体源地址上
    pub fn resolve(&self, reference: Option<&str>) -> Option<String> {
        match reference {
            None | Some("") => None,
            Some(path) if path.starts_with("http") => Some(path.to_string()),
            Some(path) => Some(format!("{}{}", self.media_origin, path)),
        }
    }

    /// 根据显示名生成占位头像地址
    pub fn placeholder_avatar(&self, name: Option<&str>, size: u32, style: AvatarStyle) -> String {
        let name = match name {
            Some(name) if !name.is_empty() => name,
            _ => PLACEHOLDER_NAME,
        };
        let name = urlencoding::encode(name);

        match style {
            AvatarStyle::Bold => format!(
                "{}?name={}&size={}&background={}&color={}&bold=true",
                self.placeholder_base, name, size, PLACEHOLDER_BACKGROUND, PLACEHOLDER_COLOR,
            ),
            AvatarStyle::Compact => format!(
                "{}?name={}&background={}&color={}&size={}",
                self.placeholder_base, name, PLACEHOLDER_BACKGROUND, PLACEHOLDER_COLOR, size,
            ),
        }
    }

    pub fn avatar_url(
        &self,
        profile_pic: Option<&str>,
        name: Option<&str>,
        size: u32,
        style: AvatarStyle,
    ) -> String {
        self.resolve(profile_pic)
            .unwrap_or_else(|| self.placeholder_avatar(name, size, style))
    }

    pub fn subject_avatar(&self, user: &SubjectUser) -> String {
        self.avatar_url(
            user.profile_pic.as_deref(),
            Some(&user.username),
            PROFILE_AVATAR_SIZE,
            AvatarStyle::Bold,
        )
    }

    /// 关注列表和搜索结果里的小头像
    pub fn summary_avatar(&self, user: &UserSummary, size: u32) -> String {
        self.avatar_url(
            user.profile_pic.as_deref(),
            Some(&user.username),
            size,
            AvatarStyle::Compact,
        )
    }

    pub fn photo_url(&self, photo: &Photo) -> String {
        self.resolve(photo.display_image())
            .unwrap_or_else(|| PHOTO_FALLBACK_SVG.to_string())
    }
}

impl Default for MediaResolver {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_reference_kinds() {
        let resolver = MediaResolver::default();

        assert_eq!(resolver.resolve(None), None);
        assert_eq!(resolver.resolve(Some("")), None);
        assert_eq!(
            resolver.resolve(Some("/media/profile_pics/a.jpg")),
            Some("http://127.0.0.1:8000/media/profile_pics/a.jpg".to_string())
        );
        assert_eq!(
            resolver.resolve(Some("https://cdn.example.com/a.jpg")),
            Some("https://cdn.example.com/a.jpg".to_string())
        );
    }

    #[test]
    fn test_trailing_slash_on_origin_is_ignored() {
        let resolver =
            MediaResolver::new("https://media.example.com/", "https://ui-avatars.com/api/");
        assert_eq!(
            resolver.resolve(Some("/media/x.png")),
            Some("https://media.example.com/media/x.png".to_string())
        );
    }

    #[test]
    fn test_placeholder_avatar() {
        let resolver = MediaResolver::default();

        assert_eq!(
            resolver.avatar_url(None, Some("jane doe"), 150, AvatarStyle::Bold),
            "https://ui-avatars.com/api/?name=jane%20doe&size=150&background=556B2F&color=fff\
             &bold=true"
        );
        assert_eq!(
            resolver.avatar_url(Some(""), None, 48, AvatarStyle::Compact),
            "https://ui-avatars.com/api/?name=User&background=556B2F&color=fff&size=48"
        );
        assert_eq!(
            resolver.avatar_url(Some("/media/p.jpg"), Some("jane"), 48, AvatarStyle::Compact),
            "http://127.0.0.1:8000/media/p.jpg"
        );
    }

    #[test]
    fn test_summary_and_subject_avatars_use_their_own_formats() {
        let resolver = MediaResolver::default();
        let summary: UserSummary =
            serde_json::from_value(serde_json::json!({ "id": 2, "username": "bob" })).unwrap();
        let subject: SubjectUser =
            serde_json::from_value(serde_json::json!({ "id": 5, "username": "alice" })).unwrap();

        assert_eq!(
            resolver.summary_avatar(&summary, LIST_AVATAR_SIZE),
            "https://ui-avatars.com/api/?name=bob&background=556B2F&color=fff&size=48"
        );
        assert_eq!(
            resolver.summary_avatar(&summary, SEARCH_AVATAR_SIZE),
            "https://ui-avatars.com/api/?name=bob&background=556B2F&color=fff&size=40"
        );
        assert_eq!(
            resolver.subject_avatar(&subject),
            "https://ui-avatars.com/api/?name=alice&size=150&background=556B2F&color=fff&bold=true"
        );
    }

    #[test]
    fn test_photo_without_images_uses_fallback() {
        let resolver = MediaResolver::default();
        let photo: Photo = serde_json::from_value(serde_json::json!({ "id": 1 })).unwrap();
        assert_eq!(resolver.photo_url(&photo), PHOTO_FALLBACK_SVG);
    }
}
