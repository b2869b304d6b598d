use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserSummary;

pub type PhotoId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    #[serde(default)]
    pub original_image: Option<String>,
    #[serde(default)]
    pub public_image: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub requires_consent: bool,
    #[serde(default)]
    pub uploader: Option<UserSummary>,
}

impl Photo {
    /// 优先展示公开版本（已处理的图片），否则回退到原图
    pub fn display_image(&self) -> Option<&str> {
        self.public_image
            .as_deref()
            .filter(|path| !path.is_empty())
            .or_else(|| self.original_image.as_deref().filter(|path| !path.is_empty()))
    }

    pub fn alt_text(&self) -> &str {
        match self.caption.as_deref() {
            Some(caption) if !caption.is_empty() => caption,
            _ => "Photo",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_image_prefers_public_version() {
        let photo: Photo = serde_json::from_value(json!({
            "id": 101,
            "original_image": "/media/originals/a.jpg",
            "public_image": "/media/public/a.jpg",
            "uploaded_at": "2024-03-05T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(photo.display_image(), Some("/media/public/a.jpg"));
        assert_eq!(photo.alt_text(), "Photo");
        assert_eq!(photo.likes_count, 0);
        assert!(photo.uploaded_at.is_some());
    }

    #[test]
    fn test_display_image_falls_back_to_original() {
        let photo: Photo = serde_json::from_value(json!({
            "id": 102,
            "original_image": "/media/originals/b.jpg",
            "public_image": null,
            "caption": "sunset"
        }))
        .unwrap();
        assert_eq!(photo.display_image(), Some("/media/originals/b.jpg"));
        assert_eq!(photo.alt_text(), "sunset");
    }
}
