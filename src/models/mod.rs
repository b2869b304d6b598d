pub mod follow;
pub mod photo;
pub mod profile;
pub mod response;
pub mod user;

pub use follow::{FollowCounts, FollowListKind, FollowMutation, FollowRelationship, FollowStatus};
pub use photo::{Photo, PhotoId};
pub use profile::{LoadState, ProfilePayload, ProfileView};
pub use response::ErrorResponse;
pub use user::{SubjectUser, UserId, UserSummary};
