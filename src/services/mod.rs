pub mod follow_list;
pub mod gateway;
pub mod header;
pub mod profile_session;
pub mod user_search;

// 重新导出常用类型
pub use follow_list::FollowListQuery;
pub use gateway::{HttpGateway, ProfileDataGateway};
pub use header::HeaderState;
pub use profile_session::{LoadOutcome, ProfileSessionController, ToggleOutcome};
pub use user_search::UserSearch;
