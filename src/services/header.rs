use crate::{models::UserSummary, services::user_search::UserSearch};

const ALWAYS_VISIBLE_BELOW: f64 = 10.0;
const HIDE_AFTER: f64 = 100.0;

/// 顶栏状态。滚动位置属于当前视图，不使用全局变量
#[derive(Debug, Clone)]
pub struct HeaderState {
    visible: bool,
    last_scroll_y: f64,
    search_focused: bool,
    query: String,
    results: Vec<UserSummary>,
    searching: bool,
}

impl Default for HeaderState {
    fn default() -> Self {
        Self {
            visible: true,
            last_scroll_y: 0.0,
            search_focused: false,
            query: String::new(),
            results: Vec::new(),
            searching: false,
        }
    }
}

impl HeaderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_search_focused(&self) -> bool {
        self.search_focused
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[UserSummary] {
        &self.results
    }

    /// 向下滚动超过阈值时隐藏，向上滚动或回到顶部时显示
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        if scroll_y < ALWAYS_VISIBLE_BELOW {
            self.visible = true;
        } else if scroll_y > self.last_scroll_y && scroll_y > HIDE_AFTER {
            self.visible = false;
            self.search_focused = false;
        } else {
            self.visible = true;
        }

        self.last_scroll_y = scroll_y;
        self.visible
    }

    pub fn focus_search(&mut self) {
        self.search_focused = true;
    }

    pub fn blur_search(&mut self) {
        self.search_focused = false;
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        if self.query.trim().is_empty() {
            self.results.clear();
        }
    }

    /// 下拉结果只在输入框聚焦且有输入时显示
    pub fn shows_results(&self) -> bool {
        self.search_focused && !self.query.is_empty()
    }

    pub async fn run_search(&mut self, search: &UserSearch) {
        self.searching = true;
        self.results = search.search(&self.query).await;
        self.searching = false;
    }

    pub fn clear_search(&mut self) {
        self.query.clear();
        self.results.clear();
    }

    /// 选中结果后清空搜索，返回要跳转的用户名
    pub fn select_result(&mut self, user: &UserSummary) -> String {
        self.clear_search();
        self.search_focused = false;
        user.username.clone()
    }
}
