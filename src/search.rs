use crate::app::AppState;
use crate::model::UserRecord;

/// Case-insensitive match against login, type, tags and id.
pub fn matches(user: &UserRecord, query_lower: &str) -> bool {
    user.login.to_lowercase().contains(query_lower)
        || user.user_type.label().to_lowercase().contains(query_lower)
        || user.user_type.key().to_lowercase().contains(query_lower)
        || user.tags.iter().any(|t| t.text.to_lowercase().contains(query_lower))
        || user.id.to_string().contains(query_lower)
}

pub fn filter_users(all: &[UserRecord], query: &str) -> Vec<UserRecord> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return all.to_vec();
    }
    all.iter().filter(|u| matches(u, &q)).cloned().collect()
}

/// Apply the typed query and move the selection to the first hit.
pub fn apply_search(app: &mut AppState) {
    app.users = filter_users(app.store.users(), &app.search_query);
    app.selected_user_index = 0;
}
