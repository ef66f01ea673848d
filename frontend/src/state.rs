//! Application state: one instance of every store, built once at startup.

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::store::auth::AuthStore;
use crate::store::courses::CoursesStore;
use crate::store::roadmaps::RoadmapsStore;
use crate::theme::ThemeStore;
use crate::web::{BrowserStorage, FetchTransport, HttpTransport, KeyValueStorage};
use std::rc::Rc;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub auth: AuthStore,
    pub courses: CoursesStore,
    pub roadmaps: RoadmapsStore,
    pub theme: ThemeStore,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        transport: Rc<dyn HttpTransport>,
        storage: Rc<dyn KeyValueStorage>,
        system_dark: bool,
    ) -> Self {
        let api = ApiClient::new(&config.api_base_url, transport);
        Self {
            auth: AuthStore::new(api.clone(), Rc::clone(&storage)),
            courses: CoursesStore::new(api.clone()),
            roadmaps: RoadmapsStore::new(api.clone()),
            theme: ThemeStore::new(storage, system_dark),
            api,
        }
    }

    /// Wired to `fetch` and `localStorage`.
    pub fn browser(config: AppConfig) -> Self {
        Self::new(
            config,
            Rc::new(FetchTransport),
            Rc::new(BrowserStorage),
            crate::web::theme::system_prefers_dark(),
        )
    }

    /// Runs `listener` after a change in any store.
    pub fn subscribe_all(&self, listener: impl Fn() + 'static) {
        let listener = Rc::new(listener);
        let each = || {
            let listener = Rc::clone(&listener);
            move || (*listener)()
        };
        self.auth.subscribe(each());
        self.courses.subscribe(each());
        self.roadmaps.subscribe(each());
        self.theme.subscribe(each());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use crate::store::auth::STORAGE_TOKEN_KEY;
    use crate::web::{MemoryStorage, MockTransport};
    use merq_shared::HttpMethod;
    use std::cell::Cell;

    fn setup_env() -> (Rc<MockTransport>, AppState) {
        let mock = Rc::new(MockTransport::new());
        let config = AppConfig {
            api_base_url: BASE.to_string(),
            ..AppConfig::default()
        };
        let storage = Rc::new(MemoryStorage::with_entry(STORAGE_TOKEN_KEY, "saved"));
        let state = AppState::new(config, mock.clone(), storage, false);
        (mock, state)
    }

    #[tokio::test]
    async fn test_stores_share_the_token() {
        let (mock, state) = setup_env();
        mock.mock_response(
            HttpMethod::Get,
            &url("/roadmaps/?creator_id=1"),
            200,
            serde_json::json!([]),
        );

        state.roadmaps.fetch_my_roadmaps(1).await;
        let req = mock.last_request().unwrap();
        assert_eq!(req.header("Authorization"), Some("Bearer saved"));

        state.auth.logout();
        assert_eq!(state.api.token(), None);
    }

    #[test]
    fn test_subscribe_all_sees_every_store() {
        let (_, state) = setup_env();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        state.subscribe_all(move || counter.set(counter.get() + 1));

        state.roadmaps.clear_node();
        state.courses.clear_lesson();
        state.theme.toggle_theme();
        state.auth.set_user(None);
        assert_eq!(hits.get(), 4);
    }
}
