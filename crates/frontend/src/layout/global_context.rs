use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

const PAGE_PARAM: &str = "page";

/// Страницы верхнего уровня из боковой панели
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Customers,
    Projects,
    Emis,
    Roles,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Customers, Page::Projects, Page::Emis, Page::Roles];

    pub fn key(self) -> &'static str {
        match self {
            Page::Customers => "customers",
            Page::Projects => "projects",
            Page::Emis => "emis",
            Page::Roles => "roles",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Customers => "Customers",
            Page::Projects => "Projects",
            Page::Emis => "EMIs",
            Page::Roles => "Roles",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Page::Customers => "customers",
            Page::Projects => "projects",
            Page::Emis => "emis",
            Page::Roles => "roles",
        }
    }

    /// Имя меню, как оно записано в `userAccess`
    pub fn menu(self) -> &'static str {
        match self {
            Page::Customers => "Customer",
            Page::Projects => "Project",
            Page::Emis => "EMI",
            Page::Roles => "Role",
        }
    }

    pub fn from_key(key: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.key() == key)
    }
}

/// Первая страница, доступная на чтение, в порядке боковой панели
pub fn first_readable(can_read: impl Fn(&str) -> bool) -> Option<Page> {
    Page::ALL.into_iter().find(|p| can_read(p.menu()))
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Option<Page>>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    /// Восстанавливает активную страницу из `?page=` и держит URL
    /// в соответствии с дальнейшими переходами.
    pub fn init_url_sync(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(page) = params.get(PAGE_PARAM).and_then(|key| Page::from_key(key)) {
            self.active.set(Some(page));
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(page) = this.active.get() else {
                return;
            };
            let query = serde_qs::to_string(&HashMap::from([(PAGE_PARAM, page.key())]))
                .unwrap_or_default();
            let new_url = format!("?{}", query);

            let current = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current == new_url {
                return;
            }
            if let Some(history) = window().and_then(|w| w.history().ok()) {
                if let Err(e) =
                    history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url))
                {
                    log::warn!("could not update url: {:?}", e);
                }
            }
        });
    }

    pub fn activate(&self, page: Page) {
        log::debug!("activate page {}", page.key());
        self.active.set(Some(page));
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext not provided in context")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_keys_resolve_back() {
        for page in Page::ALL {
            assert_eq!(Page::from_key(page.key()), Some(page));
        }
        assert_eq!(Page::from_key("loans"), None);
    }

    #[test]
    fn test_first_readable_follows_sidebar_order() {
        assert_eq!(first_readable(|menu| menu == "Role" || menu == "EMI"), Some(Page::Emis));
        assert_eq!(first_readable(|_| false), None);
    }
}
