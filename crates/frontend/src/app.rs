use crate::config::load_config;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use crate::shared::api_utils;
use crate::shared::toast::{ToastService, Toaster};
use crate::system::permissions::PermissionsContext;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    api_utils::init(config.api.clone());

    let global = AppGlobalContext::new();
    global.init_url_sync();

    provide_context(ToastService::new(config.toast.timeout_ms));
    provide_context(PermissionsContext::from_storage());
    provide_context(global);
    provide_context(config);

    view! {
        <ConfigProvider>
            <Shell />
            <Toaster />
        </ConfigProvider>
    }
}
