use leptos::prelude::*;
use leptos_meta::provide_meta_context;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;
use trials_core::ShellConfig;

use crate::pages::trials::TrialsPage;
use crate::shell::Shell;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Router>
            <Shell config=ShellConfig::default()>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=TrialsPage />
                    <Route path=path!("/trials") view=TrialsPage />
                </Routes>
            </Shell>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center space-y-4">
            <h1 class="text-4xl font-bold">"404"</h1>
            <p class="text-muted-foreground">"Page not found"</p>
            <A href="/">"Back to Clinical Trials"</A>
        </div>
    }
}
