//! Page skeleton: head metadata, third-party scripts, body font binding,
//! theme context and the main layout around routed content.

use leptos::prelude::*;
use leptos_meta::{Body, Html, Meta, Script, Title};
use leptos_router::components::A;
use trials_core::{ShellConfig, Theme};

/// Active theme, provided once by [`Shell`]
#[derive(Clone, Copy)]
pub struct ThemeContext(pub RwSignal<Theme>);

impl ThemeContext {
    pub fn toggle(&self) {
        self.0.update(|t| *t = t.toggled());
    }
}

#[component]
pub fn Shell(config: ShellConfig, children: Children) -> impl IntoView {
    let theme = ThemeContext(RwSignal::new(config.default_theme));
    provide_context(theme);

    let theme_colors = config.theme_colors.clone();
    let theme_color = move || {
        let active = theme.0.get();
        theme_colors
            .iter()
            .find(|c| c.media.contains(active.as_str()))
            .map(|c| c.color.clone())
            .unwrap_or_default()
    };

    let scripts = config
        .scripts
        .iter()
        .map(|script| {
            view! {
                <Script
                    src=script.src.clone()
                    integrity=script.integrity.clone()
                    crossorigin=script.cross_origin.as_str()
                    async_="true"
                />
            }
        })
        .collect_view();

    view! {
        <Html {..} lang=config.lang.clone() class=move || theme.0.get().as_str() />
        <Title text=config.title.clone() />
        <Meta name="description" content=config.description.clone() />
        <Meta name="theme-color" content=theme_color />
        {scripts}
        <Body {..} class=config.body_class() style=config.font.style() />
        <MainLayout>{children()}</MainLayout>
    }
}

#[component]
pub fn MainLayout(children: Children) -> impl IntoView {
    let theme = expect_context::<ThemeContext>();

    view! {
        <div class="min-h-screen">
            <header class="border-b flex items-center justify-between px-8 py-4">
                <A href="/" attr:class="text-xl font-bold">"Drug Discovery AI"</A>
                <nav class="flex items-center space-x-6 text-sm">
                    <A href="/trials">"Clinical Trials"</A>
                    <button
                        class="card px-3 py-1"
                        on:click=move |_| theme.toggle()
                    >
                        {move || match theme.0.get() {
                            Theme::Dark => "Light mode",
                            Theme::Light => "Dark mode",
                        }}
                    </button>
                </nav>
            </header>
            <main class="container mx-auto p-8">{children()}</main>
        </div>
    }
}
