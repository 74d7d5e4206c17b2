//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{A, Redirect, Route, Router, Routes},
};

use crate::components::alert_bar::AlertBar;
use crate::components::data_importer::ImportLoadingBar;
use crate::pages::{conversation::ConversationPage, deals::DealsPage, import::ImportPage};
use crate::state::{import::ImportState, ui::UiState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the app-wide state contexts and sets up client-side routing.
/// Page-scoped state (pipeline store, inbox) is created by the pages.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let ui = RwSignal::new(UiState::new());
    let import = RwSignal::new(ImportState::default());

    provide_context(ui);
    provide_context(import);

    view! {
        <Stylesheet id="leptos" href="/pkg/salesdesk.css"/>
        <Title text="SalesDesk"/>

        <Router>
            <nav class="app-nav">
                <A href="/deal/board">"Deals"</A>
                <A href="/settings/import/deal">"Import"</A>
            </nav>
            <ImportLoadingBar/>
            <AlertBar/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=|| view! { <Redirect path="/deal/board"/> }/>
                <Route path=(StaticSegment("deal"), StaticSegment("board")) view=DealsPage/>
                <Route path=(StaticSegment("deal"), StaticSegment("calendar")) view=DealsPage/>
                <Route path=(StaticSegment("inbox"), ParamSegment("conversation_id")) view=ConversationPage/>
                <Route
                    path=(StaticSegment("settings"), StaticSegment("import"), ParamSegment("type"))
                    view=ImportPage
                />
            </Routes>
        </Router>
    }
}
