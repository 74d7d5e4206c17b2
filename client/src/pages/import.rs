//! Settings page for importing one entity type from a spreadsheet.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::data_importer::DataImporter;
use crate::components::empty_state::EmptyState;
use crate::state::import::is_known_type;

/// `/settings/import/{type}`.
#[component]
pub fn ImportPage() -> impl IntoView {
    let params = use_params_map();
    let import_type = Memo::new(move |_| params.with(|p| p.get("type")).unwrap_or_default());

    view! {
        <section class="import-page">
            {move || {
                let kind = import_type.get();
                if is_known_type(&kind) {
                    view! {
                        <header class="page-header">
                            <h2>{format!("Import {kind}s")}</h2>
                        </header>
                        <p class="import-page__hint">"Upload an .xlsx file; progress appears at the top of the page."</p>
                        <DataImporter import_type=kind.clone() text=format!("Import {kind}s")/>
                    }
                        .into_any()
                } else {
                    view! { <EmptyState text=format!("Unknown import type \"{kind}\"") icon="alert" error=true/> }
                        .into_any()
                }
            }}
        </section>
    }
}
