//! Spreadsheet import button and the app-wide import progress bar.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`DataImporter`] uploads a file and hands the backend answer to
//! [`ImportState::finish_upload`]. A started job id is written to browser
//! storage so [`ImportLoadingBar`], mounted once in the app root, can resume
//! polling after a reload.

use leptos::prelude::*;

use crate::state::import::ImportState;
#[cfg(feature = "hydrate")]
use crate::state::import::{IMPORT_DATA_KEY, IMPORT_POLL_INTERVAL_MS, UploadOutcome};
use crate::state::ui::UiState;
#[cfg(feature = "hydrate")]
use crate::util::storage;

/// File input that uploads an import spreadsheet of `import_type`.
#[component]
pub fn DataImporter(#[prop(into)] import_type: String, #[prop(into)] text: String) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let import = expect_context::<RwSignal<ImportState>>();
    let import_type = StoredValue::new(import_type);
    let uploading = move || import.with(|s| s.uploading);

    let on_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast as _;

            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            input.set_value("");
            import.update(ImportState::begin_upload);
            let import_type = import_type.get_value();
            leptos::task::spawn_local(async move {
                let outcome = match crate::net::api::upload_import_file(&import_type, &file).await {
                    Ok(response) => import.try_update(|s| s.finish_upload(&response)),
                    Err(e) => {
                        log::warn!("import upload failed: {e}");
                        import.try_update(|s| s.fail_upload(&e.to_string()))
                    }
                };
                match outcome {
                    Some(UploadOutcome::Failed(message)) => ui.update(|u| {
                        u.error(message);
                    }),
                    Some(UploadOutcome::Started(job_id)) => storage::save(IMPORT_DATA_KEY, &job_id),
                    Some(UploadOutcome::Accepted) | None => {}
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (ev, ui, import_type);
        }
    };

    view! {
        <label class="btn data-importer" class:data-importer--busy=uploading>
            {move || if uploading() { "Uploading...".to_owned() } else { text.clone() }}
            <input
                class="data-importer__input"
                type="file"
                accept=".xlsx"
                prop:disabled=uploading
                on:change=on_change
            />
        </label>
    }
}

/// Progress of the running import job, if any.
#[component]
pub fn ImportLoadingBar() -> impl IntoView {
    let import = expect_context::<RwSignal<ImportState>>();
    let job_id = Memo::new(move |_| import.with(|s| s.job_id.clone()));

    // Resume a job started before the last reload.
    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        if let Some(id) = storage::load(IMPORT_DATA_KEY) {
            import.update(|s| *s = ImportState::resume(Some(id)));
        }
    });

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        let Some(job) = job_id.get() else {
            return;
        };
        leptos::task::spawn_local(poll_import(import, job));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = job_id;

    let percentage = move || import.with(ImportState::percentage);

    view! {
        <Show when=move || import.with(ImportState::show_loading_bar)>
            <div class="loading-bar" role="progressbar" aria-valuenow=move || format!("{:.0}", percentage())>
                <div class="loading-bar__fill" style=move || format!("width: {:.0}%", percentage())></div>
                <span class="loading-bar__text">{move || format!("Importing... {:.0}%", percentage())}</span>
            </div>
        </Show>
    }
}

/// Poll `importHistoryDetail` for `job` until it finishes or another job
/// replaces it.
#[cfg(feature = "hydrate")]
async fn poll_import(import: RwSignal<ImportState>, job: String) {
    loop {
        match crate::net::api::fetch_import_history(&job).await {
            Ok(history) => match import.try_update(|s| s.record_progress(history)) {
                Some(true) => {
                    storage::remove(IMPORT_DATA_KEY);
                    return;
                }
                Some(false) => {}
                None => return,
            },
            Err(e) => log::warn!("import progress query failed: {e}"),
        }
        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(IMPORT_POLL_INTERVAL_MS))).await;
        let still_current = import.try_with_untracked(|s| s.job_id.as_deref() == Some(job.as_str())).unwrap_or(false);
        if !still_current {
            return;
        }
    }
}
