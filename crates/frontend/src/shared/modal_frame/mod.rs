use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeMap;

use crate::shared::data_table::TableError;

/// Submission state of one form dialog.
#[derive(Clone, Copy)]
pub struct FormStatus {
    pub error: RwSignal<Option<String>>,
    pub fields: RwSignal<BTreeMap<String, String>>,
    pub saving: RwSignal<bool>,
}

impl FormStatus {
    pub fn new() -> Self {
        Self {
            error: RwSignal::new(None),
            fields: RwSignal::new(BTreeMap::new()),
            saving: RwSignal::new(false),
        }
    }

    /// Clears previous errors and marks the form busy.
    pub fn begin(&self) {
        self.error.set(None);
        self.fields.set(BTreeMap::new());
        self.saving.set(true);
    }

    pub fn fail(&self, err: &TableError) {
        self.fields.try_set(err.field_errors());
        self.error.try_set(Some(err.to_string()));
        self.saving.try_set(false);
    }

    pub fn finish(&self) {
        self.saving.try_set(false);
    }

    pub fn field_errors(&self) -> Signal<BTreeMap<String, String>> {
        self.fields.into()
    }
}

impl Default for FormStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Overlay plus centered surface with a title bar.
///
/// Closes on an overlay click only when both press and release happened on
/// the overlay, so selecting text inside the dialog never dismisses it.
#[component]
pub fn ModalFrame(
    #[prop(into)] title: Signal<String>,
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct = |ev: &ev::MouseEvent| match (ev.target(), ev.current_target()) {
        (Some(t), Some(ct)) => t == ct,
        _ => false,
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get() && is_direct(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            // closing synchronously would drop the handler mid-dispatch
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=move |ev: ev::MouseEvent| overlay_mouse_down.set(is_direct(&ev))
            on:click=handle_overlay_click
        >
            <div class="modal" role="dialog" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal__header">
                    <h2 class="modal__title">{move || title.get()}</h2>
                    <button class="modal__close" on:click=move |_| on_close.run(())>
                        {crate::shared::icons::icon("x")}
                    </button>
                </div>
                {children()}
            </div>
        </div>
    }
}

/// Form dialog: banner for the overall error, body, Cancel/Save footer.
#[component]
pub fn FormModal(
    #[prop(into)] title: Signal<String>,
    /// Banner text; field errors are rendered by the fields themselves.
    #[prop(into)]
    error: Signal<Option<String>>,
    #[prop(into)] saving: Signal<bool>,
    on_submit: Callback<()>,
    on_close: Callback<()>,
    #[prop(optional, into)] submit_label: Option<String>,
    children: Children,
) -> impl IntoView {
    let submit_label = submit_label.unwrap_or_else(|| "Save".to_string());

    view! {
        <ModalFrame title=title on_close=on_close>
            <form
                class="modal__body form"
                on:submit=move |ev: ev::SubmitEvent| {
                    ev.prevent_default();
                    if !saving.get_untracked() {
                        on_submit.run(());
                    }
                }
            >
                {move || error.get().map(|msg| view! { <div class="alert alert--error">{msg}</div> })}
                {children()}
                <div class="modal__footer">
                    <button type="button" class="button button--secondary" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="button button--primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving…".to_string() } else { submit_label.clone() }}
                    </button>
                </div>
            </form>
        </ModalFrame>
    }
}

/// Labelled text input bound to `value`, showing its entry of `errors`.
#[component]
pub fn FormField(
    #[prop(into)] label: String,
    name: &'static str,
    value: RwSignal<String>,
    #[prop(into)] errors: Signal<BTreeMap<String, String>>,
    #[prop(optional)] input_type: Option<&'static str>,
) -> impl IntoView {
    let error = move || errors.with(|e| e.get(name).cloned());

    view! {
        <div class=move || if error().is_some() { "form__group form__group--invalid" } else { "form__group" }>
            <label class="form__label" for=name>{label}</label>
            <input
                id=name
                name=name
                class="form__input"
                type=input_type.unwrap_or("text")
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            {move || error().map(|msg| view! { <span class="form__error">{msg}</span> })}
        </div>
    }
}

/// Labelled `<select>` over fixed options.
#[component]
pub fn FormSelect(
    #[prop(into)] label: String,
    name: &'static str,
    value: RwSignal<String>,
    #[prop(into)] options: Signal<Vec<String>>,
    #[prop(into)] errors: Signal<BTreeMap<String, String>>,
) -> impl IntoView {
    let error = move || errors.with(|e| e.get(name).cloned());

    view! {
        <div class=move || if error().is_some() { "form__group form__group--invalid" } else { "form__group" }>
            <label class="form__label" for=name>{label}</label>
            <select
                id=name
                class="form__select"
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                <option value="">"—"</option>
                {move || {
                    options
                        .get()
                        .into_iter()
                        .map(|o| {
                            let option_value = o.clone();
                            view! { <option value=option_value>{o}</option> }
                        })
                        .collect_view()
                }}
            </select>
            {move || error().map(|msg| view! { <span class="form__error">{msg}</span> })}
        </div>
    }
}

/// "Are you sure?" dialog for destructive row actions.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] message: Signal<String>,
    #[prop(into)] busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <ModalFrame title="Please confirm".to_string() on_close=on_close>
            <div class="modal__body">
                <p>{move || message.get()}</p>
            </div>
            <div class="modal__footer">
                <button class="button button--secondary" on:click=move |_| on_close.run(())>
                    "Cancel"
                </button>
                <button
                    class="button button--danger"
                    disabled=move || busy.get()
                    on:click=move |_| on_confirm.run(())
                >
                    "Delete"
                </button>
            </div>
        </ModalFrame>
    }
}
