use leptos::*;
use wasm_bindgen::JsCast;

fn cell_id(prefix: &str, index: usize) -> String {
    format!("{}-{}", prefix, index)
}

fn focus_cell(prefix: &str, index: usize) {
    if let Some(el) = document()
        .get_element_by_id(&cell_id(prefix, index))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let _ = el.focus();
    }
}

/// Keeps the last digit typed into a cell; browsers may leave the previous
/// value in front of it.
fn last_digit(raw: &str) -> String {
    raw.chars()
        .rev()
        .find(char::is_ascii_digit)
        .map(String::from)
        .unwrap_or_default()
}

/// One box per digit. Typing a digit moves focus forward, backspace on an
/// empty box moves it back, and pasting hands the whole clipboard text to
/// `on_paste`.
#[component]
pub fn CodeInput(
    length: usize,
    #[prop(into)] code: Signal<String>,
    on_digit: Callback<(usize, String)>,
    on_paste: Callback<String>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(default = "code-digit")] id_prefix: &'static str,
) -> impl IntoView {
    let disabled = Signal::derive(move || disabled.get());
    let digit_at = move |index: usize| {
        code.with(|code| {
            code.chars()
                .nth(index)
                .map(String::from)
                .unwrap_or_default()
        })
    };

    view! {
        <div class="flex justify-center gap-2" role="group" aria-label="Verification code">
            {(0..length)
                .map(|index| {
                    view! {
                        <input
                            id=cell_id(id_prefix, index)
                            type="text"
                            inputmode="numeric"
                            autocomplete="one-time-code"
                            maxlength="1"
                            class="w-10 h-12 text-center text-lg font-semibold rounded-md border border-form-control-border bg-form-control-bg text-form-control-text focus:outline-none focus:ring-2 focus:ring-action-primary-focus disabled:opacity-50"
                            prop:value=move || digit_at(index)
                            disabled=move || disabled.get()
                            on:input=move |ev| {
                                let digit = last_digit(&event_target_value(&ev));
                                let filled = !digit.is_empty();
                                on_digit.call((index, digit));
                                if filled && index + 1 < length {
                                    focus_cell(id_prefix, index + 1);
                                }
                            }
                            on:keydown=move |ev: ev::KeyboardEvent| {
                                if ev.key() == "Backspace" && digit_at(index).is_empty() && index > 0 {
                                    focus_cell(id_prefix, index - 1);
                                }
                            }
                            on:paste=move |ev| {
                                ev.prevent_default();
                                let text = ev
                                    .dyn_into::<web_sys::ClipboardEvent>()
                                    .ok()
                                    .and_then(|ev| ev.clipboard_data())
                                    .and_then(|data| data.get_data("text").ok())
                                    .unwrap_or_default();
                                on_paste.call(text);
                                focus_cell(id_prefix, length.saturating_sub(1));
                            }
                        />
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_digit_keeps_newest_digit() {
        assert_eq!(last_digit("47"), "7");
        assert_eq!(last_digit("4a"), "4");
        assert_eq!(last_digit("x"), "");
        assert_eq!(last_digit(""), "");
    }

    #[test]
    fn cell_ids_are_indexed() {
        assert_eq!(cell_id("code-digit", 3), "code-digit-3");
    }
}
