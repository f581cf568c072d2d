use leptos::*;

const BASE_CLASSES: &str = "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold transition-colors duration-200 disabled:opacity-50 disabled:cursor-not-allowed";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    /// Borderless secondary action such as "Back".
    Ghost,
}

impl ButtonVariant {
    pub fn classes(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "bg-action-primary-bg hover:bg-action-primary-bg-hover text-action-primary-text shadow-sm focus-visible:outline focus-visible:outline-2 focus-visible:outline-offset-2 focus-visible:outline-action-primary-focus",
            ButtonVariant::Ghost => "text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover",
        }
    }
}

fn button_classes(variant: ButtonVariant, full_width: bool) -> String {
    let width = if full_width { " w-full" } else { "" };
    format!("{} {}{}", BASE_CLASSES, variant.classes(), width)
}

/// Form button. `submit` buttons drive the enclosing form; the rest are
/// plain `type="button"` so they never submit by accident.
#[component]
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] submit: bool,
    #[prop(optional)] full_width: bool,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] loading: MaybeSignal<bool>,
    children: Children,
) -> impl IntoView {
    view! {
        <button
            type=if submit { "submit" } else { "button" }
            class=button_classes(variant, full_width)
            disabled=move || disabled.get() || loading.get()
            aria-busy=move || loading.get().to_string()
        >
            <Show when=move || loading.get()>
                <span class="mr-2 h-4 w-4 animate-spin rounded-full border-2 border-current border-t-transparent"></span>
            </Show>
            {children()}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_width_is_appended_after_variant() {
        let classes = button_classes(ButtonVariant::Primary, true);
        assert!(classes.contains("bg-action-primary-bg"));
        assert!(classes.ends_with(" w-full"));
        assert!(!button_classes(ButtonVariant::Ghost, false).contains("w-full"));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn loading_submit_button_is_disabled() {
        let html = render_to_string(|| {
            view! { <Button submit=true loading=true>"Sending..."</Button> }
        });
        assert!(html.contains("type=\"submit\""));
        assert!(html.contains("disabled"));
        assert!(html.contains("Sending..."));
    }

    #[test]
    fn default_button_does_not_submit() {
        let html = render_to_string(|| view! { <Button variant=ButtonVariant::Ghost>"Back"</Button> });
        assert!(html.contains("type=\"button\""));
        assert!(!html.contains("animate-spin"));
    }
}
