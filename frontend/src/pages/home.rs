use crate::components::layout::Layout;
use leptos::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Layout>
            <div class="text-center py-12 px-4">
                <h1 class="text-4xl font-extrabold text-fg sm:text-5xl">"ReStock"</h1>
                <p class="mt-3 max-w-md mx-auto text-base text-fg-muted sm:text-lg">
                    "Never run out of the things you buy again."
                </p>
                <div class="mt-8">
                    <a href="/forgot-password" class="font-medium text-link hover:text-link-hover">
                        "Forgot your password?"
                    </a>
                </div>
            </div>
        </Layout>
    }
}
