//! UI Components

use leptos::prelude::*;

use license_core::listing::filter_projects;
use license_core::{
    ConfirmRequest, LicenseInfo, LicenseStatus, Notification, PackageOffer, PackageSelection,
    PackageType, ProjectId, ProjectOption, TOAST_DURATION, ToastList,
};

/// Colored status label
#[component]
pub fn StatusPill(status: LicenseStatus) -> impl IntoView {
    let style = status.style();
    let css = format!(
        "color: {}; background: {};",
        style.foreground, style.background
    );

    view! { <span class="status-pill" style=css>{style.label}</span> }
}

/// Confirmation prompt for a row action
#[component]
pub fn ConfirmDialog(
    #[prop(into)] request: Signal<Option<ConfirmRequest>>,
    #[prop(into)] on_accept: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    move || {
        request.get().map(|req| {
            view! {
                <div class="modal-backdrop">
                    <div class="modal confirm">
                        <h2>{req.title}</h2>
                        <p>{req.message}</p>
                        <div class="modal-actions">
                            <button class="btn" on:click=move |_| on_cancel.run(())>
                                {req.cancel_label}
                            </button>
                            <button class="btn btn-primary" on:click=move |_| on_accept.run(())>
                                {req.confirm_label}
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}

/// Show a toast and dismiss it once [`TOAST_DURATION`] has passed
pub fn push_toast(toasts: RwSignal<ToastList>, notification: Notification) {
    let Some(id) = toasts.try_update(|list| list.push(notification)) else {
        return;
    };
    set_timeout(
        move || {
            // the page may be gone by the time the timer fires
            toasts.try_update(|list| list.dismiss(id));
        },
        TOAST_DURATION,
    );
}

/// Toast stack; each toast can also be dismissed by hand
#[component]
pub fn Toasts(toasts: RwSignal<ToastList>) -> impl IntoView {
    view! {
        <div class="toasts">
            <For
                each=move || toasts.with(|list| list.toasts().to_vec())
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = if toast.notification.is_error() { "toast toast-error" } else { "toast toast-success" };
                    view! {
                        <div class=class>
                            <span>{toast.notification.message}</span>
                            <button
                                class="btn-icon"
                                on:click=move |_| toasts.update(|list| {
                                    list.dismiss(id);
                                })
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

/// License information modal
#[component]
pub fn InfoModal(
    #[prop(into)] info: Signal<Option<LicenseInfo>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="modal-backdrop">
            <div class="modal info">
                <header>
                    <h2>"License information"</h2>
                    <button class="btn-icon" on:click=move |_| on_close.run(())>"×"</button>
                </header>
                <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Loading..."</p> }>
                    {move || info.get().map(|info| view! {
                        <div class="info-body">
                            {info.image.map(|src| view! { <img class="project-image" src=src /> })}
                            <h3>{info.project_name}</h3>
                            <p class="location">{info.location}</p>
                            <dl>
                                <dt>"Order no."</dt>
                                <dd>{info.order_no}</dd>
                                <dt>"Status"</dt>
                                <dd><StatusPill status=info.status /></dd>
                                <dt>"Current package"</dt>
                                <dd>{info.current_package}</dd>
                            </dl>
                            {info.bundles.into_iter().map(|bundle| view! {
                                <section class="bundle">
                                    <h4>{bundle.bundle_type.to_string()}" · "{bundle.period}</h4>
                                    <ul>
                                        {bundle.features.into_iter().map(|f| view! { <li>{f}</li> }).collect_view()}
                                    </ul>
                                </section>
                            }).collect_view()}
                        </div>
                    })}
                </Show>
            </div>
        </div>
    }
}

/// First step of the buy flow: pick the project the license is for
#[component]
pub fn AssignProjectModal(
    #[prop(into)] options: Signal<Vec<ProjectOption>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] selected: Signal<Option<ProjectId>>,
    #[prop(into)] on_select: Callback<ProjectId>,
    #[prop(into)] on_continue: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let (query, set_query) = signal(String::new());

    let matches = move || {
        options.with(|all| {
            filter_projects(all, &query.get())
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal assign">
                <h2>"Assign project"</h2>
                <input
                    type="search"
                    placeholder="Search project"
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Loading projects..."</p> }>
                    <ul class="project-list">
                        <For
                            each=matches
                            key=|option| option.id.clone()
                            children=move |option| {
                                let id = option.id.clone();
                                let checked_id = option.id.clone();
                                view! {
                                    <li>
                                        <label>
                                            <input
                                                type="radio"
                                                name="project"
                                                prop:checked=move || selected.get().as_ref() == Some(&checked_id)
                                                on:change=move |_| on_select.run(id.clone())
                                            />
                                            {option.name}
                                        </label>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
                <div class="modal-actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                    <button
                        class="btn btn-primary"
                        disabled=move || selected.get().is_none()
                        on:click=move |_| on_continue.run(())
                    >
                        "Continue"
                    </button>
                </div>
            </div>
        </div>
    }
}

fn offered_features(offers: &[PackageOffer], tier: PackageType) -> Vec<String> {
    offers
        .iter()
        .find(|offer| offer.package_type == tier)
        .map(|offer| offer.features.clone())
        .unwrap_or_default()
}

/// Second step of the buy flow: package tier, features and payment method.
/// Stays open while the order is submitted.
#[component]
pub fn SelectPackageModal(
    #[prop(into)] offers: Signal<Vec<PackageOffer>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] submitting: Signal<bool>,
    #[prop(into)] on_confirm: Callback<PackageSelection>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let package = RwSignal::new(PackageType::Standard);
    let features = RwSignal::new(Vec::<String>::new());
    let payment_method = RwSignal::new(String::from("bank_transfer"));

    // preselect the tier's features once the offers arrive
    Effect::new(move |_| {
        let tier = package.get_untracked();
        features.set(offers.with(|all| offered_features(all, tier)));
    });

    let choose = move |tier: PackageType| {
        package.set(tier);
        features.set(offers.with(|all| offered_features(all, tier)));
    };

    let toggle = move |feature: String| {
        features.update(|list| {
            if let Some(pos) = list.iter().position(|f| f == &feature) {
                list.remove(pos);
            } else {
                list.push(feature);
            }
        });
    };

    let confirm = move |_| {
        on_confirm.run(PackageSelection {
            package_type: package.get(),
            features: features.get(),
            payment_method: Some(payment_method.get()),
        });
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal package">
                <h2>"Select package"</h2>
                <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Loading packages..."</p> }>
                    <div class="tiers">
                        {move || offers.get().into_iter().map(|offer| {
                            let tier = offer.package_type;
                            view! {
                                <button
                                    class="tier"
                                    class:active=move || package.get() == tier
                                    disabled=move || submitting.get()
                                    on:click=move |_| choose(tier)
                                >
                                    {tier.to_string()}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                    <ul class="features">
                        {move || {
                            let tier = package.get();
                            offers.with(|all| offered_features(all, tier)).into_iter().map(|feature| {
                                let checked = feature.clone();
                                let toggled = feature.clone();
                                view! {
                                    <li>
                                        <label>
                                            <input
                                                type="checkbox"
                                                prop:checked=move || features.with(|list| list.contains(&checked))
                                                on:change=move |_| toggle(toggled.clone())
                                            />
                                            {feature}
                                        </label>
                                    </li>
                                }
                            }).collect_view()
                        }}
                    </ul>
                </Show>
                <label class="field">
                    "Payment method"
                    <select on:change=move |ev| payment_method.set(event_target_value(&ev))>
                        <option value="bank_transfer">"Bank transfer"</option>
                        <option value="credit_card">"Credit card"</option>
                    </select>
                </label>
                <div class="modal-actions">
                    <button class="btn" disabled=move || submitting.get() on:click=move |_| on_cancel.run(())>
                        "Back"
                    </button>
                    <button
                        class="btn btn-primary"
                        disabled=move || submitting.get() || loading.get() || features.with(Vec::is_empty)
                        on:click=confirm
                    >
                        {move || if submitting.get() { "Submitting..." } else { "Buy license" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
