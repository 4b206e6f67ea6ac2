//! License Table Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use license_core::{
    InfoModal as InfoState, LicenseId, LicenseInfo, LicenseItem, LicenseScreen, Notification,
    PackageOffer, PackageSelection, ProjectId, ProjectOption, ToastList,
};

use crate::api::DashboardHandle;
use crate::components::{
    AssignProjectModal, ConfirmDialog, InfoModal, SelectPackageModal, StatusPill, Toasts,
    push_toast,
};

const PAGE_SIZES: [usize; 3] = [10, 20, 50];

#[component]
pub fn LicensesPage() -> impl IntoView {
    let dashboard = expect_context::<DashboardHandle>();

    let screen = RwSignal::new(LicenseScreen::new());
    let items = RwSignal::new(Vec::<LicenseItem>::new());
    let loading = RwSignal::new(true);
    let toasts = RwSignal::new(ToastList::new());
    let info = RwSignal::new(None::<LicenseInfo>);
    let info_loading = RwSignal::new(false);
    let projects = RwSignal::new(Vec::<ProjectOption>::new());
    let projects_loading = RwSignal::new(false);
    let offers = RwSignal::new(Vec::<PackageOffer>::new());
    let offers_loading = RwSignal::new(false);
    let submitting = RwSignal::new(false);

    let report = move |message: String| push_toast(toasts, Notification::error(message));
    let show_queued = move |queued: Vec<Notification>| {
        for notification in queued {
            push_toast(toasts, notification);
        }
    };

    let refresh = move || {
        let dashboard = match dashboard.get() {
            Ok(dashboard) => dashboard,
            Err(message) => {
                loading.set(false);
                report(message);
                return;
            }
        };
        loading.set(true);
        spawn_local(async move {
            match dashboard.licenses().await {
                Ok(list) => items.set(list),
                Err(err) => report(err.user_message("Failed to load licenses")),
            }
            loading.set(false);
        });
    };
    refresh();

    // ── Row actions ──────────────────────────────────────────────────

    let accept = move || {
        let mut accepted = None;
        screen.update(|s| accepted = s.accept_confirmation());
        let Some(action) = accepted else {
            return;
        };
        let Ok(dashboard) = dashboard.get() else {
            screen.update(|s| s.finish_action(&action.license_id));
            return;
        };
        spawn_local(async move {
            let outcome = dashboard.run_action(&action).await;
            show_queued(dashboard.drain_notifications());
            screen.update(|s| s.finish_action(&action.license_id));
            if outcome.is_success() {
                refresh();
            }
        });
    };

    let open_info = move |id: LicenseId| {
        screen.update(|s| s.open_info(Some(id.clone())));
        let Ok(dashboard) = dashboard.get() else {
            return;
        };
        info.set(None);
        info_loading.set(true);
        spawn_local(async move {
            let detail = dashboard.license_info_or_fallback(Some(&id)).await;
            show_queued(dashboard.drain_notifications());
            info.set(Some(detail));
            info_loading.set(false);
        });
    };

    let close_info = move || {
        screen.update(LicenseScreen::close_info);
        info.set(None);
    };

    // ── Buy flow ─────────────────────────────────────────────────────

    let start_buy = move |_| {
        let mut started = false;
        screen.update(|s| started = s.buy.start().is_ok());
        if !started {
            return;
        }
        let Ok(dashboard) = dashboard.get() else {
            return;
        };
        projects_loading.set(true);
        spawn_local(async move {
            match dashboard.project_options().await {
                Ok(options) => projects.set(options),
                Err(err) => report(err.user_message("Failed to load projects")),
            }
            projects_loading.set(false);
        });
    };

    let select_project = move |id: ProjectId| {
        screen.update(|s| {
            if let Err(err) = s.buy.select_project(id) {
                report(err.user_message());
            }
        });
    };

    let proceed = move || {
        let mut proceeded = false;
        screen.update(|s| match s.buy.proceed() {
            Ok(()) => proceeded = true,
            Err(err) => report(err.user_message()),
        });
        if !proceeded {
            return;
        }
        let Ok(dashboard) = dashboard.get() else {
            return;
        };
        offers_loading.set(true);
        spawn_local(async move {
            match dashboard.package_offers().await {
                Ok(list) => offers.set(list),
                Err(err) => report(err.user_message("Failed to load packages")),
            }
            offers_loading.set(false);
        });
    };

    let cancel_buy = move || screen.update(|s| s.buy.cancel());

    // the package modal stays up until the create call settles; a failure
    // leaves it open for another attempt
    let purchase = move |selection: PackageSelection| {
        if submitting.get_untracked() {
            return;
        }
        let order = match screen.with_untracked(|s| s.buy.pending_order(selection)) {
            Ok(order) => order,
            Err(err) => {
                report(err.user_message());
                return;
            }
        };
        let dashboard = match dashboard.get() {
            Ok(dashboard) => dashboard,
            Err(message) => {
                report(message);
                return;
            }
        };
        submitting.set(true);
        spawn_local(async move {
            let outcome = dashboard.create_license(order).await;
            show_queued(dashboard.drain_notifications());
            submitting.set(false);
            if outcome.is_success() {
                screen.update(|s| {
                    let _ = s.buy.complete();
                });
                refresh();
            }
        });
    };

    // ── Derived views ────────────────────────────────────────────────

    let rows = move || {
        items.with(|list| {
            screen.with(|s| s.visible_rows(list).into_iter().cloned().collect::<Vec<_>>())
        })
    };
    let page_count = move || items.with(|list| screen.with(|s| s.page_count(list)));
    let cur_page = move || screen.with(|s| s.pagination().cur_page());
    let total = move || items.with(|list| screen.with(|s| s.filtered(list).len()));

    view! {
        <div class="licenses">
            <header class="toolbar">
                <h1>"Licenses"</h1>
                <input
                    type="search"
                    placeholder="Search project"
                    prop:value=move || screen.with(|s| s.search().to_string())
                    on:input=move |ev| screen.update(|s| s.set_search(event_target_value(&ev)))
                />
                <button class="btn btn-primary" on:click=start_buy>"Buy new license"</button>
            </header>

            <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Loading licenses..."</p> }>
                <table class="license-table">
                    <thead>
                        <tr>
                            <th>"Project"</th>
                            <th>"Package"</th>
                            <th>"Order no."</th>
                            <th>"Purchase date"</th>
                            <th>"Status"</th>
                            <th>"Action"</th>
                            <th>"Info"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=rows
                            key=|item| (item.id.clone(), item.status)
                            children=move |item: LicenseItem| {
                                let action = item.action();
                                let pending_id = item.id.clone();
                                let info_id = item.id.clone();
                                let row = item.clone();
                                view! {
                                    <tr>
                                        <td>{item.project_name}</td>
                                        <td>{item.package_name.to_string()}</td>
                                        <td>{item.order_no}</td>
                                        <td>{item.purchase_date}</td>
                                        <td><StatusPill status=item.status /></td>
                                        <td class="row-action">
                                            <button
                                                class="btn btn-small"
                                                disabled=move || screen.with(|s| s.is_pending(&pending_id))
                                                on:click=move |_| screen.update(|s| {
                                                    if let Err(err) = s.request_action(&row) {
                                                        report(err.user_message());
                                                    }
                                                })
                                            >
                                                {action.label()}
                                            </button>
                                        </td>
                                        <td class="row-info">
                                            <button class="btn-icon" title="License information" on:click=move |_| open_info(info_id.clone())>
                                                "ⓘ"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>

                <footer class="pagination">
                    <span>{move || format!("{} licenses", total())}</span>
                    <select on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                            screen.update(|s| {
                                if let Err(err) = s.pagination_mut().set_per_page(size) {
                                    report(err.user_message());
                                }
                            });
                        }
                    }>
                        {PAGE_SIZES.into_iter().map(|size| view! {
                            <option value=size.to_string()>{format!("{size} / page")}</option>
                        }).collect_view()}
                    </select>
                    <button class="btn" disabled=move || cur_page() <= 1 on:click=move |_| screen.update(|s| s.pagination_mut().prev())>
                        "‹"
                    </button>
                    <span>{move || format!("Page {} of {}", cur_page(), page_count())}</span>
                    <button
                        class="btn"
                        disabled=move || cur_page() >= page_count()
                        on:click=move |_| {
                            let total = total();
                            screen.update(|s| s.pagination_mut().next(total));
                        }
                    >
                        "›"
                    </button>
                </footer>
            </Show>

            <ConfirmDialog
                request=Signal::derive(move || screen.with(|s| s.confirmation().cloned()))
                on_accept=accept
                on_cancel=move || screen.update(LicenseScreen::cancel_confirmation)
            />

            <Show when=move || screen.with(|s| matches!(s.info(), InfoState::Open(_)))>
                <InfoModal info=info loading=info_loading on_close=close_info />
            </Show>

            <Show when=move || screen.with(|s| s.buy.is_assigning())>
                <AssignProjectModal
                    options=projects
                    loading=projects_loading
                    selected=Signal::derive(move || screen.with(|s| s.buy.selected_project().cloned()))
                    on_select=Callback::new(select_project)
                    on_continue=proceed
                    on_cancel=cancel_buy
                />
            </Show>

            <Show when=move || screen.with(|s| s.buy.is_selecting_package())>
                <SelectPackageModal
                    offers=offers
                    loading=offers_loading
                    submitting=submitting
                    on_confirm=Callback::new(purchase)
                    on_cancel=cancel_buy
                />
            </Show>

            <Toasts toasts=toasts />
        </div>
    }
}
