use crate::config::model::Config;
use crate::loader::DependencyLoader;
use crate::modal::{Key, ModalController, ModalTarget, OpenOutcome};
use crate::schedule::api::{fetch_after_settle, EventSource};
use crate::schedule::model::EventList;
use crate::view::grid::{CalendarLibrary, GridOptions};
use crate::view::DualView;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Named parts of the component's rendering scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountPoint {
    Grid,
    Table,
    Overlay,
}

/// How an attach ended. Failures leave every mount point empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    Rendered { events: usize },
    DependenciesFailed,
    FetchFailed,
    RenderFailed,
}

/// Whether a click should keep bubbling to the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stopped,
}

pub struct SpringTrainingCalendar {
    config: Config,
    loader: Arc<DependencyLoader>,
    source: Arc<dyn EventSource>,
    library: Arc<dyn CalendarLibrary>,
    views: Option<DualView>,
    modal: ModalController,
}

impl SpringTrainingCalendar {
    pub fn new(
        config: Config,
        loader: Arc<DependencyLoader>,
        source: Arc<dyn EventSource>,
        library: Arc<dyn CalendarLibrary>,
    ) -> Self {
        let modal = ModalController::new(config.modal_policy);

        Self {
            config,
            loader,
            source,
            library,
            views: None,
            modal,
        }
    }

    /// Loads the grid scripts, waits for them to settle, fetches the events and renders both
    /// views. Runs once; any failure is logged and the component stays empty.
    #[instrument(skip(self))]
    pub async fn attach(&mut self) -> Attachment {
        if let Err(err) = self
            .loader
            .load_chain(&self.config.dependency_scripts)
            .await
        {
            error!("Error loading grid scripts: {}", err);
            return Attachment::DependenciesFailed;
        }

        let events: EventList =
            match fetch_after_settle(self.source.as_ref(), self.config.settle_delay).await {
                Ok(events) => events.into(),
                Err(err) => {
                    error!("Error loading calendar data: {}", err);
                    return Attachment::FetchFailed;
                }
            };

        let options = GridOptions::for_season(&self.config.season);

        match DualView::render(events, options, self.library.as_ref()) {
            Ok(views) => {
                let events = views.events().len();
                self.views = Some(views);

                info!("Calendar attached with {} events", events);
                Attachment::Rendered { events }
            }
            Err(err) => {
                error!("Error rendering calendar: {}", err);
                Attachment::RenderFailed
            }
        }
    }

    pub fn views(&self) -> Option<&DualView> {
        self.views.as_ref()
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    /// Opens the modal for an event mounted on the grid. The click never reaches the
    /// library's own navigation.
    pub fn click_grid_event(&mut self, event: usize) -> Propagation {
        let Some(views) = &self.views else {
            return Propagation::Continue;
        };

        if !views.grid().is_mounted(event) {
            debug!("Event #{} is not on the grid", event);
            return Propagation::Continue;
        }

        if let Some(details) = views.event(event) {
            self.modal.open(event, details);
        }

        Propagation::Stopped
    }

    /// Opens the modal for the event shown in table row `row`.
    pub fn click_table_row(&mut self, row: usize) -> Option<OpenOutcome> {
        let views = self.views.as_ref()?;
        let index = views.table().row(row)?.event;
        let event = views.event(index)?;

        Some(self.modal.open(index, event))
    }

    pub fn click_modal(&mut self, target: ModalTarget) -> bool {
        self.modal.click(target)
    }

    pub fn press_key(&mut self, key: impl Into<Key>) -> bool {
        self.modal.press_key(&key.into())
    }

    pub fn mount(&self, mount_point: MountPoint) -> String {
        match mount_point {
            MountPoint::Grid => self
                .views
                .as_ref()
                .map(|views| views.grid().to_html())
                .unwrap_or_else(|| r#"<div id="calendar"></div>"#.to_string()),
            MountPoint::Table => self
                .views
                .as_ref()
                .map(|views| views.table().to_html())
                .unwrap_or_else(|| {
                    concat!(
                        r#"<table class="events-table"><thead><tr>"#,
                        "<th>Date</th><th>Description</th><th>Seats</th>",
                        r#"</tr></thead><tbody id="events-table-body"></tbody></table>"#
                    )
                    .to_string()
                }),
            MountPoint::Overlay => self.modal.to_html(),
        }
    }

    pub fn to_html(&self) -> String {
        [MountPoint::Grid, MountPoint::Table, MountPoint::Overlay]
            .map(|mount_point| self.mount(mount_point))
            .concat()
    }
}
