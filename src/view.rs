pub mod grid;
pub mod table;

use crate::schedule::model::{Event, EventList};
use grid::{CalendarLibrary, GridError, GridOptions, GridView};
use table::TableView;
use tracing::info;

/// Grid and table projected from the same event list.
#[derive(Debug, Clone)]
pub struct DualView {
    events: EventList,
    grid: GridView,
    table: TableView,
}

impl DualView {
    /// Mounts the grid first; if the library fails the table isn't built either.
    #[tracing::instrument(skip_all, fields(events = events.len()))]
    pub fn render(
        events: EventList,
        options: GridOptions,
        library: &dyn CalendarLibrary,
    ) -> Result<Self, GridError> {
        let grid = GridView::mount(options, &events, library)?;
        let table = TableView::project(&events);

        info!(
            "Rendered {} grid events and {} table rows",
            grid.mounted().count(),
            table.rows().len()
        );

        Ok(Self {
            events,
            grid,
            table,
        })
    }

    pub fn events(&self) -> &EventList {
        &self.events
    }

    pub fn event(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    pub fn grid(&self) -> &GridView {
        &self.grid
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }
}
