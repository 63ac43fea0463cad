use crate::display::{compare_passes, format_row, Column, DisplayRow, SortState};
use crate::horizon::{HorizonPlot, HorizonProjector};
use crate::predict::{normalize, PassProvider, ProviderError, TrackedSatellite};
use crate::quality::ClassifiedPass;
use crate::timezone::TimeZoneConverter;

/// Fetch, normalize and classify the passes of one satellite.
pub fn refresh_satellite<P: PassProvider>(
    provider: &P,
    satellite: &TrackedSatellite,
    converter: &TimeZoneConverter,
) -> Result<Vec<ClassifiedPass>, ProviderError> {
    let entries = provider.fetch_passes(satellite.norad_id)?;
    let records = normalize(&satellite.id, &entries);
    if records.len() < entries.len() {
        log::debug!(
            "{}: kept {} of {} pass entries",
            satellite.name,
            records.len(),
            entries.len()
        );
    }
    Ok(records
        .into_iter()
        .map(|record| ClassifiedPass::new(record, converter))
        .collect())
}

/// A satellite that contributed nothing to a refresh
#[derive(Debug)]
pub struct SatelliteWarning {
    pub satellite: String,
    pub error: ProviderError,
}

#[derive(Debug, Default)]
pub struct RefreshSummary {
    pub pass_count: usize,
    pub warnings: Vec<SatelliteWarning>,
}

/// State of one display session: the current result set, its display
/// order, per-column sort direction and the plot slot.
pub struct Session<P: PassProvider> {
    provider: P,
    satellites: Vec<TrackedSatellite>,
    converter: TimeZoneConverter,
    projector: HorizonProjector,
    passes: Vec<ClassifiedPass>,
    rows: Vec<DisplayRow>,
    /// Display order as indices into `passes`/`rows`
    order: Vec<usize>,
    sort_state: SortState,
    plot: Option<HorizonPlot>,
}

impl<P: PassProvider> Session<P> {
    pub fn new(provider: P, satellites: Vec<TrackedSatellite>, converter: TimeZoneConverter) -> Self {
        Self {
            provider,
            satellites,
            converter,
            projector: HorizonProjector::default(),
            passes: Vec::new(),
            rows: Vec::new(),
            order: Vec::new(),
            sort_state: SortState::new(),
            plot: None,
        }
    }

    pub fn with_projector(mut self, projector: HorizonProjector) -> Self {
        self.projector = projector;
        self
    }

    pub fn satellites(&self) -> &[TrackedSatellite] {
        &self.satellites
    }

    pub fn converter(&self) -> &TimeZoneConverter {
        &self.converter
    }

    /// Query every tracked satellite in turn and replace the result set.
    /// A failing satellite is reported and skipped; the rest still load.
    pub fn refresh(&mut self) -> RefreshSummary {
        let mut passes = Vec::new();
        let mut warnings = Vec::new();

        for satellite in &self.satellites {
            match refresh_satellite(&self.provider, satellite, &self.converter) {
                Ok(found) => {
                    log::debug!("{}: {} passes", satellite.name, found.len());
                    passes.extend(found);
                }
                Err(error) => {
                    log::warn!("{}: {}", satellite.name, error);
                    warnings.push(SatelliteWarning {
                        satellite: satellite.name.clone(),
                        error,
                    });
                }
            }
        }

        self.replace_results(passes);
        log::info!(
            "Loaded {} passes for {} satellites",
            self.passes.len(),
            self.satellites.len() - warnings.len()
        );

        RefreshSummary {
            pass_count: self.passes.len(),
            warnings,
        }
    }

    fn replace_results(&mut self, passes: Vec<ClassifiedPass>) {
        self.rows = passes
            .iter()
            .map(|pass| format_row(pass, &self.converter))
            .collect();
        self.order = (0..passes.len()).collect();
        self.passes = passes;
    }

    pub fn passes(&self) -> &[ClassifiedPass] {
        &self.passes
    }

    /// Rows in display order
    pub fn rows(&self) -> Vec<&DisplayRow> {
        self.order.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Passes in display order, paired with their rows
    pub fn table(&self) -> Vec<(&ClassifiedPass, &DisplayRow)> {
        self.order
            .iter()
            .map(|&i| (&self.passes[i], &self.rows[i]))
            .collect()
    }

    /// Header click: sort by the column's display text, toggling direction.
    /// Returns whether the sort was descending.
    pub fn sort_column(&mut self, column: Column) -> bool {
        let rows = &self.rows;
        self.sort_state
            .sort_rows(&column.to_string(), &mut self.order, |&i| rows[i].cell(column))
    }

    /// Sort by the typed pass fields behind a column
    pub fn order_by(&mut self, column: Column, descending: bool) {
        let passes = &self.passes;
        self.order.sort_by(|&a, &b| {
            let ord = compare_passes(column, &passes[a], &passes[b]);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
    }

    /// Select the row at a display position and plot its pass group.
    ///
    /// Passes sharing the row's satellite and start cell are drawn together.
    /// Returns `None` for an out-of-range position, leaving the current plot.
    pub fn select_row(&mut self, position: usize) -> Option<&HorizonPlot> {
        let selected = *self.order.get(position)?;
        let key = (
            &self.rows[selected].satellite,
            &self.rows[selected].start_time,
        );

        let group: Vec<_> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| (&row.satellite, &row.start_time) == key)
            .map(|(i, _)| &self.passes[i].record)
            .collect();

        let satellite_id = &self.passes[selected].record.satellite_id;
        let name = self
            .satellites
            .iter()
            .find(|s| &s.id == satellite_id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| satellite_id.clone());

        let plot = HorizonPlot::build(&name, &group, &self.projector);
        self.show_plot(plot);
        self.plot.as_ref()
    }

    fn show_plot(&mut self, plot: HorizonPlot) {
        if let Some(previous) = self.plot.take() {
            previous.teardown();
        }
        self.plot = Some(plot);
    }

    pub fn current_plot(&self) -> Option<&HorizonPlot> {
        self.plot.as_ref()
    }
}
