//! Heuristic table detection over positioned text cells.
//!
//! No ruling-line or ML model input: tables are inferred from text
//! alignment alone. Cells are clustered into rows by vertical
//! alignment, consecutive rows with agreeing column structure form a
//! table region, and each region's cells are assigned to columns by
//! horizontal alignment. Detection is best-effort; a page that does
//! not look tabular simply yields no regions.

use crate::geometry::Rect;
use crate::model::{TableRegion, TextCell};
use crate::source::TableDetector;

/// Tuning knobs for [`HeuristicTableDetector`].
#[derive(Clone, Debug)]
pub struct TableDetectorConfig {
    /// Cells within this vertical distance (points) of a row's anchor
    /// belong to that row.
    pub row_tolerance: f64,
    /// Cells within this horizontal distance (points) of a column
    /// center belong to that column.
    pub col_tolerance: f64,
    /// Minimum total cells for a region to count as a table.
    pub min_cells: usize,
    /// Minimum rows for a region to count as a table.
    pub min_rows: usize,
    /// Minimum cells per row for the row to join a region.
    pub min_cols: usize,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            row_tolerance: 5.0,
            col_tolerance: 10.0,
            min_cells: 6,
            min_rows: 2,
            min_cols: 2,
        }
    }
}

/// Alignment-based table detector.
#[derive(Clone, Debug, Default)]
pub struct HeuristicTableDetector {
    config: TableDetectorConfig,
}

impl HeuristicTableDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Cluster cells into rows by center-y alignment, each row sorted
    /// left to right, rows sorted top to bottom.
    fn cluster_rows<'a>(&self, cells: &'a [TextCell]) -> Vec<Vec<&'a TextCell>> {
        let mut rows: Vec<Vec<&TextCell>> = Vec::new();

        for cell in cells {
            let cy = center_y(cell);
            let found = rows.iter_mut().find(|row| {
                row.first()
                    .is_some_and(|anchor| (cy - center_y(anchor)).abs() <= self.config.row_tolerance)
            });
            match found {
                Some(row) => row.push(cell),
                None => rows.push(vec![cell]),
            }
        }

        for row in &mut rows {
            row.sort_by(|a, b| a.rect.x0.total_cmp(&b.rect.x0));
        }
        rows.sort_by(|a, b| {
            let ay = a.first().map_or(0.0, |c| c.rect.y0);
            let by = b.first().map_or(0.0, |c| c.rect.y0);
            ay.total_cmp(&by)
        });
        rows
    }

    /// Runs of consecutive rows with agreeing column counts. A row
    /// joins the current run when its cell count is within one of the
    /// run's first row; short rows close the run.
    fn find_regions<'a>(&self, rows: Vec<Vec<&'a TextCell>>) -> Vec<Vec<Vec<&'a TextCell>>> {
        let mut regions = Vec::new();
        let mut current: Vec<Vec<&TextCell>> = Vec::new();
        let mut expected: Option<usize> = None;

        for row in rows {
            if row.len() < self.config.min_cols {
                self.close_region(&mut regions, &mut current);
                expected = None;
                continue;
            }
            match expected {
                Some(n) if row.len().abs_diff(n) <= 1 => current.push(row),
                _ => {
                    self.close_region(&mut regions, &mut current);
                    expected = Some(row.len());
                    current.push(row);
                }
            }
        }
        self.close_region(&mut regions, &mut current);
        regions
    }

    fn close_region<'a>(
        &self,
        regions: &mut Vec<Vec<Vec<&'a TextCell>>>,
        current: &mut Vec<Vec<&'a TextCell>>,
    ) {
        let cell_count: usize = current.iter().map(Vec::len).sum();
        if current.len() >= self.config.min_rows && cell_count >= self.config.min_cells {
            regions.push(std::mem::take(current));
        } else {
            current.clear();
        }
    }

    /// Assign a region's cells to columns and emit its row matrix.
    /// Column centers come from the widest row; a row slot with no
    /// aligned cell stays `None`.
    fn build_table(&self, region: &[Vec<&TextCell>]) -> Option<TableRegion> {
        let widest = region.iter().max_by_key(|row| row.len())?;
        let centers: Vec<f64> = widest.iter().map(|c| center_x(c)).collect();
        if centers.is_empty() {
            return None;
        }

        let mut rows = Vec::with_capacity(region.len());
        let mut bounds: Option<Rect> = None;

        for row in region {
            let mut cells: Vec<Option<String>> = vec![None; centers.len()];
            for cell in row {
                bounds = Some(match bounds {
                    Some(b) => union(b, cell.rect),
                    None => cell.rect,
                });
                let cx = center_x(cell);
                let (col, distance) = centers
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (i, (cx - c).abs()))
                    .min_by(|a, b| a.1.total_cmp(&b.1))?;
                // Misaligned stragglers still land in the nearest
                // column unless they are wildly off.
                if distance > self.config.col_tolerance && cells[col].is_some() {
                    continue;
                }
                match &mut cells[col] {
                    Some(existing) => {
                        existing.push(' ');
                        existing.push_str(&cell.text);
                    }
                    slot => *slot = Some(cell.text.clone()),
                }
            }
            rows.push(cells);
        }

        Some(TableRegion {
            rect: bounds?,
            rows,
        })
    }
}

impl TableDetector for HeuristicTableDetector {
    fn detect_tables(&self, cells: &[TextCell]) -> Vec<TableRegion> {
        if cells.len() < self.config.min_cells {
            return Vec::new();
        }
        let rows = self.cluster_rows(cells);
        self.find_regions(rows)
            .iter()
            .filter_map(|region| self.build_table(region))
            .collect()
    }
}

fn center_x(cell: &TextCell) -> f64 {
    (cell.rect.x0 + cell.rect.x1) / 2.0
}

fn center_y(cell: &TextCell) -> f64 {
    (cell.rect.y0 + cell.rect.y1) / 2.0
}

fn union(a: Rect, b: Rect) -> Rect {
    Rect::new(
        a.x0.min(b.x0),
        a.y0.min(b.y0),
        a.x1.max(b.x1),
        a.y1.max(b.y1),
    )
}
