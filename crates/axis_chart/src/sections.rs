//! Category sections
//!
//! Splits the category axis into one equal slice per category. Sections back
//! bar placement, hover and selection hit-testing, and inline editing regions.

use crate::grid::GridGeometry;
use crate::options::Orientation;
use serde::Serialize;

/// The slice of the category axis owned by one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Section {
    pub index: usize,
    /// Leading edge along the category axis
    pub start: f64,
    pub size: f64,
}

impl Section {
    pub fn end(&self) -> f64 {
        self.start + self.size
    }

    pub fn center(&self) -> f64 {
        self.start + self.size / 2.0
    }

    /// Whether `coordinate` falls inside the section (leading edge included)
    pub fn contains(&self, coordinate: f64) -> bool {
        coordinate >= self.start && coordinate < self.end()
    }

    /// Sub-slot for one group of a grouped bar layout.
    ///
    /// The section is shared equally between `group_count` slots separated by
    /// `gap`. Returns `(start, size)`.
    pub fn group_slot(&self, group_index: usize, group_count: usize, gap: f64) -> (f64, f64) {
        if group_count == 0 {
            return (self.start, 0.0);
        }
        let gaps = gap * (group_count - 1) as f64;
        let size = ((self.size - gaps) / group_count as f64).max(0.0);
        (self.start + group_index as f64 * (size + gap), size)
    }
}

/// Split the grid's category axis into `marker_count` equal sections
pub fn partition(grid: &GridGeometry, marker_count: usize) -> Vec<Section> {
    if marker_count == 0 {
        return Vec::new();
    }
    let size = grid.category_span() / marker_count as f64;
    let origin = grid.category_origin();

    (0..marker_count)
        .map(|index| Section {
            index,
            start: origin + index as f64 * size,
            size,
        })
        .collect()
}

/// Number of grid lines bounding `marker_count` sections (one more than the sections)
pub fn boundary_count(marker_count: usize) -> usize {
    if marker_count == 0 {
        0
    } else {
        marker_count + 1
    }
}

/// Index of the section under `coordinate`, if any.
///
/// The trailing edge of the last section still belongs to it.
pub fn section_at(sections: &[Section], coordinate: f64) -> Option<usize> {
    if let Some(found) = sections.iter().find(|s| s.contains(coordinate)) {
        return Some(found.index);
    }
    sections
        .last()
        .filter(|last| coordinate == last.end())
        .map(|last| last.index)
}

/// Project a pixel position onto the category axis of `grid`
pub fn category_coordinate(grid: &GridGeometry, x: f64, y: f64) -> f64 {
    match grid.orientation {
        Orientation::Vertical => x,
        Orientation::Horizontal => y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{resolve_grid, GridConfig, Insets};

    fn grid(orientation: Orientation) -> GridGeometry {
        let mut config = GridConfig::new(420.0, 220.0, 4, 6);
        config.orientation = orientation;
        config.base_margins = Insets::uniform(10.0);
        resolve_grid(&config)
    }

    #[test]
    fn test_partition_vertical() {
        let sections = partition(&grid(Orientation::Vertical), 4);

        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0].start, 10.0);
        assert_eq!(sections[0].size, 100.0);
        assert_eq!(sections[3].end(), 410.0);
        assert_eq!(sections[1].center(), 160.0);
    }

    #[test]
    fn test_partition_horizontal_runs_down() {
        let sections = partition(&grid(Orientation::Horizontal), 4);

        assert_eq!(sections[0].start, 10.0);
        assert_eq!(sections[0].size, 50.0);
        assert_eq!(sections[3].end(), 210.0);
    }

    #[test]
    fn test_fence_post() {
        for n in 1..8 {
            let sections = partition(&grid(Orientation::Vertical), n);
            assert_eq!(sections.len(), n);
            assert_eq!(boundary_count(n), n + 1);
        }
        assert!(partition(&grid(Orientation::Vertical), 0).is_empty());
        assert_eq!(boundary_count(0), 0);
    }

    #[test]
    fn test_section_at() {
        let grid = grid(Orientation::Vertical);
        let sections = partition(&grid, 4);

        assert_eq!(section_at(&sections, 10.0), Some(0));
        assert_eq!(section_at(&sections, 109.9), Some(0));
        assert_eq!(section_at(&sections, 110.0), Some(1));
        assert_eq!(section_at(&sections, 410.0), Some(3));
        assert_eq!(section_at(&sections, 5.0), None);
        assert_eq!(section_at(&sections, 411.0), None);
        assert_eq!(section_at(&sections, category_coordinate(&grid, 250.0, 3.0)), Some(2));
    }

    #[test]
    fn test_group_slots() {
        let section = Section {
            index: 0,
            start: 10.0,
            size: 100.0,
        };

        assert_eq!(section.group_slot(0, 3, 5.0), (10.0, 30.0));
        assert_eq!(section.group_slot(1, 3, 5.0), (45.0, 30.0));
        assert_eq!(section.group_slot(2, 3, 5.0), (80.0, 30.0));
        assert_eq!(section.group_slot(0, 1, 5.0), (10.0, 100.0));
        assert_eq!(section.group_slot(0, 0, 5.0), (10.0, 0.0));
    }
}
