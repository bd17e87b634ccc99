use eframe::egui::{Pos2, Ui};

use super::super::ViewModel;

impl ViewModel {
    /// Topmost bubble under the pointer, by smallest center distance.
    pub(in crate::app) fn hovered_index(
        ui: &Ui,
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        screen_positions
            .iter()
            .zip(screen_radii)
            .enumerate()
            .filter_map(|(index, (position, radius))| {
                let distance = position.distance(pointer);
                (distance <= *radius).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _distance)| index)
    }

    /// Bubbles matching the current fuzzy search query, as a mask over
    /// record indices. Cached until the query changes.
    pub(in crate::app) fn search_mask(&mut self) -> Option<&[bool]> {
        use fuzzy_matcher::FuzzyMatcher;
        use fuzzy_matcher::skim::SkimMatcherV2;

        let query = self.search.trim().to_owned();
        if query.is_empty() {
            self.search_cache = None;
            return None;
        }

        let stale = self
            .search_cache
            .as_ref()
            .is_none_or(|cache| cache.query != query);
        if stale {
            let matcher = SkimMatcherV2::default();
            let mask = self
                .dataset
                .records
                .iter()
                .map(|record| {
                    matcher
                        .fuzzy_match(&record.name, &query)
                        .or_else(|| {
                            matcher.fuzzy_match(
                                &record.name.to_ascii_lowercase(),
                                &query.to_ascii_lowercase(),
                            )
                        })
                        .is_some()
                })
                .collect();
            self.search_cache = Some(super::super::SearchMatchCache { query, mask });
        }

        self.search_cache.as_ref().map(|cache| cache.mask.as_slice())
    }
}
