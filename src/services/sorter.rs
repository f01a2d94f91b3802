use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::{
    models::{Recommendation, SortOrder},
    services::recommendations::RecommendationSet,
};

/// A recommendation set together with all four of its orderings.
///
/// Each view is a permutation of positions into the set, so switching
/// between views never copies or refetches anything.
#[derive(Debug, Clone)]
pub struct SortedViews {
    set: RecommendationSet,
    views: [Vec<usize>; 4],
}

impl SortedViews {
    pub fn build(set: RecommendationSet) -> Self {
        let items = set.items();
        let positions: Vec<usize> = (0..items.len()).collect();

        // Stable sorts: equal keys keep API order.
        let mut votes_desc = positions.clone();
        votes_desc.sort_by(|&a, &b| items[b].votes.cmp(&items[a].votes));

        let mut votes_asc = positions.clone();
        votes_asc.sort_by(|&a, &b| items[a].votes.cmp(&items[b].votes));

        let keys: Vec<String> = items.iter().map(|r| title_key(&r.entry.title)).collect();
        let mut title_asc = positions;
        title_asc.sort_by(|&a, &b| {
            keys[a]
                .cmp(&keys[b])
                .then_with(|| items[a].entry.title.cmp(&items[b].entry.title))
        });

        let title_desc: Vec<usize> = title_asc.iter().rev().copied().collect();

        let mut views: [Vec<usize>; 4] = Default::default();
        views[SortOrder::VotesDescending.index()] = votes_desc;
        views[SortOrder::VotesAscending.index()] = votes_asc;
        views[SortOrder::TitleAscending.index()] = title_asc;
        views[SortOrder::TitleDescending.index()] = title_desc;

        Self { set, views }
    }

    /// Recommendations in the requested order
    pub fn view(&self, order: SortOrder) -> impl Iterator<Item = &Recommendation> + '_ {
        let items = self.set.items();
        self.views[order.index()].iter().map(move |&i| &items[i])
    }

    pub fn set(&self) -> &RecommendationSet {
        &self.set
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

/// Primary title sort key: accents and case folded away, so "Élan" files
/// under E and "Ōkami" under O. Ties fall back to the exact string.
fn title_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
