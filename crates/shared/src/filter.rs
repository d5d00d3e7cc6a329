use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{MarkerCategory, MarkerEntity};

/// Which markers to show. Empty sets match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkerFilter {
    pub search: String,
    pub categories: HashSet<MarkerCategory>,
    pub districts: HashSet<String>,
}

impl MarkerFilter {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.categories.is_empty() && self.districts.is_empty()
    }

    pub fn toggle_category(&mut self, category: MarkerCategory) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    pub fn toggle_district(&mut self, district: &str) {
        if !self.districts.remove(district) {
            self.districts.insert(district.to_string());
        }
    }

    pub fn matches(&self, marker: &MarkerEntity) -> bool {
        let query = self.search.trim().to_lowercase();
        if !query.is_empty() {
            let hit = [
                Some(marker.name_th.as_str()),
                marker.name_en.as_deref(),
                Some(marker.description_th.as_str()),
                marker.description_en.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }

        if !self.categories.is_empty() && !self.categories.contains(&marker.category) {
            return false;
        }

        if !self.districts.is_empty() {
            match &marker.sub_district {
                Some(d) if self.districts.contains(d) => {}
                _ => return false,
            }
        }

        true
    }

    pub fn apply(&self, markers: &[MarkerEntity]) -> Vec<MarkerEntity> {
        markers.iter().filter(|m| self.matches(m)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(id: &str, name: &str, category: MarkerCategory, district: Option<&str>) -> MarkerEntity {
        MarkerEntity {
            id: id.to_string(),
            normalized_x: 50.0,
            normalized_y: 50.0,
            icon_ref: String::new(),
            name_th: name.to_string(),
            name_en: Some(format!("{name} English")),
            description_th: "ข้าวมันไก่".to_string(),
            description_en: Some("Chicken rice".to_string()),
            category,
            sub_district: district.map(str::to_string),
        }
    }

    fn sample() -> Vec<MarkerEntity> {
        vec![
            marker("1", "Kopi", MarkerCategory::Cafe, Some("Talat Yai")),
            marker("2", "Sunset", MarkerCategory::Bar, Some("Wichit")),
            marker("3", "Lotus", MarkerCategory::ThaiRestaurant, None),
        ]
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = MarkerFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&sample()).len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let filter = MarkerFilter {
            search: "  SUNSET english ".into(),
            ..Default::default()
        };
        let hits = filter.apply(&sample());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");

        let filter = MarkerFilter {
            search: "chicken".into(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&sample()).len(), 3);
    }

    #[test]
    fn test_category_and_district_sets() {
        let mut filter = MarkerFilter::default();
        filter.toggle_category(MarkerCategory::Cafe);
        filter.toggle_category(MarkerCategory::Bar);
        assert_eq!(filter.apply(&sample()).len(), 2);

        filter.toggle_district("Wichit");
        let hits = filter.apply(&sample());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");

        filter.toggle_district("Wichit");
        assert!(filter.districts.is_empty());
    }

    #[test]
    fn test_marker_without_district_fails_district_filter() {
        let mut filter = MarkerFilter::default();
        filter.toggle_district("Talat Yai");
        let hits = filter.apply(&sample());
        assert_eq!(hits.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(), vec!["1"]);
    }
}
